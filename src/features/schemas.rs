use std::fmt;

use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnError, DisplayFromStr, serde_as};

pub const DEFAULT_PAGE_INDEX: u32 = 0;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 2000;

#[derive(Serialize, Clone, Copy, PartialEq, Eq, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    #[default]
    Id,
    Name,
    Price,
    CreatedAt,
}

impl SortKey {
    pub fn column(self) -> &'static str {
        match self {
            SortKey::Id => "id",
            SortKey::Name => "name",
            SortKey::Price => "price",
            SortKey::CreatedAt => "created_at",
        }
    }

    /// Field name as written in the `sort` query parameter.
    pub fn param(self) -> &'static str {
        match self {
            SortKey::Id => "id",
            SortKey::Name => "name",
            SortKey::Price => "price",
            SortKey::CreatedAt => "createdAt",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "id" => Some(SortKey::Id),
            "name" => Some(SortKey::Name),
            "price" => Some(SortKey::Price),
            "createdAt" | "created_at" => Some(SortKey::CreatedAt),
            _ => None,
        }
    }
}

#[derive(Serialize, Clone, Copy, PartialEq, Eq, Default, Debug)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn sql(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }

    pub fn param(self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

#[derive(Serialize, Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct PageSort {
    pub key: SortKey,
    pub direction: Direction,
}

impl PageSort {
    /// Parses `field[,asc|desc]`. Unknown fields yield `None`, unknown directions ascend.
    pub fn parse(value: &str) -> Option<Self> {
        let mut parts = value.split(',').map(str::trim);
        let key = SortKey::parse(parts.next()?)?;
        let direction = match parts.next() {
            Some(direction) if direction.eq_ignore_ascii_case("desc") => Direction::Desc,
            _ => Direction::Asc,
        };

        Some(Self { key, direction })
    }
}

/// Formats back into the `sort` parameter, so `parse(&sort.to_string())` yields `sort`.
impl fmt::Display for PageSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.key.param(), self.direction.param())
    }
}

/// Explicit zero-based page request handed to the repositories.
#[derive(Serialize, Clone, Copy, PartialEq, Eq, Debug)]
pub struct PageRequest {
    pub index: u32,
    pub size: u32,
    pub sort: PageSort,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            index: DEFAULT_PAGE_INDEX,
            size: DEFAULT_PAGE_SIZE,
            sort: PageSort::default(),
        }
    }
}

impl PageRequest {
    pub fn new(index: u32, size: u32) -> Self {
        Self {
            index,
            size: size.clamp(1, MAX_PAGE_SIZE),
            sort: PageSort::default(),
        }
    }

    pub fn with_sort(mut self, sort: PageSort) -> Self {
        self.sort = sort;
        self
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.index) * i64::from(self.size)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }
}

/// Raw pagination query parameters (`page`, `size`, `sort`).
///
/// Anything that does not parse is dropped instead of rejected.
#[serde_as]
#[derive(Deserialize, Default, Debug)]
#[serde(default)]
pub struct Pagination {
    #[serde_as(as = "DefaultOnError<Option<DisplayFromStr>>")]
    pub page: Option<i64>,
    #[serde_as(as = "DefaultOnError<Option<DisplayFromStr>>")]
    pub size: Option<i64>,
    pub sort: Option<String>,
}

impl Pagination {
    pub fn page_request(&self) -> PageRequest {
        let index = self
            .page
            .map(|page| u32::try_from(page.max(0)).unwrap_or(u32::MAX))
            .unwrap_or(DEFAULT_PAGE_INDEX);

        let size = match self.size {
            Some(size) if size >= 1 => u32::try_from(size)
                .unwrap_or(MAX_PAGE_SIZE)
                .min(MAX_PAGE_SIZE),
            _ => DEFAULT_PAGE_SIZE,
        };

        let sort = self
            .sort
            .as_deref()
            .and_then(PageSort::parse)
            .unwrap_or_default();

        PageRequest { index, size, sort }
    }
}

/// One bounded slice of results plus the metadata pagination links need.
#[derive(Serialize, Clone, PartialEq, Eq, Debug)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total: i64,
    pub index: u32,
    pub size: u32,
    pub total_pages: u32,
    pub has_previous: bool,
    pub has_next: bool,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, total: i64, page_request: &PageRequest) -> Self {
        let size = i64::from(page_request.size.max(1));
        let total_pages = u32::try_from((total.max(0) + size - 1) / size).unwrap_or(u32::MAX);
        let index = page_request.index;

        Self {
            content,
            total,
            index,
            size: page_request.size,
            total_pages,
            has_previous: index > 0,
            has_next: index.saturating_add(1) < total_pages,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pagination(page: Option<i64>, size: Option<i64>, sort: Option<&str>) -> Pagination {
        Pagination {
            page,
            size,
            sort: sort.map(str::to_string),
        }
    }

    #[test]
    fn defaults_to_first_page_of_ten_sorted_by_id() {
        let request = Pagination::default().page_request();
        assert_eq!(request, PageRequest::default());
        assert_eq!(request.index, 0);
        assert_eq!(request.size, 10);
        assert_eq!(request.sort.key, SortKey::Id);
        assert_eq!(request.sort.direction, Direction::Asc);
    }

    #[test]
    fn negative_page_is_clamped_to_zero() {
        assert_eq!(pagination(Some(-3), None, None).page_request().index, 0);
    }

    #[test]
    fn size_below_one_falls_back_to_default() {
        assert_eq!(pagination(None, Some(0), None).page_request().size, 10);
        assert_eq!(pagination(None, Some(-5), None).page_request().size, 10);
    }

    #[test]
    fn size_is_capped() {
        assert_eq!(
            pagination(None, Some(1_000_000), None).page_request().size,
            MAX_PAGE_SIZE
        );
    }

    #[test]
    fn sort_parameter_is_parsed() {
        let request = pagination(None, None, Some("createdAt,desc")).page_request();
        assert_eq!(request.sort.key, SortKey::CreatedAt);
        assert_eq!(request.sort.direction, Direction::Desc);

        let request = pagination(None, None, Some("price")).page_request();
        assert_eq!(request.sort.key, SortKey::Price);
        assert_eq!(request.sort.direction, Direction::Asc);
    }

    #[test]
    fn unknown_sort_field_uses_default() {
        let request = pagination(None, None, Some("password,desc")).page_request();
        assert_eq!(request.sort, PageSort::default());
    }

    #[test]
    fn sort_formats_as_query_parameter() {
        assert_eq!(PageSort::default().to_string(), "id,asc");

        let sort = PageSort {
            key: SortKey::CreatedAt,
            direction: Direction::Desc,
        };
        assert_eq!(sort.to_string(), "createdAt,desc");
        assert_eq!(PageSort::parse(&sort.to_string()), Some(sort));
    }

    #[test]
    fn offset_is_index_times_size() {
        let request = PageRequest::new(3, 10);
        assert_eq!(request.offset(), 30);
        assert_eq!(request.limit(), 10);
    }

    #[test]
    fn page_metadata() {
        let page = Page::new(vec![1, 2, 3], 23, &PageRequest::new(1, 10));
        assert_eq!(page.total_pages, 3);
        assert!(page.has_previous);
        assert!(page.has_next);

        let last = Page::new(vec![1, 2, 3], 23, &PageRequest::new(2, 10));
        assert!(!last.has_next);

        let empty: Page<i32> = Page::new(vec![], 0, &PageRequest::default());
        assert_eq!(empty.total_pages, 0);
        assert!(!empty.has_previous);
        assert!(!empty.has_next);
        assert!(empty.is_empty());
    }
}
