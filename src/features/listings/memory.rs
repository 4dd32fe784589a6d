//! In-memory listing store for tests and local fixtures

use std::cmp::Ordering;

use async_trait::async_trait;

use crate::{
    features::{
        listings::{
            models::Listing,
            repository::ListingRepository,
            schemas::ListingPage,
            selector::{ListingQuery, ListingSort},
        },
        schemas::{Direction, PageSort, SortKey},
    },
    utilities::errors::AppError,
};

#[derive(Clone, Default, Debug)]
pub struct InMemoryListingRepository {
    listings: Vec<Listing>,
}

impl InMemoryListingRepository {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self { listings }
    }
}

#[async_trait]
impl ListingRepository for InMemoryListingRepository {
    async fn find_page(&self, query: &ListingQuery) -> Result<ListingPage, AppError> {
        let mut matched: Vec<&Listing> = self
            .listings
            .iter()
            .filter(|listing| query.filter.matches(listing))
            .collect();

        matched.sort_by(|a, b| {
            compare_primary(query.sort, a, b).then_with(|| compare_page_sort(query.page.sort, a, b))
        });

        let total = i64::try_from(matched.len()).unwrap_or(i64::MAX);
        let offset = usize::try_from(query.page.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.page.limit()).unwrap_or(usize::MAX);

        let content = matched
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();

        Ok(ListingPage::new(content, total, &query.page))
    }

    async fn find_by_id(&self, id: i32) -> Result<Listing, AppError> {
        self.listings
            .iter()
            .find(|listing| listing.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFoundError(format!("House with ID {id} not found")))
    }
}

fn compare_primary(sort: ListingSort, a: &Listing, b: &Listing) -> Ordering {
    match sort {
        ListingSort::PriceAscending => a.price.cmp(&b.price),
        ListingSort::CreatedAtDescending => b.created_at.cmp(&a.created_at),
    }
}

fn compare_page_sort(sort: PageSort, a: &Listing, b: &Listing) -> Ordering {
    let ordering = match sort.key {
        SortKey::Id => a.id.cmp(&b.id),
        SortKey::Name => a.name.cmp(&b.name),
        SortKey::Price => a.price.cmp(&b.price),
        SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
    };

    match sort.direction {
        Direction::Asc => ordering,
        Direction::Desc => ordering.reverse(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{
        listings::{schemas::SearchCriteria, selector::ListingFilter},
        schemas::PageRequest,
    };
    use chrono::{TimeZone, Utc};

    fn listing(id: i32, name: &str, address: &str, price: i32, day: u32) -> Listing {
        Listing {
            id,
            name: name.to_string(),
            address: address.to_string(),
            price,
            created_at: Utc.with_ymd_and_hms(2024, 4, day, 9, 0, 0).unwrap(),
            ..Default::default()
        }
    }

    fn repository() -> InMemoryListingRepository {
        InMemoryListingRepository::new(vec![
            listing(1, "Kyoto Villa", "Kyoto-fu Kyoto-shi", 9000, 1),
            listing(2, "Namba Hostel", "Osaka-fu Osaka-shi", 4000, 2),
            listing(3, "Umeda Suites", "Osaka-fu Osaka-shi Kita-ku", 7000, 3),
            listing(4, "Gion Lodge", "Kyoto-fu Higashiyama-ku", 4000, 4),
            listing(5, "Sapporo Cabin", "Hokkaido Sapporo-shi", 5000, 5),
        ])
    }

    fn ids(page: &ListingPage) -> Vec<i32> {
        page.content.iter().map(|l| l.id).collect()
    }

    async fn run(criteria: SearchCriteria, page: PageRequest) -> ListingPage {
        repository()
            .find_page(&ListingQuery::select(&criteria, page))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn newest_first_by_default() {
        let page = run(SearchCriteria::default(), PageRequest::default()).await;
        assert_eq!(ids(&page), vec![5, 4, 3, 2, 1]);
        assert_eq!(page.total, 5);
    }

    #[tokio::test]
    async fn price_ascending_breaks_ties_by_id() {
        let criteria = SearchCriteria {
            order: Some("priceAsc".to_string()),
            ..Default::default()
        };
        let page = run(criteria, PageRequest::default()).await;
        assert_eq!(ids(&page), vec![2, 4, 5, 3, 1]);
    }

    #[tokio::test]
    async fn keyword_searches_name_and_address() {
        let criteria = SearchCriteria {
            keyword: Some("Kyoto".to_string()),
            ..Default::default()
        };
        let page = run(criteria, PageRequest::default()).await;
        assert_eq!(ids(&page), vec![4, 1]);
    }

    #[tokio::test]
    async fn area_searches_address() {
        let criteria = SearchCriteria {
            area: Some("Osaka".to_string()),
            order: Some("priceAsc".to_string()),
            ..Default::default()
        };
        let page = run(criteria, PageRequest::default()).await;
        assert_eq!(ids(&page), vec![2, 3]);
    }

    #[tokio::test]
    async fn price_ceiling_is_inclusive() {
        let criteria = SearchCriteria {
            price: Some(5000),
            ..Default::default()
        };
        let page = run(criteria, PageRequest::default()).await;
        assert_eq!(ids(&page), vec![5, 4, 2]);
    }

    #[tokio::test]
    async fn pages_are_bounded() {
        let page = run(SearchCriteria::default(), PageRequest::new(1, 2)).await;
        assert_eq!(ids(&page), vec![3, 2]);
        assert_eq!(page.total, 5);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_previous);
        assert!(page.has_next);

        let past_end = run(SearchCriteria::default(), PageRequest::new(9, 2)).await;
        assert!(past_end.is_empty());
        assert_eq!(past_end.total, 5);
    }

    #[tokio::test]
    async fn matches_are_literal() {
        let page = repository()
            .find_page(&ListingQuery {
                filter: ListingFilter::NameOrAddressContains("%".to_string()),
                sort: ListingSort::CreatedAtDescending,
                page: PageRequest::default(),
            })
            .await
            .unwrap();
        assert!(page.is_empty());
    }

    #[tokio::test]
    async fn find_by_id() {
        let listing = repository().find_by_id(3).await.unwrap();
        assert_eq!(listing.name, "Umeda Suites");

        let missing = repository().find_by_id(42).await;
        assert!(matches!(missing, Err(AppError::NotFoundError(_))));
    }
}
