use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;

use crate::{
    features::listings::{
        models::Listing,
        schemas::ListingPage,
        selector::{ListingFilter, ListingQuery, ListingSort},
    },
    utilities::errors::AppError,
};

pub type DynListingRepository = Arc<dyn ListingRepository>;

/// Read access to the listing store.
#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// Runs one filtered, ordered and paged lookup.
    async fn find_page(&self, query: &ListingQuery) -> Result<ListingPage, AppError>;

    /// Fails with [`AppError::NotFoundError`] when no listing has this id.
    async fn find_by_id(&self, id: i32) -> Result<Listing, AppError>;
}

const SELECT_LISTINGS: &str = r#"
    SELECT
        id,
        name,
        image_name,
        description,
        price,
        capacity,
        postal_code,
        address,
        phone_number,
        created_at,
        updated_at
    FROM houses
    WHERE 1=1
"#;

const COUNT_LISTINGS: &str = r#"
    SELECT COUNT(*)
    FROM houses
    WHERE 1=1
"#;

#[derive(Clone)]
pub struct PgListingRepository {
    pool: PgPool,
}

impl PgListingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ListingRepository for PgListingRepository {
    async fn find_page(&self, query: &ListingQuery) -> Result<ListingPage, AppError> {
        let mut count_qb = QueryBuilder::new(COUNT_LISTINGS);
        push_filter(&mut count_qb, &query.filter);

        let mut listing_qb = build_listing_query(query);

        debug!("listing query: {}", listing_qb.sql());

        let total = count_qb
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        let listings: Vec<Listing> = listing_qb
            .build_query_as::<Listing>()
            .fetch_all(&self.pool)
            .await?;

        Ok(ListingPage::new(listings, total, &query.page))
    }

    async fn find_by_id(&self, id: i32) -> Result<Listing, AppError> {
        let mut qb = QueryBuilder::new(SELECT_LISTINGS);
        qb.push(" AND id = ").push_bind(id);

        qb.build_query_as::<Listing>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFoundError(format!("House with ID {id} not found")))
    }
}

pub(crate) fn build_listing_query(query: &ListingQuery) -> QueryBuilder<'static, Postgres> {
    let mut listing_qb = QueryBuilder::new(SELECT_LISTINGS);
    push_filter(&mut listing_qb, &query.filter);

    // Filter ordering first; the page sort only breaks ties
    match query.sort {
        ListingSort::PriceAscending => listing_qb.push(" ORDER BY price ASC"),
        ListingSort::CreatedAtDescending => listing_qb.push(" ORDER BY created_at DESC"),
    };
    listing_qb
        .push(", ")
        .push(query.page.sort.key.column())
        .push(" ")
        .push(query.page.sort.direction.sql());

    listing_qb.push(" OFFSET ").push_bind(query.page.offset());
    listing_qb.push(" LIMIT ").push_bind(query.page.limit());

    listing_qb
}

fn push_filter(qb: &mut QueryBuilder<'static, Postgres>, filter: &ListingFilter) {
    match filter {
        ListingFilter::None => {}
        ListingFilter::NameOrAddressContains(keyword) => {
            let pattern = escape_like(keyword);
            qb.push(" AND (name LIKE '%' || ")
                .push_bind(pattern.clone())
                .push(" || '%' ESCAPE '\\' OR address LIKE '%' || ")
                .push_bind(pattern)
                .push(" || '%' ESCAPE '\\')");
        }
        ListingFilter::AddressContains(area) => {
            qb.push(" AND address LIKE '%' || ")
                .push_bind(escape_like(area))
                .push(" || '%' ESCAPE '\\'");
        }
        ListingFilter::PriceAtMost(price) => {
            qb.push(" AND price <= ").push_bind(*price);
        }
    }
}

/// Escapes LIKE metacharacters with `\`, the escape character named in every LIKE clause.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
