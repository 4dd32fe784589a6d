use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::{DefaultOnError, DisplayFromStr, serde_as};
use tracing::warn;

use crate::features::{
    listings::models::Listing,
    schemas::{Page, PageSort, Pagination},
};

pub type ListingPage = Page<Listing>;

// -- =====================
// -- IN
// -- =====================

/// Optional search inputs of `GET /houses`, kept exactly as the client sent them.
#[serde_as]
#[derive(Deserialize, Clone, PartialEq, Eq, Default, Debug)]
#[serde(default)]
pub struct SearchCriteria {
    pub keyword: Option<String>,
    pub area: Option<String>,
    #[serde_as(as = "DefaultOnError<Option<DisplayFromStr>>")]
    pub price: Option<i32>,
    pub order: Option<String>,
}

/// Query string of the listing routes. Never rejects a request.
#[derive(Deserialize, Default, Debug)]
pub struct ListingSearchQuery {
    #[serde(flatten)]
    pub pagination: Pagination,
    #[serde(flatten)]
    pub search_params: SearchCriteria,
}

impl ListingSearchQuery {
    /// Builds the query from raw key/value pairs. A repeated key keeps its first value.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Map::new();
        for (key, value) in pairs {
            params.entry(key).or_insert(Value::String(value));
        }

        serde_json::from_value(Value::Object(params)).unwrap_or_else(|e| {
            warn!("Ignoring unreadable search query, {e}");
            Self::default()
        })
    }
}

impl<S> FromRequestParts<S> for ListingSearchQuery
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let pairs = match Query::<Vec<(String, String)>>::from_request_parts(parts, state).await {
            Ok(Query(pairs)) => pairs,
            Err(e) => {
                warn!("Ignoring unreadable query string, {e}");
                Vec::new()
            }
        };

        Ok(Self::from_pairs(pairs))
    }
}

// -- =====================
// -- OUT
// -- =====================

/// Empty booking form shown under a house's details.
#[derive(Serialize, Clone, PartialEq, Eq, Default, Debug)]
pub struct ReservationInput {
    pub checkin_to_checkout: String,
    pub number_of_people: Option<u32>,
}

#[derive(Serialize, Clone, PartialEq, Eq, Debug)]
pub struct ListingIndexView {
    pub listing_page: ListingPage,
    pub keyword: Option<String>,
    pub area: Option<String>,
    pub price: Option<i32>,
    pub order: Option<String>,
    /// Normalized page sort, carried by pagination links along with the page size.
    pub sort: String,
}

impl ListingIndexView {
    /// Pairs a result page with the untouched search inputs.
    pub fn new(listing_page: ListingPage, criteria: SearchCriteria, sort: PageSort) -> Self {
        let SearchCriteria {
            keyword,
            area,
            price,
            order,
        } = criteria;

        Self {
            listing_page,
            keyword,
            area,
            price,
            order,
            sort: sort.to_string(),
        }
    }
}

#[derive(Serialize, Clone, PartialEq, Eq, Debug)]
pub struct ListingShowView {
    pub listing: Listing,
    pub reservation_input_form: ReservationInput,
}

impl ListingShowView {
    pub fn new(listing: Listing) -> Self {
        Self {
            listing,
            reservation_input_form: ReservationInput::default(),
        }
    }
}
