//! Maps search inputs to the single listing query that serves them.
//!
//! Filters are exclusive and checked in order: keyword, area, price ceiling.
//! The first one present wins and the rest are ignored.

use serde::Serialize;

use crate::features::{
    listings::{models::Listing, schemas::SearchCriteria},
    schemas::PageRequest,
};

/// The only `order` value that changes the default ordering.
pub const PRICE_ASCENDING_DIRECTIVE: &str = "priceAsc";

#[derive(Serialize, Clone, PartialEq, Eq, Default, Debug)]
pub enum ListingFilter {
    #[default]
    None,
    NameOrAddressContains(String),
    AddressContains(String),
    PriceAtMost(i32),
}

impl ListingFilter {
    pub fn from_criteria(criteria: &SearchCriteria) -> Self {
        if let Some(keyword) = non_empty(criteria.keyword.as_deref()) {
            ListingFilter::NameOrAddressContains(keyword.to_string())
        } else if let Some(area) = non_empty(criteria.area.as_deref()) {
            ListingFilter::AddressContains(area.to_string())
        } else if let Some(price) = criteria.price {
            ListingFilter::PriceAtMost(price)
        } else {
            ListingFilter::None
        }
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        match self {
            ListingFilter::None => true,
            ListingFilter::NameOrAddressContains(keyword) => {
                listing.name.contains(keyword.as_str())
                    || listing.address.contains(keyword.as_str())
            }
            ListingFilter::AddressContains(area) => listing.address.contains(area.as_str()),
            ListingFilter::PriceAtMost(price) => listing.price <= *price,
        }
    }
}

#[derive(Serialize, Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum ListingSort {
    PriceAscending,
    #[default]
    CreatedAtDescending,
}

impl ListingSort {
    /// Anything other than [`PRICE_ASCENDING_DIRECTIVE`] means newest first.
    pub fn from_directive(order: Option<&str>) -> Self {
        match order {
            Some(PRICE_ASCENDING_DIRECTIVE) => ListingSort::PriceAscending,
            _ => ListingSort::CreatedAtDescending,
        }
    }
}

/// One parameterized lookup: filter, primary ordering and page bounds.
#[derive(Serialize, Clone, PartialEq, Eq, Debug)]
pub struct ListingQuery {
    pub filter: ListingFilter,
    pub sort: ListingSort,
    pub page: PageRequest,
}

impl ListingQuery {
    pub fn select(criteria: &SearchCriteria, page: PageRequest) -> Self {
        Self {
            filter: ListingFilter::from_criteria(criteria),
            sort: ListingSort::from_directive(criteria.order.as_deref()),
            page,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
