use axum::{
    Json,
    extract::{Path, State},
    response::{Html, IntoResponse},
};
use tracing::debug;

use crate::{
    features::listings::{
        repository::DynListingRepository,
        schemas::{ListingIndexView, ListingSearchQuery, ListingShowView},
        selector::ListingQuery,
    },
    services::templates::{HOUSES_INDEX, HOUSES_SHOW, render_template},
    utilities::errors::{AppError, PageError},
};

/// Selects and runs the one query a search request maps to.
pub async fn search_listings(
    repository: &DynListingRepository,
    listing_search_query: ListingSearchQuery,
) -> Result<ListingIndexView, AppError> {
    let ListingSearchQuery {
        pagination,
        search_params,
    } = listing_search_query;

    let query = ListingQuery::select(&search_params, pagination.page_request());
    debug!(
        "filter: {:?}, sort: {:?}, page: {}, size: {}",
        query.filter, query.sort, query.page.index, query.page.size
    );

    let listing_page = repository.find_page(&query).await?;

    Ok(ListingIndexView::new(
        listing_page,
        search_params,
        query.page.sort,
    ))
}

pub async fn show_listing(
    repository: &DynListingRepository,
    listing_id: i32,
) -> Result<ListingShowView, AppError> {
    let listing = repository.find_by_id(listing_id).await?;

    Ok(ListingShowView::new(listing))
}

pub async fn get_many_listings_page_handler(
    State(repository): State<DynListingRepository>,
    listing_search_query: ListingSearchQuery,
) -> Result<Html<String>, PageError> {
    let view = search_listings(&repository, listing_search_query).await?;
    let page = render_template(HOUSES_INDEX, &view).map_err(AppError::from)?;

    Ok(Html(page))
}

pub async fn get_one_listing_page_handler(
    State(repository): State<DynListingRepository>,
    Path(listing_id): Path<i32>,
) -> Result<Html<String>, PageError> {
    let view = show_listing(&repository, listing_id).await?;
    let page = render_template(HOUSES_SHOW, &view).map_err(AppError::from)?;

    Ok(Html(page))
}

pub async fn get_many_listings_handler(
    State(repository): State<DynListingRepository>,
    listing_search_query: ListingSearchQuery,
) -> Result<impl IntoResponse, AppError> {
    let view = search_listings(&repository, listing_search_query).await?;

    Ok(Json(view))
}

pub async fn get_one_listing_handler(
    State(repository): State<DynListingRepository>,
    Path(listing_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let listing = repository.find_by_id(listing_id).await?;

    Ok(Json(listing))
}
