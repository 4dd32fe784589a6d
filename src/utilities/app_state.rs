use axum::extract::FromRef;

use crate::features::listings::repository::DynListingRepository;

#[derive(Clone)]
pub struct AppState {
    pub listing_repository: DynListingRepository,
}

impl FromRef<AppState> for DynListingRepository {
    fn from_ref(state: &AppState) -> Self {
        state.listing_repository.clone()
    }
}
