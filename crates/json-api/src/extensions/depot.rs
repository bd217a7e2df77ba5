//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::Depot;

use bookstore_app::auth::Principal;

use crate::envelope::ApiError;

/// Helpers for mapping depot extraction failures to envelope errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError>;

    fn principal_or_401(&self) -> Result<Principal, ApiError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError> {
        self.obtain::<T>().map_err(|_ignored| ApiError::internal())
    }

    fn principal_or_401(&self) -> Result<Principal, ApiError> {
        self.obtain::<Principal>()
            .copied()
            .map_err(|_ignored| ApiError::unauthorized("Authentication required"))
    }
}
