//! Depot helper extensions.

use std::any::Any;

use folio::identity::Identity;
use salvo::prelude::{Depot, StatusError};

use crate::sessions::SessionHandle;

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// The caller, if the request carried a valid bearer token.
    fn identity(&self) -> Option<&Identity>;

    fn identity_or_401(&self) -> Result<&Identity, StatusError>;

    /// The caller, provided they are staff.
    fn staff_or_403(&self) -> Result<&Identity, StatusError>;

    fn session_or_500(&self) -> Result<&SessionHandle, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn identity(&self) -> Option<&Identity> {
        self.obtain::<Identity>().ok()
    }

    fn identity_or_401(&self) -> Result<&Identity, StatusError> {
        self.identity()
            .ok_or_else(|| StatusError::unauthorized().brief("Authentication required"))
    }

    fn staff_or_403(&self) -> Result<&Identity, StatusError> {
        let identity = self.identity_or_401()?;

        if !identity.is_staff {
            return Err(StatusError::forbidden().brief("Staff access required"));
        }

        Ok(identity)
    }

    fn session_or_500(&self) -> Result<&SessionHandle, StatusError> {
        self.obtain_or_500::<SessionHandle>()
    }
}
