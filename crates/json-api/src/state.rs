//! State

use std::{sync::Arc, time::Duration};

use folio::{cart::CartManager, catalog::Catalog, fixtures::Fixture, identity::UserDirectory};

use crate::sessions::SessionRegistry;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) catalog: Arc<dyn Catalog>,
    pub(crate) users: Arc<UserDirectory>,
    pub(crate) sessions: Arc<SessionRegistry>,
    pub(crate) carts: CartManager,
}

impl State {
    #[must_use]
    pub(crate) fn new(
        catalog: Arc<dyn Catalog>,
        users: UserDirectory,
        carts: CartManager,
        session_idle_timeout: Duration,
    ) -> Self {
        Self {
            catalog,
            users: Arc::new(users),
            sessions: Arc::new(SessionRegistry::new(session_idle_timeout)),
            carts,
        }
    }

    #[must_use]
    pub(crate) fn from_fixture(fixture: Fixture, session_idle_timeout: Duration) -> Arc<Self> {
        let (catalog, users, currency) = fixture.into_parts();

        Arc::new(Self::new(
            Arc::new(catalog),
            users,
            CartManager::new(currency),
            session_idle_timeout,
        ))
    }
}
