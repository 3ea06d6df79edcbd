use movie_discovery_backends::{AuthError, AuthService, UserDataStore};
use movie_discovery_models::Session;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::store::AppStore;

/// Tracks the single authoritative authentication session and drives the
/// user-data loads that depend on it.
///
/// Collections are populated in exactly one place: the session-change
/// reaction. Login/signup/logout themselves never fetch data; they only
/// cause the auth service to report a transition.
pub struct SessionStore {
    store: AppStore,
    auth: Arc<dyn AuthService>,
    data: Arc<dyn UserDataStore>,
}

impl SessionStore {
    pub fn new(store: AppStore, auth: Arc<dyn AuthService>, data: Arc<dyn UserDataStore>) -> Self {
        Self { store, auth, data }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        self.auth.sign_in_with_password(email, password).await
    }

    pub async fn signup(&self, email: &str, password: &str) -> Result<(), AuthError> {
        self.auth.sign_up(email, password).await
    }

    /// Terminates the session. User-scoped collections and the transient
    /// recommendation batch are cleared synchronously, before the remote
    /// sign-out settles.
    pub async fn logout(&self) -> Result<(), AuthError> {
        {
            let mut state = self.store.state().write().await;
            state.watchlist.clear();
            state.ratings.clear();
            state.recommendations.clear();
        }
        self.auth.sign_out().await
    }

    /// Process the current session state once: the startup check.
    pub async fn check_session(&self) {
        let session = self.auth.subscribe().borrow().clone();
        self.react(session).await;
    }

    /// Consume session transitions until the auth service goes away,
    /// reacting to each one. Transitions are delivered serially; reactions
    /// never overlap.
    pub async fn run_session_listener(&self) {
        let mut rx = self.auth.subscribe();
        loop {
            let session = rx.borrow_and_update().clone();
            self.react(session).await;
            if rx.changed().await.is_err() {
                debug!("Session channel closed; stopping listener");
                break;
            }
        }
    }

    /// The session-change reaction. Idempotent: a session present means
    /// one bulk load replacing both collections wholesale, absent means
    /// both are cleared. The loading flag is raised before the reaction
    /// starts and cleared on every exit path, including a failed load, so
    /// consumers are never stuck on a stale "loading" indication.
    async fn react(&self, session: Option<Session>) {
        {
            let mut state = self.store.state().write().await;
            state.loading = true;
            state.session = session.clone();
        }

        match session {
            Some(session) => self.bulk_load(&session).await,
            None => {
                let mut state = self.store.state().write().await;
                state.watchlist.clear();
                state.ratings.clear();
            }
        }

        self.store.state().write().await.loading = false;
    }

    /// One-shot fetch of the user's persisted collections. A failure is
    /// logged and leaves the collections in their prior state; there is no
    /// automatic retry.
    async fn bulk_load(&self, session: &Session) {
        let user_id = &session.user.id;

        let watchlist = match self.data.fetch_watchlist(user_id).await {
            Ok(watchlist) => watchlist,
            Err(e) => {
                warn!(
                    operation = "bulk_load",
                    user_id = %user_id,
                    status = "error",
                    error = %e,
                    "Failed to fetch watchlist"
                );
                return;
            }
        };
        self.store.state().write().await.watchlist = watchlist;

        match self.data.fetch_ratings(user_id).await {
            Ok(ratings) => {
                self.store.state().write().await.ratings = ratings;
            }
            Err(e) => {
                warn!(
                    operation = "bulk_load",
                    user_id = %user_id,
                    status = "error",
                    error = %e,
                    "Failed to fetch ratings"
                );
                return;
            }
        }

        let state = self.store.state().read().await;
        info!(
            operation = "bulk_load",
            user_id = %user_id,
            watchlist = state.watchlist.len(),
            ratings = state.ratings.len(),
            "Loaded user data"
        );
    }
}
