use movie_discovery_models::{Movie, RatedMovie, Session};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// The single process-scoped application state.
///
/// Watchlist and ratings are scoped to the current session: discarded on
/// logout and replaced wholesale on login, never merged across sessions.
/// They are written only through [`crate::SyncEngine`] and the session
/// reaction in [`crate::SessionStore`].
#[derive(Debug, Clone)]
pub struct AppState {
    pub session: Option<Session>,
    /// True while the session state is unknown or a bulk load is in
    /// flight; lets consumers distinguish "unknown" from "known empty".
    pub loading: bool,
    pub watchlist: Vec<Movie>,
    pub ratings: HashMap<String, RatedMovie>,
    /// Most recent recommendation batch, handed off between the discovery
    /// flow and the results view. Never persisted.
    pub recommendations: Vec<Movie>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            session: None,
            // Unknown until the first session-change reaction completes.
            loading: true,
            watchlist: Vec::new(),
            ratings: HashMap::new(),
            recommendations: Vec::new(),
        }
    }
}

/// Cheaply cloneable handle to the shared state, injected into the
/// session store, sync engine and pipeline by reference-passing.
#[derive(Clone, Default)]
pub struct AppStore {
    state: Arc<RwLock<AppState>>,
}

impl AppStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn state(&self) -> &RwLock<AppState> {
        &self.state
    }

    pub async fn session(&self) -> Option<Session> {
        self.state.read().await.session.clone()
    }

    pub async fn is_logged_in(&self) -> bool {
        self.state.read().await.session.is_some()
    }

    pub async fn loading(&self) -> bool {
        self.state.read().await.loading
    }

    pub async fn watchlist(&self) -> Vec<Movie> {
        self.state.read().await.watchlist.clone()
    }

    pub async fn ratings(&self) -> HashMap<String, RatedMovie> {
        self.state.read().await.ratings.clone()
    }

    pub async fn recommendations(&self) -> Vec<Movie> {
        self.state.read().await.recommendations.clone()
    }

    /// Replace the current recommendation batch wholesale.
    pub async fn set_recommendations(&self, batch: Vec<Movie>) {
        self.state.write().await.recommendations = batch;
    }

    pub async fn find_recommendation(&self, movie_id: &str) -> Option<Movie> {
        self.state
            .read()
            .await
            .recommendations
            .iter()
            .find(|m| m.id == movie_id)
            .cloned()
    }

    /// Merge enrichment details into a movie wherever it is currently
    /// held (recommendation batch and watchlist).
    pub async fn absorb_details(
        &self,
        movie_id: &str,
        details: movie_discovery_models::MovieDetails,
    ) {
        let mut state = self.state.write().await;
        if let Some(movie) = state.recommendations.iter_mut().find(|m| m.id == movie_id) {
            movie.absorb(details.clone());
        }
        if let Some(movie) = state.watchlist.iter_mut().find(|m| m.id == movie_id) {
            movie.absorb(details);
        }
    }
}
