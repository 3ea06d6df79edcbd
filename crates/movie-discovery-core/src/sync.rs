use movie_discovery_backends::{StoreError, UserDataStore};
use movie_discovery_models::{Movie, RatedMovie};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::store::{AppState, AppStore};

/// Mutates the user-scoped collections with optimistic-update semantics.
///
/// Every mutator follows the same protocol: require a session (silent
/// no-op otherwise), snapshot the collection, apply the change locally so
/// the caller sees it immediately, issue the remote write, and on failure
/// restore the snapshot. Failures never surface to the caller; the local
/// revert is the whole repair.
pub struct SyncEngine {
    store: AppStore,
    data: Arc<dyn UserDataStore>,
}

impl SyncEngine {
    pub fn new(store: AppStore, data: Arc<dyn UserDataStore>) -> Self {
        Self { store, data }
    }

    /// Optimistic commit: snapshot, apply, attempt the remote write,
    /// restore the snapshot on failure.
    ///
    /// Known property: the snapshot covers the whole collection, so two
    /// overlapping mutators on the same collection interact last-writer-
    /// wins — if the first fails and reverts after the second applied its
    /// optimistic change, the revert erases the second's change as well.
    async fn optimistic<T, Fut>(
        &self,
        snapshot: impl FnOnce(&AppState) -> T,
        apply: impl FnOnce(&mut AppState),
        restore: impl FnOnce(&mut AppState, T),
        remote: impl FnOnce() -> Fut,
        operation: &'static str,
    ) where
        Fut: Future<Output = Result<(), StoreError>>,
    {
        let snap = {
            let mut state = self.store.state().write().await;
            let snap = snapshot(&state);
            apply(&mut state);
            snap
        };

        if let Err(e) = remote().await {
            warn!(
                operation = operation,
                status = "error",
                error = %e,
                "Remote write failed; reverting optimistic update"
            );
            let mut state = self.store.state().write().await;
            restore(&mut state, snap);
        }
    }

    /// Append a movie to the watchlist. A movie whose id is already
    /// present is a complete no-op: no local change, no remote write.
    pub async fn add_to_watchlist(&self, movie: Movie) {
        let Some(session) = self.store.session().await else {
            debug!(operation = "watchlist_add", "No active session; ignoring");
            return;
        };

        if self
            .store
            .state()
            .read()
            .await
            .watchlist
            .iter()
            .any(|m| m.id == movie.id)
        {
            debug!(operation = "watchlist_add", movie_id = %movie.id, "Already on watchlist");
            return;
        }

        let user_id = session.user.id;
        let remote_movie = movie.clone();
        self.optimistic(
            |state| state.watchlist.clone(),
            |state| state.watchlist.push(movie),
            |state, snap: Vec<Movie>| state.watchlist = snap,
            || async { self.data.insert_watchlist(&user_id, &remote_movie).await },
            "watchlist_add",
        )
        .await;
    }

    /// Remove a movie from the watchlist by id. Filtering an absent id is
    /// harmless locally; the remote delete is issued regardless.
    pub async fn remove_from_watchlist(&self, movie_id: &str) {
        let Some(session) = self.store.session().await else {
            debug!(operation = "watchlist_remove", "No active session; ignoring");
            return;
        };

        let user_id = session.user.id;
        self.optimistic(
            |state| state.watchlist.clone(),
            |state| state.watchlist.retain(|m| m.id != movie_id),
            |state, snap: Vec<Movie>| state.watchlist = snap,
            || async { self.data.delete_watchlist(&user_id, movie_id).await },
            "watchlist_remove",
        )
        .await;
    }

    /// Set or overwrite the user's rating for a movie. The remote write is
    /// an upsert on (user, movie), so it succeeds whether or not a prior
    /// rating exists for the pair.
    pub async fn rate_movie(&self, movie_id: &str, title: &str, score: u8) {
        let Some(session) = self.store.session().await else {
            debug!(operation = "rate_movie", "No active session; ignoring");
            return;
        };

        let user_id = session.user.id;
        let entry = RatedMovie {
            score,
            title: title.to_string(),
        };
        self.optimistic(
            |state| state.ratings.clone(),
            |state| {
                state.ratings.insert(movie_id.to_string(), entry);
            },
            |state, snap: HashMap<String, RatedMovie>| state.ratings = snap,
            || async {
                self.data
                    .upsert_rating(&user_id, movie_id, title, score)
                    .await
            },
            "rate_movie",
        )
        .await;
    }
}
