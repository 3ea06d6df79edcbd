use async_trait::async_trait;
use movie_discovery_models::{Movie, RatedMovie, Session};
use std::collections::HashMap;
use tokio::sync::watch;

use crate::error::{AuthError, ModelError, StoreError};

/// The opaque authentication service.
///
/// Session transitions are not returned from the sign-in/out calls
/// directly; they are delivered on the subscription channel, which also
/// carries the initial session state at startup. The channel is the sole
/// trigger for user-data loads.
#[async_trait]
pub trait AuthService: Send + Sync {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError>;

    /// Requests account creation. Does not establish a session; the
    /// backend requires email confirmation first.
    async fn sign_up(&self, email: &str, password: &str) -> Result<(), AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Subscribe to session transitions. The receiver's current value is
    /// the present session state (the startup check), and every
    /// subsequent transition is observable via `changed()`.
    fn subscribe(&self) -> watch::Receiver<Option<Session>>;
}

/// The opaque remote row store holding per-user watchlist and ratings.
#[async_trait]
pub trait UserDataStore: Send + Sync {
    async fn fetch_watchlist(&self, user_id: &str) -> Result<Vec<Movie>, StoreError>;

    async fn fetch_ratings(
        &self,
        user_id: &str,
    ) -> Result<HashMap<String, RatedMovie>, StoreError>;

    async fn insert_watchlist(&self, user_id: &str, movie: &Movie) -> Result<(), StoreError>;

    async fn delete_watchlist(&self, user_id: &str, movie_id: &str) -> Result<(), StoreError>;

    /// Upsert keyed on (user_id, movie_id): succeeds whether or not a
    /// prior rating exists for the pair.
    async fn upsert_rating(
        &self,
        user_id: &str,
        movie_id: &str,
        title: &str,
        score: u8,
    ) -> Result<(), StoreError>;
}

/// The opaque generative content service: natural-language prompt plus a
/// structured output schema in, schema-conforming JSON out.
#[async_trait]
pub trait TextModel: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        response_schema: &serde_json::Value,
        temperature: Option<f32>,
    ) -> Result<serde_json::Value, ModelError>;
}
