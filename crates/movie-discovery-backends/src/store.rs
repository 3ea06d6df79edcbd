use async_trait::async_trait;
use movie_discovery_models::{Movie, RatedMovie, Session};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::watch;
use tracing::debug;

use crate::error::StoreError;
use crate::traits::UserDataStore;

#[derive(Debug, Deserialize)]
struct WatchlistRow {
    movie_data: Movie,
}

#[derive(Debug, Serialize)]
struct WatchlistInsert<'a> {
    user_id: &'a str,
    movie_id: &'a str,
    movie_data: &'a Movie,
}

#[derive(Debug, Serialize, Deserialize)]
struct RatingRow {
    movie_id: String,
    title: String,
    score: u8,
}

#[derive(Debug, Serialize)]
struct RatingUpsert<'a> {
    user_id: &'a str,
    movie_id: &'a str,
    title: &'a str,
    score: u8,
}

/// PostgREST-style row store client for the `watchlist` and `ratings`
/// tables. Requests carry the anon key plus the current session's bearer
/// token (read from the session channel), which is what scopes rows to
/// the logged-in user server-side.
pub struct RestStore {
    client: Client,
    base_url: String,
    anon_key: String,
    session_rx: watch::Receiver<Option<Session>>,
}

impl RestStore {
    pub fn new(
        base_url: String,
        anon_key: String,
        session_rx: watch::Receiver<Option<Session>>,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
            session_rx,
        }
    }

    fn bearer_token(&self) -> String {
        self.session_rx
            .borrow()
            .as_ref()
            .map(|s| s.access_token.clone())
            .unwrap_or_else(|| self.anon_key.clone())
    }

    fn request(
        &self,
        method: reqwest::Method,
        url: String,
    ) -> Result<reqwest::RequestBuilder, StoreError> {
        if self.base_url.is_empty() {
            return Err(StoreError::NotConfigured);
        }
        Ok(self
            .client
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(self.bearer_token()))
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        Err(StoreError::Service { status, message })
    }
}

#[async_trait]
impl UserDataStore for RestStore {
    async fn fetch_watchlist(&self, user_id: &str) -> Result<Vec<Movie>, StoreError> {
        let url = format!(
            "{}/rest/v1/watchlist?user_id=eq.{}&select=movie_data",
            self.base_url, user_id
        );
        let response = self.request(reqwest::Method::GET, url)?.send().await?;
        let rows: Vec<WatchlistRow> = Self::check(response).await?.json().await?;
        debug!(operation = "fetch_watchlist", rows = rows.len(), "Fetched watchlist");
        Ok(rows.into_iter().map(|r| r.movie_data).collect())
    }

    async fn fetch_ratings(
        &self,
        user_id: &str,
    ) -> Result<HashMap<String, RatedMovie>, StoreError> {
        let url = format!(
            "{}/rest/v1/ratings?user_id=eq.{}&select=movie_id,title,score",
            self.base_url, user_id
        );
        let response = self.request(reqwest::Method::GET, url)?.send().await?;
        let rows: Vec<RatingRow> = Self::check(response).await?.json().await?;
        debug!(operation = "fetch_ratings", rows = rows.len(), "Fetched ratings");
        Ok(rows
            .into_iter()
            .map(|r| {
                (
                    r.movie_id,
                    RatedMovie {
                        score: r.score,
                        title: r.title,
                    },
                )
            })
            .collect())
    }

    async fn insert_watchlist(&self, user_id: &str, movie: &Movie) -> Result<(), StoreError> {
        let url = format!("{}/rest/v1/watchlist", self.base_url);
        let body = WatchlistInsert {
            user_id,
            movie_id: &movie.id,
            movie_data: movie,
        };
        let response = self
            .request(reqwest::Method::POST, url)?
            .json(&body)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn delete_watchlist(&self, user_id: &str, movie_id: &str) -> Result<(), StoreError> {
        let url = format!(
            "{}/rest/v1/watchlist?user_id=eq.{}&movie_id=eq.{}",
            self.base_url, user_id, movie_id
        );
        let response = self.request(reqwest::Method::DELETE, url)?.send().await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn upsert_rating(
        &self,
        user_id: &str,
        movie_id: &str,
        title: &str,
        score: u8,
    ) -> Result<(), StoreError> {
        // Conflict target (user_id, movie_id): overwrites an existing
        // rating for the pair instead of duplicating it.
        let url = format!(
            "{}/rest/v1/ratings?on_conflict=user_id,movie_id",
            self.base_url
        );
        let body = RatingUpsert {
            user_id,
            movie_id,
            title,
            score,
        };
        let response = self
            .request(reqwest::Method::POST, url)?
            .header("Prefer", "resolution=merge-duplicates")
            .json(&body)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watchlist_row_maps_movie_data_column() {
        let json = r#"[{"movie_data": {"id": "gen-1", "title": "Dune", "year": "2021", "genre": ["scifi"], "plot": "Spice."}}]"#;
        let rows: Vec<WatchlistRow> = serde_json::from_str(json).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].movie_data.title, "Dune");
    }

    #[test]
    fn test_rating_rows_key_by_movie_id() {
        let json = r#"[
            {"movie_id": "gen-1", "title": "Dune", "score": 5},
            {"movie_id": "gen-2", "title": "Heat", "score": 4}
        ]"#;
        let rows: Vec<RatingRow> = serde_json::from_str(json).unwrap();
        let map: HashMap<String, RatedMovie> = rows
            .into_iter()
            .map(|r| (r.movie_id, RatedMovie { score: r.score, title: r.title }))
            .collect();
        assert_eq!(map.len(), 2);
        assert_eq!(map["gen-2"].score, 4);
    }
}
