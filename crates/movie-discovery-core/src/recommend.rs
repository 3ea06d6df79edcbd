use movie_discovery_backends::{poster_url, TextModel};
use movie_discovery_models::{Movie, MovieDetails};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::store::AppStore;

/// One movie summary as the model returns it from a recommendation
/// request, before the client assigns an id and a poster reference.
#[derive(Debug, Deserialize)]
struct MovieSummary {
    title: String,
    year: String,
    #[serde(default)]
    genre: Vec<String>,
    #[serde(default)]
    plot: String,
    #[serde(default)]
    rating: Option<String>,
    #[serde(default)]
    director: Option<String>,
}

/// Response schemas for the two structured generation calls, in the
/// generative service's schema dialect.
mod schema {
    use serde_json::{json, Value};

    pub fn recommendation_list() -> Value {
        json!({
            "type": "ARRAY",
            "items": {
                "type": "OBJECT",
                "properties": {
                    "title": { "type": "STRING" },
                    "year": { "type": "STRING" },
                    "genre": { "type": "ARRAY", "items": { "type": "STRING" } },
                    "plot": { "type": "STRING" },
                    "rating": { "type": "STRING" },
                    "director": { "type": "STRING" },
                },
                "required": ["title", "year", "genre", "plot", "rating"],
            },
        })
    }

    pub fn detailed_movie() -> Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "title": { "type": "STRING" },
                "year": { "type": "STRING" },
                "genre": { "type": "ARRAY", "items": { "type": "STRING" } },
                "cast": { "type": "ARRAY", "items": { "type": "STRING" } },
                "criticReviews": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "source": { "type": "STRING" },
                            "snippet": { "type": "STRING" },
                            "score": { "type": "STRING" },
                        },
                    },
                },
                "watchProviders": { "type": "ARRAY", "items": { "type": "STRING" } },
                "rating": { "type": "STRING" },
                "plot": { "type": "STRING" },
                "director": { "type": "STRING" },
            },
        })
    }
}

/// Turns genre tags into a batch of movie records and progressively
/// enriches a single movie on demand.
///
/// Both calls absorb every failure (network, service, malformed or
/// non-conforming JSON) into an empty result; callers treat empty as
/// "try again", not as a legitimate zero-result answer. No caching, no
/// retries, no timeouts.
pub struct RecommendationPipeline {
    store: AppStore,
    model: Arc<dyn TextModel>,
}

impl RecommendationPipeline {
    pub fn new(store: AppStore, model: Arc<dyn TextModel>) -> Self {
        Self { store, model }
    }

    /// Request 8 distinct movie suggestions constrained to the given
    /// genre tags. Each successful batch replaces the transient
    /// recommendation cache wholesale. Output order is the service's
    /// response order; no client-side ranking.
    pub async fn recommend(&self, genres: &[String]) -> Vec<Movie> {
        if genres.is_empty() {
            return Vec::new();
        }

        let prompt = format!(
            "Recommend 8 distinct movies that fit the following genres: {}. \
             Ensure they are highly rated and diverse. Provide the output in JSON format.",
            genres.join(", ")
        );

        let payload = match self
            .model
            .generate(&prompt, &schema::recommendation_list(), Some(0.7))
            .await
        {
            Ok(payload) => payload,
            Err(e) => {
                warn!(
                    operation = "recommend",
                    status = "error",
                    error = %e,
                    "Recommendation request failed"
                );
                return Vec::new();
            }
        };

        let summaries: Vec<MovieSummary> = match serde_json::from_value(payload) {
            Ok(summaries) => summaries,
            Err(e) => {
                warn!(
                    operation = "recommend",
                    status = "error",
                    error = %e,
                    "Recommendation response did not match the expected shape"
                );
                return Vec::new();
            }
        };

        let movies: Vec<Movie> = summaries
            .into_iter()
            .map(|summary| {
                let image_url = Some(poster_url(&summary.title));
                Movie {
                    id: format!("gen-{}", Uuid::new_v4()),
                    title: summary.title,
                    year: summary.year,
                    genre: summary.genre,
                    plot: summary.plot,
                    rating: summary.rating,
                    director: summary.director,
                    cast: None,
                    critic_reviews: None,
                    watch_providers: None,
                    image_url,
                }
            })
            .collect();

        info!(operation = "recommend", count = movies.len(), "Generated recommendations");
        self.store.set_recommendations(movies.clone()).await;
        movies
    }

    /// Request enrichment fields for a movie title: cast, critic review
    /// snippets, streaming providers, genres and an aggregate rating.
    /// Failure yields an empty partial record, never an error; merging an
    /// empty record into a movie is a no-op.
    pub async fn deep_dive(&self, movie_title: &str) -> MovieDetails {
        let prompt = format!(
            "Provide detailed information for the movie \"{}\". \
             Include the main cast (top 5), 3 short critic review snippets with sources, \
             available streaming platforms (e.g. Netflix, Hulu, Disney+), genres, \
             and an aggregate rating.",
            movie_title
        );

        let payload = match self
            .model
            .generate(&prompt, &schema::detailed_movie(), None)
            .await
        {
            Ok(payload) => payload,
            Err(e) => {
                warn!(
                    operation = "deep_dive",
                    title = movie_title,
                    status = "error",
                    error = %e,
                    "Enrichment request failed"
                );
                return MovieDetails::default();
            }
        };

        match serde_json::from_value::<MovieDetails>(payload) {
            Ok(mut details) => {
                details.image_url = Some(poster_url(movie_title));
                details
            }
            Err(e) => {
                warn!(
                    operation = "deep_dive",
                    title = movie_title,
                    status = "error",
                    error = %e,
                    "Enrichment response did not match the expected shape"
                );
                MovieDetails::default()
            }
        }
    }
}
