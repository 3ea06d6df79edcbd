use serde::{Deserialize, Serialize};

use crate::review::Review;

/// A movie record as the client knows it.
///
/// Created fully-formed by the recommendation pipeline with only the
/// summary fields populated (title, year, genre, plot, rating, director);
/// the enrichment fields (cast, critic_reviews, watch_providers) arrive
/// later via [`Movie::absorb`]. Serialized camelCase because the remote
/// store's `movie_data` column holds this exact JSON shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    /// Opaque, locally generated, collision-resistant id.
    pub id: String,
    pub title: String,
    pub year: String,
    #[serde(default)]
    pub genre: Vec<String>,
    #[serde(default)]
    pub plot: String,
    /// Aggregate rating as reported by the model, e.g. "8.5/10".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cast: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub critic_reviews: Option<Vec<Review>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watch_providers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// The partial record produced by a deep-dive enrichment call.
///
/// Every field is optional: whatever the model returned. Absorbing it into
/// a [`Movie`] must never clear a previously known field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MovieDetails {
    pub title: Option<String>,
    pub year: Option<String>,
    pub genre: Option<Vec<String>>,
    pub plot: Option<String>,
    pub rating: Option<String>,
    pub director: Option<String>,
    pub cast: Option<Vec<String>>,
    pub critic_reviews: Option<Vec<Review>>,
    pub watch_providers: Option<Vec<String>>,
    pub image_url: Option<String>,
}

impl MovieDetails {
    /// True when the enrichment call yielded nothing (its failure shape).
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.year.is_none()
            && self.genre.is_none()
            && self.plot.is_none()
            && self.rating.is_none()
            && self.director.is_none()
            && self.cast.is_none()
            && self.critic_reviews.is_none()
            && self.watch_providers.is_none()
            && self.image_url.is_none()
    }
}

impl Movie {
    /// Merge enrichment data into this movie: fields present in `details`
    /// overwrite, absent fields leave the existing value untouched. The id
    /// is never replaced.
    pub fn absorb(&mut self, details: MovieDetails) {
        if let Some(title) = details.title {
            self.title = title;
        }
        if let Some(year) = details.year {
            self.year = year;
        }
        if let Some(genre) = details.genre {
            self.genre = genre;
        }
        if let Some(plot) = details.plot {
            self.plot = plot;
        }
        if let Some(rating) = details.rating {
            self.rating = Some(rating);
        }
        if let Some(director) = details.director {
            self.director = Some(director);
        }
        if let Some(cast) = details.cast {
            self.cast = Some(cast);
        }
        if let Some(reviews) = details.critic_reviews {
            self.critic_reviews = Some(reviews);
        }
        if let Some(providers) = details.watch_providers {
            self.watch_providers = Some(providers);
        }
        if let Some(url) = details.image_url {
            self.image_url = Some(url);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary_movie() -> Movie {
        Movie {
            id: "gen-abc".to_string(),
            title: "Heat".to_string(),
            year: "1995".to_string(),
            genre: vec!["crime".to_string(), "thriller".to_string()],
            plot: "A heist crew and a detective circle each other.".to_string(),
            rating: Some("8.3/10".to_string()),
            director: Some("Michael Mann".to_string()),
            cast: None,
            critic_reviews: None,
            watch_providers: None,
            image_url: Some("https://example.invalid/heat.jpg".to_string()),
        }
    }

    #[test]
    fn test_absorb_adds_enrichment_fields() {
        let mut movie = summary_movie();
        movie.absorb(MovieDetails {
            cast: Some(vec!["Al Pacino".to_string(), "Robert De Niro".to_string()]),
            critic_reviews: Some(vec![Review {
                source: "Variety".to_string(),
                snippet: "Relentless.".to_string(),
                score: Some("9/10".to_string()),
            }]),
            watch_providers: Some(vec!["Netflix".to_string()]),
            ..Default::default()
        });

        assert_eq!(movie.cast.as_ref().unwrap().len(), 2);
        assert_eq!(movie.critic_reviews.as_ref().unwrap()[0].source, "Variety");
        assert_eq!(movie.watch_providers.as_ref().unwrap()[0], "Netflix");
        // Summary fields untouched by an absent-field merge
        assert_eq!(movie.director.as_deref(), Some("Michael Mann"));
        assert_eq!(movie.plot, "A heist crew and a detective circle each other.");
    }

    #[test]
    fn test_absorb_preserves_known_fields_when_absent() {
        let mut movie = summary_movie();
        movie.absorb(MovieDetails::default());
        assert_eq!(movie, summary_movie());
    }

    #[test]
    fn test_absorb_overwrites_present_fields() {
        let mut movie = summary_movie();
        movie.absorb(MovieDetails {
            rating: Some("8.7/10".to_string()),
            genre: Some(vec!["crime".to_string()]),
            ..Default::default()
        });
        assert_eq!(movie.rating.as_deref(), Some("8.7/10"));
        assert_eq!(movie.genre, vec!["crime".to_string()]);
        assert_eq!(movie.id, "gen-abc");
    }

    #[test]
    fn test_movie_serializes_camel_case() {
        let movie = summary_movie();
        let json = serde_json::to_value(&movie).unwrap();
        assert!(json.get("imageUrl").is_some());
        assert!(json.get("image_url").is_none());
        // Absent optionals are omitted, not null
        assert!(json.get("criticReviews").is_none());
    }

    #[test]
    fn test_movie_deserializes_stored_row_shape() {
        let json = r#"{
            "id": "gen-1",
            "title": "Alien",
            "year": "1979",
            "genre": ["horror", "scifi"],
            "plot": "In space no one can hear you scream.",
            "rating": "8.5/10",
            "criticReviews": [{"source": "Empire", "snippet": "Terrifying.", "score": "5/5"}],
            "imageUrl": "https://example.invalid/alien.jpg"
        }"#;
        let movie: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.title, "Alien");
        assert_eq!(movie.critic_reviews.unwrap()[0].snippet, "Terrifying.");
        assert!(movie.director.is_none());
    }

    #[test]
    fn test_details_is_empty() {
        assert!(MovieDetails::default().is_empty());
        let details = MovieDetails {
            director: Some("Ridley Scott".to_string()),
            ..Default::default()
        };
        assert!(!details.is_empty());
    }
}
