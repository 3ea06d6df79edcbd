use serde::{Deserialize, Serialize};

/// One user's rating of one movie, keyed by movie id in the ratings map.
///
/// The title is a denormalized copy kept so rated movies can be listed
/// without re-fetching the movie record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RatedMovie {
    pub score: u8, // 1-5 stars
    pub title: String,
}
