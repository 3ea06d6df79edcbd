/// A selectable genre tag: the `id` is what goes into prompts and
/// persisted data, the `label` is for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenreOption {
    pub id: &'static str,
    pub label: &'static str,
}

pub const AVAILABLE_GENRES: &[GenreOption] = &[
    GenreOption { id: "action", label: "Action" },
    GenreOption { id: "adventure", label: "Adventure" },
    GenreOption { id: "animation", label: "Animation" },
    GenreOption { id: "comedy", label: "Comedy" },
    GenreOption { id: "crime", label: "Crime" },
    GenreOption { id: "documentary", label: "Documentary" },
    GenreOption { id: "drama", label: "Drama" },
    GenreOption { id: "fantasy", label: "Fantasy" },
    GenreOption { id: "horror", label: "Horror" },
    GenreOption { id: "mystery", label: "Mystery" },
    GenreOption { id: "romance", label: "Romance" },
    GenreOption { id: "scifi", label: "Sci-Fi" },
    GenreOption { id: "thriller", label: "Thriller" },
    GenreOption { id: "western", label: "Western" },
];

/// Look up a genre by its id (case-insensitive).
pub fn find_genre(id: &str) -> Option<&'static GenreOption> {
    AVAILABLE_GENRES
        .iter()
        .find(|g| g.id.eq_ignore_ascii_case(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_unique_ids() {
        let mut ids: Vec<&str> = AVAILABLE_GENRES.iter().map(|g| g.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), AVAILABLE_GENRES.len());
    }

    #[test]
    fn test_find_genre_case_insensitive() {
        assert_eq!(find_genre("SciFi".to_lowercase().as_str()).unwrap().label, "Sci-Fi");
        assert_eq!(find_genre("ACTION").unwrap().id, "action");
        assert!(find_genre("telenovela").is_none());
    }
}
