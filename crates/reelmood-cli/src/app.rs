use color_eyre::eyre::{eyre, Result};
use movie_discovery_backends::{AuthService, GeminiClient, RestAuth, RestStore};
use movie_discovery_config::{CredentialStore, PathManager, Settings};
use movie_discovery_core::{AppStore, RecommendationPipeline, SessionStore, SyncEngine};
use movie_discovery_models::{Movie, Session, User};
use std::sync::Arc;
use tracing::warn;

/// Everything a command needs, wired once per invocation: configuration,
/// the persisted session, the backend clients and the core components
/// around the shared state.
pub struct App {
    pub paths: PathManager,
    pub settings: Settings,
    pub credentials: CredentialStore,
    pub store: AppStore,
    pub session: SessionStore,
    pub sync: SyncEngine,
    pub pipeline: RecommendationPipeline,
}

impl App {
    pub fn init() -> Result<Self> {
        let paths = PathManager::default();
        paths
            .ensure_directories()
            .map_err(|e| eyre!("Failed to create application directories: {}", e))?;

        let settings = Settings::load(&paths.settings_file())
            .map_err(|e| eyre!("Failed to load configuration: {}", e))?;
        settings.warn_on_missing();

        let mut credentials = CredentialStore::new(paths.credentials_file());
        credentials
            .load()
            .map_err(|e| eyre!("Failed to load credentials: {}", e))?;

        let restored = restored_session(&credentials);

        let store_url = settings.store_url.clone().unwrap_or_default();
        let anon_key = settings.store_anon_key.clone().unwrap_or_default();

        let auth = Arc::new(RestAuth::new(store_url.clone(), anon_key.clone(), restored));
        let data = Arc::new(RestStore::new(store_url, anon_key, auth.subscribe()));
        let model = Arc::new(GeminiClient::new(
            settings.gemini_api_key.clone(),
            settings.model.clone(),
        ));

        let store = AppStore::new();
        let session = SessionStore::new(store.clone(), auth.clone(), data.clone());
        let sync = SyncEngine::new(store.clone(), data);
        let pipeline = RecommendationPipeline::new(store.clone(), model);

        Ok(Self {
            paths,
            settings,
            credentials,
            store,
            session,
            sync,
            pipeline,
        })
    }

    /// Hydrate the shared state from the current session: the startup
    /// session check plus the bulk load it triggers.
    pub async fn hydrate(&self) {
        self.session.check_session().await;
    }

    pub fn persist_session(&mut self, session: &Session) -> Result<()> {
        self.credentials.set_access_token(session.access_token.clone());
        self.credentials.set_user_id(session.user.id.clone());
        self.credentials.set_user_email(session.user.email.clone());
        self.credentials
            .save()
            .map_err(|e| eyre!("Failed to save credentials: {}", e))
    }

    pub fn clear_persisted_session(&mut self) -> Result<()> {
        self.credentials.clear_session();
        self.credentials
            .save()
            .map_err(|e| eyre!("Failed to save credentials: {}", e))
    }

    /// Stash the latest recommendation batch so a later invocation can
    /// address its movies by position or id.
    pub fn save_discover_batch(&self, movies: &[Movie]) -> Result<()> {
        let path = self.paths.discover_cache_file();
        let content = serde_json::to_string_pretty(movies)?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Load the stashed batch. A missing or corrupt file yields an empty
    /// batch; corruption is logged and the file left for inspection.
    pub fn load_discover_batch(&self) -> Vec<Movie> {
        let path = self.paths.discover_cache_file();
        if !path.exists() {
            return Vec::new();
        }
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read discovery batch");
                return Vec::new();
            }
        };
        match serde_json::from_str(&content) {
            Ok(movies) => movies,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Discovery batch is corrupt; ignoring");
                Vec::new()
            }
        }
    }

    /// Resolve a movie selector against a batch: a 1-based position or a
    /// movie id.
    pub fn select_movie<'a>(movies: &'a [Movie], selector: &str) -> Result<&'a Movie> {
        if let Ok(index) = selector.parse::<usize>() {
            return movies
                .get(index.checked_sub(1).ok_or_else(|| eyre!("Positions start at 1"))?)
                .ok_or_else(|| {
                    eyre!(
                        "Position {} is out of range (the list has {} movies)",
                        index,
                        movies.len()
                    )
                });
        }
        movies
            .iter()
            .find(|m| m.id == selector)
            .ok_or_else(|| eyre!("No movie matches '{}'", selector))
    }
}

/// Rebuild the session from persisted credentials, if a complete set is
/// present. The access token is trusted as-is; an expired one surfaces as
/// a failed bulk load, not an error here.
fn restored_session(credentials: &CredentialStore) -> Option<Session> {
    if !credentials.has_session() {
        return None;
    }
    Some(Session {
        user: User {
            id: credentials.get_user_id()?.clone(),
            email: credentials.get_user_email().cloned().unwrap_or_default(),
        },
        access_token: credentials.get_access_token()?.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: &str, title: &str) -> Movie {
        Movie {
            id: id.to_string(),
            title: title.to_string(),
            year: "2020".to_string(),
            genre: vec![],
            plot: String::new(),
            rating: None,
            director: None,
            cast: None,
            critic_reviews: None,
            watch_providers: None,
            image_url: None,
        }
    }

    #[test]
    fn test_select_movie_by_position() {
        let movies = vec![movie("gen-a", "Heat"), movie("gen-b", "Dune")];
        assert_eq!(App::select_movie(&movies, "2").unwrap().title, "Dune");
    }

    #[test]
    fn test_select_movie_by_id() {
        let movies = vec![movie("gen-a", "Heat"), movie("gen-b", "Dune")];
        assert_eq!(App::select_movie(&movies, "gen-a").unwrap().title, "Heat");
    }

    #[test]
    fn test_select_movie_rejects_out_of_range_and_zero() {
        let movies = vec![movie("gen-a", "Heat")];
        assert!(App::select_movie(&movies, "2").is_err());
        assert!(App::select_movie(&movies, "0").is_err());
        assert!(App::select_movie(&movies, "gen-z").is_err());
    }

    #[test]
    fn test_restored_session_requires_complete_credentials() {
        let mut creds = CredentialStore::new(std::path::PathBuf::from("/tmp/unused"));
        assert!(restored_session(&creds).is_none());

        creds.set_access_token("tok".to_string());
        assert!(restored_session(&creds).is_none());

        creds.set_user_id("user-1".to_string());
        let session = restored_session(&creds).unwrap();
        assert_eq!(session.user.id, "user-1");
        assert_eq!(session.user.email, "");
    }
}
