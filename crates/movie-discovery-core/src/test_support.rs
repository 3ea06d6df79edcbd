use async_trait::async_trait;
use movie_discovery_backends::{
    AuthError, AuthService, ModelError, StoreError, TextModel, UserDataStore,
};
use movie_discovery_models::{Movie, RatedMovie, Session, User};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::watch;

pub fn movie(id: &str, title: &str) -> Movie {
    Movie {
        id: id.to_string(),
        title: title.to_string(),
        year: "2020".to_string(),
        genre: vec!["drama".to_string()],
        plot: "Things happen.".to_string(),
        rating: Some("7.0/10".to_string()),
        director: None,
        cast: None,
        critic_reviews: None,
        watch_providers: None,
        image_url: None,
    }
}

/// In-memory auth double publishing transitions on a watch channel, the
/// same contract the REST client exposes.
pub struct FakeAuth {
    tx: watch::Sender<Option<Session>>,
    accounts: Mutex<HashMap<String, String>>,
    unconfirmed: Mutex<HashSet<String>>,
}

impl FakeAuth {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(None);
        Self {
            tx,
            accounts: Mutex::new(HashMap::new()),
            unconfirmed: Mutex::new(HashSet::new()),
        }
    }

    pub fn with_account(email: &str, password: &str) -> Self {
        let auth = Self::new();
        auth.accounts
            .lock()
            .unwrap()
            .insert(email.to_string(), password.to_string());
        auth
    }

    pub fn session_for(email: &str) -> Session {
        Session {
            user: User {
                id: format!("user-{}", email),
                email: email.to_string(),
            },
            access_token: "test-token".to_string(),
        }
    }

    /// Simulate the auth service reporting a transition out of band,
    /// e.g. a restored session at startup.
    pub fn publish(&self, session: Option<Session>) {
        self.tx.send_replace(session);
    }
}

#[async_trait]
impl AuthService for FakeAuth {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        if self.unconfirmed.lock().unwrap().contains(email) {
            return Err(AuthError::EmailNotConfirmed);
        }
        match self.accounts.lock().unwrap().get(email) {
            Some(stored) if stored == password => {}
            _ => return Err(AuthError::InvalidCredentials),
        }
        let session = Self::session_for(email);
        self.tx.send_replace(Some(session.clone()));
        Ok(session)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<(), AuthError> {
        self.accounts
            .lock()
            .unwrap()
            .insert(email.to_string(), password.to_string());
        // Accounts require confirmation before they can sign in.
        self.unconfirmed.lock().unwrap().insert(email.to_string());
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.tx.send_replace(None);
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.tx.subscribe()
    }
}

/// In-memory row store with failure injection.
#[derive(Default)]
pub struct MemStore {
    watchlist: Mutex<HashMap<String, Vec<Movie>>>,
    ratings: Mutex<HashMap<String, HashMap<String, RatedMovie>>>,
    pub fail_writes: AtomicBool,
    pub fail_reads: AtomicBool,
    pub write_count: AtomicUsize,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_watchlist(&self, user_id: &str, movies: Vec<Movie>) {
        self.watchlist
            .lock()
            .unwrap()
            .insert(user_id.to_string(), movies);
    }

    pub fn seed_ratings(&self, user_id: &str, ratings: HashMap<String, RatedMovie>) {
        self.ratings
            .lock()
            .unwrap()
            .insert(user_id.to_string(), ratings);
    }

    pub fn writes(&self) -> usize {
        self.write_count.load(Ordering::SeqCst)
    }

    fn write_gate(&self) -> Result<(), StoreError> {
        self.write_count.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Service {
                status: 500,
                message: "injected write failure".to_string(),
            });
        }
        Ok(())
    }

    fn read_gate(&self) -> Result<(), StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Service {
                status: 500,
                message: "injected read failure".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl UserDataStore for MemStore {
    async fn fetch_watchlist(&self, user_id: &str) -> Result<Vec<Movie>, StoreError> {
        self.read_gate()?;
        Ok(self
            .watchlist
            .lock()
            .unwrap()
            .get(user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn fetch_ratings(
        &self,
        user_id: &str,
    ) -> Result<HashMap<String, RatedMovie>, StoreError> {
        self.read_gate()?;
        Ok(self
            .ratings
            .lock()
            .unwrap()
            .get(user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn insert_watchlist(&self, user_id: &str, movie: &Movie) -> Result<(), StoreError> {
        self.write_gate()?;
        self.watchlist
            .lock()
            .unwrap()
            .entry(user_id.to_string())
            .or_default()
            .push(movie.clone());
        Ok(())
    }

    async fn delete_watchlist(&self, user_id: &str, movie_id: &str) -> Result<(), StoreError> {
        self.write_gate()?;
        if let Some(list) = self.watchlist.lock().unwrap().get_mut(user_id) {
            list.retain(|m| m.id != movie_id);
        }
        Ok(())
    }

    async fn upsert_rating(
        &self,
        user_id: &str,
        movie_id: &str,
        title: &str,
        score: u8,
    ) -> Result<(), StoreError> {
        self.write_gate()?;
        self.ratings
            .lock()
            .unwrap()
            .entry(user_id.to_string())
            .or_default()
            .insert(
                movie_id.to_string(),
                RatedMovie {
                    score,
                    title: title.to_string(),
                },
            );
        Ok(())
    }
}

/// Text model double that replays a scripted queue of responses.
#[derive(Default)]
pub struct ScriptedModel {
    responses: Mutex<VecDeque<Result<serde_json::Value, ModelError>>>,
}

impl ScriptedModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_ok(&self, payload: serde_json::Value) {
        self.responses.lock().unwrap().push_back(Ok(payload));
    }

    pub fn push_err(&self, error: ModelError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }
}

#[async_trait]
impl TextModel for ScriptedModel {
    async fn generate(
        &self,
        _prompt: &str,
        _response_schema: &serde_json::Value,
        _temperature: Option<f32>,
    ) -> Result<serde_json::Value, ModelError> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(ModelError::Service {
                    status: 500,
                    message: "no scripted response".to_string(),
                })
            })
    }
}

/// A well-formed recommendation payload of `n` movie summaries.
pub fn summaries_payload(n: usize) -> serde_json::Value {
    let items: Vec<serde_json::Value> = (0..n)
        .map(|i| {
            serde_json::json!({
                "title": format!("Movie {}", i),
                "year": "2021",
                "genre": ["action", "comedy"],
                "plot": format!("Plot {}", i),
                "rating": "8.0/10",
                "director": format!("Director {}", i),
            })
        })
        .collect();
    serde_json::Value::Array(items)
}
