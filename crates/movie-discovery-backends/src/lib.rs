pub mod auth;
pub mod error;
pub mod gemini;
pub mod poster;
pub mod store;
pub mod traits;

pub use auth::RestAuth;
pub use error::{AuthError, ModelError, StoreError};
pub use gemini::GeminiClient;
pub use poster::poster_url;
pub use store::RestStore;
pub use traits::{AuthService, TextModel, UserDataStore};
