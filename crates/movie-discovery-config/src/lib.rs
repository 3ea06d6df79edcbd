pub mod credentials;
pub mod paths;
pub mod settings;

pub use credentials::CredentialStore;
pub use paths::{container_base_path, PathManager};
pub use settings::Settings;
