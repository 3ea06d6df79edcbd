pub mod recommend;
pub mod session;
pub mod store;
pub mod sync;

pub use recommend::RecommendationPipeline;
pub use session::SessionStore;
pub use store::{AppState, AppStore};
pub use sync::SyncEngine;

#[cfg(test)]
mod test_support;
