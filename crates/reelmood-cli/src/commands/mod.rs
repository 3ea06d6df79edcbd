pub mod auth;
pub mod config;
pub mod details;
pub mod discover;
pub mod genres;
pub mod rate;
pub mod status;
pub mod watchlist;
