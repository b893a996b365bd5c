//! Async client for the Spotify Web API: resource handlers over a shared transport
pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod options;
pub mod spotify;

pub use config::Config;
pub use error::{ApiError, Result};
pub use spotify::Spotify;
