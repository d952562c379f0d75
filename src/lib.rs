//! Posts Cache - a stale-while-revalidate caching service
//!
//! Sits between HTTP clients and a slow upstream posts API, serving cached
//! data immediately and refreshing it in the background.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod tasks;
pub mod upstream;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_purge_task;
