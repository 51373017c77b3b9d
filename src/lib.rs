pub mod analytics;
pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod ledger;
pub mod point;
pub mod score;
pub mod session;
pub mod store;
// cmd and reports belong to the binary (main.rs).
