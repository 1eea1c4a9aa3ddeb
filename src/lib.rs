pub mod analyzer;
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod generator;
pub mod state;
pub mod types;

pub use error::AppError;
pub use state::{DbAccess, Store};

// ─── E2E Integration Tests ──────────────────────────────────────────────────
