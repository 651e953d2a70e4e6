pub mod config;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
pub mod utils;

use std::sync::Arc;

use config::Config;
use services::{TokenCodec, UserDirectory};

pub use startup::{build_router, Application};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub directory: Arc<dyn UserDirectory>,
    pub tokens: TokenCodec,
}
