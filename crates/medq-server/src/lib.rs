pub mod config;
pub mod error;
pub mod handlers;
pub mod observability;
pub mod seed;
pub mod server;
pub mod state;

pub use config::{AppConfig, load_config};
pub use server::{build_app, serve};
pub use state::AppState;
