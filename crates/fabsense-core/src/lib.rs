pub mod config;
pub mod error;
pub mod types;

pub use config::FabsenseConfig;
pub use error::{FabsenseError, Result};
pub use types::SessionId;
