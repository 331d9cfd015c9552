pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use config::{Settings, load_config};
pub use error::{CoreError, CoreResult};
