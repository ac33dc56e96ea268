pub mod settings;

pub use settings::{AlertConfig, ApiConfig, AppConfig};
