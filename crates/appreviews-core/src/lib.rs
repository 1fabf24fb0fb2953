pub mod config;
pub mod error;
pub mod review;
pub mod target;

pub use config::{load_config, load_config_from_env, ScraperConfig};
pub use error::{ConfigError, TargetError};
pub use review::Review;
pub use target::{slugify, ContentKind, Target};
