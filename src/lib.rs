pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::http::{MarsApi, MarsApiService, BASE_URL};
pub use config::{toml_config::TomlConfig, OverviewConfig};
pub use crate::core::overview::OverviewViewModel;
pub use domain::model::{MarsApiStatus, MarsProperty};
pub use domain::ports::{ConfigProvider, ListingSource};
pub use utils::error::{MarsApiError, Result};
