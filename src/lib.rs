pub mod config;
pub mod core;
pub mod domain;
pub mod render;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use config::{toml_config::RequestFile, AnalysisRequest, OutputSettings};
pub use core::engine::RatioEngine;
pub use domain::model::{Analysis, CategoryKey, ComputedRatios, InputValues, RawValue};
pub use utils::error::{RatioError, Result};
