#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::{registry, RequestProvider};
use crate::domain::model::InputValues;
use crate::render::chart::DEFAULT_WIDTH;
use crate::render::OutputFormat;
use crate::utils::error::{RatioError, Result};
use crate::utils::validation::{validate_known_keys, validate_range, validate_required_field, Validate};

pub const MIN_CHART_WIDTH: usize = 10;
pub const MAX_CHART_WIDTH: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputSettings {
    pub format: OutputFormat,
    pub chart: bool,
    pub chart_width: usize,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            chart: true,
            chart_width: DEFAULT_WIDTH,
        }
    }
}

/// A fully merged request: request file first, command line on top.
#[derive(Debug, Clone, Default)]
pub struct AnalysisRequest {
    pub category: Option<String>,
    pub inputs: InputValues,
    pub output: OutputSettings,
}

impl RequestProvider for AnalysisRequest {
    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn inputs(&self) -> Result<InputValues> {
        Ok(self.inputs.clone())
    }
}

impl Validate for AnalysisRequest {
    fn validate(&self) -> Result<()> {
        let key = validate_required_field("category", &self.category)?;
        let category = registry::find(key).ok_or_else(|| RatioError::UnknownCategory {
            key: key.clone(),
        })?;

        validate_known_keys("inputs", self.inputs.keys(), &category.field_keys())?;
        validate_range(
            "output.chart_width",
            self.output.chart_width,
            MIN_CHART_WIDTH,
            MAX_CHART_WIDTH,
        )?;
        Ok(())
    }
}
