use crate::config::{AnalysisRequest, OutputSettings};
use crate::domain::model::InputValues;
use crate::render::OutputFormat;
use crate::utils::error::{RatioError, Result};
use crate::utils::validation::{validate_one_of, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestFile {
    pub category: Option<String>,
    #[serde(default)]
    pub inputs: InputValues,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<String>,
    pub chart: Option<bool>,
    pub chart_width: Option<usize>,
}

impl RequestFile {
    /// 從 TOML 檔案載入請求
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RatioError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析請求
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RatioError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MARKET_PRICE})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RatioError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn output_settings(&self) -> Result<OutputSettings> {
        let defaults = OutputSettings::default();
        let format = match self.output.format.as_deref() {
            Some(raw) => {
                validate_one_of("output.format", raw, &OutputFormat::NAMES)?;
                raw.parse()?
            }
            None => defaults.format,
        };

        Ok(OutputSettings {
            format,
            chart: self.output.chart.unwrap_or(defaults.chart),
            chart_width: self.output.chart_width.unwrap_or(defaults.chart_width),
        })
    }

    pub fn into_request(self) -> Result<AnalysisRequest> {
        let output = self.output_settings()?;
        Ok(AnalysisRequest {
            category: self.category,
            inputs: self.inputs,
            output,
        })
    }
}

impl Validate for RequestFile {
    fn validate(&self) -> Result<()> {
        self.clone().into_request()?.validate()
    }
}
