use crate::core::Renderer;
use crate::domain::model::{Analysis, CategoryKey};
use crate::utils::error::{RatioError, Result};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct RatioEntry<'a> {
    name: &'a str,
    value: f64,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    category: CategoryKey,
    title: &'a str,
    ratios: Vec<RatioEntry<'a>>,
}

impl<'a> From<&'a Analysis> for Report<'a> {
    fn from(analysis: &'a Analysis) -> Self {
        Self {
            category: analysis.category.key,
            title: analysis.category.title,
            ratios: analysis
                .ratios
                .iter()
                .map(|(name, value)| RatioEntry { name, value })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct JsonRenderer {
    pretty: bool,
}

impl JsonRenderer {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl Renderer for JsonRenderer {
    fn render(&self, analysis: &Analysis) -> Result<String> {
        let report = Report::from(analysis);
        let json = if self.pretty {
            serde_json::to_string_pretty(&report)?
        } else {
            serde_json::to_string(&report)?
        };
        Ok(json)
    }
}

/// `ratio,value` rows with unformatted values.
#[derive(Debug, Clone, Default)]
pub struct CsvRenderer;

impl CsvRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for CsvRenderer {
    fn render(&self, analysis: &Analysis) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(["ratio", "value"])?;
        for (name, value) in analysis.ratios.iter() {
            writer.write_record([name, value.to_string().as_str()])?;
        }

        let bytes = writer.into_inner().map_err(|e| RatioError::RenderError {
            message: format!("Failed to flush CSV output: {}", e),
        })?;
        String::from_utf8(bytes).map_err(|e| RatioError::RenderError {
            message: format!("CSV output is not valid UTF-8: {}", e),
        })
    }
}
