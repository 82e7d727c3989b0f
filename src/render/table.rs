use crate::core::Renderer;
use crate::domain::model::{Analysis, Category, ComputedRatios};
use crate::render::format::format_value;
use crate::utils::error::Result;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{CellAlignment, Table};

pub const EMPTY_MESSAGE: &str = "No ratios available. Provide inputs and run the analysis again.";

/// `(name, formatted value)` rows in derivation order.
pub fn rows(ratios: &ComputedRatios) -> Vec<(String, String)> {
    ratios
        .iter()
        .map(|(name, value)| (name.to_string(), format_value(Some(value))))
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct TableRenderer;

impl TableRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for TableRenderer {
    fn render(&self, analysis: &Analysis) -> Result<String> {
        if analysis.is_empty() {
            return Ok(EMPTY_MESSAGE.to_string());
        }

        let mut table = Table::new();
        table.load_preset(UTF8_FULL).set_header(vec!["Ratio", "Value"]);
        for (name, value) in rows(&analysis.ratios) {
            table.add_row(vec![name, value]);
        }
        if let Some(column) = table.column_mut(1) {
            column.set_cell_alignment(CellAlignment::Right);
        }

        Ok(format!("{}\n{}", analysis.category.title, table))
    }
}

/// The category overview shown by `finratio list`.
pub fn category_table(categories: &[Category]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Key", "Title", "Ratios"]);
    for category in categories {
        table.add_row(vec![
            category.key.as_str(),
            category.title,
            category.description,
        ]);
    }
    table.to_string()
}

/// The input form of one category.
pub fn field_table(category: &Category) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Key", "Label", "Kind", "Step"]);
    for field in category.fields {
        table.add_row(vec![
            field.key.to_string(),
            field.label.to_string(),
            field.kind.to_string(),
            field.step.map_or_else(|| "any".to_string(), |s| s.to_string()),
        ]);
    }
    format!("{}\n{}\n{}", category.title, category.description, table)
}
