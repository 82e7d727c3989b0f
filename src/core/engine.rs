use crate::core::formulas::{self, FormulaInputs};
use crate::core::registry;
use crate::core::RequestProvider;
use crate::domain::model::{Analysis, Category, FieldKind, InputValues};
use crate::utils::error::{RatioError, Result};

#[derive(Debug, Clone, Copy)]
pub struct RatioEngine {
    categories: &'static [Category],
}

impl Default for RatioEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RatioEngine {
    pub fn new() -> Self {
        Self {
            categories: registry::categories(),
        }
    }

    pub fn categories(&self) -> &'static [Category] {
        self.categories
    }

    pub fn category(&self, key: &str) -> Result<&'static Category> {
        registry::find(key).ok_or_else(|| RatioError::UnknownCategory {
            key: key.to_string(),
        })
    }

    /// Runs one category's formulas. The only failure is an unknown key.
    pub fn analyze(&self, key: &str, inputs: &InputValues) -> Result<Analysis> {
        let category = self.category(key)?;
        Ok(self.analyze_category(category, inputs))
    }

    pub fn analyze_category(&self, category: &'static Category, inputs: &InputValues) -> Analysis {
        let coerced = coerce(category, inputs);
        let ratios = formulas::compute(category.key, &coerced);

        tracing::debug!(
            "Computed {} ratio(s) for '{}' from {} input(s)",
            ratios.len(),
            category.key,
            inputs.len()
        );
        if ratios.is_empty() {
            tracing::warn!("No ratios could be computed for '{}'", category.key);
        }

        Analysis { category, ratios }
    }

    pub fn run<R: RequestProvider>(&self, request: &R) -> Result<Analysis> {
        let key = request
            .category()
            .ok_or_else(|| RatioError::MissingConfigError {
                field: "category".to_string(),
            })?;
        let inputs = request.inputs()?;
        tracing::info!("Analyzing '{}' with {} input(s)", key, inputs.len());
        self.analyze(key, &inputs)
    }
}

/// Applies each field's kind to the raw values. Keys the category does not
/// declare are ignored.
pub fn coerce(category: &'static Category, inputs: &InputValues) -> FormulaInputs {
    let mut coerced = FormulaInputs::new();

    for field in category.fields {
        let Some(raw) = inputs.raw(field.key) else {
            continue;
        };
        match field.kind {
            FieldKind::Numeric => match raw.as_number() {
                Some(value) => coerced.set_number(field.key, value),
                None => tracing::debug!("Skipping '{}': not a finite number", field.key),
            },
            FieldKind::NumericList => coerced.set_list(field.key, raw.as_text()),
        }
    }

    for key in inputs.keys() {
        if category.field(key).is_none() {
            tracing::debug!("Ignoring '{}': not a field of '{}'", key, category.key);
        }
    }

    coerced
}
