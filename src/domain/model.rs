use crate::utils::error::{RatioError, Result};
use crate::utils::validation::parse_finite;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKey {
    Valuation,
    Profitability,
    Liquidity,
    Leverage,
    Efficiency,
    Market,
    Cashflow,
    Intrinsic,
}

impl CategoryKey {
    pub const ALL: [CategoryKey; 8] = [
        CategoryKey::Valuation,
        CategoryKey::Profitability,
        CategoryKey::Liquidity,
        CategoryKey::Leverage,
        CategoryKey::Efficiency,
        CategoryKey::Market,
        CategoryKey::Cashflow,
        CategoryKey::Intrinsic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryKey::Valuation => "valuation",
            CategoryKey::Profitability => "profitability",
            CategoryKey::Liquidity => "liquidity",
            CategoryKey::Leverage => "leverage",
            CategoryKey::Efficiency => "efficiency",
            CategoryKey::Market => "market",
            CategoryKey::Cashflow => "cashflow",
            CategoryKey::Intrinsic => "intrinsic",
        }
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryKey {
    type Err = RatioError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        CategoryKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == wanted)
            .ok_or_else(|| RatioError::UnknownCategory { key: s.to_string() })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    Numeric,
    /// Comma-separated numbers kept as text until the formula parses them.
    NumericList,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Numeric => f.write_str("numeric"),
            FieldKind::NumericList => f.write_str("numeric list"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldDef {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub step: Option<f64>,
}

impl FieldDef {
    pub const fn number(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            kind: FieldKind::Numeric,
            step: None,
        }
    }

    pub const fn stepped(key: &'static str, label: &'static str, step: f64) -> Self {
        Self {
            key,
            label,
            kind: FieldKind::Numeric,
            step: Some(step),
        }
    }

    pub const fn list(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            kind: FieldKind::NumericList,
            step: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub key: CategoryKey,
    pub title: &'static str,
    pub description: &'static str,
    pub fields: &'static [FieldDef],
}

impl Category {
    pub fn field(&self, key: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn field_keys(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.key).collect()
    }
}

/// A value as it arrives from the caller, before any coercion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        RawValue::Number(v)
    }
}

impl From<&str> for RawValue {
    fn from(v: &str) -> Self {
        RawValue::Text(v.to_string())
    }
}

impl From<String> for RawValue {
    fn from(v: String) -> Self {
        RawValue::Text(v)
    }
}

impl RawValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            RawValue::Number(v) if v.is_finite() => Some(*v),
            RawValue::Number(_) => None,
            RawValue::Text(s) => parse_finite(s),
        }
    }

    pub fn as_text(&self) -> String {
        match self {
            RawValue::Number(v) => v.to_string(),
            RawValue::Text(s) => s.clone(),
        }
    }
}

/// Inputs for one analysis request, keyed by field key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputValues {
    values: HashMap<String, RawValue>,
}

impl InputValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<RawValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut inputs = Self::new();
        for (key, value) in pairs {
            inputs.insert_raw(key, value);
        }
        inputs
    }

    pub fn insert_raw(&mut self, key: impl Into<String>, value: impl Into<RawValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Parses a `key=value` assignment and stores the value as text.
    pub fn parse_assignment(&mut self, raw: &str) -> Result<()> {
        let (key, value) = raw.split_once('=').ok_or_else(|| RatioError::AssignmentError {
            raw: raw.to_string(),
            reason: "expected key=value".to_string(),
        })?;
        let key = key.trim();
        if key.is_empty() {
            return Err(RatioError::AssignmentError {
                raw: raw.to_string(),
                reason: "field key is empty".to_string(),
            });
        }
        self.insert_raw(key, value.trim());
        Ok(())
    }

    /// Later values win.
    pub fn merge(&mut self, other: InputValues) {
        self.values.extend(other.values);
    }

    pub fn raw(&self, key: &str) -> Option<&RawValue> {
        self.values.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.values.keys()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Ratios in the order they were derived.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComputedRatios {
    entries: Vec<(String, f64)>,
}

impl ComputedRatios {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), *v))
    }

    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.entries.iter().map(|(_, v)| *v).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Analysis {
    pub category: &'static Category,
    pub ratios: ComputedRatios,
}

impl Analysis {
    pub fn is_empty(&self) -> bool {
        self.ratios.is_empty()
    }
}
