//! Label localization.
//!
//! Column labels, group labels and built-in captions ("S. No.", "Rows per
//! page:") are passed through an optional [`Localizer`]. Without one, or when
//! it returns an empty string, the raw text is shown.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::Row;

/// Translates a text key, optionally with interpolation parameters.
pub trait Localizer: Send + Sync {
    fn localize(&self, key: &str, params: Option<&Row>) -> String;
}

impl<F> Localizer for F
where
    F: Fn(&str, Option<&Row>) -> String + Send + Sync,
{
    fn localize(&self, key: &str, params: Option<&Row>) -> String {
        self(key, params)
    }
}

/// Localize `key`, falling back to `fallback` when there is no localizer or
/// it has no translation.
pub fn localize_or(localizer: Option<&dyn Localizer>, key: &str, fallback: &str) -> String {
    match localizer.map(|l| l.localize(key, None)) {
        Some(text) if !text.is_empty() => text,
        _ => fallback.to_string(),
    }
}

/// Localize a label that doubles as its own key.
pub fn localize_label(localizer: Option<&dyn Localizer>, label: &str) -> String {
    localize_or(localizer, label, label)
}

/// Dictionary-backed localizer, typically loaded from a YAML string table.
///
/// `{name}` placeholders are replaced from the params row.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StringTable {
    entries: HashMap<String, String>,
}

impl StringTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.entries.insert(key.into(), text.into());
        self
    }

    pub fn from_yaml(yaml: &str) -> crate::Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}

impl Localizer for StringTable {
    fn localize(&self, key: &str, params: Option<&Row>) -> String {
        let Some(text) = self.entries.get(key) else {
            return String::new();
        };
        match params {
            None => text.clone(),
            Some(params) => params.iter().fold(text.clone(), |acc, (name, value)| {
                let replacement = match value {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                acc.replace(&format!("{{{}}}", name), &replacement)
            }),
        }
    }
}
