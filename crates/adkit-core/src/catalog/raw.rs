//! Raw serde shapes for the external `devices.toml` document.
//!
//! Keys are camelCase to match the published catalog format. Everything
//! beyond `id` is optional here; [`super`] validates and fills defaults.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(super) struct RawCatalog {
    #[serde(default)]
    pub device: Vec<RawDevice>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RawDevice {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub product_type: Option<String>,
    #[serde(default)]
    pub static_files: Option<Vec<String>>,
    #[serde(default)]
    pub variable_pattern: Option<String>,
    #[serde(default)]
    pub variable_parts: Option<Vec<String>>,
    #[serde(default)]
    pub handle_yes_parts: Option<Vec<String>>,
    #[serde(default)]
    pub handle_no_parts: Option<Vec<String>>,
    #[serde(default)]
    pub handle_pattern: Option<String>,
    #[serde(default)]
    pub size_table: Option<Vec<RawSizeRow>>,
    #[serde(default)]
    pub prefix_url: Option<String>,
    #[serde(default)]
    pub include_instructions: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawSizeRow {
    pub h: u32,
    #[serde(default)]
    pub widths: Option<RawSizeBand>,
    #[serde(default)]
    pub thickness: Option<RawSizeBand>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawSizeBand {
    #[serde(default)]
    pub narrow: Option<u32>,
    #[serde(default)]
    pub med: Option<u32>,
    #[serde(default)]
    pub wide: Option<u32>,
}
