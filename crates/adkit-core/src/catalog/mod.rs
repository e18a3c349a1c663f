//! Device catalog: loading and validation of `devices.toml`.
//!
//! Parsing happens once, up front. The validated model has every default
//! resolved (prefix URL, instructions flag, display name), so the resolution
//! pipeline never re-derives them and malformed entries are rejected before
//! any network traffic.

mod raw;

use anyhow::{bail, Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::dimensions::Dimensions;
use crate::store;

/// Preset values for one dimension column of a size row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeBand {
    pub narrow: Option<u32>,
    pub med: Option<u32>,
    pub wide: Option<u32>,
}

/// One manufactured height variant, with optional width/thickness presets.
///
/// Substitution only ever reads the `med` column; `narrow`/`wide` are kept
/// for the customization form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeRow {
    pub h: u32,
    pub widths: Option<SizeBand>,
    pub thickness: Option<SizeBand>,
}

impl SizeRow {
    pub fn med_width(&self) -> Option<u32> {
        self.widths.and_then(|b| b.med)
    }

    pub fn med_thickness(&self) -> Option<u32> {
        self.thickness.and_then(|b| b.med)
    }
}

/// Validated download configuration for one device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadConfig {
    /// Fixed filenames joined into the store namespace verbatim.
    pub static_files: Vec<String>,
    /// Pattern for dimension-dependent files.
    pub variable_pattern: Option<String>,
    /// Part names expanded through `variable_pattern`.
    pub variable_parts: Vec<String>,
    /// Parts included when the customer wants a handle.
    pub handle_yes_parts: Vec<String>,
    /// Parts included when the customer declines the handle.
    pub handle_no_parts: Vec<String>,
    /// Pattern preferred for the `handle` part itself.
    pub handle_pattern: Option<String>,
    /// Manufactured size variants, in catalog order.
    pub size_table: Vec<SizeRow>,
    /// Content-store origin, normalized without a trailing slash.
    pub prefix_url: String,
    /// Append `instructions.txt` to the bundle.
    pub include_instructions: bool,
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceEntry {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub product_type: Option<String>,
    pub download: DownloadConfig,
}

impl DeviceEntry {
    /// Starting dimensions for this device's customization form.
    pub fn default_dimensions(&self) -> Dimensions {
        Dimensions::defaults_for(self.product_type.as_deref())
    }
}

/// The whole validated catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    pub devices: Vec<DeviceEntry>,
}

impl Catalog {
    /// Parses and validates a catalog document.
    pub fn from_toml_str(input: &str) -> Result<Catalog> {
        let raw: raw::RawCatalog = toml::from_str(input).context("parse device catalog")?;
        let mut devices = Vec::with_capacity(raw.device.len());
        let mut seen = HashSet::new();
        for entry in raw.device {
            let device = validate_device(entry)?;
            if !seen.insert(device.id.clone()) {
                bail!("duplicate device id: {}", device.id);
            }
            devices.push(device);
        }
        Ok(Catalog { devices })
    }

    pub fn find(&self, id: &str) -> Option<&DeviceEntry> {
        self.devices.iter().find(|d| d.id == id)
    }
}

/// Loads and validates the catalog at `path`.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let input = fs::read_to_string(path)
        .with_context(|| format!("read device catalog {}", path.display()))?;
    Catalog::from_toml_str(&input)
        .with_context(|| format!("invalid device catalog {}", path.display()))
}

fn validate_device(raw: raw::RawDevice) -> Result<DeviceEntry> {
    let id = raw.id.trim().to_string();
    if id.is_empty() {
        bail!("device with empty id");
    }

    let variable_parts = raw.variable_parts.unwrap_or_default();
    if !variable_parts.is_empty() && raw.variable_pattern.is_none() {
        bail!("device {id}: variableParts configured without variablePattern");
    }

    let mut size_table = Vec::new();
    for row in raw.size_table.unwrap_or_default() {
        if row.h == 0 {
            bail!("device {id}: size table heights must be positive");
        }
        size_table.push(SizeRow {
            h: row.h,
            widths: row.widths.map(band),
            thickness: row.thickness.map(band),
        });
    }

    let prefix_url = raw
        .prefix_url
        .as_deref()
        .unwrap_or(store::DEFAULT_PREFIX_URL)
        .trim_end_matches('/')
        .to_string();

    Ok(DeviceEntry {
        name: raw.name.unwrap_or_else(|| id.clone()),
        description: raw.description,
        product_type: raw.product_type,
        download: DownloadConfig {
            static_files: raw.static_files.unwrap_or_default(),
            variable_pattern: raw.variable_pattern,
            variable_parts,
            handle_yes_parts: raw.handle_yes_parts.unwrap_or_default(),
            handle_no_parts: raw.handle_no_parts.unwrap_or_default(),
            handle_pattern: raw.handle_pattern,
            size_table,
            prefix_url,
            include_instructions: raw.include_instructions.unwrap_or(true),
        },
        id,
    })
}

fn band(raw: raw::RawSizeBand) -> SizeBand {
    SizeBand {
        narrow: raw.narrow,
        med: raw.med,
        wide: raw.wide,
    }
}
