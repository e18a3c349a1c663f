//! Shared helpers for the device commands: catalog location and device
//! selection with prefix overrides applied.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use adkit_core::catalog::{self, Catalog, DeviceEntry};
use adkit_core::config::AdkitConfig;

/// Catalog file location: flag, then config, then `devices.toml` in the
/// working directory.
pub fn catalog_path(flag: Option<&Path>, cfg: &AdkitConfig) -> PathBuf {
    flag.map(Path::to_path_buf)
        .or_else(|| cfg.catalog_path.clone())
        .unwrap_or_else(|| PathBuf::from("devices.toml"))
}

pub fn load_catalog(flag: Option<&Path>, cfg: &AdkitConfig) -> Result<Catalog> {
    catalog::load_catalog(&catalog_path(flag, cfg))
}

/// Looks up a device and applies any prefix override (flag beats config).
pub fn select_device(
    catalog: &Catalog,
    id: &str,
    prefix_flag: Option<&str>,
    cfg: &AdkitConfig,
) -> Result<DeviceEntry> {
    let device = catalog
        .find(id)
        .cloned()
        .with_context(|| format!("unknown device id: {id} (try `adkit list`)"))?;
    Ok(apply_prefix_override(device, prefix_flag, cfg))
}

/// Every device in the catalog, with prefix overrides applied.
pub fn all_devices(
    catalog: &Catalog,
    prefix_flag: Option<&str>,
    cfg: &AdkitConfig,
) -> Vec<DeviceEntry> {
    catalog
        .devices
        .iter()
        .map(|d| apply_prefix_override(d.clone(), prefix_flag, cfg))
        .collect()
}

fn apply_prefix_override(
    mut device: DeviceEntry,
    prefix_flag: Option<&str>,
    cfg: &AdkitConfig,
) -> DeviceEntry {
    if let Some(prefix) = prefix_flag.or(cfg.prefix_url.as_deref()) {
        device.download.prefix_url = prefix.trim_end_matches('/').to_string();
    }
    device
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> Catalog {
        Catalog::from_toml_str(
            "[[device]]\nid = \"grip\"\nprefixUrl = \"https://store.example\"\n",
        )
        .unwrap()
    }

    #[test]
    fn catalog_path_precedence() {
        let mut cfg = AdkitConfig::default();
        assert_eq!(catalog_path(None, &cfg), PathBuf::from("devices.toml"));

        cfg.catalog_path = Some(PathBuf::from("/srv/devices.toml"));
        assert_eq!(catalog_path(None, &cfg), PathBuf::from("/srv/devices.toml"));
        assert_eq!(
            catalog_path(Some(Path::new("local.toml")), &cfg),
            PathBuf::from("local.toml")
        );
    }

    #[test]
    fn unknown_device_is_an_error() {
        let catalog = sample_catalog();
        let err = select_device(&catalog, "nope", None, &AdkitConfig::default()).unwrap_err();
        assert!(err.to_string().contains("unknown device id: nope"), "{err:#}");
    }

    #[test]
    fn prefix_override_precedence() {
        let catalog = sample_catalog();
        let mut cfg = AdkitConfig::default();

        let device = select_device(&catalog, "grip", None, &cfg).unwrap();
        assert_eq!(device.download.prefix_url, "https://store.example");

        cfg.prefix_url = Some("https://mirror.example/".to_string());
        let device = select_device(&catalog, "grip", None, &cfg).unwrap();
        assert_eq!(device.download.prefix_url, "https://mirror.example");

        let device = select_device(&catalog, "grip", Some("http://127.0.0.1:9000"), &cfg).unwrap();
        assert_eq!(device.download.prefix_url, "http://127.0.0.1:9000");
    }
}
