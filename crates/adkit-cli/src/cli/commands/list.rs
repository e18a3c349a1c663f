//! `adkit list` – show the devices in the catalog.

use anyhow::Result;

use adkit_core::catalog::Catalog;

pub fn run_list(catalog: &Catalog) -> Result<()> {
    if catalog.devices.is_empty() {
        println!("No devices in catalog.");
        return Ok(());
    }
    println!("{:<16} {:<10} {:<6} {}", "ID", "TYPE", "SIZES", "NAME");
    for device in &catalog.devices {
        let sizes = match device.download.size_table.len() {
            0 => "-".to_string(),
            n => n.to_string(),
        };
        println!(
            "{:<16} {:<10} {:<6} {}",
            device.id,
            device.product_type.as_deref().unwrap_or("-"),
            sizes,
            device.name
        );
    }
    Ok(())
}
