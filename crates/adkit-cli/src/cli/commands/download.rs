//! `adkit download` – fetch a device bundle and write the ZIP archive.

use anyhow::{Context, Result};
use std::path::Path;

use adkit_core::assemble::{assemble, AssembleOptions};
use adkit_core::bundle::{self, HttpFetcher};
use adkit_core::catalog::DeviceEntry;
use adkit_core::dimensions::Dimensions;
use adkit_core::probe::HttpProber;
use adkit_core::resolve::SearchBounds;

pub fn run_download(
    device: &DeviceEntry,
    dims: &Dimensions,
    opts: &AssembleOptions,
    bounds: &SearchBounds,
    output_dir: &Path,
) -> Result<()> {
    let prober = HttpProber;
    let resolved = assemble(device, dims, opts, &prober, bounds);
    for r in &resolved {
        if let Some(note) = r.note() {
            println!("{note}");
        }
    }
    tracing::info!(device = %device.id, files = resolved.len(), "bundle resolved");

    let fetcher = HttpFetcher;
    let bytes = bundle::package(&resolved, &fetcher)
        .with_context(|| format!("bundle {} failed", device.id))?;
    let path = bundle::write_bundle(output_dir, &device.id, &bytes)?;
    println!(
        "Wrote {} ({} files, {} bytes, sha256 {})",
        path.display(),
        resolved.len(),
        bytes.len(),
        bundle::sha256_hex(&bytes)
    );
    Ok(())
}
