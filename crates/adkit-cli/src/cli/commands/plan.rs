//! `adkit plan` – resolve a device's bundle without downloading.

use anyhow::Result;

use adkit_core::assemble::{assemble, AssembleOptions};
use adkit_core::catalog::DeviceEntry;
use adkit_core::dimensions::Dimensions;
use adkit_core::probe::HttpProber;
use adkit_core::resolve::SearchBounds;

pub fn run_plan(
    device: &DeviceEntry,
    dims: &Dimensions,
    opts: &AssembleOptions,
    bounds: &SearchBounds,
) -> Result<()> {
    let prober = HttpProber;
    let resolved = assemble(device, dims, opts, &prober, bounds);
    println!(
        "{}: {} files (h={} w={} d={} t={})",
        device.id,
        resolved.len(),
        dims.height,
        dims.width,
        dims.depth,
        dims.thickness_or_depth()
    );
    for r in &resolved {
        println!("  [{:<10}] {}", r.provenance.label(), r.url);
        if let Some(note) = r.note() {
            println!("               {note}");
        }
    }
    Ok(())
}
