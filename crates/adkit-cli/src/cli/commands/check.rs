//! `adkit check` – probe every bundle URL and report per-file status.

use anyhow::Result;
use serde::Serialize;

use adkit_core::assemble::AssembleOptions;
use adkit_core::catalog::DeviceEntry;
use adkit_core::diagnose::{diagnose, DiagnosticEntry};
use adkit_core::dimensions::Dimensions;
use adkit_core::probe::HttpProber;
use adkit_core::resolve::SearchBounds;

#[derive(Debug, Serialize)]
struct DeviceReport {
    device: String,
    files: Vec<DiagnosticEntry>,
}

pub fn run_check(
    targets: &[(DeviceEntry, Dimensions)],
    opts: &AssembleOptions,
    bounds: &SearchBounds,
    json: bool,
) -> Result<()> {
    let prober = HttpProber;
    let reports: Vec<DeviceReport> = targets
        .iter()
        .map(|(device, dims)| DeviceReport {
            device: device.id.clone(),
            files: diagnose(device, dims, opts, &prober, bounds),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    for report in &reports {
        let ok = report.files.iter().filter(|e| e.is_ok()).count();
        println!("{}: {}/{} ok", report.device, ok, report.files.len());
        for entry in &report.files {
            let code = entry
                .status_code
                .map(|c| c.to_string())
                .unwrap_or_else(|| "-".to_string());
            println!("  {:<9} {:<5} {}", entry.status, code, entry.url);
            if let Some(message) = &entry.message {
                println!("            {message}");
            }
            if let Some(note) = &entry.note {
                println!("            {note}");
            }
        }
    }
    Ok(())
}
