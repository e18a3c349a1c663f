//! URL assembly: device config plus dimensions to an ordered URL list.
//!
//! Group order is fixed: static files, variable part files, the single
//! variable file, handle-dependent parts, instructions. Probing is strictly
//! sequential so the list and the request volume are deterministic. Assembly
//! never fails; files that cannot be confirmed ride along tagged
//! `Guessed` or `Unresolved`.

use crate::catalog::DeviceEntry;
use crate::dimensions::Dimensions;
use crate::probe::Prober;
use crate::resolve::{self, FileQuery, Provenance, ResolvedUrl, SearchBounds};
use crate::store;

/// Per-request toggles from the customization form.
#[derive(Debug, Clone, Copy)]
pub struct AssembleOptions {
    /// Use `handleYesParts` instead of `handleNoParts`.
    pub include_handle: bool,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            include_handle: true,
        }
    }
}

/// Resolves every file of a device bundle, in bundle order.
pub fn assemble(
    device: &DeviceEntry,
    dims: &Dimensions,
    opts: &AssembleOptions,
    prober: &dyn Prober,
    bounds: &SearchBounds,
) -> Vec<ResolvedUrl> {
    let cfg = &device.download;
    let mut urls = Vec::new();

    // Static files join the namespace verbatim and are never probed.
    for name in &cfg.static_files {
        urls.push(ResolvedUrl {
            url: store::file_url(&cfg.prefix_url, &device.id, name),
            provenance: Provenance::Exact,
        });
    }

    if let Some(pattern) = cfg.variable_pattern.as_deref() {
        if !cfg.variable_parts.is_empty() {
            for part in &cfg.variable_parts {
                urls.push(resolve_variable(device, pattern, Some(part), dims, prober, bounds));
            }
        } else if !pattern.contains("{part}") {
            // Single variable file. A pattern that expects a part name with
            // no parts configured would format to a degenerate filename, so
            // that case contributes nothing.
            urls.push(resolve_variable(device, pattern, None, dims, prober, bounds));
        }
    }

    let handle_parts = if opts.include_handle {
        &cfg.handle_yes_parts
    } else {
        &cfg.handle_no_parts
    };
    for part in handle_parts {
        // The handle part itself prefers the dedicated handle pattern.
        let pattern = if part.as_str() == "handle" {
            cfg.handle_pattern.as_deref().or(cfg.variable_pattern.as_deref())
        } else {
            cfg.variable_pattern.as_deref()
        };
        match pattern {
            Some(p) => urls.push(resolve_variable(device, p, Some(part), dims, prober, bounds)),
            None => urls.push(resolve::resolve_literal_part(
                &cfg.prefix_url,
                &device.id,
                part,
                prober,
            )),
        }
    }

    if cfg.include_instructions {
        urls.push(ResolvedUrl {
            url: store::file_url(&cfg.prefix_url, &device.id, store::INSTRUCTIONS_FILE),
            provenance: Provenance::Exact,
        });
    }

    urls
}

fn resolve_variable(
    device: &DeviceEntry,
    pattern: &str,
    part: Option<&str>,
    dims: &Dimensions,
    prober: &dyn Prober,
    bounds: &SearchBounds,
) -> ResolvedUrl {
    let q = FileQuery {
        prefix: &device.download.prefix_url,
        device_id: &device.id,
        pattern,
        part,
        dims,
        table: &device.download.size_table,
        bounds,
    };
    let resolved = resolve::resolve_file(&q, prober);
    if let Some(note) = resolved.note() {
        tracing::info!(device = %device.id, url = %resolved.url, "{}", note);
    }
    resolved
}
