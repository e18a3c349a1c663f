//! Diagnostics: dry-run resolution plus per-URL status classification.
//!
//! Runs the same assembly pipeline as a real download, then probes every
//! resulting URL without fetching a single body. Never aborts; an
//! unreachable store shows up as `network` rows, not an error.

use serde::Serialize;
use std::fmt;

use crate::assemble::{assemble, AssembleOptions};
use crate::catalog::DeviceEntry;
use crate::dimensions::Dimensions;
use crate::probe::{ProbeOutcome, Prober};
use crate::resolve::SearchBounds;

/// Classified probe status for one URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagStatus {
    Ok,
    NotFound,
    Error,
    Network,
}

impl fmt::Display for DiagStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DiagStatus::Ok => "ok",
            DiagStatus::NotFound => "not-found",
            DiagStatus::Error => "error",
            DiagStatus::Network => "network",
        };
        f.write_str(s)
    }
}

/// One row of the diagnostics report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticEntry {
    pub url: String,
    pub status: DiagStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Substitution note when the URL was not an exact match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl DiagnosticEntry {
    pub fn is_ok(&self) -> bool {
        self.status == DiagStatus::Ok
    }
}

/// Probes every URL the assembly pipeline produces for a device.
pub fn diagnose(
    device: &DeviceEntry,
    dims: &Dimensions,
    opts: &AssembleOptions,
    prober: &dyn Prober,
    bounds: &SearchBounds,
) -> Vec<DiagnosticEntry> {
    assemble(device, dims, opts, prober, bounds)
        .into_iter()
        .map(|resolved| {
            let note = resolved.note();
            let (status, status_code, message) = match prober.status(&resolved.url) {
                ProbeOutcome::Ok(code) => (DiagStatus::Ok, Some(code), None),
                ProbeOutcome::NotFound => (DiagStatus::NotFound, Some(404), None),
                ProbeOutcome::HttpError(code) => (
                    DiagStatus::Error,
                    Some(code),
                    Some(status_line(code)),
                ),
                ProbeOutcome::Network(message) => (DiagStatus::Network, None, Some(message)),
            };
            DiagnosticEntry {
                url: resolved.url,
                status,
                status_code,
                message,
                note,
            }
        })
        .collect()
}

/// "HTTP 403 Forbidden" style message for error rows.
fn status_line(code: u32) -> String {
    let phrase = match code {
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        405 => "Method Not Allowed",
        408 => "Request Timeout",
        410 => "Gone",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        _ => "",
    };
    if phrase.is_empty() {
        format!("HTTP {code}")
    } else {
        format!("HTTP {code} {phrase}")
    }
}
