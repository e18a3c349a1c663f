//! CLI for the adkit device bundler.

mod commands;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use adkit_core::assemble::AssembleOptions;
use adkit_core::catalog::DeviceEntry;
use adkit_core::config;
use adkit_core::dimensions::Dimensions;

use commands::{common, run_check, run_download, run_list, run_plan};

/// Top-level CLI for the adkit device bundler.
#[derive(Debug, Parser)]
#[command(name = "adkit")]
#[command(about = "adkit: assistive-device catalog and bundle downloader", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Dimension and handle settings shared by the device commands, mirroring
/// the customization form. Unset dimensions take the device's product-type
/// defaults.
#[derive(Debug, Args)]
pub struct FormArgs {
    /// Width in millimetres.
    #[arg(long)]
    pub width: Option<u32>,

    /// Height in millimetres.
    #[arg(long)]
    pub height: Option<u32>,

    /// Depth in millimetres.
    #[arg(long)]
    pub depth: Option<u32>,

    /// Thickness in millimetres (falls back to depth in filename patterns).
    #[arg(long)]
    pub thickness: Option<u32>,

    /// Leave out the handle part set.
    #[arg(long)]
    pub no_handle: bool,
}

impl FormArgs {
    pub fn dimensions(&self, device: &DeviceEntry) -> Dimensions {
        let mut dims = device.default_dimensions();
        if let Some(w) = self.width {
            dims.width = w;
        }
        if let Some(h) = self.height {
            dims.height = h;
        }
        if let Some(d) = self.depth {
            dims.depth = d;
        }
        if let Some(t) = self.thickness {
            dims.thickness = Some(t);
        }
        dims
    }

    pub fn options(&self) -> AssembleOptions {
        AssembleOptions {
            include_handle: !self.no_handle,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// List the devices in the catalog.
    List {
        /// Device catalog file (default: config, then ./devices.toml).
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Resolve a device's bundle without downloading anything.
    Plan {
        /// Device id from the catalog.
        id: String,

        /// Device catalog file (default: config, then ./devices.toml).
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Override the content-store prefix URL (e.g. a local mirror).
        #[arg(long)]
        prefix_url: Option<String>,

        #[command(flatten)]
        form: FormArgs,
    },

    /// Download a device bundle as a ZIP archive.
    Download {
        /// Device id from the catalog.
        id: String,

        /// Device catalog file (default: config, then ./devices.toml).
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Override the content-store prefix URL (e.g. a local mirror).
        #[arg(long)]
        prefix_url: Option<String>,

        /// Directory the bundle is written to (default: config, then cwd).
        #[arg(long)]
        output_dir: Option<PathBuf>,

        #[command(flatten)]
        form: FormArgs,
    },

    /// Probe every bundle URL and report per-file status.
    Check {
        /// Device id; omit together with --all to check the whole catalog.
        id: Option<String>,

        /// Check every device in the catalog.
        #[arg(long)]
        all: bool,

        /// Device catalog file (default: config, then ./devices.toml).
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Override the content-store prefix URL (e.g. a local mirror).
        #[arg(long)]
        prefix_url: Option<String>,

        /// Emit the report as JSON.
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        form: FormArgs,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::List { catalog } => {
                let catalog = common::load_catalog(catalog.as_deref(), &cfg)?;
                run_list(&catalog)
            }

            CliCommand::Plan {
                id,
                catalog,
                prefix_url,
                form,
            } => {
                let catalog = common::load_catalog(catalog.as_deref(), &cfg)?;
                let device = common::select_device(&catalog, &id, prefix_url.as_deref(), &cfg)?;
                let dims = form.dimensions(&device);
                run_plan(&device, &dims, &form.options(), &cfg.search_bounds())
            }

            CliCommand::Download {
                id,
                catalog,
                prefix_url,
                output_dir,
                form,
            } => {
                let catalog = common::load_catalog(catalog.as_deref(), &cfg)?;
                let device = common::select_device(&catalog, &id, prefix_url.as_deref(), &cfg)?;
                let dims = form.dimensions(&device);
                let output_dir = match output_dir.or_else(|| cfg.download_dir.clone()) {
                    Some(dir) => dir,
                    None => std::env::current_dir()?,
                };
                run_download(
                    &device,
                    &dims,
                    &form.options(),
                    &cfg.search_bounds(),
                    &output_dir,
                )
            }

            CliCommand::Check {
                id,
                all,
                catalog,
                prefix_url,
                json,
                form,
            } => {
                let catalog = common::load_catalog(catalog.as_deref(), &cfg)?;
                let devices: Vec<DeviceEntry> = if all {
                    common::all_devices(&catalog, prefix_url.as_deref(), &cfg)
                } else {
                    let id = id.context("pass a device id or --all")?;
                    vec![common::select_device(&catalog, &id, prefix_url.as_deref(), &cfg)?]
                };
                let targets: Vec<(DeviceEntry, Dimensions)> = devices
                    .into_iter()
                    .map(|device| {
                        let dims = form.dimensions(&device);
                        (device, dims)
                    })
                    .collect();
                run_check(&targets, &form.options(), &cfg.search_bounds(), json)
            }
        }
    }
}

#[cfg(test)]
mod tests;
