//! CLI command handlers, one file per command.

pub mod common;

mod check;
mod download;
mod list;
mod plan;

pub use check::run_check;
pub use download::run_download;
pub use list::run_list;
pub use plan::run_plan;
