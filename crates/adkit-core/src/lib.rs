pub mod config;
pub mod logging;

// Catalog and resolution
pub mod assemble;
pub mod catalog;
pub mod dimensions;
pub mod pattern;
pub mod probe;
pub mod resolve;
pub mod store;

// Packaging and reporting
pub mod bundle;
pub mod diagnose;
