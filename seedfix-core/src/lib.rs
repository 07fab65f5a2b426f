//! Embeddable core library for seedfix.
//!
//! Provides a clap-free, I/O-abstracted entry point suitable for linking into other tools.
//!
//! # Port traits
//!
//! All I/O is abstracted behind port traits in [`ports`]:
//! - [`FileStore`](ports::FileStore): list, read, back up and write seed documents
//! - [`WritePort`](ports::WritePort): write report artifacts
//!
//! The [`adapters`] module provides filesystem-backed and in-memory implementations.
//!
//! # Entry points
//!
//! - [`run_batch`](pipeline::run_batch): rewrite every candidate document and build a report
//! - [`classify_documents`](pipeline::classify_documents): report variants without changing anything

pub mod adapters;
pub mod backup;
pub mod driver;
pub mod pipeline;
pub mod ports;
pub mod settings;

// Re-export so embedders don't need seedfix-domain directly.
pub use seedfix_domain::{RulePolicy, RuleSet};
