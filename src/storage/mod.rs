//! # Storage Layer
//!
//! Filesystem persistence for planogram projects.
//!
//! Each project is a directory under the projects root:
//!
//! ```text
//! <projects-root>/
//! └── <name>/
//!     ├── config.json     # Project document
//!     └── plan.png        # Copied floor-plan asset (extension varies)
//! ```
//!
//! ## Key Types
//!
//! - [`ProjectStore`] - Lifecycle and placement operations over one
//!   current project
//! - [`Config`] - Projects-root resolution
//! - [`StoreError`] - Typed failures surfaced by every operation
//!
//! Access is single-process and unlocked: two stores pointed at the same
//! project directory can race, and nothing here defends against that.
//! The document write itself goes through a temp file and rename, so an
//! interrupted write never clobbers the previous document.

mod config;
mod document;
mod store;

pub use config::{Config, GlobalConfig};
pub use document::CONFIG_FILE;
pub use store::{ProjectStore, StoreError};
