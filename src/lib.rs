//! Planogram CLI - A local-first tool for managing store-layout projects
//!
//! A planogram project ties a named store layout to a floor-plan asset
//! and per-location product placements. Each project is a directory
//! holding the copied plan and a `config.json` document; the
//! [`storage::ProjectStore`] mediates every read and write of that
//! document.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{Placements, Project};
pub use storage::{Config, ProjectStore, StoreError};
