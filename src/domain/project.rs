//! Project domain model
//!
//! A project ties a named store layout to its floor-plan asset and the
//! product placements made on it. Serialized field names follow the
//! historical `config.json` document format (`chemin_plan`, `produits`),
//! which predates this tool and must keep loading.

use serde::{Deserialize, Serialize};

use super::Placements;

/// A store-layout project
///
/// The name doubles as the backing directory name and never changes
/// after creation; there is no rename operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Unique project name
    pub name: String,

    /// Free-text descriptor of the physical store
    pub store: String,

    /// Free-text author
    pub author: String,

    /// Forward-slash path to the copied floor-plan asset
    #[serde(rename = "chemin_plan")]
    pub plan_path: String,

    /// Product placements by location key
    #[serde(rename = "produits", default)]
    pub placements: Placements,
}

impl Project {
    /// Creates a project with no placements
    pub fn new(
        name: impl Into<String>,
        store: impl Into<String>,
        author: impl Into<String>,
        plan_path: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            store: store.into(),
            author: author.into(),
            plan_path: plan_path.into(),
            placements: Placements::new(),
        }
    }
}
