//! Project store
//!
//! Owns at most one current project and mediates every read and write of
//! its on-disk representation. All operations are synchronous blocking
//! filesystem calls that run to completion; failures surface as
//! [`StoreError`] and are never retried.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use filetime::FileTime;
use thiserror::Error;

use super::document::{self, CONFIG_FILE};
use crate::domain::Project;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Incomplete project data: {0}")]
    InvalidInput(String),

    #[error("A project named '{0}' already exists")]
    DuplicateProject(String),

    #[error("Plan file not found: {}", .0.display())]
    AssetNotFound(PathBuf),

    #[error("Project '{0}' not found")]
    ProjectNotFound(String),

    #[error("Failed to read project document at {}", .path.display())]
    CorruptConfig {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to create project '{name}'")]
    Create {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to delete project '{name}'")]
    Deletion {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to save project '{name}'")]
    Persistence {
        name: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to scan projects root {}", .path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("No active project")]
    NoActiveProject,
}

/// Store for planogram projects under a fixed projects root
///
/// At most one project is loaded at a time, and every placement mutation
/// is flushed to disk before the operation returns. Nothing guards the
/// project directories against a second process: single active user per
/// project is assumed.
pub struct ProjectStore {
    root: PathBuf,
    current: Option<Project>,
}

impl ProjectStore {
    /// Creates a store over the given projects root
    ///
    /// The root directory itself is created by the first `create`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            current: None,
        }
    }

    /// Returns the projects root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the currently loaded project, if any
    pub fn current(&self) -> Option<&Project> {
        self.current.as_ref()
    }

    /// Returns the directory backing a project name
    pub fn project_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    fn document_path(&self, name: &str) -> PathBuf {
        self.project_dir(name).join(CONFIG_FILE)
    }

    /// Creates a new project and makes it current
    ///
    /// Copies the plan asset into the project directory as
    /// `plan<extension>`, keeping the source timestamps where the
    /// platform allows, then writes the initial document.
    pub fn create(
        &mut self,
        name: &str,
        store: &str,
        author: &str,
        plan_source: &Path,
    ) -> Result<&Project, StoreError> {
        if name.is_empty() || store.is_empty() || author.is_empty() || plan_source.as_os_str().is_empty() {
            return Err(StoreError::InvalidInput(
                "name, store, author and plan are all required".to_string(),
            ));
        }

        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::InvalidInput(
                "a project name is required".to_string(),
            ));
        }

        let dir = self.project_dir(name);
        if dir.exists() {
            return Err(StoreError::DuplicateProject(name.to_string()));
        }

        if !plan_source.is_file() {
            return Err(StoreError::AssetNotFound(plan_source.to_path_buf()));
        }

        let create_err = |source| StoreError::Create {
            name: name.to_string(),
            source,
        };

        fs::create_dir_all(&self.root).map_err(create_err)?;
        // Non-recursive create: loses the race loudly if the directory
        // appeared since the existence check above.
        fs::create_dir(&dir).map_err(|e| {
            if e.kind() == io::ErrorKind::AlreadyExists {
                StoreError::DuplicateProject(name.to_string())
            } else {
                create_err(e)
            }
        })?;

        let plan_name = match plan_source.extension() {
            Some(ext) => format!("plan.{}", ext.to_string_lossy()),
            None => "plan".to_string(),
        };
        copy_with_times(plan_source, &dir.join(&plan_name)).map_err(create_err)?;

        let plan_path = document::normalize_plan_path(self.root.join(name).join(&plan_name));

        let project = Project::new(name, store, author, plan_path);
        document::write(&self.document_path(name), &project)?;

        Ok(self.current.insert(project))
    }

    /// Loads an existing project and makes it current
    pub fn load(&mut self, name: &str) -> Result<&Project, StoreError> {
        let dir = self.project_dir(name);
        if !dir.is_dir() {
            return Err(StoreError::ProjectNotFound(name.to_string()));
        }

        let project = document::read(&self.document_path(name))?;
        Ok(self.current.insert(project))
    }

    /// Deletes a project directory and everything in it
    ///
    /// Irreversible. No rollback on failure: the directory is left in
    /// whatever partial state the failure produced. Clears the current
    /// project if it was the deleted one.
    pub fn delete(&mut self, name: &str) -> Result<(), StoreError> {
        let dir = self.project_dir(name);
        if !dir.is_dir() {
            return Err(StoreError::ProjectNotFound(name.to_string()));
        }

        fs::remove_dir_all(&dir).map_err(|source| StoreError::Deletion {
            name: name.to_string(),
            source,
        })?;

        if self.current.as_ref().is_some_and(|p| p.name == name) {
            self.current = None;
        }
        Ok(())
    }

    /// Persists the current project document
    pub fn save(&self) -> Result<(), StoreError> {
        let project = self.current.as_ref().ok_or(StoreError::NoActiveProject)?;
        document::write(&self.document_path(&project.name), project)
    }

    /// Products placed at a location
    ///
    /// Lenient read: empty when no project is loaded or the location has
    /// no entry.
    pub fn placements_at(&self, location: &str) -> &[String] {
        self.current
            .as_ref()
            .map(|p| p.placements.at(location))
            .unwrap_or(&[])
    }

    /// Replaces the products at a location and persists immediately
    ///
    /// An empty product list clears the location. The in-memory change
    /// stays applied even when the flush fails; the error is still
    /// surfaced to the caller.
    pub fn set_placements(
        &mut self,
        location: &str,
        products: Vec<String>,
    ) -> Result<(), StoreError> {
        let project = self.current.as_mut().ok_or(StoreError::NoActiveProject)?;
        project.placements.set(location, products);
        self.save()
    }

    /// Every placed product across all locations, in location key order
    pub fn all_placed_products(&self) -> Vec<String> {
        self.current
            .as_ref()
            .map(|p| p.placements.all_products())
            .unwrap_or_default()
    }

    /// First location containing the given product, if any
    pub fn find_location_of(&self, product: &str) -> Option<&str> {
        self.current.as_ref()?.placements.find_location(product)
    }

    /// Names of every project under the root, sorted
    ///
    /// Only directories containing a project document count; stray files
    /// are ignored. A missing root reads as no projects.
    pub fn list(&self) -> Result<Vec<String>, StoreError> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }

        let scan_err = |source| StoreError::Scan {
            path: self.root.clone(),
            source,
        };

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root).map_err(scan_err)? {
            let entry = entry.map_err(scan_err)?;
            let path = entry.path();
            if path.is_dir() && path.join(CONFIG_FILE).is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }
}

/// Copies a file, carrying over its timestamps where the platform allows
fn copy_with_times(src: &Path, dest: &Path) -> io::Result<()> {
    fs::copy(src, dest)?;
    if let Ok(meta) = fs::metadata(src) {
        let atime = FileTime::from_last_access_time(&meta);
        let mtime = FileTime::from_last_modification_time(&meta);
        let _ = filetime::set_file_times(dest, atime, mtime);
    }
    Ok(())
}
