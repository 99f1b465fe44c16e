//! On-disk project document
//!
//! Each project persists as a single `config.json`. Reads pass through
//! one migration step that maps known historical document shapes onto
//! the canonical one before the typed parse; writes go through a temp
//! file and rename so an interrupted write never clobbers the previous
//! document.

use std::fs;
use std::path::Path;

use serde_json::Value;

use super::store::StoreError;
use crate::domain::Project;

/// Document file name inside every project directory
pub const CONFIG_FILE: &str = "config.json";

/// Top-level keys required after migration
const REQUIRED_FIELDS: [&str; 4] = ["name", "store", "author", "chemin_plan"];

/// Historical key renames applied on load
///
/// Early documents used French metadata keys throughout and stored
/// placements under `produits_par_case`. A legacy key wins over a
/// canonical one when both appear, matching how those documents were
/// migrated historically.
const KEY_RENAMES: [(&str, &str); 4] = [
    ("nom", "name"),
    ("magasin", "store"),
    ("auteur", "author"),
    ("produits_par_case", "produits"),
];

/// Reads, migrates and validates a project document
pub fn read(path: &Path) -> Result<Project, StoreError> {
    let corrupt = |source: Box<dyn std::error::Error + Send + Sync>| StoreError::CorruptConfig {
        path: path.to_path_buf(),
        source,
    };

    let raw = fs::read_to_string(path).map_err(|e| corrupt(e.into()))?;
    let mut doc: Value = serde_json::from_str(&raw).map_err(|e| corrupt(e.into()))?;

    migrate(&mut doc);

    let fields = doc
        .as_object()
        .ok_or_else(|| StoreError::InvalidInput("project document is not an object".into()))?;
    for field in REQUIRED_FIELDS {
        if !fields.contains_key(field) {
            return Err(StoreError::InvalidInput(format!(
                "project document is missing the '{field}' field"
            )));
        }
    }

    let mut project: Project = serde_json::from_value(doc).map_err(|e| corrupt(e.into()))?;
    project.plan_path = normalize_plan_path(&project.plan_path);
    Ok(project)
}

/// Writes a project document atomically (temp file + rename)
pub fn write(path: &Path, project: &Project) -> Result<(), StoreError> {
    let persist = |source: Box<dyn std::error::Error + Send + Sync>| StoreError::Persistence {
        name: project.name.clone(),
        source,
    };

    let json = serde_json::to_string_pretty(project).map_err(|e| persist(e.into()))?;

    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, json).map_err(|e| persist(e.into()))?;
    fs::rename(&temp_path, path).map_err(|e| persist(e.into()))
}

/// Maps known historical document shapes onto the canonical one
///
/// - top-level key renames per [`KEY_RENAMES`]
/// - absent `produits` initialized to an empty map
/// - a legacy empty-list `produits` coerced to an empty map
fn migrate(doc: &mut Value) {
    let Some(fields) = doc.as_object_mut() else {
        return;
    };

    for (old, new) in KEY_RENAMES {
        if let Some(value) = fields.remove(old) {
            fields.insert(new.to_string(), value);
        }
    }

    let reset = match fields.get("produits") {
        None => true,
        Some(Value::Array(items)) => items.is_empty(),
        _ => false,
    };
    if reset {
        fields.insert("produits".to_string(), Value::Object(Default::default()));
    }
}

/// Lexically normalizes a plan path and renders it with forward slashes
///
/// Historical documents store forward-slash paths regardless of the host
/// platform, including documents written on Windows, so backslashes are
/// treated as separators too. Purely textual: nothing is resolved
/// against the filesystem.
pub fn normalize_plan_path(path: impl AsRef<Path>) -> String {
    let raw = path.as_ref().to_string_lossy().replace('\\', "/");
    let absolute = raw.starts_with('/');

    let mut parts: Vec<&str> = Vec::new();
    for segment in raw.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if parts.last().map(|p| *p != "..").unwrap_or(false) {
                    parts.pop();
                } else {
                    parts.push("..");
                }
            }
            other => parts.push(other),
        }
    }

    let joined = parts.join("/");
    if absolute {
        format!("/{joined}")
    } else {
        joined
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_then_read_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        let mut project = Project::new("demo", "Downtown", "pat", "projects/demo/plan.png");
        project.placements.set("A1", vec!["sku-1".into()]);

        write(&path, &project).unwrap();
        let loaded = read(&path).unwrap();

        assert_eq!(loaded, project);
    }

    #[test]
    fn write_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        let project = Project::new("demo", "Downtown", "pat", "plan.png");
        write(&path, &project).unwrap();

        assert!(path.is_file());
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn reads_legacy_french_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(
            &path,
            r#"{
                "nom": "demo",
                "magasin": "Downtown",
                "auteur": "pat",
                "chemin_plan": "projects/demo/plan.png",
                "produits_par_case": { "A1": ["sku-1", "sku-2"] }
            }"#,
        )
        .unwrap();

        let project = read(&path).unwrap();
        assert_eq!(project.name, "demo");
        assert_eq!(project.store, "Downtown");
        assert_eq!(project.author, "pat");
        assert_eq!(project.placements.at("A1"), ["sku-1", "sku-2"]);
    }

    #[test]
    fn legacy_placements_key_wins_over_canonical() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(
            &path,
            r#"{
                "name": "demo",
                "store": "Downtown",
                "author": "pat",
                "chemin_plan": "plan.png",
                "produits": { "B2": ["old"] },
                "produits_par_case": { "A1": ["new"] }
            }"#,
        )
        .unwrap();

        let project = read(&path).unwrap();
        assert_eq!(project.placements.at("A1"), ["new"]);
        assert!(!project.placements.contains("B2"));
    }

    #[test]
    fn missing_placements_becomes_empty_map() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(
            &path,
            r#"{"name": "demo", "store": "Downtown", "author": "pat", "chemin_plan": "plan.png"}"#,
        )
        .unwrap();

        let project = read(&path).unwrap();
        assert!(project.placements.is_empty());
    }

    #[test]
    fn legacy_empty_list_becomes_empty_map() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(
            &path,
            r#"{
                "name": "demo",
                "store": "Downtown",
                "author": "pat",
                "chemin_plan": "plan.png",
                "produits": []
            }"#,
        )
        .unwrap();

        let project = read(&path).unwrap();
        assert!(project.placements.is_empty());
    }

    #[test]
    fn missing_required_field_is_invalid_input() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(
            &path,
            r#"{"name": "demo", "store": "Downtown", "chemin_plan": "plan.png"}"#,
        )
        .unwrap();

        let err = read(&path).unwrap_err();
        assert!(matches!(err, StoreError::InvalidInput(_)));
    }

    #[test]
    fn unparsable_document_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "not json at all").unwrap();

        let err = read(&path).unwrap_err();
        assert!(matches!(err, StoreError::CorruptConfig { .. }));
    }

    #[test]
    fn missing_document_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let err = read(&dir.path().join(CONFIG_FILE)).unwrap_err();
        assert!(matches!(err, StoreError::CorruptConfig { .. }));
    }

    #[test]
    fn normalizes_backslash_paths() {
        assert_eq!(
            normalize_plan_path(r"projects\demo\plan.png"),
            "projects/demo/plan.png"
        );
    }

    #[test]
    fn normalizes_dot_segments() {
        assert_eq!(
            normalize_plan_path("./projects/../projects/demo//plan.png"),
            "projects/demo/plan.png"
        );
        assert_eq!(normalize_plan_path("/tmp/./x/plan.png"), "/tmp/x/plan.png");
    }

    #[test]
    fn plan_path_is_normalized_on_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(
            &path,
            r#"{
                "name": "demo",
                "store": "Downtown",
                "author": "pat",
                "chemin_plan": "projects\\demo\\plan.png"
            }"#,
        )
        .unwrap();

        let project = read(&path).unwrap();
        assert_eq!(project.plan_path, "projects/demo/plan.png");
    }
}
