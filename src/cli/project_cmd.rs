//! Project lifecycle commands

use std::path::Path;

use anyhow::Result;

use super::output::Output;
use crate::storage::ProjectStore;

/// Creates a project and reports the resulting paths
pub fn create(
    store: &mut ProjectStore,
    output: &Output,
    name: &str,
    store_name: &str,
    author: &str,
    plan: &Path,
) -> Result<()> {
    output.verbose(&format!(
        "Creating project '{}' from plan {}",
        name,
        plan.display()
    ));
    let project = store.create(name, store_name, author, plan)?;

    if output.is_json() {
        output.data(project);
    } else {
        output.success(&format!(
            "Created project '{}' (plan: {})",
            project.name, project.plan_path
        ));
    }
    Ok(())
}

/// Lists project names under the root
pub fn list(store: &ProjectStore, output: &Output) -> Result<()> {
    let names = store.list()?;

    if output.is_json() {
        output.data(&names);
    } else if names.is_empty() {
        output.success("No projects yet");
    } else {
        for name in names {
            println!("{name}");
        }
    }
    Ok(())
}

/// Shows a project's metadata and placement summary
pub fn show(store: &mut ProjectStore, output: &Output, name: &str) -> Result<()> {
    let project = store.load(name)?;

    if output.is_json() {
        output.data(project);
    } else {
        println!("Project: {}", project.name);
        println!("Store:   {}", project.store);
        println!("Author:  {}", project.author);
        println!("Plan:    {}", project.plan_path);
        println!("Locations with products: {}", project.placements.len());
    }
    Ok(())
}

/// Deletes a project directory
pub fn delete(store: &mut ProjectStore, output: &Output, name: &str) -> Result<()> {
    store.delete(name)?;
    output.success(&format!("Deleted project '{}'", name));
    Ok(())
}
