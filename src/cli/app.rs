//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{placement_cmd, project_cmd};
use crate::storage::{Config, ProjectStore};

#[derive(Parser)]
#[command(name = "planogram")]
#[command(author, version, about = "Local-first store-layout project management")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Projects root directory
    #[arg(long, global = true, env = "PLANOGRAM_ROOT")]
    pub root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new project
    Create {
        /// Project name (also the directory name)
        name: String,

        /// Store the layout is for
        #[arg(long)]
        store: String,

        /// Project author
        #[arg(long)]
        author: String,

        /// Floor-plan file to copy into the project
        #[arg(long)]
        plan: PathBuf,
    },

    /// List all projects
    List,

    /// Show a project's details
    Show {
        /// Project name
        name: String,
    },

    /// Delete a project and its files
    Delete {
        /// Project name
        name: String,
    },

    /// Set the products placed at a location
    Place {
        /// Project name
        project: String,

        /// Location key on the plan (e.g. a shelf slot)
        location: String,

        /// Products to place; none clears the location
        products: Vec<String>,
    },

    /// Show the products placed at a location
    Placements {
        /// Project name
        project: String,

        /// Location key on the plan
        location: String,
    },

    /// List every placed product in a project
    Products {
        /// Project name
        project: String,
    },

    /// Find the location where a product is placed
    Locate {
        /// Project name
        project: String,

        /// Product identifier
        product: String,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    let config = Config::resolve(cli.root)?;
    output.verbose(&format!(
        "Projects root: {}",
        config.projects_root.display()
    ));
    let mut store = ProjectStore::new(config.projects_root);

    match cli.command {
        Commands::Create {
            name,
            store: store_name,
            author,
            plan,
        } => project_cmd::create(&mut store, &output, &name, &store_name, &author, &plan),

        Commands::List => project_cmd::list(&store, &output),
        Commands::Show { name } => project_cmd::show(&mut store, &output, &name),
        Commands::Delete { name } => project_cmd::delete(&mut store, &output, &name),

        Commands::Place {
            project,
            location,
            products,
        } => placement_cmd::place(&mut store, &output, &project, &location, products),

        Commands::Placements { project, location } => {
            placement_cmd::placements(&mut store, &output, &project, &location)
        }
        Commands::Products { project } => placement_cmd::products(&mut store, &output, &project),
        Commands::Locate { project, product } => {
            placement_cmd::locate(&mut store, &output, &project, &product)
        }
    }
}
