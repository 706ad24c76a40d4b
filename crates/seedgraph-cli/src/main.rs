//! seedgraph CLI - builds and inspects seed-generation configurations.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use seedgraph_core::{Configuration, SelectionCriteria};
use seedgraph_data::{LoaderSettings, load_configuration};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "seedgraph")]
#[command(about = "Build seed-generation configuration graphs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a greeting
    Hello,
    /// Build a configuration document and print its graph
    Inspect {
        /// Document file name (or bare base name) inside the config directory
        document: String,
        /// Directory holding configuration documents
        #[arg(long, env = "SEEDGRAPH_CONFIG_DIR")]
        config_dir: Option<PathBuf>,
        /// Print the built configuration as JSON
        #[arg(long)]
        json: bool,
    },
}

fn say_hello() -> &'static str {
    "Hello"
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Hello => println!("{}", say_hello()),
        Commands::Inspect {
            document,
            config_dir,
            json,
        } => {
            let settings = config_dir
                .map(LoaderSettings::new)
                .unwrap_or_else(LoaderSettings::from_env);
            let config = load_configuration(&settings, &document).with_context(|| {
                format!(
                    "failed to build '{document}' from {}",
                    settings.base_dir.display()
                )
            })?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                print_summary(&config);
            }
        }
    }

    Ok(())
}

fn print_summary(config: &Configuration) {
    println!("{} - {}", config.name(), config.description());

    println!("\nResources:");
    for (name, res) in config.resources() {
        println!(
            "  {name} ({}) pk={:?} auto_increment={}",
            res.table_name, res.primary_key, res.auto_increment
        );
    }

    println!("\nRelations:");
    for (from, rels) in &config.relationships().from {
        for (to, rel) in &rels.to {
            println!(
                "  {from} -> {to}: {} = {} [{}]",
                rel.from_key, rel.to_key, rel.key_type
            );
        }
    }

    println!("\nEntities:");
    for (entity_name, entity) in config.entities() {
        println!("  {entity_name}: {}", entity.description);
        for (phase_name, phase) in &entity.phases {
            println!("    {phase_name}: {}", phase.description);
            for (task_name, task) in &phase.tasks {
                println!(
                    "      {task_name} <{}> {}",
                    task.resource.name,
                    describe_criteria(task.selection_criteria.as_ref())
                );
            }
        }
    }
}

fn describe_criteria(criteria: Option<&SelectionCriteria>) -> String {
    let Some(criteria) = criteria else {
        return "all rows".to_string();
    };
    let siblings: Vec<&str> = criteria.tasks().iter().map(|t| t.name.as_str()).collect();
    match criteria {
        SelectionCriteria::Custom { criteria } => format!("custom: {}", criteria.trim_end()),
        SelectionCriteria::Indexed { index, .. } => {
            format!("indexed: {index} by [{}]", siblings.join(", "))
        }
        SelectionCriteria::Related { .. } => format!("related to [{}]", siblings.join(", ")),
    }
}
