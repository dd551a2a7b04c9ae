use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::io::Read;
use std::path::PathBuf;

mod cli;

use cli::Cli;
use cli::commands::Commands;
use toolshed::catalog::Catalog;
use toolshed::config::Config;
use toolshed::domain::Metadata;
use toolshed::filter::{self, FilterQuery};
use toolshed::writer::ToolsetWriter;

fn setup_logging() -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("toolshed")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("toolshed.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    let root = config.resolve_root();
    info!("Toolsets root: {}", root.display());

    if cli.is_verbose() {
        println!("{} {}", "Toolsets root:".yellow(), root.display());
    }

    match &cli.command {
        Commands::List {
            name,
            tags,
            description,
            owner,
        } => handle_list(&root, name.as_deref(), tags.as_deref(), description.as_deref(), owner.clone()),
        Commands::Owners => handle_owners(&root),
        Commands::Show { owner, name } => handle_show(&root, owner, name),
        Commands::Cat { owner, name } => handle_cat(&root, owner, name),
        Commands::NewScript {
            owner,
            name,
            file,
            description,
            tags,
            overwrite,
        } => handle_new_script(&root, owner, name, file, description, tags, *overwrite),
        Commands::Meta {
            owner,
            name,
            description,
            tags,
        } => handle_meta(&root, owner, name, description.as_deref(), tags.as_deref()),
    }
}

fn handle_list(
    root: &PathBuf,
    name: Option<&str>,
    tags: Option<&str>,
    description: Option<&str>,
    owner: Option<String>,
) -> Result<()> {
    let catalog = Catalog::scan(root)?;
    let query = FilterQuery {
        name: name.unwrap_or_default().to_string(),
        tags: tags.unwrap_or_default().to_string(),
        description: description.unwrap_or_default().to_string(),
        owner,
    };

    let results = filter::apply(&catalog, &query);
    for toolset in &results {
        println!(
            "{:<24} {:<16} {:<14} {}",
            format!("{}/{}", toolset.owner, toolset.name).green(),
            toolset.kind.label(),
            toolset.metadata.tags.join(","),
            toolset.metadata.description
        );
    }

    if results.is_empty() {
        println!("{}", "No matching toolsets".yellow());
    }

    report_scan_errors(&catalog);
    Ok(())
}

fn handle_owners(root: &PathBuf) -> Result<()> {
    let catalog = Catalog::scan(root)?;
    for owner in catalog.owners() {
        println!("{}", owner);
    }
    report_scan_errors(&catalog);
    Ok(())
}

fn handle_show(root: &PathBuf, owner: &str, name: &str) -> Result<()> {
    let catalog = Catalog::scan(root)?;
    let toolset = catalog.require(owner, name)?;

    println!("{} {}/{}", "Toolset:".green(), toolset.owner, toolset.name);
    println!("  kind:        {}", toolset.kind.label());
    println!("  payload:     {}", toolset.payload_path().display());
    println!("  description: {}", toolset.metadata.description);
    println!("  tags:        {}", toolset.metadata.tags.join(", "));

    if let Some(summary) = toolset.graph_summary()? {
        println!();
        println!("{}", summary);
    }
    Ok(())
}

fn handle_cat(root: &PathBuf, owner: &str, name: &str) -> Result<()> {
    let catalog = Catalog::scan(root)?;
    let toolset = catalog.require(owner, name)?;
    print!("{}", toolset.payload_source()?);
    Ok(())
}

fn handle_new_script(
    root: &PathBuf,
    owner: &str,
    name: &str,
    file: &str,
    description: &str,
    tags: &str,
    overwrite: bool,
) -> Result<()> {
    let source = if file == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read script from stdin")?;
        buf
    } else {
        fs::read_to_string(file).context(format!("Failed to read script from {}", file))?
    };

    let metadata = Metadata::new(description, Metadata::parse_tags(tags));
    let writer = ToolsetWriter::new(root, owner)?;
    let toolset = writer.create_script(name, &metadata, &source, overwrite)?;

    println!(
        "{} {}/{} at {}",
        "Created:".green(),
        toolset.owner,
        toolset.name,
        toolset.dir.display()
    );
    Ok(())
}

fn handle_meta(
    root: &PathBuf,
    owner: &str,
    name: &str,
    description: Option<&str>,
    tags: Option<&str>,
) -> Result<()> {
    let catalog = Catalog::scan(root)?;
    let mut toolset = catalog.require(owner, name)?.clone();

    let metadata = Metadata::new(
        description.unwrap_or(&toolset.metadata.description),
        match tags {
            Some(raw) => Metadata::parse_tags(raw),
            None => toolset.metadata.tags.clone(),
        },
    );

    let writer = ToolsetWriter::new(root, owner)?;
    writer.update_metadata(&mut toolset, metadata)?;

    println!("{} {}/{}", "Updated metadata:".green(), toolset.owner, toolset.name);
    Ok(())
}

fn report_scan_errors(catalog: &Catalog) {
    for error in catalog.scan_errors() {
        eprintln!("{} {}: {}", "Skipped".yellow(), error.path.display(), error.message);
    }
}

fn main() -> Result<()> {
    // Setup logging first
    setup_logging().context("Failed to setup logging")?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config).context("Application failed")?;

    Ok(())
}
