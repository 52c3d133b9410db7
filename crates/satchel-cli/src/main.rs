//! Thin command-line front end over `satchel-core`. Demonstrates the
//! library's contract without implementing a concrete [`Fetcher`]; this
//! binary only ever reports what it would fetch, never fetches it.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use satchel_core::{check_dependencies, discover_sorted, installation_order, validate, InstalledSet};

#[derive(Parser)]
#[command(name = "satchel")]
#[command(about = "Discover, validate, and plan installation of plugin packages")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Discover plugins under a root and print them in install order
    List {
        /// Directory whose immediate subdirectories are scanned for plugin.toml
        root: PathBuf,
    },

    /// Discover plugins under a root and report duplicate-name and
    /// dangling-dependency problems
    Validate {
        root: PathBuf,
    },

    /// Discover plugins under a root and print what each would still need
    /// fetched against an (empty) installed set
    PlanInstall {
        root: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::List { root } => run_list(&root).await,
        Commands::Validate { root } => run_validate(&root).await,
        Commands::PlanInstall { root } => run_plan_install(&root).await,
    }
}

async fn run_list(root: &std::path::Path) -> ExitCode {
    let report = discover_sorted(root).await;

    for plugin in &report.plugins {
        println!("{} {}", plugin.manifest.name, plugin.manifest.version);
    }

    if !report.errors.is_empty() {
        for error in &report.errors {
            eprintln!("error: {error}");
        }
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

async fn run_validate(root: &std::path::Path) -> ExitCode {
    let report = discover_sorted(root).await;
    for error in &report.errors {
        eprintln!("discovery error: {error}");
    }

    let validation = validate(&report.plugins);
    for warning in &validation.warnings {
        println!("warning: {warning}");
    }
    for error in &validation.errors {
        eprintln!("error: {error}");
    }

    if validation.is_valid() && report.errors.is_empty() {
        println!("{} plugin(s) valid", report.plugins.len());
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

async fn run_plan_install(root: &std::path::Path) -> ExitCode {
    let report = discover_sorted(root).await;
    if !report.errors.is_empty() {
        for error in &report.errors {
            eprintln!("error: {error}");
        }
        return ExitCode::FAILURE;
    }

    let manifests: Vec<_> = report.plugins.iter().map(|p| p.manifest.clone()).collect();
    let order = match installation_order(&manifests) {
        Ok(order) => order,
        Err(cycle) => {
            eprintln!("error: {cycle}");
            return ExitCode::FAILURE;
        }
    };

    let installed = InstalledSet::new();
    let mut incomplete = false;
    for name in &order {
        let target = manifests.iter().find(|m| &m.name == name).expect("name from order");
        let missing = check_dependencies(target, &installed);
        if missing.is_empty() {
            println!("{name}: ready to install");
        } else {
            incomplete = true;
            println!("{name}: needs {}", missing.join(", "));
        }
    }

    if incomplete {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
