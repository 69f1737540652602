//! Rebuild the company document index.
//!
//! Usage: finsolve-ingest [--data-dir DIR] [--index-dir DIR] [--config FILE]

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use finsolve_ingest::{IngestConfig, IngestPipeline};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "finsolve-ingest")]
#[command(about = "Load department documents into the role-tagged vector index", long_about = None)]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Root folder with one sub-folder per department
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Index directory to (re)create
    #[arg(long)]
    index_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => IngestConfig::from_toml_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => IngestConfig::default(),
    };
    if let Some(dir) = cli.data_dir {
        config = config.with_data_dir(dir);
    }
    if let Some(dir) = cli.index_dir {
        config = config.with_index_dir(dir);
    }

    println!("📁 Data directory: {}", config.data_dir.display());
    println!("💾 Index directory: {}\n", config.index_dir.display());

    let pipeline = IngestPipeline::from_config(config);
    let report = match pipeline.run().await {
        Ok(report) => report,
        Err(e) => {
            println!("\n❌ No index written: {e}");
            return Err(e.into());
        }
    };

    for department in &report.departments {
        println!("🔎 {}", department.name);
        println!("   ✓ Files loaded: {}", department.files_loaded);
        if department.files_skipped > 0 {
            println!("   ❌ Files skipped: {}", department.files_skipped);
        }
        println!("   ✓ Chunks prepared: {}", department.chunks);
    }
    for name in &report.skipped_departments {
        println!("⚠️ No files found in {name}");
    }

    println!(
        "\n✅ Stored {} chunks in {} ({}ms)",
        report.total_chunks,
        report.index_path.display(),
        report.elapsed_ms
    );
    println!("\n📊 Sample metadata:");
    for metadata in &report.sample_metadata {
        println!("   • role={} category={}", metadata.role, metadata.category);
    }

    Ok(())
}
