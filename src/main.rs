use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use tfc_worldgen::{
    logging::init_logging, worldgen, ConfigLoader, DirectorySink, GenerationStats, GeneratorConfig,
    MemorySink, ResourceManager, ResourceSink, Vein, NAMESPACE,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "TerraFirmaCraft world generation data generator")]
struct Cli {
    /// Path to the generator YAML file (built-in defaults when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the resource root documents are written below
    #[arg(long)]
    output: Option<PathBuf>,

    /// Generate everything in memory without touching the disk
    #[arg(long)]
    dry_run: bool,

    /// Override the log level (`RUST_LOG` still wins)
    #[arg(long)]
    log_level: Option<String>,
}

fn run<S: ResourceSink>(sink: S, locale: &str, veins: &[Vein]) -> Result<GenerationStats> {
    let mut rm = ResourceManager::new(NAMESPACE, sink).with_locale(locale);
    worldgen::generate(&mut rm, veins)?;
    Ok(rm.finish()?)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => ConfigLoader::new(".").load(path)?,
        None => GeneratorConfig::default(),
    };
    if let Some(output) = cli.output {
        config.output_dir = output;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    init_logging(&config.log_level);

    let veins = config.veins();
    let stats = if cli.dry_run {
        info!("dry run, nothing is written to disk");
        run(MemorySink::new(), &config.locale, &veins)?
    } else {
        info!(output = %config.output_dir.display(), "generating");
        let sink = DirectorySink::new(&config.output_dir, config.pretty);
        run(sink, &config.locale, &veins)?
    };
    println!("Generated {stats}");
    Ok(())
}
