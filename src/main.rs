use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use fed_heart_disease::encoding::column_names;
use fed_heart_disease::{
    ConfigFileLocator, DatasetLocator, FedHeartDisease, HeartDiseaseRaw, Result, StaticLocator,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fed-heart-disease")]
#[command(about = "Inspect the federated heart disease dataset", long_about = None)]
struct Cli {
    /// Directory holding dataset_location.toml
    #[arg(long, default_value = ".")]
    config_dir: PathBuf,

    /// Read the .data files from here instead of the location file
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Use the reduced debug dataset
    #[arg(long)]
    debug: bool,

    /// Also build the view of this center (0 to 3)
    #[arg(long)]
    center: Option<usize>,

    /// Pool every center into the view
    #[arg(long)]
    pooled: bool,

    /// Select the test set instead of the train set
    #[arg(long)]
    test: bool,

    /// Enable verbose logging and list the encoded columns
    #[arg(short, long)]
    verbose: bool,
}

fn run(cli: &Cli) -> Result<()> {
    let locator: Box<dyn DatasetLocator> = match &cli.data_dir {
        Some(dir) => Box::new(StaticLocator(dir.clone())),
        None => Box::new(ConfigFileLocator::new(&cli.config_dir)),
    };

    let raw: HeartDiseaseRaw = HeartDiseaseRaw::new(locator.as_ref(), cli.debug)?;

    println!(
        "{} samples, {} features, from {}",
        raw.len(),
        raw.feature_width(),
        raw.data_dir().display()
    );
    if cli.verbose {
        println!("columns: {}", column_names().join(", "));
    }
    println!("{:<12} {:<6} {:>8} {:>10}", "center", "split", "samples", "positives");
    for row in raw.summary() {
        println!(
            "{:<12} {:<6} {:>8} {:>10}",
            row.center.to_string(),
            row.split.as_str(),
            row.samples,
            row.positives
        );
    }

    if let Some(center) = cli.center {
        let view = FedHeartDisease::from_raw(&raw, center, !cli.test, cli.pooled)?;
        let positives = view.labels().iter().filter(|&&y| y > 0.5).count();
        let positive_rate = if view.is_empty() {
            0.0
        } else {
            positives as f64 / view.len() as f64 * 100.0
        };

        println!(
            "view centers={:?} split={}: {} samples, {} features, {positive_rate:.1}% disease",
            view.chosen_centers(),
            view.split(),
            view.len(),
            view.feature_width()
        );
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
