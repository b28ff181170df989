//! Mimizuku CLI main entry point

use anyhow::{Context, Result};
use clap::Parser;
use mimizuku_core::TermStore;
use mimizuku_el::{load_ontology, ElReasoner};
use std::fs::OpenOptions;
use std::path::PathBuf;
use tracing::info;

const LOG_FILE: &str = "mimizuku.log";

#[derive(Parser, Debug)]
#[command(name = "mimizuku", version, about = "EL subsumption reasoner")]
struct Cli {
    /// Path to the ontology file
    ontology: PathBuf,

    /// Concept name whose subsumers are printed
    concept: String,
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("mimizuku: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_logging()?;

    let mut store = TermStore::new();
    let ontology = load_ontology(&mut store, &cli.ontology)?;
    let mut reasoner = ElReasoner::new(store, ontology);

    let subsumers = reasoner.get_subsumers(cli.concept.as_str())?;
    info!(
        concept = %cli.concept,
        subsumers = subsumers.len(),
        "subsumer computation finished"
    );

    let mut names: Vec<String> = subsumers
        .iter()
        .map(|&id| reasoner.store().render(id))
        .collect();
    names.sort();
    for name in names {
        println!("{name}");
    }

    Ok(())
}

// Diagnostics go to a log file, opened in append mode; stdout stays
// reserved for the subsumer listing.
fn init_logging() -> Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(LOG_FILE)
        .with_context(|| format!("cannot open {}", LOG_FILE))?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}
