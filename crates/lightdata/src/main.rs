use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use std::{fs, path::Path, time::Duration};

use seamark::{
    build_with_stats, emit, source, write_feature_collection, write_reduced, Classifier,
    PointLookup, Vocabulary,
};

mod config;
mod fetch;

use config::{CharactersArgs, Command, Config, ReduceArgs};

fn run_reduce(args: &ReduceArgs) -> Result<()> {
    let elements = match &args.local {
        Some(path) => {
            info!("Reading {} ...", path.display());
            source::read_elements(path)
                .with_context(|| format!("reading {}", path.display()))?
        }
        None => fetch::fetch_postpass(&args.postpass_url, Duration::from_secs(args.timeout_secs))?,
    };
    info!("  {} elements in source", elements.len());

    let lookup = PointLookup::from_elements(&elements);
    debug!("Indexed {} node coordinates", lookup.len());

    let (records, stats) = build_with_stats(&elements, &lookup);
    info!("  {} elements without kept tags dropped", stats.dropped_untagged);
    info!("  {} elements without a position dropped", stats.dropped_unplaced);
    info!("  {} ways converted to centroid nodes", stats.ways_with_centroid);

    // Render fully before touching the destination so failures leave no partial file.
    let mut buf = Vec::new();
    write_reduced(&mut buf, &records)?;

    info!("Writing {} ...", args.output.display());
    info!("  {} elements", records.len());
    write_output(&args.output, &buf)?;
    info!("  {} bytes", buf.len());

    Ok(())
}

fn run_characters(args: &CharactersArgs) -> Result<()> {
    info!("Reading {} ...", args.input.display());
    let elements = source::read_elements(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;

    let lookup = PointLookup::from_elements(&elements);
    let mut classifier = Classifier::new(Vocabulary::light_characters());
    let features = emit(&elements, &lookup, &mut classifier);

    let mut buf = Vec::new();
    write_feature_collection(&mut buf, &features)?;
    write_output(&args.output, &buf)?;

    println!("Total non-conforming features: {}", features.len());
    println!(
        "Non-conforming occurrences (including unplaceable): {}",
        classifier.total()
    );
    println!("Output written to: {}", args.output.display());
    println!();
    println!("Non-conforming character values (sorted by count):");
    for (value, count) in classifier.report() {
        println!("  {:30} {:5}", format!("{value:?}"), count);
    }

    Ok(())
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))
}

fn main() -> Result<()> {
    // Progress goes to the log; default to "info" if RUST_LOG is unset.
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).init();

    let config = Config::parse();

    match &config.command {
        Command::Reduce(args) => run_reduce(args),
        Command::Characters(args) => run_characters(args),
    }
}
