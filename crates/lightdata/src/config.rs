use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub const POSTPASS_URL: &str = "https://postpass.geofabrik.de/api/0.2/interpreter";

/// `lightdata` - lighthouse/beacon data maintenance for the light map.
///
/// Builds the reduced light dataset and audits `seamark:light:character`
/// values against the known light characters.
#[derive(Parser, Debug)]
#[command(name = "lightdata", version, about, long_about = None)]
pub struct Config {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch (or read) lights and write the reduced, id-sorted dataset.
    Reduce(ReduceArgs),

    /// Report elements whose light character is not a known code.
    Characters(CharactersArgs),
}

#[derive(Args, Debug)]
pub struct ReduceArgs {
    /// Process a local Overpass JSON (or .pbf) file instead of querying Postpass.
    #[arg(long, env = "LIGHTDATA_LOCAL")]
    pub local: Option<PathBuf>,

    /// Destination of the reduced dataset.
    #[arg(long, env = "LIGHTDATA_REDUCED", default_value = "data-reduced.json")]
    pub output: PathBuf,

    /// Postpass interpreter endpoint.
    #[arg(long, env = "LIGHTDATA_POSTPASS_URL", default_value = POSTPASS_URL)]
    pub postpass_url: String,

    /// Give up on the Postpass request after this many seconds.
    #[arg(long, env = "LIGHTDATA_TIMEOUT_SECS", default_value_t = 300)]
    pub timeout_secs: u64,
}

#[derive(Args, Debug)]
pub struct CharactersArgs {
    /// Full Overpass JSON (or .pbf) source.
    #[arg(long, env = "LIGHTDATA_FULL", default_value = "data-full.json")]
    pub input: PathBuf,

    /// Destination GeoJSON file.
    #[arg(
        long,
        env = "LIGHTDATA_NON_CONFORMING",
        default_value = "non-conforming-characters.geojson"
    )]
    pub output: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Config::command().debug_assert();
    }

    #[test]
    fn reduce_defaults() {
        let cfg = Config::try_parse_from(["lightdata", "reduce"]).unwrap();
        let Command::Reduce(args) = cfg.command else {
            panic!("expected reduce");
        };
        assert!(args.local.is_none());
        assert_eq!(args.output, PathBuf::from("data-reduced.json"));
        assert_eq!(args.timeout_secs, 300);
    }

    #[test]
    fn characters_paths() {
        let cfg = Config::try_parse_from([
            "lightdata",
            "characters",
            "--input",
            "full.json",
            "--output",
            "out.geojson",
        ])
        .unwrap();
        let Command::Characters(args) = cfg.command else {
            panic!("expected characters");
        };
        assert_eq!(args.input, PathBuf::from("full.json"));
        assert_eq!(args.output, PathBuf::from("out.geojson"));
    }
}
