mod dxy;

use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use tracing_subscriber::EnvFilter;

use popdiv_core::PopDivError;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "popdiv";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Per-site nucleotide diversity (pi) and divergence (D_xy, D_a) between populations of aligned pseudoreference genomes.")
        .subcommand_required(true)
        .arg(
            Arg::new("debug")
                .short('d')
                .long("debug")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Output debugging information, including per-site tracing, on stderr"),
        )
        .subcommand(dxy::cli::create_dxy_cli())
}

/// Diagnostics go to stderr; `RUST_LOG` overrides the level chosen by `--debug`.
fn init_logging(debug: bool) {
    let level = if debug { "debug" } else { "info" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn debug_requested(matches: &ArgMatches) -> bool {
    matches.get_flag("debug")
        || matches
            .subcommand()
            .is_some_and(|(_, matches)| matches.get_flag("debug"))
}

fn run(matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        //
        // PI / DXY / DA
        //
        Some((dxy::cli::DXY_CMD, matches)) => dxy::handlers::run_dxy(matches),

        _ => unreachable!("Subcommand not found"),
    }
}

fn main() {
    let matches = match build_parser().try_get_matches() {
        Ok(matches) => matches,
        Err(err) => {
            // help and version go to stdout and are not failures
            let code = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            std::process::exit(code);
        }
    };

    init_logging(debug_requested(&matches));

    if let Err(err) = run(&matches) {
        eprintln!("Error: {:#}", err);
        let code = err
            .downcast_ref::<PopDivError>()
            .map_or(1, |err| err.exit_code());
        std::process::exit(code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_accepts_dxy_arguments() {
        let matches = build_parser()
            .try_get_matches_from(["popdiv", "dxy", "-p", "pops.tsv", "a.fa", "b.fa", "--debug"])
            .unwrap();
        assert!(debug_requested(&matches));

        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, dxy::cli::DXY_CMD);
        let fastas: Vec<&String> = sub.get_many::<String>("fastas").unwrap().collect();
        assert_eq!(fastas, vec!["a.fa", "b.fa"]);
        assert_eq!(sub.get_one::<String>("popfile").unwrap(), "pops.tsv");
    }

    #[test]
    fn test_parser_requires_fastas_and_popfile() {
        assert!(build_parser().try_get_matches_from(["popdiv", "dxy", "-p", "pops.tsv"]).is_err());
        assert!(build_parser().try_get_matches_from(["popdiv", "dxy", "a.fa"]).is_err());
    }
}
