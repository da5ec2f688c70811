use clap::{Arg, Command, arg};

pub const DXY_CMD: &str = "dxy";

pub fn create_dxy_cli() -> Command {
    Command::new(DXY_CMD)
        .about("Compute per-site pi, D_xy and D_a from a set of aligned pseudoreference FASTAs.")
        .arg(
            arg!(-p --popfile <POPFILE> "TSV file of FASTA name, and population number")
                .required(true),
        )
        .arg(arg!(-o --output <OUTPUT> "Output TSV file (default: stdout)").required(false))
        .arg(
            Arg::new("fastas")
                .value_name("FASTA")
                .required(true)
                .num_args(1..)
                .help("Pseudoreference FASTAs, one per individual, named as in the population file"),
        )
}
