use clap::Parser;
use pricelab::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
