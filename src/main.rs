use clap::Parser;
use quantsim::cli::{Cli, run};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
