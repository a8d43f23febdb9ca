use budgetwise::{
    cli::{self, output, Cli, CliError},
    init,
};
use clap::Parser;

fn main() {
    let args = Cli::parse();
    init();

    match cli::run(args) {
        Ok(()) => {}
        Err(CliError::Reported) => std::process::exit(1),
        Err(err) => {
            output::error(err);
            std::process::exit(1);
        }
    }
}
