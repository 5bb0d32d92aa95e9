//! Command line front end for feature discovery.

mod cli;
mod output;

fn main() -> eyre::Result<()> {
    cli::run()
}
