// src/bin/cli.rs
use doomscope::cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    cli::run(cli::parse_args())
}
