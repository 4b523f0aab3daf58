mod cli;
mod config;
mod run;

use std::io::Write;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use timeline_logging::{initialize_stderr, level_from_verbosity, timeline_debug};

use crate::cli::Cli;

fn main() -> ExitCode {
    // Usage errors exit with status 2 from inside clap.
    let cli = Cli::parse();
    initialize_stderr(level_from_verbosity(cli.verbose, cli.quiet));
    timeline_debug!("{:?}", cli);

    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: &Cli) -> anyhow::Result<()> {
    // One page, one thread: a current-thread runtime is all the fetch needs.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("could not start the async runtime")?;
    let xml = runtime.block_on(run::run(cli))?;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(&xml)
        .and_then(|()| stdout.write_all(b"\n"))
        .and_then(|()| stdout.flush())
        .context("could not write feed to stdout")?;
    Ok(())
}
