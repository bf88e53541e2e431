//! tfo-compartments CLI
//!
//! Reads the compartments data source and prints its state.

use clap::Parser;
use tfo_cli_common::{format_duration, format_number, init_logging};

mod args;
mod run;

use args::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    // Logs go to stderr; stdout carries only the state
    init_logging(args.log_level)?;

    let (state, stats) = run::execute(&args).await?;
    run::write_state(&state, args.output_format, std::io::stdout().lock())?;

    eprintln!();
    eprintln!("Read completed:");
    eprintln!("  Pages fetched:    {}", format_number(stats.pages_fetched as u64));
    eprintln!("  Records listed:   {}", format_number(stats.records_listed as u64));
    eprintln!("  Records filtered: {}", format_number(stats.records_filtered as u64));
    eprintln!("  Records output:   {}", format_number(stats.records_output as u64));

    if let Some(duration) = stats.duration() {
        eprintln!("  Duration:         {}", format_duration(duration));

        if let Some(rps) = stats.records_per_second() {
            eprintln!("  Throughput:       {:.1} records/sec", rps);
        }
    }

    if state.get("id").is_none() {
        eprintln!("  Root compartment not found; state is empty");
    }

    Ok(())
}
