mod display;
mod review;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "sentrev", version, about = "Interactive sentencing-review annotator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Walk through eligible rows and export the annotated table
    Review {
        /// Input CSV of case records
        input: PathBuf,
        /// Where to write the annotated CSV (default: `<input>_reviewed.csv`)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print row and review counts without starting a session
    Status {
        /// Input CSV of case records
        input: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();
    tracing::info!("sentrev v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    match cli.command {
        Command::Review { input, output } => review::run(&input, output),
        Command::Status { input } => review::status(&input),
    }
}
