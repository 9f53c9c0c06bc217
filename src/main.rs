mod ai;
mod cmd;
mod profile;
mod tax;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "taxin",
    version,
    about = "Indian Income Tax Calculator and Savings Advisor (Old vs New Regime)"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract financial details from free text, compare both regimes and
    /// fetch savings advice
    Analyze(cmd::analyze::AnalyzeCommand),
    /// Compare both regimes from a structured JSON input (no AI calls)
    Compute(cmd::compute::ComputeCommand),
    /// Print the JSON Schema for the structured input format
    Schema(cmd::schema::SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Analyze(cmd) => cmd.exec(),
        Command::Compute(cmd) => cmd.exec(),
        Command::Schema(cmd) => cmd.exec(),
    }
}
