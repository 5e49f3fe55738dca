use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "bidcheck",
    version,
    about = "Run question packs against project document sets and score the answers"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run a pack against a project and print the scored result
    Run(RunArgs),
    /// Inspect saved test history
    History(HistoryArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// score >= 70 -> Bid (the shipped mapping)
    Bid,
    /// score >= 70 -> Pass (swapped historical variant)
    Pass,
}

#[derive(clap::Args, Debug)]
pub struct RunArgs {
    /// Pack definition (YAML)
    #[arg(long)]
    pub pack: PathBuf,

    /// Project identifier the QA service indexes documents under
    #[arg(long)]
    pub project: String,

    /// Display name stored with the run; defaults to the project id
    #[arg(long)]
    pub project_name: Option<String>,

    /// History database path
    #[arg(long, default_value = "bidcheck.db")]
    pub db: PathBuf,

    /// Skip persisting the run
    #[arg(long, default_value = "false")]
    pub no_save: bool,

    /// QA service endpoint
    #[arg(long, env = "BIDCHECK_QA_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Per-question timeout
    #[arg(long, default_value_t = 30)]
    pub timeout_seconds: u64,

    /// Verdict mapping for the 70-point threshold
    #[arg(long, value_enum, default_value_t = StrategyArg::Bid)]
    pub strategy: StrategyArg,

    /// Emit the completed run as JSON instead of the console report
    #[arg(long, default_value = "false")]
    pub json: bool,
}

#[derive(clap::Args, Debug)]
pub struct HistoryArgs {
    /// History database path
    #[arg(long, default_value = "bidcheck.db")]
    pub db: PathBuf,

    #[command(subcommand)]
    pub cmd: HistorySub,
}

#[derive(Subcommand, Debug)]
pub enum HistorySub {
    /// List saved results, newest first
    List {
        /// Only results for this pack
        #[arg(long)]
        pack: Option<String>,
        /// Only results for this project
        #[arg(long)]
        project: Option<String>,
    },
    /// Show one saved result in full
    Show {
        #[arg(long)]
        pack: String,
        #[arg(long)]
        project: String,
        #[arg(long, default_value = "false")]
        json: bool,
    },
    /// Delete one saved result by composite id ("{packId}-{projectId}")
    Delete { id: String },
    /// Delete all saved results
    Clear,
}
