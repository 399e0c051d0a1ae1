use crate::demo::{run_demo, run_report, run_trends, DemoArgs, ReportArgs, TrendsArgs};
use crate::server;
use amiokay::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Am I Okay",
    about = "Compare symptom quiz answers against anonymous population statistics",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Build a results report for a set of symptoms
    Report(ReportArgs),
    /// List the most reported symptoms for every life stage
    Trends(TrendsArgs),
    /// Print a report and trend listing for a sample quiz
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Report(args) => run_report(args),
        Command::Trends(args) => run_trends(args),
        Command::Demo(args) => run_demo(args),
    }
}
