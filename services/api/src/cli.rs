use crate::demo::{run_demo, run_stats_report, DemoArgs, StatsArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use placement_plus::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Placement Plus",
    about = "Run the Placement Plus placement service and its reporting tools from the command line",
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
    /// Print the branch placement statistics report
    Stats(StatsArgs),
    /// Run a seeded end-to-end demo of the recording and application workflows
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
        Command::Stats(args) => run_stats_report(args),
        Command::Demo(args) => run_demo(args),
    }
}
