use crate::demo::{run_demo, DemoArgs};
use crate::schedule::{run_preview, PreviewArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use interview_desk::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Interview Desk",
    about = "Run the applicant intake service and schedule interview slots from the command line",
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
    /// Work with exported scheduling snapshots
    Schedule {
        #[command(subcommand)]
        command: ScheduleCommand,
    },
    /// Seed a sample cohort, auto-assign interviews, and print the roster
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum ScheduleCommand {
    /// Compute an auto-assignment for a snapshot without saving anything
    Preview(PreviewArgs),
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
        Command::Schedule {
            command: ScheduleCommand::Preview(args),
        } => run_preview(args),
        Command::Demo(args) => run_demo(args),
    }
}
