use clap::ArgMatches;
use tracing::{error, info};

mod children;
mod files;
mod helpers;

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    info!(
        event = "cli.startup_completed",
        version = env!("CARGO_PKG_VERSION"),
        command = matches.subcommand_name().unwrap_or_default()
    );

    match matches.subcommand() {
        Some(("files", sub_matches)) => files::handle_files_command(sub_matches),
        Some(("children", sub_matches)) => children::handle_children_command(sub_matches),
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    }
}
