use clap::ArgMatches;
use tracing::{error, info};

use procscan_core::{Pid, ProcscanError, call_pgrep};

use super::helpers::invoker_and_context;

pub(crate) fn handle_children_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let parent = matches
        .get_one::<i32>("pid")
        .copied()
        .map(Pid::from_raw)
        .ok_or("Parent PID is required")?;
    let json_output = matches.get_flag("json");

    info!(event = "cli.children_started", parent = %parent);

    let (invoker, ctx) = invoker_and_context(matches);

    let children = match call_pgrep(&ctx, &invoker, parent) {
        Ok(children) => children,
        // pgrep reports "no children" as exit status 1
        Err(e) if e.is_exit_status(1) => Vec::new(),
        Err(e) => {
            eprintln!("Failed to list child processes: {}", e);
            error!(
                event = "cli.children_failed",
                parent = %parent,
                error_code = e.error_code(),
                error = %e
            );
            return Err(e.into());
        }
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&children)?);
    } else {
        for child in &children {
            println!("{}", child);
        }
    }

    info!(
        event = "cli.children_completed",
        parent = %parent,
        count = children.len()
    );
    Ok(())
}
