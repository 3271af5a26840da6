use clap::ArgMatches;
use tracing::{error, info};

use procscan_core::{Pid, ProcscanError, call_lsof};

use super::helpers::invoker_and_context;

pub(crate) fn handle_files_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let pid = Pid::from_raw(matches.get_one::<i32>("pid").copied().unwrap_or_default());
    let extra_args: Vec<String> = matches
        .get_many::<String>("extra")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    let json_output = matches.get_flag("json");

    info!(event = "cli.files_started", pid = %pid, extra_args = ?extra_args);

    let (invoker, ctx) = invoker_and_context(matches);

    let lines = match call_lsof(&ctx, &invoker, pid, &extra_args) {
        Ok(lines) => lines,
        Err(e) => {
            eprintln!("Failed to list open files: {}", e);
            error!(
                event = "cli.files_failed",
                pid = %pid,
                error_code = e.error_code(),
                error = %e
            );
            return Err(e.into());
        }
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&lines)?);
    } else {
        for line in &lines {
            println!("{}", line);
        }
    }

    info!(event = "cli.files_completed", pid = %pid, count = lines.len());
    Ok(())
}
