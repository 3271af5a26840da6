use tracing::{debug, info};

use crate::invoke::{CallContext, InvokeError, Invoker};
use crate::process::Pid;

pub const LSOF_PROGRAM: &str = "lsof";

/// Build the `lsof` argument vector.
///
/// Always `-a -n -P` (AND the filters, skip host and port name resolution),
/// then `-p <pid>` unless `pid` selects all processes, then `extra_args`
/// in order.
pub fn build_lsof_args(pid: Pid, extra_args: &[String]) -> Vec<String> {
    let mut args: Vec<String> = ["-a", "-n", "-P"].iter().map(|s| s.to_string()).collect();
    if !pid.is_all() {
        args.push("-p".to_string());
        args.push(pid.to_string());
    }
    args.extend(extra_args.iter().cloned());
    args
}

/// Split `lsof` output into records.
///
/// The first line is the column header and is always dropped, as are
/// empty lines. Records are passed through uninterpreted.
pub fn parse_lsof_output(stdout: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(stdout)
        .split('\n')
        .skip(1)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// List open files of `pid` (or of every process for [`Pid::ALL`]).
///
/// Exit status 1 is how `lsof` reports that some selection matched nothing,
/// so it is not treated as a failure: with no output the result is empty,
/// otherwise the records printed are returned. A missing `lsof` binary and
/// every other failure are returned as errors.
pub fn call_lsof(
    ctx: &CallContext,
    invoker: &dyn Invoker,
    pid: Pid,
    extra_args: &[String],
) -> Result<Vec<String>, InvokeError> {
    let args = build_lsof_args(pid, extra_args);
    debug!(event = "core.lsof.call_started", pid = %pid, args = ?args);

    let output = invoker.command_with_context(ctx, LSOF_PROGRAM, &args);

    if let Some(error) = output.error {
        if !error.is_exit_status(1) {
            debug!(
                event = "core.lsof.call_failed",
                pid = %pid,
                error = %error
            );
            return Err(error);
        }
        if output.stdout.is_empty() {
            info!(event = "core.lsof.no_match", pid = %pid);
            return Ok(Vec::new());
        }
        debug!(
            event = "core.lsof.partial_match",
            pid = %pid,
            stdout_bytes = output.stdout.len()
        );
    }

    let lines = parse_lsof_output(&output.stdout);
    info!(
        event = "core.lsof.call_completed",
        pid = %pid,
        line_count = lines.len()
    );
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoke::{CommandOutput, FakeInvoker};
    use std::time::Duration;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn exit_status(code: i32) -> InvokeError {
        InvokeError::ExitStatus {
            program: LSOF_PROGRAM.to_string(),
            code,
        }
    }

    #[test]
    fn test_args_for_all_processes() {
        assert_eq!(build_lsof_args(Pid::ALL, &[]), strings(&["-a", "-n", "-P"]));
        assert_eq!(
            build_lsof_args(Pid::ALL, &strings(&["-i", "-F", "n"])),
            strings(&["-a", "-n", "-P", "-i", "-F", "n"])
        );
    }

    #[test]
    fn test_args_for_single_process() {
        assert_eq!(
            build_lsof_args(Pid::from_raw(1234), &[]),
            strings(&["-a", "-n", "-P", "-p", "1234"])
        );
        assert_eq!(
            build_lsof_args(Pid::from_raw(1234), &strings(&["-i"])),
            strings(&["-a", "-n", "-P", "-p", "1234", "-i"])
        );
    }

    #[test]
    fn test_parse_drops_header_and_blank_lines() {
        assert_eq!(
            parse_lsof_output(b"HEADER\nline1\n\nline2\n"),
            strings(&["line1", "line2"])
        );
    }

    #[test]
    fn test_parse_empty_and_header_only_output() {
        assert!(parse_lsof_output(b"").is_empty());
        assert!(parse_lsof_output(b"COMMAND PID USER FD TYPE\n").is_empty());
    }

    #[test]
    fn test_call_returns_records_and_forwards_context() {
        let invoker = FakeInvoker::new().respond_stdout(
            LSOF_PROGRAM,
            "COMMAND PID USER FD TYPE DEVICE SIZE/OFF NODE NAME\n\
             bash 1234 me cwd DIR 8,1 4096 2 /home/me\n\
             bash 1234 me 0u CHR 136,0 0t0 3 /dev/pts/0\n",
        );
        let ctx = CallContext::with_timeout(Duration::from_millis(500));

        let lines = call_lsof(&ctx, &invoker, Pid::from_raw(1234), &strings(&["-d", "cwd"]))
            .unwrap();
        assert_eq!(
            lines,
            strings(&[
                "bash 1234 me cwd DIR 8,1 4096 2 /home/me",
                "bash 1234 me 0u CHR 136,0 0t0 3 /dev/pts/0",
            ])
        );

        let calls = invoker.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].program, "lsof");
        assert_eq!(
            calls[0].args,
            strings(&["-a", "-n", "-P", "-p", "1234", "-d", "cwd"])
        );
        assert_eq!(calls[0].timeout, Some(Duration::from_millis(500)));
    }

    #[test]
    fn test_exit_status_one_without_output_is_empty_success() {
        let invoker = FakeInvoker::new().respond(LSOF_PROGRAM, |_| {
            CommandOutput::failure(Vec::new(), exit_status(1))
        });

        let lines = call_lsof(&CallContext::background(), &invoker, Pid::from_raw(99), &[]);
        assert_eq!(lines.unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_exit_status_one_with_output_returns_records() {
        let invoker = FakeInvoker::new().respond(LSOF_PROGRAM, |_| {
            CommandOutput::failure("HEADER\nrecord\n", exit_status(1))
        });

        let lines = call_lsof(&CallContext::background(), &invoker, Pid::ALL, &[]).unwrap();
        assert_eq!(lines, strings(&["record"]));
    }

    #[test]
    fn test_missing_lsof_is_propagated() {
        let invoker = FakeInvoker::new();

        let err = call_lsof(&CallContext::background(), &invoker, Pid::ALL, &[]).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.program(), "lsof");
    }

    #[test]
    fn test_other_failures_are_propagated() {
        let invoker = FakeInvoker::new().respond(LSOF_PROGRAM, |_| {
            CommandOutput::failure("HEADER\nrecord\n", exit_status(2))
        });
        let err = call_lsof(&CallContext::background(), &invoker, Pid::ALL, &[]).unwrap_err();
        assert!(err.is_exit_status(2));

        let invoker = FakeInvoker::new().respond(LSOF_PROGRAM, |_| {
            CommandOutput::failure(
                Vec::new(),
                InvokeError::Timeout {
                    program: LSOF_PROGRAM.to_string(),
                    timeout_ms: 3000,
                },
            )
        });
        let err = call_lsof(&CallContext::background(), &invoker, Pid::ALL, &[]).unwrap_err();
        assert!(matches!(err, InvokeError::Timeout { .. }));
    }
}
