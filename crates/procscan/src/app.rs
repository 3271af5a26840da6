use clap::{Arg, ArgAction, Command};

fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .help("Output in JSON format")
        .action(ArgAction::SetTrue)
}

fn timeout_arg() -> Arg {
    Arg::new("timeout-ms")
        .long("timeout-ms")
        .help("Deadline for the external program in milliseconds (overrides config)")
        .value_parser(clap::value_parser!(u64).range(1..))
}

pub fn build_cli() -> Command {
    Command::new("procscan")
        .version(env!("CARGO_PKG_VERSION"))
        .about("List open files and child processes of a process using lsof and pgrep")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("files")
                .about("List open files via lsof (header removed, one record per line)")
                .arg(
                    Arg::new("pid")
                        .long("pid")
                        .short('p')
                        .help("Process to inspect (0 = all processes)")
                        .value_parser(clap::value_parser!(i32))
                        .default_value("0"),
                )
                .arg(json_arg())
                .arg(timeout_arg())
                .arg(
                    Arg::new("extra")
                        .help("Extra lsof arguments, appended after the built-in ones (use after --)")
                        .num_args(1..)
                        .last(true)
                        .allow_hyphen_values(true),
                ),
        )
        .subcommand(
            Command::new("children")
                .about("List immediate child process IDs via pgrep")
                .arg(
                    Arg::new("pid")
                        .help("Parent process ID")
                        .required(true)
                        .index(1)
                        .value_parser(clap::value_parser!(i32)),
                )
                .arg(json_arg())
                .arg(timeout_arg()),
        )
}
