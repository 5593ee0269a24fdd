//! Command-line definition

use chrono::NaiveDate;
use clap::{value_parser, Arg, ArgAction, Command};
use std::path::PathBuf;

/// Build the `chain-reaction` command tree
#[must_use]
pub fn command() -> Command {
    Command::new("chain-reaction")
        .version(env!("CARGO_PKG_VERSION"))
        .about("ChainReaction word chain puzzles")
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("results")
                .long("results")
                .short('r')
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("JSON results file, overrides [storage] results"),
        )
        .subcommand_required(true)
        .subcommand(
            Command::new("play")
                .about("Play a game mode interactively")
                .arg(
                    Arg::new("mode")
                        .long("mode")
                        .short('m')
                        .default_value("daily")
                        .value_parser(["daily", "timed", "endless"])
                        .help("Game mode"),
                )
                .arg(
                    Arg::new("date")
                        .long("date")
                        .value_parser(value_parser!(NaiveDate))
                        .help("Daily challenge date (YYYY-MM-DD), defaults to today"),
                ),
        )
        .subcommand(
            Command::new("demo")
                .about("Replay COLD -> CORD -> CARD -> WARD -> WARM")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Validate a full chain, start and end words included")
                .arg(
                    Arg::new("words")
                        .required(true)
                        .num_args(3..)
                        .value_name("WORD")
                        .help("Chain words in order"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
        .subcommand(
            Command::new("leaderboard")
                .about("Show a leaderboard")
                .arg(
                    Arg::new("board")
                        .long("board")
                        .short('b')
                        .default_value("daily")
                        .value_parser(["daily", "weekly", "timed", "endless"])
                        .help("Which board"),
                )
                .arg(
                    Arg::new("date")
                        .long("date")
                        .value_parser(value_parser!(NaiveDate))
                        .help("Day (daily) or last day of the week (weekly)"),
                )
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .short('n')
                        .value_parser(value_parser!(usize))
                        .help("Rows to show, defaults to the configured limit"),
                ),
        )
}
