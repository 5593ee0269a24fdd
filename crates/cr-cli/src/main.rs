use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::ArgMatches;
use cr_cli::play::{play_daily, play_endless, play_timed};
use cr_cli::render::{render_chain, render_leaderboard, render_step};
use cr_cli::{cli, init_tracing, AppConfig};
use cr_core::SystemClock;
use cr_modes::{demo_puzzle, replay, DailyRun, EndlessRun, Services, TimedRun, DEMO_SOLUTION};
use cr_store::{Board, Difficulty, LeaderboardService, PuzzleSpec};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = cli::command().get_matches();

    let config_path = matches.get_one::<PathBuf>("config");
    let mut config = AppConfig::load_or_default(config_path.map(PathBuf::as_path))?;
    if let Some(results) = matches.get_one::<PathBuf>("results") {
        config = config.with_results_file(Some(results.clone()));
    }
    init_tracing(&config.log)?;

    let today = Local::now().date_naive();
    let result = match matches.subcommand() {
        Some(("play", args)) => play(&config, args, today).await,
        Some(("demo", args)) => demo(args.get_flag("json")),
        Some(("check", args)) => check(args),
        Some(("leaderboard", args)) => leaderboard(&config, args, today).await,
        _ => Ok(()),
    };

    if let Err(err) = &result {
        tracing::error!(error = %err, "command failed");
    }
    result
}

async fn play(config: &AppConfig, args: &ArgMatches, today: NaiveDate) -> anyhow::Result<()> {
    let store = Arc::new(config.open_store(today)?);
    let user = config.player_id(&store);

    let clock = SystemClock::shared();
    let services = Services::from_store(store.clone()).with_clock(clock.clone());
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    let mode = args.get_one::<String>("mode").map_or("daily", String::as_str);
    let board = match mode {
        "timed" => {
            let run = TimedRun::start(services, user, config.timed)
                .await
                .context("failed to start timed run")?;
            play_timed(run, &mut input).await?;
            Board::Timed
        }
        "endless" => {
            let run = EndlessRun::start(services, user, config.endless)
                .await
                .context("failed to start endless run")?;
            play_endless(run, &mut input).await?;
            Board::Endless
        }
        _ => {
            let date = args.get_one::<NaiveDate>("date").copied().unwrap_or(today);
            let run = DailyRun::start(services, user, date)
                .await
                .with_context(|| format!("failed to start daily challenge for {date}"))?;
            play_daily(run, clock, &mut input).await?;
            Board::Daily(date)
        }
    };

    config.save_store(&store)?;
    println!();
    print_board(store.as_ref(), board, config.leaderboard.limit).await
}

fn demo(json: bool) -> anyhow::Result<()> {
    let result = replay(&demo_puzzle(), &DEMO_SOLUTION).context("demo puzzle is invalid")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("COLD -> WARM in five slots");
    for step in &result.steps {
        println!("{}", render_step(step));
    }
    println!("{}", render_chain(&result.chain));
    if let Some(done) = result.completion {
        println!("Complete after {} attempts.", done.attempts);
    }
    Ok(())
}

fn check(args: &ArgMatches) -> anyhow::Result<()> {
    let words: Vec<&str> = args
        .get_many::<String>("words")
        .context("no words given")?
        .map(String::as_str)
        .collect();
    let (Some(start), Some(end)) = (words.first(), words.last()) else {
        anyhow::bail!("no words given");
    };
    if words.len() < 3 {
        anyhow::bail!("a chain needs at least three words");
    }

    let puzzle = PuzzleSpec::new(*start, *end, words.len(), Difficulty::default());
    let interior = &words[1..words.len() - 1];
    let result = replay(&puzzle, interior).context("chain cannot be built")?;
    let valid = result.completion.is_some();

    if args.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        for step in &result.steps {
            println!("{}", render_step(step));
        }
        println!("{}", if valid { "VALID" } else { "INVALID" });
    }

    std::process::exit(if valid { 0 } else { 1 });
}

async fn leaderboard(
    config: &AppConfig,
    args: &ArgMatches,
    today: NaiveDate,
) -> anyhow::Result<()> {
    let store = config.open_store(today)?;
    let date = args.get_one::<NaiveDate>("date").copied().unwrap_or(today);
    let limit = args
        .get_one::<usize>("limit")
        .copied()
        .unwrap_or(config.leaderboard.limit);
    let board = match args.get_one::<String>("board").map(String::as_str) {
        Some("weekly") => Board::Weekly(date),
        Some("timed") => Board::Timed,
        Some("endless") => Board::Endless,
        _ => Board::Daily(date),
    };
    print_board(&store, board, limit).await
}

async fn print_board(
    service: &dyn LeaderboardService,
    board: Board,
    limit: usize,
) -> anyhow::Result<()> {
    let rows = service
        .leaderboard(board, limit)
        .await
        .context("failed to load leaderboard")?;

    match board {
        Board::Daily(date) => println!("Daily leaderboard {date}"),
        Board::Weekly(date) => println!("Weekly leaderboard to {date}"),
        Board::Timed => println!("Timed leaderboard"),
        Board::Endless => println!("Endless leaderboard"),
    }
    for line in render_leaderboard(&rows) {
        println!("{line}");
    }
    Ok(())
}
