//! Terminal front end: list the current week's games, take a selection,
//! gather the matchup data, report the output path.

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cfb_picker::{
    cfbd::{CfbdClient, Game},
    config::{self, Config},
    error::{CfbdError, Result},
    progress::Progress,
    session,
};

/// Pick a college football game from the current week and gather its
/// matchup data into a JSON document.
#[derive(Debug, Parser)]
#[clap(name = "cfb-picker", about = "College football matchup data gatherer")]
struct Args {
    /// Directory the matchup document is written to.
    #[clap(long, default_value = ".")]
    out_dir: PathBuf,
}

/// Prints status to stdout and skipped-section warnings to stderr.
struct CliProgress;

impl Progress for CliProgress {
    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }

    fn warn(&mut self, msg: &str) {
        eprintln!("Warning: {msg}");
    }
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let args = Args::parse();
    if let Err(err) = run(&args) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let config_path = Config::default_path();
    let mut api_key = match config::stored_api_key(&config_path)? {
        Some(key) => key,
        None => prompt_api_key(&config_path)?,
    };

    // A rejected key is worth one interactive retry loop before giving up.
    let (client, week_games) = loop {
        let client = CfbdClient::new(&Config::new(api_key.clone()))?;
        match session::load_week_games(&client, chrono::Utc::now()) {
            Ok(week_games) => break (client, week_games),
            Err(CfbdError::Unauthorized) if io::stdin().is_terminal() => {
                eprintln!("Error: {}", CfbdError::Unauthorized);
                api_key = prompt_api_key(&config_path)?;
            }
            Err(err) => return Err(err),
        }
    };

    let week = &week_games.week;
    println!(
        "\nGames for week {}, {} ({})",
        week.week, week.year, week.season_type
    );

    if week_games.games.is_empty() {
        println!("No games found for the current week.");
        return Ok(());
    }

    println!("{}", "-".repeat(60));
    for (index, game) in week_games.games.iter().enumerate() {
        println!("{:>3}. {}", index + 1, game.label());
    }
    println!("{}", "-".repeat(60));

    let Some(game) = pick_game(&week_games.games)? else {
        return Ok(());
    };

    let path = session::run_matchup(&client, game, &args.out_dir, &mut CliProgress)?;
    println!("\nComprehensive matchup data saved to {}", path.display());
    Ok(())
}

/// Numeric selection loop; `0` (or end of input) exits.
fn pick_game(games: &[Game]) -> Result<Option<&Game>> {
    let stdin = io::stdin();
    loop {
        print!("\nSelect a game number (or 0 to exit): ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        match line.trim().parse::<usize>() {
            Ok(0) => return Ok(None),
            Ok(n) if n <= games.len() => return Ok(Some(&games[n - 1])),
            _ => println!(
                "Invalid selection. Please enter a number between 1 and {}.",
                games.len()
            ),
        }
    }
}

/// Interactive key entry: prompt, persist, return the key. Fails with
/// `MissingCredential` when stdin is not a terminal.
fn prompt_api_key(config_path: &Path) -> Result<String> {
    if !io::stdin().is_terminal() {
        return Err(CfbdError::MissingCredential);
    }

    println!("\nNo CFBD API key configured.");
    println!("You can get a free key from https://collegefootballdata.com/");
    loop {
        print!("Enter your CFBD API key: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(CfbdError::MissingCredential);
        }
        let key = line.trim();
        if key.is_empty() {
            println!("The key cannot be empty.");
            continue;
        }

        let saved = Config::new(key);
        saved.save(config_path)?;
        println!("API key saved to {}", config_path.display());
        return Ok(saved.api_key);
    }
}
