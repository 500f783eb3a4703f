//! Desktop picker binary.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Pick a college football game from the current week and gather its
/// matchup data into a JSON document.
#[derive(Debug, Parser)]
#[clap(name = "cfb-picker-gui", about = "College football matchup picker (GUI)")]
struct Args {
    /// Directory the matchup document is written to.
    #[clap(long, default_value = "outputs")]
    out_dir: PathBuf,
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let args = Args::parse();
    if let Err(err) = cfb_picker::gui::run(args.out_dir) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
