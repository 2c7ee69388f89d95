use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "tb",
    about = concat!("[\u{25A4}] taskboard v", env!("CARGO_PKG_VERSION"), " - your board is one JSON file"),
    version
)]
struct Cli {
    /// Run against a different data directory
    #[arg(short = 'C', long = "data-dir")]
    data_dir: Option<PathBuf>,

    /// Open the metrics dashboard instead of the board
    #[arg(long)]
    metrics: bool,
}

fn main() {
    let cli = Cli::parse();

    let data_dir = match cli.data_dir.or_else(default_data_dir) {
        Some(dir) => dir,
        None => {
            eprintln!("error: could not determine a data directory, pass --data-dir");
            std::process::exit(1);
        }
    };

    if let Err(e) = taskboard::tui::run(&data_dir, cli.metrics) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

/// Platform data directory, e.g. ~/.local/share/taskboard on Linux
fn default_data_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "taskboard").map(|dirs| dirs.data_dir().to_path_buf())
}
