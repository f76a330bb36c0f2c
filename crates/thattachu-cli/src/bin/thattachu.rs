use clap::{Parser, Subcommand};

use thattachu_cli::commands::{drill_cmd, levels_cmd, preview_cmd, segment_cmd};
use thattachu_cli::trace_init::init_tracing;

#[derive(Parser)]
#[command(name = "thattachu", about = "Tamil phonetic typing trainer")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the keystroke breakdown for a Tamil text
    Segment {
        /// Tamil text to segment
        text: String,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Transliterate romanized keys to Tamil
    Preview {
        /// Romanized keys, e.g. "pazham"
        keys: String,
    },

    /// List the practice levels
    Levels {
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Run an interactive typing drill
    Drill {
        /// Level to start from
        #[arg(short, long, default_value = "1")]
        level: usize,
        /// Print level reports as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Segment { text, json } => segment_cmd(&text, json),
        Command::Preview { keys } => preview_cmd(&keys),
        Command::Levels { json } => levels_cmd(json),
        Command::Drill { level, json } => drill_cmd(level, json),
    }
}
