//! CLI frontend for branching adventures.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "cyoa",
    about = "Create, check, play and export choose-your-own-adventure games",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the starter adventure to a new JSON file
    New {
        /// File to create
        file: PathBuf,

        /// Overwrite the file if it exists
        #[arg(short, long)]
        force: bool,
    },

    /// Report authoring problems in an adventure
    Check {
        /// Adventure JSON file
        file: PathBuf,
    },

    /// Print a share link carrying the adventure in its query string
    Link {
        /// Adventure JSON file
        file: PathBuf,

        /// Page the link points at
        #[arg(short, long, default_value = "/play")]
        base: String,

        /// Browser tab title
        #[arg(short, long)]
        title: Option<String>,

        /// Accent color (CSS hex)
        #[arg(short, long)]
        color: Option<String>,

        /// Show the decorative spider layer
        #[arg(long)]
        spiders: bool,
    },

    /// Save an adventure to a storage directory under the shared key
    Store {
        /// Adventure JSON file
        file: PathBuf,

        /// Storage directory
        #[arg(short, long, default_value = ".cyoa")]
        dir: PathBuf,
    },

    /// Play an adventure in the terminal
    Play {
        /// Adventure JSON file
        file: Option<PathBuf>,

        /// Load from a share link or query string instead of a file
        #[arg(short, long, conflicts_with = "file")]
        link: Option<String>,

        /// Load from a storage directory instead of a file
        #[arg(long, conflicts_with_all = ["file", "link"])]
        storage: Option<PathBuf>,

        /// Scene to open first, if it exists
        #[arg(long)]
        scene: Option<String>,

        /// RNG seed for reproducible battles
        #[arg(long)]
        seed: Option<u64>,

        /// Skip battle delays
        #[arg(long)]
        fast: bool,

        /// Read commands from stdin without prompts or delays
        #[arg(long)]
        script: bool,
    },

    /// Export an adventure as a playable HTML page or as JSON
    Export {
        /// Adventure JSON file
        file: PathBuf,

        /// Output format: html, json
        #[arg(short, long, default_value = "html")]
        format: String,

        /// Output file path (default: derived from the title)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Browser tab title
        #[arg(short, long)]
        title: Option<String>,

        /// Accent color (CSS hex)
        #[arg(short, long)]
        color: Option<String>,

        /// Show the decorative spider layer
        #[arg(long)]
        spiders: bool,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::New { file, force } => commands::new::run(&file, force),
        Commands::Check { file } => commands::check::run(&file),
        Commands::Link {
            file,
            base,
            title,
            color,
            spiders,
        } => commands::link::run(&file, &base, commands::meta(title, color, spiders)),
        Commands::Store { file, dir } => commands::store::run(&file, &dir),
        Commands::Play {
            file,
            link,
            storage,
            scene,
            seed,
            fast,
            script,
        } => {
            let source = if let Some(query) = link {
                commands::play::Source::Link(query)
            } else if let Some(dir) = storage {
                commands::play::Source::Storage(dir)
            } else if let Some(path) = file {
                commands::play::Source::File(path)
            } else {
                commands::play::Source::None
            };
            commands::play::run(
                source,
                commands::play::Options {
                    scene,
                    seed,
                    fast: fast || script,
                    prompt: !script,
                },
            )
        }
        Commands::Export {
            file,
            format,
            output,
            title,
            color,
            spiders,
        } => commands::export::run(
            &file,
            &format,
            output.as_deref(),
            commands::meta(title, color, spiders),
        ),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
