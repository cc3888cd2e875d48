mod config;
mod output;
mod prompt;
mod store;

use clap::Parser;
use coffee_roulette_core::{
    Error, ReEligibility, Roulette, RoundOptions, SitOutPolicy, StarterPool,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, BufRead, IsTerminal};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::store::JsonFileStore;

pub fn bail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {msg}");
    std::process::exit(1);
}

#[derive(Parser)]
#[command(name = "coffee-roulette", version, about = "Pair people up for recurring one-on-one coffee chats")]
struct Cli {
    /// Path to config file (default: ~/.config/coffee-roulette/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the roulette state (default: ~/.local/share/coffee-roulette)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Show progress during execution
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Create a new roulette with an initial group (one time only)
    Init(NamesArgs),
    /// Add participants to an existing roulette
    Add(NamesArgs),
    /// Exclude participants from future rounds
    Remove(NamesArgs),
    /// Generate this round's pairs
    Round(RoundArgs),
    /// List active and removed participants
    Status(StatusArgs),
    /// Forget who has met whom (starter history is kept)
    Reset,
    /// Create a default config file at ~/.config/coffee-roulette/config.toml
    ConfigInit,
}

#[derive(Parser)]
struct NamesArgs {
    /// File with one name per line (or a JSON array of names)
    #[arg(long)]
    names: Option<PathBuf>,

    /// Inline name (repeatable)
    #[arg(long = "name")]
    inline_names: Vec<String>,
}

#[derive(Parser)]
struct RoundArgs {
    /// File with one conversation starter per line
    #[arg(long)]
    starters: Option<PathBuf>,

    /// Announce pairs without conversation starters
    #[arg(long)]
    no_starters: bool,

    /// Participant who sits out if the group is odd (random otherwise)
    #[arg(long)]
    sit_out: Option<String>,

    /// Make people eligible again once they have met everyone
    #[arg(long)]
    reset_when_exhausted: bool,

    /// Seed the random source for a reproducible round
    #[arg(long)]
    seed: Option<u64>,

    /// Output JSON instead of announcement lines
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct StatusArgs {
    /// Output JSON instead of a table
    #[arg(long)]
    json: bool,
}

/// Parse a string as either a JSON array of strings or plain text (one name per line).
fn parse_names_from_str(content: &str) -> Vec<String> {
    let trimmed = content.trim();
    if trimmed.starts_with('[') {
        let names: Vec<String> = serde_json::from_str(trimmed)
            .unwrap_or_else(|e| bail(format!("File looks like JSON but failed to parse: {e}")));
        names.into_iter().map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect()
    } else {
        trimmed
            .lines()
            .map(|l| l.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Load names from all sources: --names file, --name inline args, or stdin.
fn load_names(args: &NamesArgs) -> Vec<String> {
    let mut names = Vec::new();

    if let Some(ref path) = args.names {
        let content = std::fs::read_to_string(path)
            .unwrap_or_else(|e| bail(format!("Failed to read names file {}: {e}", path.display())));
        names = parse_names_from_str(&content);
    }

    names.extend(args.inline_names.iter().cloned());

    // From stdin (only if no file and no inline names)
    if names.is_empty() {
        let stdin = io::stdin();
        if stdin.is_terminal() {
            bail("No names provided. Use --names <file>, --name <name>, or pipe names via stdin.");
        }
        let content: String = stdin.lock().lines()
            .map(|l| l.unwrap_or_else(|e| bail(format!("Failed to read from stdin: {e}"))))
            .collect::<Vec<_>>()
            .join("\n");
        names = parse_names_from_str(&content);
    }

    if names.is_empty() {
        bail("No names provided.");
    }
    names
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Load config file, merge with CLI args (CLI wins)
    let config_path = cli.config.clone().unwrap_or_else(config::config_path);
    if let Commands::ConfigInit = cli.command {
        config::create_default_config(&config_path);
        println!("Created config at {}", config_path.display());
        println!("Edit it to set your data directory, starters file, etc.");
        return;
    }
    let cfg = config::load_config(&config_path);

    let data_dir = cli.data_dir.clone()
        .or_else(|| cfg.data_dir.clone().map(PathBuf::from))
        .unwrap_or_else(config::default_data_dir);
    tracing::debug!(data_dir = %data_dir.display(), "using data directory");
    let mut roulette = Roulette::new(JsonFileStore::new(data_dir));

    match cli.command {
        Commands::Init(args) => {
            let names = load_names(&args);
            let ids = roulette.initialize(&names).unwrap_or_else(|e| bail(e));
            println!("Created coffee roulette with {} participants in {}", ids.len(), roulette.store().dir().display());
        }
        Commands::Add(args) => {
            let names = load_names(&args);
            let ids = roulette.add(&names).unwrap_or_else(|e| bail(e));
            println!("Added {} participants", ids.len());
        }
        Commands::Remove(args) => {
            let names = load_names(&args);
            let ids = roulette.remove(&names).unwrap_or_else(|e| bail(e));
            println!("Removed {} participants", ids.len());
        }
        Commands::Round(args) => run_round(&mut roulette, args, &cfg),
        Commands::Status(args) => {
            let status = roulette.status().unwrap_or_else(|e| bail(e));
            if args.json {
                output::print_status_json(&status);
            } else {
                output::print_status(&status);
            }
        }
        Commands::Reset => {
            roulette.reset_meeting_history().unwrap_or_else(|e| bail(e));
            println!("Meeting history reset; everyone is eligible to meet everyone again");
        }
        Commands::ConfigInit => unreachable!("handled before loading config"),
    }
}

fn run_round(roulette: &mut Roulette<JsonFileStore>, args: RoundArgs, cfg: &config::RouletteConfig) {
    let use_starters = !args.no_starters && cfg.conversation_starters.unwrap_or(true);

    // Starters file: CLI arg > config file > <data_dir>/starters.txt
    let starters = if use_starters {
        let path = args.starters.clone()
            .or_else(|| cfg.starters.clone().map(PathBuf::from))
            .unwrap_or_else(|| roulette.store().dir().join("starters.txt"));
        prompt::load_starters(&path)
    } else {
        StarterPool::default()
    };

    let sit_out = match args.sit_out.clone().or_else(|| cfg.sit_out.clone()) {
        Some(name) => roulette.sit_out_by_name(&name).unwrap_or_else(|e| bail(e)),
        None => SitOutPolicy::Random,
    };

    let re_eligibility = if args.reset_when_exhausted || cfg.reset_when_exhausted.unwrap_or(false) {
        ReEligibility::ResetExhaustedRows
    } else {
        ReEligibility::Never
    };

    let options = RoundOptions {
        use_starters,
        sit_out,
        re_eligibility,
    };

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    match roulette.run_round(&starters, &options, &mut rng) {
        Ok(report) => {
            if args.json {
                output::print_round_json(&report, false);
            } else {
                output::print_round(&report);
            }
        }
        Err(Error::StarterPoolExhausted(partial)) => {
            if args.json {
                output::print_round_json(&partial, true);
            } else {
                output::print_round(&partial);
            }
            bail(Error::StarterPoolExhausted(partial));
        }
        Err(e) => bail(e),
    }
}
