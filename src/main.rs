use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;

use regatta_score::history::{self, Recorded};
use regatta_score::output;
use regatta_score::roster::Roster;
use regatta_score::scoring::{self, PenaltyTable, RoundOutcome, ScoringContext};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 1;
const EXIT_STORAGE: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
enum Format {
    #[default]
    Table,
    Tsv,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score a round and print it
    Score {
        /// Results file (YAML)
        results: PathBuf,

        #[arg(short, long, value_enum, default_value_t)]
        format: Format,
    },
    /// Score a round and store it in the series history (re-recording an event corrects it)
    Record {
        /// Results file (YAML)
        results: PathBuf,

        #[arg(short, long, value_enum, default_value_t)]
        format: Format,
    },
    /// Print the series standings over every recorded round
    Series {
        #[arg(short, long, value_enum, default_value_t)]
        format: Format,
    },
    /// List the recorded rounds
    Rounds,
}

#[derive(Parser, Debug)]
#[command(name = "regatta-score")]
#[command(about = "Low-point regatta scoring with discards and series standings", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/regatta-score/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Roster file (overrides `roster` from the config)
    #[arg(short, long, global = true)]
    roster: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

fn fail(code: i32, message: impl std::fmt::Display) -> ! {
    eprintln!("{}", message);
    std::process::exit(code);
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => fail(EXIT_STORAGE, format!("Failed to serialize output: {}", e)),
    }
}

fn print_round(outcome: &RoundOutcome, format: Format) {
    match format {
        Format::Table => {
            let use_colors = output::should_use_colors();
            println!("{}", output::format_round_table(outcome, use_colors));
        }
        Format::Tsv => println!("{}", output::format_round_tsv(outcome)),
        Format::Json => print_json(outcome),
    }
}

/// Load roster and results, then score and rank the round.
fn score_results(
    results_path: &Path,
    roster_path: Option<&PathBuf>,
    penalties: &PenaltyTable,
    verbose: bool,
) -> (regatta_score::results::ResultsFile, RoundOutcome) {
    let roster_path = match roster_path {
        Some(p) => p,
        None => {
            eprintln!("No roster given.");
            eprintln!("Pass --roster or add it to ~/.config/regatta-score/config.yaml:");
            eprintln!("  roster: /path/to/roster.yaml");
            std::process::exit(EXIT_CONFIG);
        }
    };

    let roster: Roster = regatta_score::roster::load_roster(roster_path)
        .unwrap_or_else(|e| fail(EXIT_INPUT, format!("Roster error: {:#}", e)));
    if verbose {
        eprintln!("Loaded {} competitors from {}", roster.len(), roster_path.display());
    }

    let results = regatta_score::results::load_results(results_path)
        .unwrap_or_else(|e| fail(EXIT_INPUT, format!("Results error: {:#}", e)));
    if verbose {
        eprintln!("Loaded {} results rows from {}", results.results.len(), results_path.display());
    }

    let ctx = ScoringContext::new(&roster, penalties);
    let outcome = scoring::score_round(&ctx, &results.round_results())
        .unwrap_or_else(|e| fail(EXIT_INPUT, format!("Scoring error: {}", e)));

    for skipped in &outcome.skipped {
        eprintln!("Warning: skipped sail {}: {}", skipped.sail, skipped.reason);
    }
    if verbose {
        eprintln!(
            "Scored {} races: attendance {}, DNC scores {}",
            outcome.race_count, outcome.attendance, outcome.dnc_points
        );
    }

    (results, outcome.into_ranked())
}

fn main() {
    let cli = Cli::parse();
    let start_time = Instant::now();

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match regatta_score::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate scoring config at startup
    let effective_scoring = config.scoring.clone().unwrap_or_default();
    if let Err(errors) = scoring::validate_scoring(&effective_scoring) {
        eprintln!("Scoring config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }
    let penalties = PenaltyTable::from_config(&effective_scoring)
        .unwrap_or_else(|e| fail(EXIT_CONFIG, format!("Scoring config error: {:#}", e)));

    let roster_path = cli.roster.or(config.roster);
    let history_path = config.history.unwrap_or_else(history::get_history_path);
    if cli.verbose {
        eprintln!("History file: {}", history_path.display());
    }

    match cli.command {
        Commands::Score { results, format } => {
            let (_, outcome) =
                score_results(&results, roster_path.as_ref(), &penalties, cli.verbose);
            print_round(&outcome, format);
        }
        Commands::Record { results, format } => {
            let (file, outcome) =
                score_results(&results, roster_path.as_ref(), &penalties, cli.verbose);
            let info = file
                .round_info()
                .unwrap_or_else(|e| fail(EXIT_INPUT, format!("Results error: {:#}", e)));

            let mut round_history = history::load_history(&history_path)
                .unwrap_or_else(|e| fail(EXIT_STORAGE, format!("History error: {:#}", e)));
            let event_id = info.event_id.clone();
            let recorded = round_history.record_round(info, &outcome);

            // Only a fully scored round reaches disk
            if let Err(e) = history::save_history(&history_path, &round_history) {
                fail(EXIT_STORAGE, format!("History error: {:#}", e));
            }

            match recorded {
                Recorded::New(n) => eprintln!("Recorded {} as round {}", event_id, n),
                Recorded::Corrected(n) => eprintln!("Corrected round {} ({})", n, event_id),
            }
            print_round(&outcome, format);
        }
        Commands::Series { format } => {
            let round_history = history::load_history(&history_path)
                .unwrap_or_else(|e| fail(EXIT_STORAGE, format!("History error: {:#}", e)));
            let standings = round_history.standings();
            if cli.verbose {
                eprintln!(
                    "Aggregated {} rounds, {} competitors",
                    round_history.rounds.len(),
                    standings.len()
                );
            }

            match format {
                Format::Table => {
                    let use_colors = output::should_use_colors();
                    println!("{}", output::format_series_table(&standings, use_colors));
                }
                Format::Tsv => println!("{}", output::format_series_tsv(&standings)),
                Format::Json => print_json(&standings),
            }
        }
        Commands::Rounds => {
            let round_history = history::load_history(&history_path)
                .unwrap_or_else(|e| fail(EXIT_STORAGE, format!("History error: {:#}", e)));
            let use_colors = output::should_use_colors();
            println!(
                "{}",
                output::format_rounds_list(&round_history.rounds_in_order(), use_colors)
            );
        }
    }

    if cli.verbose {
        eprintln!("Done in {:?}", start_time.elapsed());
    }

    std::process::exit(EXIT_SUCCESS);
}
