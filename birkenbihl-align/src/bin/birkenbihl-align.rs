use birkenbihl_align::{
    GridState, load_merged_from_file, load_sentences_from_file, redistribute, validate_sentence,
};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use std::process;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("birkenbihl-align")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Validate, inspect and redistribute Birkenbihl word alignments")
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log debug output to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("validate")
                .about("Check that every sentence's alignment uses all natural translation words")
                .arg(
                    Arg::new("sentences")
                        .help("JSON file with one sentence or a list of sentences")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("redistribute")
                .about("Split a merged multi-sentence response into one sentence per source")
                .arg(
                    Arg::new("merged")
                        .help("JSON file with the merged translation")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("sources")
                        .help("Source sentences, in order")
                        .required(true)
                        .num_args(1..),
                ),
        )
        .subcommand(
            Command::new("grid")
                .about("Print the column grid of a sentence")
                .arg(
                    Arg::new("sentence")
                        .help("JSON file with a single sentence")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = cli().get_matches();

    let rust_log = std::env::var("RUST_LOG").ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(matches.get_flag("verbose"), rust_log.as_deref())?)
        .with_writer(std::io::stderr)
        .init();

    let ok = match matches.subcommand() {
        Some(("validate", sub)) => run_validate(sub)?,
        Some(("redistribute", sub)) => run_redistribute(sub)?,
        Some(("grid", sub)) => run_grid(sub)?,
        _ => unreachable!("subcommand is required"),
    };

    if !ok {
        process::exit(1);
    }
    Ok(())
}

/// `RUST_LOG` when set, `info` otherwise; `--verbose` raises the global level to `debug`
fn log_filter(verbose: bool, rust_log: Option<&str>) -> Result<EnvFilter, Box<dyn std::error::Error>> {
    let filter = match rust_log {
        Some(directives) if !directives.trim().is_empty() => EnvFilter::try_new(directives)?,
        _ => EnvFilter::new("info"),
    };
    if verbose {
        Ok(filter.add_directive("debug".parse()?))
    } else {
        Ok(filter)
    }
}

fn path_arg<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a PathBuf, String> {
    matches
        .get_one::<PathBuf>(name)
        .ok_or_else(|| format!("missing argument <{}>", name))
}

/// Prints one line per sentence; returns `false` if any failed
fn run_validate(matches: &ArgMatches) -> Result<bool, Box<dyn std::error::Error>> {
    let path = path_arg(matches, "sentences")?;
    let sentences = load_sentences_from_file(path)?;
    info!(count = sentences.len(), path = %path.display(), "validating sentences");

    let mut all_valid = true;
    for (idx, sentence) in sentences.iter().enumerate() {
        match validate_sentence(sentence) {
            Ok(()) => println!("[{}] ok", idx),
            Err(e) => {
                all_valid = false;
                println!("[{}] {}", idx, e);
            }
        }
    }
    Ok(all_valid)
}

fn run_redistribute(matches: &ArgMatches) -> Result<bool, Box<dyn std::error::Error>> {
    let merged = load_merged_from_file(path_arg(matches, "merged")?)?;
    let sources: Vec<String> = matches
        .get_many::<String>("sources")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    debug!(sources = sources.len(), "redistributing merged translation");

    match redistribute(&merged, &sources) {
        Ok(sentences) => {
            println!("{}", serde_json::to_string_pretty(&sentences)?);
            Ok(true)
        }
        Err(e) => {
            eprintln!("{}", e);
            Ok(false)
        }
    }
}

fn run_grid(matches: &ArgMatches) -> Result<bool, Box<dyn std::error::Error>> {
    let path = path_arg(matches, "sentence")?;
    let sentences = load_sentences_from_file(path)?;
    let [sentence] = sentences.as_slice() else {
        return Err(format!("expected exactly one sentence, found {}", sentences.len()).into());
    };

    let grid = GridState::build(sentence);
    let output = serde_json::json!({
        "grid": grid,
        "valid": grid.is_valid(),
        "error_columns": grid.get_error_columns(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(true)
}
