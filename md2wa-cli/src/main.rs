//! Command-line interface for md2wa
//! Converts Markdown (typically an LLM answer) into text that pastes cleanly into WhatsApp.
//!
//! Usage:
//!   md2wa [`<path>`] [--format text|json] [--words] [--trace]   - Convert a file (or stdin)
//!   md2wa [`<path>`] --share                                    - Print a wa.me share link
//!   md2wa --list-rules                                         - List the rewrite rules in order

mod output;
mod share;

use clap::{Arg, ArgAction, ArgMatches, Command};
use md2wa_config::{Loader, Md2waConfig};
use md2wa_core::whatsapp::loader::{LoaderError, SourceLoader};
use md2wa_core::whatsapp::rules::RuleSet;
use md2wa_core::WordBudget;
use output::{Report, AVAILABLE_FORMATS};
use std::fmt;

/// Anything that stops the CLI from producing output
#[derive(Debug)]
enum CliError {
    Config(md2wa_config::Error),
    Load(LoaderError),
    Render(String),
    EmptyOutput,
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(err) => write!(f, "Configuration error: {}", err),
            CliError::Load(err) => write!(f, "{}", err),
            CliError::Render(msg) => write!(f, "{}", msg),
            CliError::EmptyOutput => write!(f, "Nothing to share: output is empty"),
        }
    }
}

impl From<md2wa_config::Error> for CliError {
    fn from(err: md2wa_config::Error) -> Self {
        CliError::Config(err)
    }
}

impl From<LoaderError> for CliError {
    fn from(err: LoaderError) -> Self {
        CliError::Load(err)
    }
}

fn cli() -> Command {
    Command::new("md2wa")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert Markdown into WhatsApp-ready text")
        .arg(
            Arg::new("path")
                .help("Markdown file to convert ('-' or omitted reads stdin)")
                .index(1),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format")
                .value_parser(AVAILABLE_FORMATS.to_vec())
                .default_value("text"),
        )
        .arg(
            Arg::new("words")
                .long("words")
                .short('w')
                .help("Report the input word count and budget on stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("share")
                .long("share")
                .short('s')
                .help("Print a WhatsApp share link instead of the text")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("trace")
                .long("trace")
                .short('t')
                .help("Report every rule that changed the text on stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-rules")
                .long("list-rules")
                .help("List the rewrite rules in execution order")
                .action(ArgAction::SetTrue),
        )
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = cli().get_matches();

    if matches.get_flag("list-rules") {
        handle_list_rules_command();
        return;
    }

    if let Err(err) = handle_convert_command(&matches) {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn load_config(path: Option<&String>) -> Result<Md2waConfig, CliError> {
    let loader = match path {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new(),
    };
    Ok(loader.build()?)
}

/// Handle the convert command
fn handle_convert_command(matches: &ArgMatches) -> Result<(), CliError> {
    let config = load_config(matches.get_one::<String>("config"))?;

    let loader = match matches.get_one::<String>("path").map(String::as_str) {
        Some("-") | None => SourceLoader::from_stdin()?,
        Some(path) => SourceLoader::from_path(path)?,
    };

    let text = if matches.get_flag("trace") {
        let (text, hits) = loader.trace();
        for hit in hits {
            eprintln!("{:<17} {:<24} {}", hit.group, hit.name, hit.rewrites);
        }
        text
    } else {
        loader.convert()
    };

    let words = loader.word_count();
    let budget = WordBudget::classify(words, &config.words.limits());
    if budget != WordBudget::Within {
        log::warn!(
            "input has {} words, past the {} threshold",
            words,
            match budget {
                WordBudget::Over => config.words.limit,
                _ => config.words.warn_at,
            }
        );
    }
    if matches.get_flag("words") {
        eprintln!("{} words ({})", words, budget);
    }

    if matches.get_flag("share") {
        let url = share::share_url(&text, &config.share.base_url).ok_or(CliError::EmptyOutput)?;
        println!("{}", url);
        return Ok(());
    }

    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("text");
    let report = Report::new(&text, words, budget);
    let rendered = output::render(&report, format, config.output.trailing_newline)
        .map_err(CliError::Render)?;
    print!("{}", rendered);
    Ok(())
}

/// Handle the list-rules command
fn handle_list_rules_command() {
    for rule in RuleSet::standard().iter() {
        println!("{:<17} {}", rule.group(), rule.name());
    }
}
