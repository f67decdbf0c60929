use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

use phrasemark::coerce::normalize_question_content;
use phrasemark::reader::{InputReader, InputSource};
use phrasemark::stats::RunStats;
use phrasemark::{Annotator, SentenceBoundaryRules, SnippetDraft};

#[derive(Parser, Debug)]
#[command(name = "phrasemark")]
#[command(about = "Sentence extraction and snippet highlighting for reading views")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Sentence delimiter characters; escapes \n, \t and \\ are understood
    #[arg(long, global = true)]
    delimiters: Option<String>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// Log output format (logs go to stderr)
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Json)]
    log_format: LogFormat,

    /// Write run statistics as JSON to this path
    #[arg(long, global = true)]
    stats_out: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sentence around the first occurrence of a selection
    Extract {
        /// Text file, or - for stdin
        #[arg(long)]
        text: InputSource,
        #[arg(long)]
        selected: String,
    },
    /// Every sentence of a text
    Split {
        #[arg(long)]
        text: InputSource,
    },
    /// Snippet match spans in a text
    Highlight {
        #[arg(long)]
        text: InputSource,
        /// JSON snippet file (array or {"snippets": [...]})
        #[arg(long)]
        snippets: InputSource,
    },
    /// Sentence, spans and segments in one pass
    Annotate {
        #[arg(long)]
        text: InputSource,
        #[arg(long)]
        snippets: InputSource,
        #[arg(long)]
        selected: Option<String>,
    },
    /// Create-snippet request body for a selection
    Draft {
        #[arg(long)]
        text: InputSource,
        #[arg(long)]
        selected: String,
        #[arg(long)]
        source: String,
        #[arg(long)]
        target: String,
        #[arg(long)]
        question_id: Option<i64>,
        #[arg(long)]
        translation: Option<String>,
    },
    /// Normalize loosely typed question content JSON
    NormalizeQuestion {
        #[arg(long)]
        input: InputSource,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Json,
    Pretty,
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::Extract { .. } => "extract",
            Command::Split { .. } => "split",
            Command::Highlight { .. } => "highlight",
            Command::Annotate { .. } => "annotate",
            Command::Draft { .. } => "draft",
            Command::NormalizeQuestion { .. } => "normalize-question",
        }
    }
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
    }
}

/// Parse a delimiter list such as `.!?\n` into boundary rules
fn parse_delimiters(raw: &str) -> Result<SentenceBoundaryRules> {
    let mut delimiters = Vec::new();
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            delimiters.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => delimiters.push('\n'),
            Some('t') => delimiters.push('\t'),
            Some('r') => delimiters.push('\r'),
            Some('\\') => delimiters.push('\\'),
            Some(other) => bail!("Unknown escape \\{other} in --delimiters"),
            None => bail!("Trailing backslash in --delimiters"),
        }
    }
    if delimiters.is_empty() {
        bail!("--delimiters must name at least one character");
    }
    Ok(SentenceBoundaryRules::new(delimiters))
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{rendered}");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_format);

    info!("Starting phrasemark");
    info!(?args, "Parsed CLI arguments");

    let rules = match &args.delimiters {
        Some(raw) => parse_delimiters(raw)?,
        None => SentenceBoundaryRules::default(),
    };
    let annotator = Annotator::new(rules);
    let reader = InputReader::default();
    let command_name = args.command.name();

    let stats = match &args.command {
        Command::Extract { text, selected } => {
            let text = reader.read_text(text).await?;
            let started = Instant::now();
            let sentence = annotator.extractor().extract(&text, selected);
            let stats = RunStats::new(command_name, text.chars().count(), started.elapsed())
                .with_sentences(usize::from(sentence.is_some()));
            print_json(&json!({ "sentence": sentence }), args.pretty)?;
            stats
        }
        Command::Split { text } => {
            let text = reader.read_text(text).await?;
            let started = Instant::now();
            let sentences = annotator.extractor().split(&text);
            let stats = RunStats::new(command_name, text.chars().count(), started.elapsed())
                .with_sentences(sentences.len());
            print_json(&json!({ "sentences": sentences }), args.pretty)?;
            stats
        }
        Command::Highlight { text, snippets } => {
            let text = reader.read_text(text).await?;
            let snippets = reader.read_snippets(snippets).await?;
            info!("Loaded {} snippets", snippets.len());
            let started = Instant::now();
            let annotation = annotator.annotate(&text, None, &snippets);
            let stats = RunStats::new(command_name, annotation.chars_processed, started.elapsed())
                .with_highlight(snippets.len(), &annotation.stats);
            print_json(&json!({ "spans": annotation.spans }), args.pretty)?;
            stats
        }
        Command::Annotate { text, snippets, selected } => {
            let text = reader.read_text(text).await?;
            let snippets = reader.read_snippets(snippets).await?;
            info!("Loaded {} snippets", snippets.len());
            let started = Instant::now();
            let annotation = annotator.annotate(&text, selected.as_deref(), &snippets);
            let stats = RunStats::new(command_name, annotation.chars_processed, started.elapsed())
                .with_highlight(snippets.len(), &annotation.stats)
                .with_sentences(usize::from(annotation.sentence.is_some()));
            print_json(&annotation, args.pretty)?;
            stats
        }
        Command::Draft {
            text,
            selected,
            source,
            target,
            question_id,
            translation,
        } => {
            let text = reader.read_text(text).await?;
            let started = Instant::now();
            let mut draft = SnippetDraft::from_selection_with(
                annotator.extractor(),
                &text,
                selected,
                source,
                target,
            )?;
            if let Some(id) = question_id {
                draft = draft.with_question_id(*id);
            }
            if let Some(translation) = translation {
                draft = draft.with_translation(translation.as_str());
            }
            let stats = RunStats::new(command_name, text.chars().count(), started.elapsed())
                .with_sentences(usize::from(draft.context().is_some()));
            print_json(draft.request(), args.pretty)?;
            stats
        }
        Command::NormalizeQuestion { input } => {
            let mut value = reader.read_json(input).await?;
            let started = Instant::now();
            let content = match &mut value {
                Value::Object(question)
                    if question.get("content").is_some_and(Value::is_object) =>
                {
                    question.get_mut("content").and_then(Value::as_object_mut)
                }
                Value::Object(content) => Some(content),
                _ => None,
            }
            .with_context(|| format!("Expected a JSON object in {input}"))?;
            normalize_question_content(content);
            let stats = RunStats::new(command_name, 0, started.elapsed());
            print_json(&value, args.pretty)?;
            stats
        }
    };

    if let Some(path) = &args.stats_out {
        stats.write_to(path).await?;
        info!("Wrote run statistics to {}", path.display());
    }

    info!(command = command_name, "Command completed");
    Ok(())
}
