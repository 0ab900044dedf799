use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use codeprint::report::{write_csv, write_pairs_json};
use codeprint::{build_matcher, load_corpus, CodeprintConfig, SymbolMode};

#[derive(Parser)]
#[command(name = "codeprint", version, about = "Flag near-duplicate source files")]
struct Cli {
    /// Files or directories to compare
    #[arg(required = true, value_name = "PATHS")]
    paths: Vec<PathBuf>,

    /// YAML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// K-gram width in tokens
    #[arg(short = 'k', long)]
    k: Option<usize>,

    /// Winnowing window width
    #[arg(short = 'w', long)]
    w: Option<usize>,

    /// Minimum score (inclusive) for two documents to be reported as similar
    #[arg(long)]
    threshold: Option<f64>,

    /// Bits kept from each k-gram hash
    #[arg(long)]
    hash_bits: Option<u32>,

    #[arg(long, value_enum)]
    symbols: Option<SymbolArg>,

    /// File extensions to pick up when walking directories
    #[arg(
        long = "ext",
        value_delimiter = ',',
        default_values_t = ["c", "cc", "cpp", "cxx", "h", "hpp"].map(String::from)
    )]
    extensions: Vec<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    /// Write the report here instead of stdout
    #[arg(long, short, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Log as JSON lines
    #[arg(long)]
    log_json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum SymbolArg {
    Digits,
    Hashes,
}

impl From<SymbolArg> for SymbolMode {
    fn from(value: SymbolArg) -> Self {
        match value {
            SymbolArg::Digits => SymbolMode::Digits,
            SymbolArg::Hashes => SymbolMode::Hashes,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One row per document followed by its similar documents
    Csv,
    /// Every pair at or above the threshold, with its score
    Json,
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_config(cli: &Cli) -> Result<CodeprintConfig> {
    let mut config = match &cli.config {
        Some(path) => CodeprintConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => CodeprintConfig::default(),
    };

    if let Some(k) = cli.k {
        config.perceptual.k = k;
    }
    if let Some(w) = cli.w {
        config.perceptual.w = w;
    }
    if let Some(bits) = cli.hash_bits {
        config.perceptual.hash_bits = bits;
    }
    if let Some(threshold) = cli.threshold {
        config.matcher.threshold = threshold;
    }
    if let Some(symbols) = cli.symbols {
        config.matcher.symbols = SymbolMode::from(symbols).as_str().to_string();
    }

    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_json);

    let config = load_config(&cli)?;
    let pipeline = config.to_pipeline_config();

    let documents = load_corpus(&cli.paths, &cli.extensions).context("loading corpus")?;
    tracing::info!(
        documents = documents.len(),
        k = pipeline.perceptual.k,
        w = pipeline.perceptual.w,
        threshold = pipeline.matcher.threshold,
        "corpus_loaded"
    );

    let matcher = build_matcher(&documents, &pipeline).context("fingerprinting corpus")?;

    let sink: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    let writer = BufWriter::new(sink);

    match cli.format {
        OutputFormat::Csv => write_csv(writer, &matcher.report()),
        OutputFormat::Json => write_pairs_json(writer, &matcher.similar_pairs()),
    }
    .context("writing report")?;

    Ok(())
}
