use std::{
    fs,
    io::{self, Read, Write},
    path::PathBuf,
    process::ExitCode,
    time::Instant,
};

use clap::{Parser, ValueEnum};
use rayon::prelude::*;
use serde::Serialize;
use tf_idf_classifier::{
    loader::load_tokenized, Classification, Config, Error, Result, RuleVariant, TFIDFVectorizer,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_CORPUS_DIR: &str = "dataset";

// クエリが一つも与えられなかったときのデモ用クエリ
const DEMO_QUERIES: [&str; 5] = [
    "NASA is planning a new mission to the moon and Mars.",
    "The hockey team won the finals in overtime.",
    "This new medicine could help fight cancer cells.",
    "This new GPU can render amazing 3D graphics.",
    "The new MacBook Air with the M3 processor has two Thunderbolt ports.",
];

#[derive(Parser)]
#[command(name = "tfidf-classify", version)]
#[command(about = "Classify short texts against a labeled corpus by TF-IDF cosine similarity")]
struct Cli {
    /// Texts to classify
    queries: Vec<String>,

    /// Corpus base directory laid out as <DIR>/<category>/<file>
    #[arg(short = 'd', long, value_name = "DIR")]
    corpus: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Decision rule
    #[arg(short, long, value_enum)]
    rule: Option<RuleVariant>,

    /// Number of neighbors for the knn rule
    #[arg(short = 'k', long, value_name = "K")]
    k_neighbors: Option<usize>,

    /// Drop stopwords (English list unless configured) before weighting
    #[arg(long, overrides_with = "no_stopwords")]
    stopwords: bool,

    /// Keep every token
    #[arg(long, overrides_with = "stopwords")]
    no_stopwords: bool,

    /// Read queries from a file, one per non-empty line
    #[arg(long, value_name = "FILE")]
    queries_file: Option<PathBuf>,

    /// Read queries from standard input, one per non-empty line
    #[arg(long)]
    stdin: bool,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Serialize)]
struct QueryReport<'a> {
    query: &'a str,
    result: Classification,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // ログ出力の初期化前なので設定エラーは直接 stderr へ
    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config.log_level);

    match run(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Defaults, then the config file, then command-line flags
fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(rule) = cli.rule {
        config.rule = rule;
    }
    if let Some(k) = cli.k_neighbors {
        config.k_neighbors = k;
    }
    if cli.stopwords {
        config.enable_stopword_filtering = true;
    }
    if cli.no_stopwords {
        config.enable_stopword_filtering = false;
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(dir) = &cli.corpus {
        config.corpus_dir = Some(dir.clone());
    }
    config.validate()?;
    Ok(config)
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // 二重初期化は無視
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn run(cli: &Cli, config: &Config) -> Result<()> {
    let queries = collect_queries(cli)?;
    let corpus_dir = config
        .corpus_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CORPUS_DIR));

    let start = Instant::now();
    let tokenizer = config.tokenizer();
    let corpus = load_tokenized(&corpus_dir, &tokenizer)?;
    let vectorizer: TFIDFVectorizer = TFIDFVectorizer::new(&corpus, tokenizer);
    drop(corpus);
    info!(
        elapsed_ms = start.elapsed().as_millis() as u64,
        documents = vectorizer.doc_num(),
        "vectorizer ready"
    );

    let rule = config.decision_rule();
    let start = Instant::now();
    let results: Vec<Classification> = queries
        .par_iter()
        .map(|query| vectorizer.classify(query, &rule))
        .collect();
    debug!(
        queries = queries.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "classified queries"
    );

    let reports: Vec<QueryReport<'_>> = queries
        .iter()
        .zip(results)
        .map(|(query, result)| QueryReport { query, result })
        .collect();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.format {
        OutputFormat::Text => write_text(&mut out, &reports),
        OutputFormat::Json => write_json(&mut out, &reports),
    }
}

/// Queries from arguments, then the queries file, then stdin
/// Falls back to the demo queries when every source is empty.
fn collect_queries(cli: &Cli) -> Result<Vec<String>> {
    let mut queries = cli.queries.clone();

    if let Some(path) = &cli.queries_file {
        let content = fs::read_to_string(path).map_err(|source| Error::ReadQueries {
            origin: path.display().to_string(),
            source,
        })?;
        queries.extend(non_empty_lines(&content));
    }

    if cli.stdin {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .map_err(|source| Error::ReadQueries {
                origin: "stdin".to_string(),
                source,
            })?;
        queries.extend(non_empty_lines(&content));
    }

    if queries.is_empty() {
        debug!("no queries given, using demo queries");
        queries = DEMO_QUERIES.iter().map(|q| q.to_string()).collect();
    }
    Ok(queries)
}

fn non_empty_lines(content: &str) -> impl Iterator<Item = String> + '_ {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
}

fn write_text<W: Write>(out: &mut W, reports: &[QueryReport<'_>]) -> Result<()> {
    for (i, report) in reports.iter().enumerate() {
        writeln!(
            out,
            "--- Query #{} ---\nText: '{}'\n{}\n",
            i + 1,
            report.query,
            report.result
        )
        .map_err(Error::WriteReport)?;
    }
    out.flush().map_err(Error::WriteReport)
}

fn write_json<W: Write>(out: &mut W, reports: &[QueryReport<'_>]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, reports).map_err(Error::SerializeReport)?;
    writeln!(out).map_err(Error::WriteReport)?;
    out.flush().map_err(Error::WriteReport)
}
