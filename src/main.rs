use std::{path::PathBuf, process::ExitCode, time::Instant};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tfidf_ranker::{
    config::{self, RankerConfig},
    output::write_rankings,
    Pipeline, RecordMarkers,
};

#[derive(Parser, Debug)]
#[command(name = "tfidf-ranker", about = "Rank documents for each query by TF-IDF cosine similarity")]
struct Args {
    /// Query corpus (.I / .W records)
    #[arg(short, long)]
    queries: PathBuf,

    /// Document corpus (.I / .W records)
    #[arg(short, long)]
    documents: PathBuf,

    /// Ranking output, one "query<TAB>document<TAB>score" line per pair
    #[arg(short, long, default_value = config::DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    /// Stop word file, one word per line (default: built-in closed-class list)
    #[arg(long)]
    stop_words: Option<PathBuf>,

    /// Line prefix that starts a record
    #[arg(long, default_value = config::DEFAULT_RECORD_MARKER)]
    record_marker: String,

    /// Line prefix that starts the body text
    #[arg(long, default_value = config::DEFAULT_BODY_MARKER)]
    body_marker: String,

    /// Lowercase tokens before stop word filtering
    #[arg(long, default_value_t = false)]
    lowercase: bool,

    /// Keep at most K documents per query
    #[arg(long, value_name = "K")]
    top: Option<usize>,

    /// Worker threads (0 = one per core)
    #[arg(long, default_value_t = 0)]
    threads: usize,

    /// Also write every intermediate table as CBOR to this path
    #[arg(long)]
    dump: Option<PathBuf>,
}

impl Args {
    fn ranker_config(&self) -> RankerConfig {
        RankerConfig {
            markers: RecordMarkers {
                record: self.record_marker.clone(),
                body: self.body_marker.clone(),
            },
            stop_words_path: self.stop_words.clone(),
            lowercase: self.lowercase,
            top: self.top,
            threads: self.threads,
        }
    }
}

fn run(args: &Args) -> tfidf_ranker::Result<()> {
    let config = args.ranker_config();
    if config.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .build_global()?;
    }

    let started = Instant::now();
    let pipeline = Pipeline::from_files(&args.queries, &args.documents, &config)?;
    let records = pipeline.ranking_top(config.top);

    if let Some(dump) = &args.dump {
        pipeline.write_snapshot(dump)?;
    }
    write_rankings(&args.output, &records)?;

    tracing::info!(
        records = records.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "done"
    );
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_FILTER)),
        )
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
