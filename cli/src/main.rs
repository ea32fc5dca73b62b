use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};
use vsm_core::persist::{load_index, save_index};
use vsm_core::{answer, IndexBuilder, Tokenizer};
use walkdir::WalkDir;

use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct InputDoc {
    id: String,
    #[serde(default)]
    title: Option<String>,
    body: String,
}

#[derive(Parser)]
#[command(name = "vsm")]
#[command(about = "Build and query a TF-IDF vector-space index", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build an index from a corpus file or directory
    Build {
        /// Input path: a file or a directory of .json/.jsonl/.txt documents
        #[arg(long)]
        input: String,
        /// Output index file (JSON)
        #[arg(long)]
        output: String,
    },
    /// Rank documents against a free-text query
    Query {
        /// Path to a persisted index
        #[arg(long)]
        index: String,
        /// Free-text query
        #[arg(long)]
        query: String,
        /// Write ranked document ids here instead of stdout, one per line
        #[arg(long)]
        output: Option<String>,
        /// Keep only the top K results
        #[arg(long)]
        limit: Option<usize>,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, output } => build(&input, &output),
        Commands::Query { index, query, output, limit } => {
            run_query(&index, &query, output.as_deref(), limit)
        }
    }
}

fn build(input: &str, output: &str) -> Result<()> {
    let input_path = Path::new(input);
    let tokenizer = Tokenizer::default();
    let mut builder = IndexBuilder::new();

    let mut files: Vec<PathBuf> = Vec::new();
    if input_path.is_dir() {
        for entry in WalkDir::new(input_path).into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() {
                if let Some(ext) = p.extension().and_then(|s| s.to_str()) {
                    if matches!(ext, "json" | "jsonl" | "txt") {
                        files.push(p.to_path_buf());
                    }
                }
            }
        }
    } else if input_path.is_file() {
        files.push(input_path.to_path_buf());
    } else {
        bail!("input path {input} does not exist");
    }
    // Stable ingestion order across runs.
    files.sort();

    for file in &files {
        match file.extension().and_then(|s| s.to_str()) {
            Some("jsonl") => ingest_jsonl(file, &tokenizer, &mut builder)?,
            Some("txt") => ingest_txt(file, &tokenizer, &mut builder)?,
            _ => ingest_json(file, &tokenizer, &mut builder)?,
        }
    }

    let index = builder.finalize().context("finalizing index")?;
    tracing::info!(
        num_documents = index.num_documents,
        num_terms = index.idf.len(),
        "built index"
    );

    save_index(Path::new(output), &index).context("persisting index")?;
    tracing::info!(output, "index build complete");
    Ok(())
}

fn ingest_jsonl(file: &Path, tokenizer: &Tokenizer, builder: &mut IndexBuilder) -> Result<()> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let reader = BufReader::new(f);
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let doc: InputDoc = serde_json::from_str(&line)
            .with_context(|| format!("parsing document in {}", file.display()))?;
        ingest_doc(doc, tokenizer, builder);
    }
    Ok(())
}

fn ingest_json(file: &Path, tokenizer: &Tokenizer, builder: &mut IndexBuilder) -> Result<()> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let reader = BufReader::new(f);
    let json: serde_json::Value = serde_json::from_reader(reader)
        .with_context(|| format!("parsing {}", file.display()))?;
    match json {
        serde_json::Value::Array(arr) => {
            for v in arr {
                let doc: InputDoc = serde_json::from_value(v)
                    .with_context(|| format!("parsing document in {}", file.display()))?;
                ingest_doc(doc, tokenizer, builder);
            }
        }
        serde_json::Value::Object(_) => {
            let doc: InputDoc = serde_json::from_value(json)
                .with_context(|| format!("parsing document in {}", file.display()))?;
            ingest_doc(doc, tokenizer, builder);
        }
        _ => bail!("{} is neither a document nor an array of documents", file.display()),
    }
    Ok(())
}

fn ingest_txt(file: &Path, tokenizer: &Tokenizer, builder: &mut IndexBuilder) -> Result<()> {
    let text = fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    let doc_id = file
        .file_stem()
        .and_then(|s| s.to_str())
        .with_context(|| format!("{} has no usable file stem", file.display()))?;
    builder.ingest(doc_id, &tokenizer.tokenize(&text));
    Ok(())
}

fn ingest_doc(doc: InputDoc, tokenizer: &Tokenizer, builder: &mut IndexBuilder) {
    // Title and body belong to the same document, so they must be ingested
    // together: the per-document maximum occurrence count spans both.
    let mut tokens = match &doc.title {
        Some(title) => tokenizer.tokenize(title),
        None => Vec::new(),
    };
    tokens.extend(tokenizer.tokenize(&doc.body));
    builder.ingest(&doc.id, &tokens);
}

fn run_query(index_path: &str, query: &str, output: Option<&str>, limit: Option<usize>) -> Result<()> {
    let index = load_index(Path::new(index_path))
        .with_context(|| format!("loading index from {index_path}"))?;

    let tokenizer = Tokenizer::default();
    let tokens = tokenizer.tokenize(query);
    let mut ranked = answer(&index, &tokens).context("answering query")?;
    if let Some(k) = limit {
        ranked.truncate(k);
    }
    tracing::info!(hits = ranked.len(), "query answered");

    match output {
        Some(path) => {
            let mut out = File::create(path).with_context(|| format!("creating {path}"))?;
            for hit in &ranked {
                writeln!(out, "{}", hit.doc_id)?;
            }
        }
        None => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            for hit in &ranked {
                writeln!(out, "{}", hit.doc_id)?;
            }
        }
    }
    Ok(())
}
