use clap::Parser;
use regtext::analysis::{Analyzer, SizePolicy};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, clap::Parser)]
struct CommandLine {
    /// XML documents to analyse; one JSON line per document on stdout
    input_files: Vec<PathBuf>,

    /// Reject documents larger than this many bytes
    #[arg(long)]
    max_bytes: Option<usize>,

    /// Cut extracted text into fragments of roughly this many bytes
    #[arg(long)]
    fragment_threshold: Option<usize>,
}

#[derive(serde::Serialize)]
struct DocumentReport<'a> {
    document: String,
    #[serde(flatten)]
    result: &'a regtext::analysis::AnalysisResult,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: CommandLine = CommandLine::parse();

    let mut analyzer = Analyzer::new();
    if let Some(max_bytes) = args.max_bytes {
        analyzer = analyzer.with_size_policy(SizePolicy { max_bytes });
    }
    if let Some(fragment_threshold) = args.fragment_threshold {
        analyzer = analyzer.with_fragment_threshold(fragment_threshold);
    }

    // a single document's failure never aborts the batch
    let mut skipped = 0usize;
    for path in &args.input_files {
        let xml = match std::fs::read_to_string(path) {
            Ok(xml) => xml,
            Err(error) => {
                tracing::warn!(
                    message = "Skipping unreadable document",
                    path = %path.display(),
                    error = %error
                );
                skipped += 1;
                continue;
            }
        };

        match analyzer.analyse_document(&xml) {
            Ok(result) => {
                let report = DocumentReport {
                    document: path.display().to_string(),
                    result: &result,
                };
                match serde_json::to_string(&report) {
                    Ok(line) => println!("{line}"),
                    Err(error) => {
                        tracing::error!(
                            message = "Failed to serialize report",
                            path = %path.display(),
                            error = %error
                        );
                        skipped += 1;
                    }
                }
            }
            Err(error) => {
                tracing::warn!(
                    message = "Skipping document",
                    path = %path.display(),
                    error = %error
                );
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        tracing::warn!(skipped, total = args.input_files.len());
        std::process::exit(1);
    }
}
