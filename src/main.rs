use std::error::Error;
use std::fs::{self, File};
use std::io::BufReader;
use std::process::ExitCode;

use sentgraph::{import_sentences, init_tracing, Pipeline, SentgraphConfig};

const USAGE: &str = "usage: sentgraph <config.yaml> [import <corpus> <sentences.tsv>]";

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() || args.iter().any(|a| a == "-h" || a == "--help") {
        eprintln!("{USAGE}");
        return if args.is_empty() {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        };
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            let mut source = err.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<(), Box<dyn Error>> {
    let cfg = SentgraphConfig::from_file(&args[0])?;
    init_tracing(&cfg.logging);

    match &args[1..] {
        [] => run_all(&cfg),
        [cmd, corpus, path] if cmd == "import" => import(&cfg, corpus, path),
        _ => Err(USAGE.into()),
    }
}

fn import(cfg: &SentgraphConfig, corpus: &str, path: &str) -> Result<(), Box<dyn Error>> {
    if !cfg.corpora.iter().any(|c| c == corpus) {
        return Err(format!("corpus {corpus:?} is not listed in the configuration").into());
    }
    ensure_store_directory(cfg)?;
    let store = cfg.store.store_config(corpus).build()?;
    let reader = BufReader::new(File::open(path)?);
    let written = import_sentences(store.as_ref(), reader)?;
    println!("Imported {written} sentences into {corpus}");
    Ok(())
}

fn run_all(cfg: &SentgraphConfig) -> Result<(), Box<dyn Error>> {
    ensure_store_directory(cfg)?;
    let pipeline = Pipeline::from_config(cfg)?;

    for corpus in &cfg.corpora {
        let store = cfg.store.store_config(corpus).build()?;
        let report = pipeline.run_corpus(corpus, store.as_ref())?;

        println!("== {corpus}");
        if report.nothing_to_do {
            println!("There is nothing to do.");
            continue;
        }
        if let Some(band) = report.confidence_band {
            println!(
                "Confidence band: [{}, {}] around {} ({} words)",
                band.lower, band.upper, band.seed, band.selected
            );
        }
        if let Some(matrix) = &report.matrix {
            println!("{matrix}");
        }
    }
    Ok(())
}

fn ensure_store_directory(cfg: &SentgraphConfig) -> std::io::Result<()> {
    if cfg.store.backend == sentgraph::config::StoreBackend::Redb {
        fs::create_dir_all(&cfg.store.directory)?;
    }
    Ok(())
}
