use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use complaint_analyser::{format_confidence, Analyser, ArtifactStore};
use log::info;

const EMPTY_INPUT_WARNING: &str = "Please enter a complaint to analyse.";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory containing the vectorizer and classifier artifacts
    #[arg(short, long, default_value = ".")]
    artifacts: PathBuf,
}

fn main() -> anyhow::Result<()> {
    complaint_analyser::init_logger();
    let args = Args::parse();

    // Artifact loading happens once, before any input is accepted. Either
    // failure kind (missing or corrupt artifact) halts startup here.
    let store = ArtifactStore::new(&args.artifacts);
    let vectorizer = store
        .load_vectorizer()
        .context("Failed to load the vectorizer artifact")?;
    let model = store
        .load_classifier()
        .context("Failed to load the classifier artifact")?;
    let analyser = Analyser::new(Arc::new(vectorizer), Arc::new(model))
        .context("The loaded artifacts are inconsistent")?;

    let artifact_info = analyser.info();
    info!(
        "Model and vectorizer loaded successfully: {} categories, {} vocabulary terms",
        artifact_info.num_classes, artifact_info.vocabulary_size
    );

    println!("Complaint Analyser");
    println!("==================");
    println!("Uses a Machine Learning model to analyse customer complaints");
    println!("and predict the product category.");
    println!();

    run_prompt_loop(&analyser)
}

fn run_prompt_loop(analyser: &Analyser) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!("Enter your complaint text (submit with an empty line, 'quit' to exit):");
        print!("> ");
        io::stdout().flush()?;

        let submission = match read_submission(&mut lines)? {
            Some(text) => text,
            None => break,
        };
        if submission.trim().eq_ignore_ascii_case("quit") {
            break;
        }

        process_submission(analyser, &submission)?;
        println!();
    }

    Ok(())
}

/// Reads consecutive lines until a blank line submits them as one
/// complaint. Returns `None` on end of input with nothing collected.
fn read_submission(
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> anyhow::Result<Option<String>> {
    let mut collected: Vec<String> = Vec::new();
    loop {
        match lines.next() {
            Some(line) => {
                let line = line?;
                if line.trim().is_empty() {
                    break;
                }
                collected.push(line);
            }
            None => {
                if collected.is_empty() {
                    return Ok(None);
                }
                break;
            }
        }
    }
    Ok(Some(collected.join("\n")))
}

fn process_submission(analyser: &Analyser, text: &str) -> anyhow::Result<()> {
    if text.trim().is_empty() {
        println!("Warning: {}", EMPTY_INPUT_WARNING);
        return Ok(());
    }

    // Inference-time failures propagate out of the loop unhandled.
    let prediction = analyser.analyse(text)?;

    println!();
    println!("Analysis result:");
    println!("  Predicted Category: {}", prediction.category);
    println!(
        "  Confidence Score: {}",
        format_confidence(prediction.confidence)
    );
    Ok(())
}
