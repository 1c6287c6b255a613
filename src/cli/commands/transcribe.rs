//! Transcribe command implementation.

use crate::cli::{preflight, Output};
use crate::config::Settings;
use crate::media::MediaSource;
use crate::pipeline::{Pipeline, RunOutcome};
use anyhow::{Context, Result};

/// Run the transcribe command.
pub async fn run_transcribe(
    input: &str,
    device: &str,
    output: Option<String>,
    settings: Settings,
) -> Result<()> {
    // Pre-flight checks
    if let Err(e) = preflight::check(&settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'talt doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let source = MediaSource::from_input(input)
        .with_context(|| format!("could not read input: {}", input))?;

    let pipeline = Pipeline::new(&settings)?;

    Output::info(&format!("Processing: {}", input));
    let spinner = Output::spinner("Transcribing...");
    let outcome = pipeline.run(source, device).await;
    spinner.finish_and_clear();

    match outcome {
        RunOutcome::Completed { text } => {
            match output {
                Some(path) => {
                    std::fs::write(&path, &text)
                        .with_context(|| format!("could not write {}", path))?;
                    Output::success(&format!("Transcript saved to {}", path));
                }
                None => {
                    if text.is_empty() {
                        Output::warning("Transcription finished with empty text.");
                    } else {
                        println!("{}", text);
                    }
                }
            }
            Ok(())
        }
        RunOutcome::Failed { stage, message } => {
            Output::error(&format!("Stage '{}' failed: {}", stage, message));
            Err(anyhow::anyhow!("transcription failed during {}", stage))
        }
    }
}
