use std::time::Instant;

use console::style;
use vidsum_core::{
    Config, LlmSummarizer, Provider, Result, Summarizer, TranscriptSource, YtDlpTranscripts,
    extract_video_id,
};

use crate::ui::{create_spinner, format_duration, print_rule};

/// Summarize videos in-process, one after another. A failure is reported
/// and the next video is processed; returns how many failed.
pub async fn run_local(
    config: &Config,
    video_ids: &[String],
    languages: &[String],
    translate: &str,
) -> Result<usize> {
    let provider = Provider::from_config(&config.llm)?;
    // Validate API key early
    provider.api_key()?;

    let transcripts = YtDlpTranscripts::new(config.cache_dir());
    let summarizer = LlmSummarizer::new(provider);

    let mut failed = 0;
    for raw in video_ids {
        let video_id = extract_video_id(raw);
        println!(
            "\n{} {}",
            style("Processing video:").bold(),
            style(&video_id).cyan()
        );

        if let Err(e) = process_video(&transcripts, &summarizer, &video_id, languages, translate).await
        {
            failed += 1;
            println!(
                "{} Error processing {}: {}",
                style("✗").red().bold(),
                video_id,
                e
            );
        }
    }

    Ok(failed)
}

async fn process_video(
    transcripts: &YtDlpTranscripts,
    summarizer: &LlmSummarizer,
    video_id: &str,
    languages: &[String],
    translate: &str,
) -> Result<()> {
    let step_start = Instant::now();
    let spinner = create_spinner("Fetching transcript...");
    let transcript = match transcripts.fetch(video_id, languages).await {
        Ok(transcript) => transcript,
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e);
        }
    };
    spinner.finish_with_message(format!(
        "{} Transcript: {} segments, {} {}",
        style("✓").green().bold(),
        transcript.segments.len(),
        style(&transcript.language).yellow(),
        style(format!("[{}]", format_duration(step_start.elapsed()))).dim()
    ));

    print_rule();
    println!("{}", transcript.text);
    print_rule();

    let step_start = Instant::now();
    let spinner = create_spinner(&format!(
        "Generating {} summary with {} ({})...",
        translate,
        summarizer.provider().model(),
        summarizer.provider().name()
    ));
    let summary = match summarizer.summarize(&transcript.text, translate).await {
        Ok(summary) => summary,
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e);
        }
    };
    spinner.finish_with_message(format!(
        "{} Summary generated {}",
        style("✓").green().bold(),
        style(format!("[{}]", format_duration(step_start.elapsed()))).dim()
    ));

    println!("\n{}", summary);
    Ok(())
}
