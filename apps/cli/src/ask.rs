use std::sync::Arc;

use anyhow::Result;
use console::style;
use vidsum_core::{
    CopyOutcome, HtmlRenderer, HttpApi, SummaryViewModel, SystemClipboard, ViewState,
};

use crate::ui::{ConsoleNotifier, create_spinner, print_error, print_rule};

pub struct AskOptions {
    pub video_id: String,
    pub languages: String,
    pub translate: String,
    pub backend_url: String,
    pub html: bool,
    pub show_transcript: bool,
    pub copy: bool,
}

/// Drive the view-model once against a backend; returns false when it ended in an error
pub async fn ask(options: AskOptions) -> Result<bool> {
    let api = HttpApi::new(&options.backend_url);
    tracing::info!(endpoint = api.endpoint(), "using backend");

    let vm = SummaryViewModel::with_state(
        ViewState {
            video_id: options.video_id,
            languages: options.languages,
            translate: options.translate,
            ..ViewState::default()
        },
        Arc::new(api),
        Arc::new(HtmlRenderer),
        Arc::new(SystemClipboard::new()),
        Arc::new(ConsoleNotifier),
    );

    summarize_with_spinner(&vm).await;

    let state = vm.snapshot();
    if let Some(summary) = summary_output(&state, options.html, || vm.parsed_summary()) {
        println!("{}", summary);
    }
    if !state.error.is_empty() {
        print_error(&state.error);
        return Ok(false);
    }

    if options.show_transcript {
        print_rule();
        println!("{}\n", style("Transcript").bold());
        println!("{}", state.transcript);
    }

    if options.copy && vm.copy_transcript().await == CopyOutcome::Failed {
        return Ok(false);
    }

    Ok(true)
}

/// Text to print for the summary. A result may carry both a summary and an
/// error; an empty summary is skipped only when an error is shown instead.
fn summary_output(state: &ViewState, html: bool, render: impl FnOnce() -> String) -> Option<String> {
    if state.summary.is_empty() && !state.error.is_empty() {
        return None;
    }
    if html {
        Some(render())
    } else {
        Some(state.summary.clone())
    }
}

/// Run `summarize`, showing a spinner while the view-model reports loading
async fn summarize_with_spinner(vm: &SummaryViewModel) {
    let mut rx = vm.subscribe();
    let summarize = vm.summarize();
    tokio::pin!(summarize);

    let mut spinner = None;
    loop {
        tokio::select! {
            _ = &mut summarize => break,
            changed = rx.changed() => {
                if changed.is_err() {
                    summarize.as_mut().await;
                    break;
                }
                let loading = rx.borrow_and_update().loading;
                if loading && spinner.is_none() {
                    spinner = Some(create_spinner("Summarizing..."));
                }
            }
        }
    }

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(summary: &str, error: &str) -> ViewState {
        ViewState {
            summary: summary.to_string(),
            error: error.to_string(),
            ..ViewState::default()
        }
    }

    #[test]
    fn summary_is_printed_alongside_an_error() {
        let output = summary_output(&state("S", "E"), false, || unreachable!());
        assert_eq!(output.as_deref(), Some("S"));
    }

    #[test]
    fn html_summary_is_printed_alongside_an_error() {
        let output = summary_output(&state("# S", "E"), true, || "<h1>S</h1>".to_string());
        assert_eq!(output.as_deref(), Some("<h1>S</h1>"));
    }

    #[test]
    fn empty_summary_is_skipped_when_an_error_is_shown() {
        assert_eq!(summary_output(&state("", "E"), false, String::new), None);
    }

    #[test]
    fn empty_summary_without_error_still_prints() {
        assert_eq!(
            summary_output(&state("", ""), false, String::new).as_deref(),
            Some("")
        );
    }
}
