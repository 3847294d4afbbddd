use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use vidsum_core::{AppState, Config, logging::init_tracing, serve};

use crate::{
    ask::{AskOptions, ask},
    pipeline::run_local,
    ui::{print_banner, print_error},
};

mod ask;
mod pipeline;
mod ui;

#[derive(Parser)]
#[command(name = "vidsum")]
#[command(version, about = "Summarize YouTube videos from their transcripts")]
struct Cli {
    /// Path to a vidsum.toml (defaults to ./vidsum.toml, then the user config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log progress details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Ask a running backend for one video's summary
    Ask(AskArgs),
    /// Run the summarize backend
    Serve {
        /// Address to bind, e.g. 127.0.0.1:8000
        #[arg(long)]
        addr: Option<String>,
    },
    /// Summarize videos in-process without a backend
    Run {
        /// One or more video ids or YouTube URLs
        #[arg(required = true)]
        video_ids: Vec<String>,

        /// Transcript languages to try, in priority order
        #[arg(short, long, num_args = 1..)]
        languages: Option<Vec<String>>,

        /// Output language for the summary
        #[arg(short, long)]
        translate: Option<String>,
    },
}

#[derive(Args)]
struct AskArgs {
    /// Video id, sent exactly as typed
    video_id: String,

    /// Space-separated transcript languages, e.g. "en es"
    #[arg(short, long)]
    languages: Option<String>,

    /// Output language for the summary
    #[arg(short, long)]
    translate: Option<String>,

    /// Backend base URL
    #[arg(long)]
    backend: Option<String>,

    /// Print the summary rendered as HTML
    #[arg(long)]
    html: bool,

    /// Also print the transcript
    #[arg(long)]
    transcript: bool,

    /// Copy the transcript to the clipboard
    #[arg(long)]
    copy: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            print_error(&e.to_string());
            std::process::exit(1);
        }
    };

    match cli.command {
        Command::Ask(args) => {
            let options = AskOptions {
                video_id: args.video_id,
                languages: args.languages.unwrap_or(config.client.languages),
                translate: args.translate.unwrap_or(config.client.translate),
                backend_url: args.backend.unwrap_or(config.client.backend_url),
                html: args.html,
                show_transcript: args.transcript,
                copy: args.copy,
            };
            if !ask(options).await? {
                std::process::exit(1);
            }
        }
        Command::Serve { addr } => {
            let state = match AppState::from_config(&config) {
                Ok(state) => state,
                Err(e) => {
                    print_error(&e.to_string());
                    std::process::exit(1);
                }
            };
            let addr = addr.unwrap_or_else(|| config.server.bind_addr.clone());
            print_banner("Summarize backend");
            println!("Listening on http://{} (Ctrl-C to stop)", addr);
            serve(state, &addr).await?;
        }
        Command::Run {
            video_ids,
            languages,
            translate,
        } => {
            let languages = languages.unwrap_or_else(|| {
                config
                    .client
                    .languages
                    .split_whitespace()
                    .map(str::to_string)
                    .collect()
            });
            let translate = translate.unwrap_or_else(|| config.client.translate.clone());

            print_banner("Video Summarizer");
            let failed = match run_local(&config, &video_ids, &languages, &translate).await {
                Ok(failed) => failed,
                Err(e) => {
                    print_error(&e.to_string());
                    std::process::exit(1);
                }
            };
            if failed > 0 {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn ask_keeps_languages_as_one_string() {
        let cli = Cli::parse_from(["vidsum", "ask", "abc123", "-l", "en es", "--copy"]);
        let Command::Ask(args) = cli.command else {
            panic!("expected ask");
        };
        assert_eq!(args.video_id, "abc123");
        assert_eq!(args.languages.as_deref(), Some("en es"));
        assert!(args.copy);
        assert!(!args.html);
    }

    #[test]
    fn run_accepts_several_ids_and_languages() {
        let cli = Cli::parse_from([
            "vidsum", "run", "a", "b", "--translate", "fr", "-l", "en", "es",
        ]);
        let Command::Run {
            video_ids,
            languages,
            translate,
        } = cli.command
        else {
            panic!("expected run");
        };
        assert_eq!(video_ids, vec!["a", "b"]);
        assert_eq!(languages, Some(vec!["en".to_string(), "es".to_string()]));
        assert_eq!(translate.as_deref(), Some("fr"));
    }
}
