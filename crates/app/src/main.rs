mod cli;
mod commands;
mod config;
mod input_gen;
mod output;

use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use crate::cli::Cli;
use crate::commands::execute_command;

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.debug);

    if let Err(e) = execute_command(&cli) {
        output::error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

/// Log to stderr so stdout stays clean for data. `-d` flags win over
/// `RUST_LOG`; without either only warnings are shown.
fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        3 => LevelFilter::TRACE,
        _ => {
            eprintln!("Don't be crazy, max is -d -d -d");
            LevelFilter::TRACE
        }
    };

    let filter = match EnvFilter::try_from_default_env() {
        Ok(env_filter) if verbosity == 0 => env_filter,
        _ => EnvFilter::new(level.to_string()),
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();

    match level {
        LevelFilter::INFO => tracing::info!("Debug mode: info"),
        LevelFilter::DEBUG => tracing::debug!("Debug mode: debug"),
        LevelFilter::TRACE => tracing::debug!("Debug mode: trace"),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Commands;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert()
    }

    #[test]
    fn test_parse_frames_flags() {
        let cli = Cli::try_parse_from([
            "huffviz", "-dd", "frames", "--text", "abc", "--zoom-in", "--zoom-in", "--no-delay",
        ])
        .unwrap();

        assert_eq!(cli.debug, 2);
        match cli.command {
            Commands::Frames {
                input,
                layout,
                no_delay,
                delay_ms,
            } => {
                assert_eq!(input.text.as_deref(), Some("abc"));
                assert_eq!(layout.zoom_in, 2);
                assert!(no_delay);
                assert!(delay_ms.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_text_and_file_conflict() {
        let result = Cli::try_parse_from(["huffviz", "encode", "--text", "x", "--in", "f.txt"]);
        assert!(result.is_err());
    }
}
