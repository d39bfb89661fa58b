mod commands;

use clap::{ArgAction, Parser};
use coach::OllamaConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commands::Globals;

/// The assistant coach: semantic search, question answering, summaries,
/// topics, entities and retrieval-augmented answers for the bench.
#[derive(Parser)]
#[command(name = "coach", version, about)]
struct Cli {
    /// More logging: -v info, -vv debug, -vvv trace.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Run local models on the CPU even when CUDA is available.
    #[arg(long, global = true)]
    cpu: bool,

    /// Address of the Ollama daemon.
    #[arg(long, env = "OLLAMA_HOST", global = true)]
    ollama_host: Option<String>,

    #[command(subcommand)]
    command: commands::Command,
}

fn log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // stdout carries results only
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter(cli.verbose).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let globals = Globals {
        verbose: cli.verbose,
        cpu: cli.cpu,
        ollama: cli
            .ollama_host
            .as_deref()
            .map_or_else(OllamaConfig::default, OllamaConfig::from_host),
    };
    tracing::debug!(ollama = %globals.ollama.base_url, cpu = globals.cpu, "starting");

    commands::run(cli.command, &globals).await
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
    fn global_flags_follow_the_subcommand() {
        let cli = Cli::try_parse_from(["coach", "search", "-vv", "--cpu", "Shoot it!"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(cli.cpu);
        assert!(matches!(cli.command, commands::Command::Search(_)));
    }

    #[test]
    fn verbosity_maps_to_filters() {
        assert_eq!(log_filter(0), "warn");
        assert_eq!(log_filter(2), "debug");
        assert_eq!(log_filter(7), "trace");
    }
}
