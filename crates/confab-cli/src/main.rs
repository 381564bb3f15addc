use clap::{Parser, Subcommand};
use confab_core::{BpeCounter, HeuristicCounter, Role, TokenCounter};
use confab_llm::{BackendConfig, CompletionBackend, OpenAiBackend};
use confab_prompt::{PromptConfig, PromptWindow};
use serde::Deserialize;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "confab", about = "confab — bounded-window chat client")]
struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "confab.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat session
    Chat,
    /// Validate the config file and print the seeded preamble
    Check,
}

#[derive(Deserialize)]
struct ConfabConfig {
    model: BackendConfig,
    #[serde(default)]
    prompt: PromptConfig,
    #[serde(default)]
    tokenizer: Tokenizer,
}

#[derive(Deserialize, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
enum Tokenizer {
    Heuristic,
    #[default]
    Bpe,
}

impl Tokenizer {
    fn counter(self) -> Box<dyn TokenCounter> {
        match self {
            Tokenizer::Heuristic => Box::new(HeuristicCounter::default()),
            Tokenizer::Bpe => Box::new(BpeCounter),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config_str = tokio::fs::read_to_string(&cli.config).await.map_err(|e| {
        anyhow::anyhow!(
            "Failed to read config file '{}': {}",
            cli.config.display(),
            e
        )
    })?;
    let config: ConfabConfig = toml::from_str(&config_str)?;

    match cli.command {
        Commands::Check => check(config),
        Commands::Chat => chat(config).await,
    }
}

fn check(config: ConfabConfig) -> anyhow::Result<()> {
    let window = PromptWindow::new(config.prompt.clone(), config.tokenizer.counter())?;
    println!("config ok");
    println!(
        "ceilings: {} messages / {} tokens",
        config.prompt.max_messages, config.prompt.max_tokens
    );
    println!("seeded preamble ({} tokens):{window}", window.token_count());
    Ok(())
}

async fn chat(config: ConfabConfig) -> anyhow::Result<()> {
    let mut window = PromptWindow::new(config.prompt, config.tokenizer.counter())?;
    let backend = OpenAiBackend::new(config.model);

    info!("chat session started; empty line or Ctrl-D to quit, `:image <url>` to send an image");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    stdout.write_all(b"> ").await?;
    stdout.flush().await?;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            break;
        }

        if let Some(url) = line.strip_prefix(":image ") {
            window.write_image(Role::Human, url.trim());
        } else {
            window.write(Role::Human, line);
        }
        match backend.complete(window.messages()).await {
            Ok(completion) => {
                println!("{}", completion.content);
                window.write(Role::Assistant, &completion.content);
                if let Some(total) = completion.total_tokens {
                    info!(
                        api_tokens = total,
                        window_tokens = window.token_count(),
                        turns = window.len(),
                        "exchange complete"
                    );
                }
            }
            Err(e) => {
                // Drop the unanswered turn so the window stays an
                // alternating human/assistant transcript.
                warn!(error = %e, "completion failed; discarding last turn");
                window.erase();
            }
        }

        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
    }

    info!("chat session ended");
    Ok(())
}
