//! Connect Four Player - terminal client binary.
//!
//! Type a column number and press enter to drop a disc; an empty line is a
//! click outside the board.

use std::io::BufRead;
use std::sync::Arc;

use clap::Parser;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

use connect4_player::infrastructure::terminal::{TerminalBoard, TerminalLinks, TerminalNotifier};
use connect4_player::{AmbientTokens, ClickTarget, Collaborators, SessionConfig, SessionDriver};

/// Play Connect Four against a remote game server.
#[derive(Debug, Parser)]
#[command(name = "connect4-player", version)]
struct Cli {
    /// WebSocket URL of the game server (overrides CONNECT4_SERVER_URL)
    #[arg(long)]
    server: Option<String>,

    /// Page URL used to build shareable links (overrides CONNECT4_PAGE_URL)
    #[arg(long)]
    page_url: Option<String>,

    /// Join an existing game with this token
    #[arg(long)]
    join: Option<String>,

    /// Watch an existing game with this token
    #[arg(long)]
    watch: Option<String>,

    /// A shared join or watch link; its query supplies the token
    #[arg(long)]
    link: Option<Url>,
}

impl Cli {
    fn into_config(self, base: SessionConfig) -> anyhow::Result<SessionConfig> {
        let server_url = self.server.unwrap_or(base.server_url);
        let page_url = self.page_url.unwrap_or_else(|| base.page_url.to_string());

        let mut tokens = base.tokens;
        if let Some(link) = &self.link {
            tokens = tokens.merged_with(AmbientTokens::from_url(link));
        }
        tokens = tokens.merged_with(AmbientTokens::new(self.join, self.watch));

        Ok(SessionConfig::new(&server_url, &page_url, tokens)?)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    // Logs go to stderr; stdout belongs to the board
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "connect4_player=info,connect4_protocol=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Cli::parse().into_config(SessionConfig::from_env()?)?;
    tracing::info!(server = %config.server_url, "Starting Connect Four player");

    let collaborators = Collaborators {
        board: Arc::new(TerminalBoard::new()),
        links: Arc::new(TerminalLinks),
        notifier: Arc::new(TerminalNotifier),
    };

    let (intent_tx, intent_rx) = mpsc::channel(16);
    spawn_stdin_reader(intent_tx);

    let driver = SessionDriver::new(config, collaborators);
    let outcome = driver.run(intent_rx).await?;
    tracing::info!(role = %outcome.role, winner = %outcome.winner, "Session finished");

    Ok(())
}

/// Forward stdin lines as clicks.
///
/// Runs on a detached thread: a pending read must not block runtime shutdown.
fn spawn_stdin_reader(tx: mpsc::Sender<ClickTarget>) {
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            let line = line.trim();
            let target = if line.is_empty() {
                ClickTarget::outside()
            } else {
                ClickTarget::column(line)
            };
            if tx.blocking_send(target).is_err() {
                break;
            }
        }
    });
}
