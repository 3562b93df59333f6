use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::AsyncBufReadExt;
use tracing::info;
use uuid::Uuid;

use courtbot::bot::Bot;
use courtbot::config::Config;
use courtbot::transport::{ConsoleTransport, Event};

/// Courtbot - court information chat service over a console transport
#[derive(Parser, Debug)]
#[command(name = "courtbot", version, about)]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the JSON collections
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    /// Path to the localized message table
    #[arg(short, long)]
    messages: Option<PathBuf>,

    /// User id the console session acts as
    #[arg(short, long, default_value_t = 1)]
    user_id: i64,
}

/// Map one console line to an inbound event: `/word` is a command,
/// `@payload` simulates a button press, anything else is plain text.
fn parse_console_line(user_id: i64, line: &str) -> Event {
    if let Some(rest) = line.strip_prefix('/') {
        let mut parts = rest.split_whitespace();
        let name = parts.next().unwrap_or_default().to_string();
        let args = parts.map(str::to_string).collect();
        Event::Command {
            name,
            user_id,
            args,
        }
    } else if let Some(payload) = line.strip_prefix('@') {
        Event::Callback {
            user_id,
            callback_id: Uuid::new_v4().to_string(),
            payload: payload.to_string(),
        }
    } else {
        Event::Text {
            user_id,
            text: line.to_string(),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => {
            let mut config = Config::default_for_data_dir(args.data_dir.clone());
            config.messages_file = args.messages.clone();
            config
        }
    };

    info!(
        data_dir = %config.data_dir.display(),
        user_id = args.user_id,
        "courtbot starting"
    );

    let bot = Bot::new(&config, Arc::new(ConsoleTransport))?;

    info!("ready, reading events from stdin (/start to begin)");

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        bot.handle_event(parse_console_line(args.user_id, line)).await;
    }

    Ok(())
}
