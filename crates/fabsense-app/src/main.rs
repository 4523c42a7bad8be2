//! Fabsense application binary.
//!
//! 1. Parse CLI args and load configuration from TOML
//! 2. Initialise tracing
//! 3. Run the interactive assistant on stdin/stdout until EOF or `/quit`

mod cli;
mod command;

use std::path::{Path, PathBuf};

use clap::Parser;
use fabsense_chat::format::{render_message, render_plain};
use fabsense_chat::suggestions::suggestion;
use fabsense_chat::{ChartId, ChatError, ChatSession, Message, QuickAction, SUGGESTED_QUESTIONS};
use fabsense_core::config::FabsenseConfig;
use fabsense_core::error::Result as CoreResult;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::io::{AsyncBufReadExt, BufReader};

use cli::CliArgs;
use command::{Command, HELP};

const WELCOME: &str = "🤖 Hello! I'm your fab analytics assistant. Ask me about yield trends, \
equipment health, root causes, predictions, parameter correlations or data lineage.";

enum Event {
    Reply(Option<Message>),
    Line(std::io::Result<Option<String>>),
}

/// Terminal front end for one chat session.
struct Console {
    session: ChatSession,
    export_dir: PathBuf,
    html: bool,
}

impl Console {
    fn print_message(&self, message: &Message) {
        if self.html {
            println!("{}", render_message(message));
        } else {
            println!("{}", render_plain(message));
        }
    }

    fn print_suggestions(&self) {
        println!("Suggested questions (ask one with /suggest <n>):");
        for (i, q) in SUGGESTED_QUESTIONS.iter().enumerate() {
            println!("  {}. {}", i + 1, q);
        }
    }

    fn greet(&self) {
        println!("{}\n", WELCOME);
        if self.session.suggestions_visible() {
            self.print_suggestions();
        }
        println!("Type /help for commands.\n");
    }

    fn ask(&mut self, question: &str) {
        match self.session.send(question) {
            Ok(delay) => {
                tracing::debug!(delay_ms = delay.as_millis() as u64, "Waiting for reply");
                println!("🤖 Analyzing...");
            }
            Err(ChatError::ReplyPending) => {
                println!("⏳ Still analyzing the previous question, please wait.");
            }
            Err(ChatError::EmptyMessage) => {}
            Err(e) => tracing::warn!(error = %e, "Message not sent"),
        }
    }

    /// Handle one input line. Returns `false` when the user wants to leave.
    fn handle_line(&mut self, line: &str) -> bool {
        let Some(command) = Command::parse(line) else {
            return true;
        };
        match command {
            Command::Ask(question) => self.ask(&question),
            Command::Suggest(None) => self.print_suggestions(),
            Command::Suggest(Some(n)) => match suggestion(n) {
                Some(question) => {
                    println!("You: {}", question);
                    self.ask(question);
                }
                None => println!(
                    "There is no suggestion {}; pick 1-{}.",
                    n,
                    SUGGESTED_QUESTIONS.len()
                ),
            },
            Command::Action(label) => {
                let outcome = QuickAction::from(label.as_str()).perform();
                println!("✅ {}", outcome.message);
                if let Some(page) = outcome.navigate_to {
                    println!("↪ Navigating to {}", page);
                }
            }
            Command::Chart(id) => println!("{}", ChartId::from(id.as_str()).notice()),
            Command::Clear => {
                self.session.clear();
                self.greet();
            }
            Command::Export => match self.session.write_export(&self.export_dir) {
                Ok(path) => println!("💾 Conversation exported to {}", path.display()),
                Err(e) => {
                    tracing::error!(error = %e, "Export failed");
                    println!("Export failed: {}", e);
                }
            },
            Command::History => {
                let messages = self.session.messages();
                if messages.is_empty() {
                    println!("(no messages yet)");
                }
                for message in &messages {
                    self.print_message(message);
                }
            }
            Command::Help => println!("{}", HELP),
            Command::Quit => return false,
            Command::Invalid(hint) => println!("{} (try /help)", hint),
        }
        true
    }
}

/// Use the loaded config, or defaults when it is missing or invalid.
///
/// Called once tracing is up; `FabsenseConfig::load` itself does not log.
fn settle_config(loaded: CoreResult<FabsenseConfig>, config_file: &Path) -> FabsenseConfig {
    match loaded {
        Ok(config) => {
            tracing::info!(path = %config_file.display(), "Configuration loaded");
            config
        }
        Err(e) if config_file.exists() => {
            tracing::warn!(path = %config_file.display(), error = %e, "Invalid config, using defaults");
            FabsenseConfig::default()
        }
        Err(_) => {
            tracing::debug!(path = %config_file.display(), "No config file, using defaults");
            FabsenseConfig::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config is read before tracing so its log level applies.
    let config_file = args.resolve_config_path();
    let loaded = FabsenseConfig::load(&config_file);
    let log_level = args.resolve_log_level(
        loaded
            .as_ref()
            .map(|c| c.general.log_level.as_str())
            .unwrap_or("info"),
    );

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .init();

    tracing::info!("Starting Fabsense v{}", env!("CARGO_PKG_VERSION"));

    let config = settle_config(loaded, &config_file);

    let session = match args.seed {
        Some(seed) => ChatSession::with_rng(&config.chat, StdRng::seed_from_u64(seed)),
        None => ChatSession::new(&config.chat),
    };
    let mut console = Console {
        session,
        export_dir: args.resolve_export_dir(&config.export.dir),
        html: args.html,
    };
    console.greet();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let pending = console.session.has_pending();
        let event = tokio::select! {
            reply = console.session.wait_for_reply(), if pending => Event::Reply(reply),
            line = lines.next_line() => Event::Line(line),
        };

        match event {
            Event::Reply(Some(message)) => console.print_message(&message),
            Event::Reply(None) => {}
            Event::Line(Ok(Some(line))) => {
                if !console.handle_line(&line) {
                    break;
                }
            }
            Event::Line(Ok(None)) => {
                // Let a reply already in flight finish before leaving on EOF.
                if let Some(message) = console.session.wait_for_reply().await {
                    console.print_message(&message);
                }
                break;
            }
            Event::Line(Err(e)) => {
                tracing::error!(error = %e, "Failed to read input");
                return Err(e.into());
            }
        }
    }

    tracing::info!(session_id = %console.session.id(), "Goodbye");
    Ok(())
}
