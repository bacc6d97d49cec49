//! 🛍️ storebot CLI — interactive chat, one-shot questions and a JSON pipe.
//!
//! Usage:
//!   storebot chat            — Start an interactive chat session
//!   storebot ask "<message>" — Answer a single message
//!   storebot classify "<m>"  — Print the intent a message resolves to
//!   storebot pipe            — Answer JSON chat requests line by line on stdin
//!   storebot status          — Show configuration and rule table
//!   storebot onboard         — Create a default configuration

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde_json::json;
use std::io::{self, BufRead, Write};

use storebot_core::config::Config;
use storebot_core::gateway::{ChatGateway, ChatRequest, ChatResponse};
use storebot_core::intent::{Action, ChatContext, Responder};

#[derive(Parser)]
#[command(
    name = "storebot",
    version,
    about = "A rule-based shopping assistant",
    long_about = "🛍️ storebot — keyword-driven shopping assistant for the Polashtoli storefront.\n\nNo model, no network. Same message, same answer."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat session
    Chat {
        /// Session name (default: "default")
        #[arg(short, long, default_value = "default")]
        session: String,

        /// Number of items to pretend are in the cart
        #[arg(long, default_value_t = 0)]
        cart: usize,
    },

    /// Answer a single message
    Ask {
        /// Customer message
        message: String,

        /// Session to log the exchange under
        #[arg(short, long)]
        session: Option<String>,

        /// Number of items to pretend are in the cart
        #[arg(long, default_value_t = 0)]
        cart: usize,

        /// Print the raw JSON response
        #[arg(long)]
        json: bool,
    },

    /// Print the intent a message resolves to
    Classify {
        /// Customer message
        message: String,
    },

    /// Read chat requests as JSON lines on stdin, write responses to stdout
    Pipe,

    /// Show configuration status and the rule table
    Status,

    /// Create or reset the default configuration
    Onboard,
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level)),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Chat { session, cart }) => cmd_chat(&config, &session, cart).await?,
        Some(Commands::Ask {
            message,
            session,
            cart,
            json,
        }) => cmd_ask(&config, message, session, cart, json).await?,
        Some(Commands::Classify { message }) => cmd_classify(&message),
        Some(Commands::Pipe) => cmd_pipe(&config).await?,
        Some(Commands::Status) => cmd_status(&config)?,
        Some(Commands::Onboard) => cmd_onboard()?,
        None => cmd_chat(&config, "default", 0).await?,
    }

    Ok(())
}

// ── Shared Setup ────────────────────────────────────────────────────

fn validate_config(config: &Config) -> Result<()> {
    if let Err(errors) = config.validate() {
        eprintln!("\n  \x1b[31m❌ Configuration errors:\x1b[0m");
        for e in &errors {
            eprintln!("     • {}", e);
        }
        eprintln!();
        anyhow::bail!("Fix the above {} error(s) in the config file", errors.len());
    }
    Ok(())
}

/// Context holding `items` placeholder cart entries, or none for an empty cart.
fn cart_context(items: usize) -> Option<ChatContext> {
    if items == 0 {
        return None;
    }
    Some(ChatContext::with_cart((0..items).map(|i| json!({ "item": i + 1 }))))
}

/// Argument of a `/cart` command, or `None` when `input` is not one.
///
/// The command word must stand alone, so `/cartoon` is ordinary input.
fn cart_command(input: &str) -> Option<&str> {
    let rest = input.strip_prefix("/cart")?;
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest.trim())
    } else {
        None
    }
}

fn print_response(response: &ChatResponse) {
    println!("  \x1b[32m{}\x1b[0m", response.response);
    match &response.action {
        Some(Action::Navigate { url }) => println!("  → open {}", url),
        Some(Action::Search { query }) => println!("  → search \"{}\"", query),
        None => {}
    }
    if let Some(ref suggestions) = response.suggestions {
        for (i, s) in suggestions.iter().enumerate() {
            println!("    {}. {}", i + 1, s);
        }
    }
    println!();
}

// ── Chat Command ────────────────────────────────────────────────────

async fn cmd_chat(config: &Config, session_key: &str, cart: usize) -> Result<()> {
    validate_config(config)?;

    let gateway = ChatGateway::in_memory(config);
    let mut cart_items = cart;

    // Print header
    println!();
    println!("  🛍️ storebot v{}", env!("CARGO_PKG_VERSION"));
    println!("  {} | Session: {}", config.service.name, session_key);
    println!();
    println!("  Type your message, or /quit to exit.");
    println!("  Commands: /stats, /history, /cart <n>");
    println!("  ─────────────────────────────────────");
    println!();

    // Interactive loop
    let stdin = io::stdin();
    loop {
        print!("  \x1b[36m>\x1b[0m ");
        io::stdout().flush()?;

        let mut input = String::new();
        if stdin.read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        // Handle commands
        match input {
            "/quit" | "/exit" | "/q" => {
                println!("  Goodbye! 👋");
                break;
            }
            "/stats" => {
                let stats = gateway.stats().await;
                println!(
                    "  Sessions: {} | Messages: {}",
                    stats.active_sessions, stats.total_messages
                );
                for key in gateway.session_keys().await {
                    println!("    • {}", key);
                }
                println!();
                continue;
            }
            "/history" => {
                let history = gateway.history(session_key).await;
                let skip = history.len().saturating_sub(config.sessions.history_limit);
                for entry in &history[skip..] {
                    println!("  [{}] you: {}", entry.timestamp, entry.user_message);
                    println!("  {:>28} bot: {}", "", entry.bot_response);
                }
                println!();
                continue;
            }
            _ => {}
        }

        if let Some(arg) = cart_command(input) {
            match arg.parse::<usize>() {
                Ok(n) => {
                    cart_items = n;
                    println!("  Cart now holds {} item(s).\n", n);
                }
                Err(_) => eprintln!("  \x1b[31mUsage: /cart <n>\x1b[0m\n"),
            }
            continue;
        }

        let mut request = ChatRequest::new(input).with_session(session_key);
        request.context = cart_context(cart_items);

        print!("\n");
        match gateway.handle_chat(request).await {
            Ok(response) => print_response(&response),
            Err(e) => eprintln!("  \x1b[31mError: {}\x1b[0m\n", e),
        }
    }

    Ok(())
}

// ── Ask Command ─────────────────────────────────────────────────────

async fn cmd_ask(
    config: &Config,
    message: String,
    session: Option<String>,
    cart: usize,
    as_json: bool,
) -> Result<()> {
    validate_config(config)?;
    let gateway = ChatGateway::in_memory(config);

    let request = ChatRequest {
        message,
        context: cart_context(cart),
        session_id: session,
    };
    let response = gateway.handle_chat(request).await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!();
        print_response(&response);
    }
    Ok(())
}

// ── Classify Command ────────────────────────────────────────────────

fn cmd_classify(message: &str) {
    println!("{}", Responder::classify(message));
}

// ── Pipe Command ────────────────────────────────────────────────────

/// One request per line in, one JSON object per line out. A line that fails
/// to parse or to answer produces `{"detail": ...}` and the loop continues.
async fn cmd_pipe(config: &Config) -> Result<()> {
    validate_config(config)?;
    let gateway = ChatGateway::in_memory(config);

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let output = match serde_json::from_str::<ChatRequest>(line) {
            Ok(request) => match gateway.handle_chat(request).await {
                Ok(response) => serde_json::to_string(&response)?,
                Err(e) => serde_json::to_string(&e.body())?,
            },
            Err(e) => {
                tracing::warn!("Rejected malformed request line: {}", e);
                serde_json::to_string(&json!({ "detail": format!("invalid request: {}", e) }))?
            }
        };

        writeln!(stdout, "{}", output)?;
        stdout.flush()?;
    }

    let stats = gateway.stats().await;
    eprintln!("{}", serde_json::to_string(&stats)?);
    Ok(())
}

// ── Status Command ──────────────────────────────────────────────────

fn cmd_status(config: &Config) -> Result<()> {
    let local_path = Config::local_path();
    let default_path = Config::default_path();

    println!();
    println!("  🛍️ storebot status");
    println!("  ─────────────────────────────────────");

    // Config file
    if local_path.exists() {
        println!("  Config:    {}", local_path.display());
    } else if default_path.exists() {
        println!("  Config:    {}", default_path.display());
    } else {
        println!("  Config:    built-in defaults (run `storebot onboard` to create one)");
    }

    match config.validate() {
        Ok(()) => println!("  Valid:     ✅"),
        Err(errors) => println!("  Valid:     ❌ {} error(s)", errors.len()),
    }

    println!("  Service:   {} v{}", config.service.name, config.service.version);
    println!(
        "  Sessions:  {}",
        if config.sessions.enabled { "logged in memory" } else { "not logged" }
    );
    println!("  Log level: {}", config.logging.level);

    // Rule table
    println!();
    println!("  Rules (first match wins):");
    for (i, rule) in Responder::rules().iter().enumerate() {
        println!("  {}. {:<15} {}", i + 1, rule.intent.as_str(), rule.keywords.join(", "));
    }
    println!("  {}. {:<15} (anything else)", Responder::rules().len() + 1, "fallback");

    println!();
    Ok(())
}

// ── Onboard Command ─────────────────────────────────────────────────

fn cmd_onboard() -> Result<()> {
    let path = Config::write_default_template()?;
    println!();
    println!("  ✅ Configuration created at:");
    println!("     {}", path.display());
    println!();
    println!("  Next steps:");
    println!("  1. Edit the config file if you want to rename the service");
    println!("  2. Run `storebot chat` to start chatting");
    println!();
    Ok(())
}
