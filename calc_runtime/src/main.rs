//! # calc
//!
//! Keypad calculator driver.
//!
//! ## Commands
//!
//! - `eval`: apply tokens and print the result
//! - `repl`: interactive session
//! - `record`: write tokens to a tape
//! - `replay`: replay a tape
//!
//! ## Example
//!
//! ```bash
//! calc eval 1 2 × 3 =
//! calc record session.tape "9 √ + 1 ="
//! calc replay session.tape --verify
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use calc_engine::tokens::Token;
use calc_runtime::config::RuntimeConfig;
use calc_runtime::logging::{init_tracing, resolve_filter};
use calc_runtime::render::{render_json, render_text, ReplayReport};
use calc_runtime::repl::Repl;
use calc_runtime::replay::{rebuild_state, rebuild_view, verify_determinism};
use calc_runtime::session::Session;
use calc_runtime::tape::{read_tape, write_tape};

/// Keypad calculator driver.
#[derive(Parser, Debug)]
#[command(name = "calc")]
#[command(version, about, long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter directive, e.g. "debug" or "calc_engine=trace"
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Apply keypad tokens and print the view
    Eval {
        /// Tokens, e.g. `7 + 3 =`
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        tokens: Vec<String>,

        /// Print the view as JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactive session
    Repl {
        /// Record the session to this tape
        #[arg(long)]
        record: Option<PathBuf>,
    },

    /// Write keypad tokens to a tape
    Record {
        /// Tape file (overwritten)
        tape: PathBuf,

        /// Tokens, e.g. `7 + 3 =`
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        tokens: Vec<String>,
    },

    /// Replay a tape and print the final view
    Replay {
        /// Tape file
        tape: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Replay twice and require identical state hashes
        #[arg(long)]
        verify: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = RuntimeConfig::load_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;
    init_tracing(resolve_filter(cli.log_level.as_deref(), &config.logging.filter));

    match cli.command {
        Commands::Eval { tokens, json } => eval(&config, &tokens, json),
        Commands::Repl { record } => {
            let record = record.or_else(|| config.session.record_tape.clone());
            repl(&config, record.as_deref())
        }
        Commands::Record { tape, tokens } => record(&config, &tape, &tokens),
        Commands::Replay { tape, json, verify } => replay(&config, &tape, json, verify),
    }
}

fn parse_tokens(words: &[String]) -> Result<Vec<Token>> {
    Token::parse_script(&words.join(" ")).context("Invalid token")
}

fn eval(config: &RuntimeConfig, words: &[String], json: bool) -> Result<()> {
    let tokens = parse_tokens(words)?;
    let view = rebuild_view(&tokens);
    if json || config.display.json {
        println!("{}", render_json(&view)?);
    } else {
        print!("{}", render_text(&view, config.display.show_history));
    }
    Ok(())
}

fn repl(config: &RuntimeConfig, record: Option<&Path>) -> Result<()> {
    let session = match record {
        Some(path) => Session::recording(path)
            .with_context(|| format!("Failed to create tape {}", path.display()))?,
        None => Session::new(),
    };
    let mut repl = Repl::new(session, config.display.show_history, config.display.json);
    repl.run()?;

    let session = repl.into_session();
    if let Some(tape) = session.tape() {
        eprintln!(
            "recorded {} tokens to {}",
            tape.last_sequence(),
            tape.path().display()
        );
    }
    Ok(())
}

fn record(config: &RuntimeConfig, path: &Path, words: &[String]) -> Result<()> {
    let tokens = parse_tokens(words)?;
    let tape = write_tape(path, &tokens)
        .with_context(|| format!("Failed to write tape {}", path.display()))?;
    tracing::info!(tape = %path.display(), tokens = tape.last_sequence(), "tape written");

    let view = rebuild_view(&tokens);
    if config.display.json {
        println!("{}", render_json(&view)?);
    } else {
        print!("{}", render_text(&view, config.display.show_history));
    }
    Ok(())
}

fn replay(config: &RuntimeConfig, path: &Path, json: bool, verify: bool) -> Result<()> {
    let tokens =
        read_tape(path).with_context(|| format!("Failed to read tape {}", path.display()))?;

    let hash = if verify {
        verify_determinism(&tokens)?
    } else {
        rebuild_state(&tokens).1
    };
    let report = ReplayReport {
        tokens: tokens.len(),
        hash,
        verified: verify,
        view: rebuild_view(&tokens),
    };

    if json || config.display.json {
        println!("{}", report.render_json()?);
    } else {
        print!("{}", report.render_text(config.display.show_history));
    }
    Ok(())
}
