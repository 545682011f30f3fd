//! bigroad CLI
//!
//! Interactive Big Road tracker with next-hand calls.
//!
//! Run with: cargo run
//! Record hands by typing b, p or t.

use anyhow::{Context, Result};
use bigroad::{
    credits::{request_prediction, CreditGate, DebitStatus, GateOutcome, SqliteLedger},
    render::{reveal, JsonRenderer, Renderer, TextRenderer},
    session::{SampleGate, Session},
    types::{Outcome, Prediction},
    EngineConfig,
};
use rand::prelude::*;
use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

const DEFAULT_ACCOUNT: &str = "local";

/// Terminal output split by audience.
///
/// In `--json` mode stdout carries only JSON lines (board frames and
/// predictions); every human-facing note goes to stderr instead.
struct Console<O: Write, E: Write> {
    json: bool,
    out: O,
    err: E,
}

impl<O: Write, E: Write> Console<O, E> {
    fn new(json: bool, out: O, err: E) -> Self {
        Self { json, out, err }
    }

    fn human(&mut self) -> &mut dyn Write {
        if self.json {
            &mut self.err
        } else {
            &mut self.out
        }
    }

    fn note(&mut self, line: impl Display) -> Result<()> {
        writeln!(self.human(), "{}", line)?;
        Ok(())
    }

    fn prompt(&mut self) -> Result<()> {
        let human = self.human();
        write!(human, "> ")?;
        human.flush()?;
        Ok(())
    }

    fn warn(&mut self, line: impl Display) -> Result<()> {
        writeln!(self.err, "{}", line)?;
        Ok(())
    }

    fn prediction(&mut self, prediction: &Prediction) -> Result<()> {
        if self.json {
            writeln!(self.out, "{}", serde_json::to_string(prediction)?)?;
            self.out.flush()?;
            return Ok(());
        }

        self.note("\n┌────────────────────────────────────────┐")?;
        self.note(format!("│ NEXT HAND: {:<28}│", prediction.label()))?;
        self.note(format!("│ Confidence: {:<27}│", format!("{}%", prediction.confidence)))?;
        self.note("└────────────────────────────────────────┘")?;
        self.note(format!("   {}", prediction.reason))?;
        self.note(format!("   {}\n", prediction.advice))
    }
}

struct CliOptions {
    db_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    account: String,
    grant: Option<i64>,
    seed: Option<u64>,
    json: bool,
    no_delay: bool,
    balance_only: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return Ok(());
    }

    tracing_subscriber::fmt::init();

    let options = parse_args(&args[1..])?;

    let data_dir = get_data_dir();
    let db_path = match &options.db_path {
        Some(path) => path.clone(),
        None => {
            std::fs::create_dir_all(&data_dir)
                .with_context(|| format!("Failed to create data dir {:?}", data_dir))?;
            data_dir.join("credits.db")
        }
    };
    let mut ledger = SqliteLedger::open(&db_path)?;
    tracing::info!("Credit ledger at {:?}", db_path);

    let mut console = Console::new(options.json, io::stdout(), io::stderr());

    if let Some(amount) = options.grant {
        let balance = ledger.grant(&options.account, amount)?;
        console.note(format!("Granted {} credits to '{}' (balance {})", amount, options.account, balance))?;
    }

    if options.balance_only {
        println!("{}: {} credits", options.account, ledger.balance(&options.account)?);
        return Ok(());
    }

    let mut config = match &options.config_path {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    if options.no_delay {
        config.reveal_delay_ms = 0;
    }

    let rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    run_cli_mode(&mut ledger, &options, &mut console, config, rng).await
}

fn parse_args(args: &[String]) -> Result<CliOptions> {
    let mut options = CliOptions {
        db_path: None,
        config_path: None,
        account: DEFAULT_ACCOUNT.to_string(),
        grant: None,
        seed: None,
        json: false,
        no_delay: false,
        balance_only: false,
    };

    for arg in args {
        if let Some(path) = arg.strip_prefix("--db=") {
            options.db_path = Some(PathBuf::from(path));
        } else if let Some(path) = arg.strip_prefix("--config=") {
            options.config_path = Some(PathBuf::from(path));
        } else if let Some(account) = arg.strip_prefix("--account=") {
            options.account = account.to_string();
        } else if let Some(amount) = arg.strip_prefix("--grant=") {
            options.grant = Some(amount.parse().context("--grant expects a number")?);
        } else if let Some(seed) = arg.strip_prefix("--seed=") {
            options.seed = Some(seed.parse().context("--seed expects a number")?);
        } else {
            match arg.as_str() {
                "--json" => options.json = true,
                "--no-delay" => options.no_delay = true,
                "--balance" => options.balance_only = true,
                other => eprintln!("Ignoring unknown argument: {}", other),
            }
        }
    }

    Ok(options)
}

fn print_usage() {
    println!("Usage: bigroad [--db=PATH] [--account=ID] [--grant=N] [--seed=N] [--config=PATH] [--json] [--no-delay]");
    println!("       bigroad --balance [--account=ID]");
    println!();
    println!("  --db=PATH      Credit ledger database (default: data dir/bigroad/credits.db)");
    println!("  --account=ID   Account charged for predictions (default: local)");
    println!("  --grant=N      Add N credits to the account before starting");
    println!("  --seed=N       Seed the random source for reproducible calls");
    println!("  --config=PATH  JSON engine config overriding the defaults");
    println!("  --json         Emit board frames and predictions as JSON lines");
    println!("  --no-delay     Skip the pause before revealing a prediction");
}

fn get_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bigroad")
}

async fn run_cli_mode<O: Write, E: Write>(
    ledger: &mut SqliteLedger,
    options: &CliOptions,
    console: &mut Console<O, E>,
    config: EngineConfig,
    mut rng: StdRng,
) -> Result<()> {
    let delay = config.reveal_delay();
    let mut session = Session::new(config);

    let mut renderer: Box<dyn Renderer> = if options.json {
        Box::new(JsonRenderer::new(io::stdout()))
    } else {
        Box::new(TextRenderer::new(io::stdout()))
    };

    console.note("bigroad - Big Road tracker")?;
    console.note("==========================")?;
    console.note("Enter b, p or t for each hand. /help for commands, 'quit' to exit.\n")?;

    let stdin = io::stdin();

    loop {
        console.prompt()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        if line == "quit" || line == "exit" {
            break;
        }

        if line.starts_with('/') {
            handle_command(&mut session, ledger, options, console, renderer.as_mut(), line)?;
            continue;
        }

        let outcome: Outcome = match line.parse() {
            Ok(outcome) => outcome,
            Err(e) => {
                console.warn(format!("Error: {}", e))?;
                continue;
            }
        };

        let update = session.record(outcome);
        if let Some(hit) = update.graded {
            console.note(format!("{} Call was {}", if hit { "✅" } else { "❌" }, if hit { "right" } else { "wrong" }))?;
        }
        if update.placement.reset {
            console.note("⚠️  Board full, started a new road.")?;
        }
        renderer.render(&session.snapshot())?;
        console.note(format!("Hit rate: {}", session.tracker()))?;

        match update.gate {
            SampleGate::Collecting { have, need } => {
                console.note(format!("Collecting samples: {}/{}", have, need))?;
            }
            SampleGate::Ready => {
                match request_prediction(&mut session, ledger, &options.account, &mut rng) {
                    GateOutcome::Predicted { prediction, debit } => {
                        if let DebitStatus::Failed(reason) = &debit {
                            console.warn(format!("⚠️  Could not charge a credit ({}); showing the call anyway.", reason))?;
                        }
                        console.note("Thinking...")?;
                        let prediction = reveal(prediction, delay).await;
                        console.prediction(&prediction)?;
                    }
                    GateOutcome::OutOfCredits => {
                        console.note("❌ Out of credits. Top up with --grant=N to see predictions.")?;
                    }
                    GateOutcome::BalanceUnavailable(reason) => {
                        console.warn(format!("⚠️  Credit ledger unavailable ({}); no call this hand.", reason))?;
                    }
                    GateOutcome::Collecting { have, need } => {
                        console.note(format!("Collecting samples: {}/{}", have, need))?;
                    }
                }
            }
        }
    }

    Ok(())
}

fn handle_command<O: Write, E: Write>(
    session: &mut Session,
    ledger: &SqliteLedger,
    options: &CliOptions,
    console: &mut Console<O, E>,
    renderer: &mut dyn Renderer,
    line: &str,
) -> Result<()> {
    let cmd = line.split_whitespace().next().unwrap_or(line);

    match cmd {
        "/board" => {
            renderer.render(&session.snapshot())?;
        }
        "/stats" => {
            console.note(format!("Hands on board: {}/{}", session.grid().len(), session.grid().capacity()))?;
            console.note(format!("Hit rate: {}", session.tracker()))?;
            console.note(format!("Credits: {}", ledger.balance(&options.account)?))?;
            if let Some(prediction) = session.last_prediction() {
                console.note(format!("Standing call: {} ({}%)", prediction.label(), prediction.confidence))?;
            }
        }
        "/reset" => {
            session.reset_board();
            renderer.render(&session.snapshot())?;
            console.note("Board and hit rate cleared.")?;
        }
        "/help" => {
            console.note("Commands:")?;
            console.note("  b | p | t     Record Banker, Player or Tie")?;
            console.note("  /board        Redraw the board")?;
            console.note("  /stats        Show hit rate, credits and the standing call")?;
            console.note("  /reset        Clear the board and the hit rate")?;
            console.note("  /help         Show this help")?;
            console.note("  quit          Exit")?;
        }
        _ => {
            console.note(format!("Unknown command: {}. Try /help", cmd))?;
        }
    }

    Ok(())
}
