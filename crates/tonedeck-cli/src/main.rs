use std::borrow::Cow::{self, Borrowed, Owned};
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use tonedeck_application::config_service::ConfigService;
use tonedeck_application::export;
use tonedeck_application::AppContext;
use tonedeck_core::{SessionState, Theme};
use tracing_subscriber::EnvFilter;

mod render;

const COMMANDS: [&str; 6] = [
    "/random",
    "/generate",
    "/demo",
    "/clear-cache",
    "/export",
    "/help",
];

/// ToneDeck - emotionally aware prompt studio.
#[derive(Parser)]
#[command(name = "tonedeck")]
#[command(about = "ToneDeck - emotionally aware prompt studio", long_about = None)]
struct Cli {
    /// Visual theme: aqua, dusk, or plain
    #[arg(long)]
    theme: Option<String>,

    /// Start with demo mode on (no remote engine, canned responses)
    #[arg(long)]
    demo: bool,

    /// Override the engine call timeout, in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Explicit config file path (defaults to the platform config dir)
    #[arg(long)]
    config: Option<PathBuf>,
}

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|cmd| cmd.to_string()).collect(),
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    let config_service = match &cli.config {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new(),
    };
    let mut config = config_service.get();

    if let Some(theme) = &cli.theme {
        config.theme = Theme::from_str(theme)
            .map_err(|_| anyhow::anyhow!("unknown theme '{theme}' (aqua, dusk, plain)"))?;
    }
    if let Some(timeout_secs) = cli.timeout_secs {
        config.engine.timeout_secs = timeout_secs;
    }
    let demo_on_start = cli.demo || config.demo_mode;
    let theme = config.theme;

    let ctx = AppContext::new(config);
    let mut session = SessionState::with_demo_mode(demo_on_start);

    // ===== REPL Setup =====
    let helper = CliHelper::new();
    let mut rl = Editor::new()?;
    rl.set_helper(Some(helper));

    println!("{}", "=== ToneDeck ===".bright_magenta().bold());
    println!(
        "{}",
        "Type your text, then '/generate'. '/help' lists commands, 'quit' exits.".bright_black()
    );
    if session.demo_mode {
        println!("{}", "Demo mode is on: responses come from the built-in table.".yellow());
    }
    println!();

    // ===== Main REPL Loop =====
    loop {
        let readline = rl.readline(">> ");

        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                if trimmed == "quit" || trimmed == "exit" {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }

                if let Some(rest) = trimmed.strip_prefix('/') {
                    handle_command(rest, &ctx, &mut session, theme).await;
                } else {
                    session.set_input(trimmed);
                    println!(
                        "{}",
                        format!("Input set ({} chars). '/generate' to analyze.", trimmed.len())
                            .bright_black()
                    );
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted)
            | Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "Goodbye!".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Readline error: {err}").red());
                break;
            }
        }
    }

    Ok(())
}

async fn handle_command(command: &str, ctx: &AppContext, session: &mut SessionState, theme: Theme) {
    let mut parts = command.splitn(2, ' ');
    let name = parts.next().unwrap_or_default();
    let arg = parts.next().map(str::trim).unwrap_or_default();

    match name {
        "random" => match ctx.random_prompt(session) {
            Some(prompt) => {
                session.set_input(prompt.clone());
                println!("{}", "Random sample:".bright_yellow());
                println!("  {prompt}");
            }
            None => println!("{}", "The sample library is empty.".red()),
        },
        "generate" => match ctx.generate(session).await {
            Ok(result) => {
                println!();
                println!("{}", render::render_result(&result));
                println!();
            }
            Err(err) => {
                eprintln!("{}", format!("{err}").red());
                if err.suggests_demo_mode() {
                    println!(
                        "{}",
                        "Tip: '/demo' switches to demo mode, which runs without the remote engine."
                            .yellow()
                    );
                }
            }
        },
        "demo" => {
            let now_on = session.toggle_demo_mode();
            if now_on {
                println!("{}", "Demo mode on: responses come from the built-in table.".yellow());
            } else {
                println!("{}", "Demo mode off: requests go to the remote engine.".yellow());
            }
        }
        "clear-cache" => {
            ctx.clear_caches(session).await;
            println!(
                "{}",
                "Cache cleared. The engine will be rebuilt on the next request.".bright_green()
            );
        }
        "export" => {
            let Some(result) = session.last_result.clone() else {
                println!("{}", "Nothing to export yet; run '/generate' first.".red());
                return;
            };
            let path = if arg.is_empty() {
                PathBuf::from("tonedeck-report.html")
            } else {
                PathBuf::from(arg)
            };
            let art = ctx.art_data_uri();
            match export::write_report(&path, &result, theme, art.as_deref()) {
                Ok(()) => println!(
                    "{}",
                    format!("Report written to {}", path.display()).bright_green()
                ),
                Err(err) => eprintln!("{}", format!("Export failed: {err}").red()),
            }
        }
        "help" => print_help(),
        other => {
            println!("{}", format!("Unknown command: /{other}").bright_black());
            print_help();
        }
    }
}

fn print_help() {
    println!("{}", "Commands:".bright_yellow());
    println!("  /random          pick a random sample prompt as the input");
    println!("  /generate        analyze the current input");
    println!("  /demo            toggle demo mode (no remote engine)");
    println!("  /clear-cache     drop the cached engine and art, keep input and mode");
    println!("  /export [path]   write the last result as an HTML report");
    println!("  /help            this list");
    println!("  quit             exit");
}
