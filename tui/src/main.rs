//! Demo binary: run the ask widget against a questions file.
//!
//! Reads an `AskArgs` JSON payload, drives the interactive session in the
//! alternate screen, then prints the transcript (and optionally the
//! structured details) to stdout.

use std::io::IsTerminal;
use std::io::Read;
use std::io::stdout;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use askpane_protocol::AskArgs;
use askpane_protocol::ToolOutput;
use askpane_tui::AskFlow;
use askpane_tui::Renderable;
use askpane_tui::preflight;
use askpane_tui::start;
use clap::Parser;
use crossterm::event;
use crossterm::event::Event;
use crossterm::execute;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "askpane",
    about = "Interactive question/answer prompt for terminal workflows"
)]
struct Cli {
    /// Path to a JSON questions payload; `-` reads stdin.
    questions: PathBuf,

    /// Also print the structured details payload as JSON.
    #[arg(long)]
    json: bool,

    /// Append logs to this file (stdout belongs to the UI). Filtered via
    /// `RUST_LOG`.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(file);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Ok(Some(guard))
}

fn read_questions(path: &Path) -> Result<AskArgs> {
    let raw = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading questions from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("reading questions from {}", path.display()))?
    };
    serde_json::from_str(&raw).context("parsing questions JSON")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(cli.log_file.as_deref())?;
    let args = read_questions(&cli.questions)?;

    let interactive = stdout().is_terminal() && std::io::stdin().is_terminal();
    let output = match preflight(&args, interactive) {
        Err(diagnostic) => *diagnostic,
        Ok(()) => run_session(start(args.questions))?,
    };

    println!("{}", output.content);
    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&output.details).context("serializing details")?
        );
    }
    Ok(())
}

fn run_session(mut flow: AskFlow) -> Result<ToolOutput> {
    enable_raw_mode().context("enabling raw mode")?;
    execute!(stdout(), EnterAlternateScreen).context("entering alternate screen")?;
    let result = drive(&mut flow);
    // Restore the terminal even when the loop failed.
    let restore = execute!(stdout(), LeaveAlternateScreen)
        .context("leaving alternate screen")
        .and_then(|()| disable_raw_mode().context("disabling raw mode"));
    let output = result?;
    restore?;
    Ok(output)
}

/// The synchronous event loop: render the current state, block on the next
/// event, feed keys to the flow, finish when the session reaches a terminal
/// state.
fn drive(flow: &mut AskFlow) -> Result<ToolOutput> {
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend).context("initializing terminal")?;
    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            let height = flow.desired_height(area.width).min(area.height);
            let widget_area = Rect {
                height,
                ..area
            };
            flow.render(widget_area, frame.buffer_mut());
        })?;
        match event::read().context("reading terminal event")? {
            Event::Key(key) => {
                flow.handle_key(key);
            }
            Event::Resize(..) => {}
            _ => {}
        }
        if let Some(output) = flow.output() {
            return Ok(output);
        }
    }
}
