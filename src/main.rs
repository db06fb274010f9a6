use {
  action::Action,
  anyhow::{Context, anyhow},
  app::App,
  arguments::Arguments,
  autocomplete::Autocomplete,
  clap::Parser,
  client::Client,
  config::Config,
  crossterm::{
    event as crossterm_event,
    event::{
      DisableMouseCapture, EnableMouseCapture, Event as CrosstermEvent,
      KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
      MouseEventKind,
    },
    execute,
    style::Stylize,
    terminal::{
      EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
      enable_raw_mode,
    },
  },
  dispatch::Dispatch,
  effect::Effect,
  error::Error,
  event::Event,
  focus::Focus,
  help_view::HelpView,
  input::Input,
  pending_fetch::PendingFetch,
  ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
      Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap,
    },
  },
  serde::Deserialize,
  state::State,
  std::{
    backtrace::BacktraceStatus,
    fs::File,
    io::{self, IsTerminal, Stdout},
    path::{Path, PathBuf},
    process,
    sync::Mutex,
    time::{Duration, Instant},
  },
  suggestion::Suggestion,
  suggestion_item::SuggestionItem,
  suggestion_list::SuggestionList,
  tokio::{
    runtime::Handle,
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
  },
  tracing_subscriber::EnvFilter,
  transient_message::TransientMessage,
  utils::{saturating_u16, skip_chars, truncate},
};

mod action;
mod app;
mod arguments;
mod autocomplete;
mod client;
mod config;
mod dispatch;
mod effect;
mod error;
mod event;
mod focus;
mod help_view;
mod input;
mod pending_fetch;
mod state;
mod suggestion;
mod suggestion_item;
mod suggestion_list;
mod transient_message;
mod utils;

const INPUT_STATUS: &str =
  "type to search • ↓/↑ suggestions • ctrl+u clear • F1 help • esc quit";

const LIST_STATUS: &str =
  "↓/↑ move • enter select • tab/esc back to input • F1 help";

const HELP_TITLE: &str = "Help";
const HELP_STATUS: &str = "Press F1 or esc to close help";

const LOADING_STATUS: &str = "(loading...)";

const LOG_FILTER_ENV: &str = "AUTOCOMPLETE_LOG";

const BASE_INDENT: &str = " ";

const HELP_TEXT: &str = "\
Input:
  type      edit the query, suggestions follow as you type
  backspace delete the last character
  ctrl+u    clear the input
  ↓         move to the first suggestion
  ↑         move to the last suggestion
  esc       quit

Suggestions:
  ↓ / ↑     move between suggestions, past either end back to the input
  enter     use the focused suggestion
  click     use the clicked suggestion
  tab / esc close the list and return to the input

Anywhere:
  F1        toggle this help
  ctrl+c    quit
";

type Result<T = (), E = anyhow::Error> = std::result::Result<T, E>;

fn initialize_logging(path: Option<&Path>) -> Result {
  let Some(path) = path else {
    return Ok(());
  };

  let file = File::create(path)
    .with_context(|| format!("could not create log file {}", path.display()))?;

  let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
    .unwrap_or_else(|_| EnvFilter::new("info"));

  tracing_subscriber::fmt()
    .with_ansi(false)
    .with_env_filter(filter)
    .with_writer(Mutex::new(file))
    .try_init()
    .map_err(|error| anyhow!(error))
}

fn initialize_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
  enable_raw_mode()?;

  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

  Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(
  terminal: &mut Terminal<CrosstermBackend<Stdout>>,
) -> Result {
  disable_raw_mode()?;

  execute!(
    terminal.backend_mut(),
    DisableMouseCapture,
    LeaveAlternateScreen
  )?;

  terminal.show_cursor()?;

  Ok(())
}

async fn run() -> Result {
  let arguments = Arguments::parse();

  let config = arguments.config().context("could not start autocomplete")?;

  initialize_logging(arguments.log_file.as_deref())?;

  tracing::info!(
    url = config.data_source_url(),
    param = config.param(),
    max_suggestions = ?config.max_suggestions(),
    min_input = config.min_input(),
    "starting"
  );

  let client = Client::new(&config);

  let autocomplete = Autocomplete::new(
    config,
    Input::new(arguments.initial.unwrap_or_default()),
  );

  let mut terminal = initialize_terminal()?;

  let mut app = App::new(client, autocomplete);

  let result = app.run(&mut terminal);

  restore_terminal(&mut terminal)?;

  result
}

#[tokio::main]
async fn main() {
  if let Err(error) = run().await {
    let use_color = io::stderr().is_terminal();

    if use_color {
      eprintln!("{} {error}", "error:".bold().red());
    } else {
      eprintln!("error: {error}");
    }

    for (i, error) in error.chain().skip(1).enumerate() {
      if i == 0 {
        eprintln!();

        if use_color {
          eprintln!("{}", "because:".bold().red());
        } else {
          eprintln!("because:");
        }
      }

      if use_color {
        eprintln!("{} {error}", "-".bold().red());
      } else {
        eprintln!("- {error}");
      }
    }

    let backtrace = error.backtrace();

    if backtrace.status() == BacktraceStatus::Captured {
      if use_color {
        eprintln!("{}", "backtrace:".bold().red());
      } else {
        eprintln!("backtrace:");
      }

      eprintln!("{backtrace}");
    }

    process::exit(1);
  }
}
