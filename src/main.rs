//! # doggo-tui
//!
//! A terminal dog-breed guessing game fed by the Dog CEO image API.

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use doggo_tui::app_core::input::{AppKeyCode, AppKeyEvent, AppMouseEvent, AppMouseKind};
use doggo_tui::app_core::reducer;
use doggo_tui::app_core::state::{AppAction, AppState};
use doggo_tui::error::QuizError;
use doggo_tui::quiz::QuizRound;
use doggo_tui::{catalog, data, theme, ui};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use std::fs;
use std::io;
use std::str::FromStr;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = "doggo-tui: a terminal dog-breed guessing game.\n\
                  Fetches a random dog photo from the Dog CEO API and asks which breed it shows."
)]
struct Args {
    /// Random-image API endpoint
    #[arg(long, default_value = data::RANDOM_IMAGE_ENDPOINT)]
    endpoint: String,

    /// Path to a JSON array of breed names replacing the built-in catalog
    #[arg(short, long)]
    catalog: Option<String>,

    /// Number of answer options per round
    #[arg(long, default_value_t = 3)]
    choices: usize,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,

    /// UI theme (dracula, solarized, gruvbox)
    #[arg(short, long, default_value = "dracula")]
    theme: String,

    /// Print the breed catalog and exit
    #[arg(long)]
    list_breeds: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

// ---------------------------------------------------------------------------
// Logging (file-backed; stderr would corrupt the alternate screen)
// ---------------------------------------------------------------------------

fn init_logging(verbose: u8) -> Result<std::path::PathBuf> {
    let project_dirs = directories::ProjectDirs::from("com", "doggo", "doggo-tui")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = project_dirs.data_dir().to_path_buf();
    fs::create_dir_all(&data_dir)?;
    let log_path = data_dir.join("doggo-tui.log");
    let log_file = fs::File::options().create(true).append(true).open(&log_path)?;

    // RUST_LOG overrides the -v count when set.
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(log_file))
        .init();

    Ok(log_path)
}

// ---------------------------------------------------------------------------
// Crossterm → shared-reducer adapters
// ---------------------------------------------------------------------------

fn crossterm_to_app_key_event(
    code: KeyCode,
    modifiers: KeyModifiers,
    kind: KeyEventKind,
) -> Option<AppKeyEvent> {
    if matches!(kind, KeyEventKind::Release) {
        return None;
    }

    let key_code = match code {
        KeyCode::Char(c) => AppKeyCode::Char(c),
        KeyCode::Up => AppKeyCode::Up,
        KeyCode::Down => AppKeyCode::Down,
        KeyCode::Enter => AppKeyCode::Enter,
        KeyCode::Esc => AppKeyCode::Esc,
        _ => return None,
    };

    Some(AppKeyEvent {
        code: key_code,
        ctrl: modifiers.contains(KeyModifiers::CONTROL),
        alt: modifiers.contains(KeyModifiers::ALT),
        is_release: false,
    })
}

fn crossterm_to_app_mouse_event(mouse: &event::MouseEvent) -> Option<AppMouseEvent> {
    let kind = match mouse.kind {
        MouseEventKind::Down(event::MouseButton::Left) => AppMouseKind::LeftDown,
        MouseEventKind::ScrollUp => AppMouseKind::ScrollUp,
        MouseEventKind::ScrollDown => AppMouseKind::ScrollDown,
        _ => return None,
    };
    Some(AppMouseEvent {
        kind,
        column: mouse.column,
        row: mouse.row,
    })
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let args = Args::parse();
    let app_version = format!("v{}", env!("CARGO_PKG_VERSION"));

    let theme_enum = theme::Theme::from_str(&args.theme).map_err(anyhow::Error::msg)?;
    let theme = theme_enum.config();

    let catalog = match &args.catalog {
        Some(path) => catalog::load_catalog(path)?,
        None => catalog::default_catalog(),
    };

    if args.list_breeds {
        for breed in &catalog {
            println!("{}", breed);
        }
        return Ok(());
    }

    if args.choices < 2 {
        anyhow::bail!("A quiz needs at least 2 answer options (got {}).", args.choices);
    }
    if args.choices > 9 {
        // One digit key per option.
        anyhow::bail!("At most 9 answer options are supported (got {}).", args.choices);
    }
    if args.choices > catalog.len() {
        anyhow::bail!(
            "Cannot draw {} unique options from a catalog of {} breeds.",
            args.choices,
            catalog.len()
        );
    }

    let log_path = init_logging(args.verbose)?;
    info!(version = %app_version, log = %log_path.display(), "starting doggo-tui");

    let client = data::http_client(Duration::from_secs(args.timeout_secs))?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = AppState::new(catalog, args.choices, theme, app_version);

    let res = (|| -> Result<()> {
        start_round_with_ui(&mut terminal, &mut app, &client, &args.endpoint)?;
        run_app(&mut terminal, &mut app, &client, &args.endpoint)
    })();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    client: &reqwest::blocking::Client,
    endpoint: &str,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    terminal.draw(|f| ui::ui(f, app))?;

    loop {
        if app.should_quit {
            break;
        }

        match event::read()? {
            Event::Key(key) => {
                if let Some(app_event) =
                    crossterm_to_app_key_event(key.code, key.modifiers, key.kind)
                {
                    reducer::handle_key_event(app, app_event);
                }
                if let Some(action) = app.pending_action.take() {
                    handle_action(terminal, app, client, endpoint, action)?;
                }
                terminal.draw(|f| ui::ui(f, app))?;
            }
            Event::Mouse(mouse) => {
                let transitioned = match crossterm_to_app_mouse_event(&mouse) {
                    Some(app_event) => reducer::handle_mouse_event(app, app_event),
                    None => false,
                };
                if transitioned || app.pending_action.is_some() {
                    if let Some(action) = app.pending_action.take() {
                        handle_action(terminal, app, client, endpoint, action)?;
                    }
                    terminal.draw(|f| ui::ui(f, app))?;
                }
            }
            Event::Resize(_, _) => {
                terminal.draw(|f| ui::ui(f, app))?;
            }
            _ => {}
        }
    }
    Ok(())
}

fn handle_action<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    client: &reqwest::blocking::Client,
    endpoint: &str,
    action: AppAction,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    match action {
        AppAction::NewRound => start_round_with_ui(terminal, app, client, endpoint),
    }
}

/// Runs one full round: fetch the random image URL, infer the breed, draw
/// the choice set, download the image with progress redraws, then show it.
///
/// The fetch is synchronous inside the event loop, so a refresh can never
/// race an in-flight request. Any [`QuizError`] collapses into the fixed
/// failure message; only terminal draw errors propagate.
fn start_round_with_ui<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    client: &reqwest::blocking::Client,
    endpoint: &str,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    app.begin_fetch();
    terminal.draw(|f| ui::ui(f, app))?;

    let image_url = match data::fetch_random_image(client, endpoint) {
        Ok(url) => url,
        Err(err) => return show_failure(terminal, app, err),
    };

    let round = match QuizRound::new(
        image_url,
        &app.catalog,
        app.choice_count,
        &mut rand::thread_rng(),
    ) {
        Ok(round) => round,
        Err(err) => return show_failure(terminal, app, err),
    };

    app.begin_image_download(data::file_name_from_url(&round.image_url));
    terminal.draw(|f| ui::ui(f, app))?;

    let mut last_ratio = -1.0;
    let mut last_draw = Instant::now();
    let mut draw_error: Option<anyhow::Error> = None;
    let card = data::download_image(client, &round.image_url, |progress| {
        let ratio = data::progress_ratio(progress);
        let elapsed_ok = last_draw.elapsed() >= Duration::from_millis(120);
        let ratio_ok = (ratio - last_ratio).abs() >= 0.01;
        let should_draw = if progress.total.is_some() {
            ratio_ok || elapsed_ok
        } else {
            elapsed_ok
        };
        if !should_draw {
            return;
        }
        if draw_error.is_none() {
            app.update_download(progress);
            if let Err(err) = terminal.draw(|f| ui::ui(f, app)) {
                draw_error = Some(anyhow::Error::from(err));
            } else {
                last_draw = Instant::now();
                last_ratio = ratio;
            }
        }
    });

    if let Some(err) = draw_error {
        return Err(err);
    }

    match card {
        Ok(card) => {
            info!(breed = %round.correct_breed, "round ready");
            app.apply_round(round, card);
        }
        Err(err) => {
            warn!(error = %err, "image download failed");
            app.fail_round();
        }
    }

    terminal.draw(|f| ui::ui(f, app))?;
    Ok(())
}

fn show_failure<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    err: QuizError,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    warn!(error = %err, "round failed");
    app.fail_round();
    terminal.draw(|f| ui::ui(f, app))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_adapter_maps_quiz_keys() {
        let event =
            crossterm_to_app_key_event(KeyCode::Char('2'), KeyModifiers::NONE, KeyEventKind::Press)
                .unwrap();
        assert_eq!(event.code, AppKeyCode::Char('2'));
        assert!(!event.ctrl);

        let event =
            crossterm_to_app_key_event(KeyCode::Enter, KeyModifiers::NONE, KeyEventKind::Press)
                .unwrap();
        assert_eq!(event.code, AppKeyCode::Enter);

        let event =
            crossterm_to_app_key_event(KeyCode::Up, KeyModifiers::CONTROL, KeyEventKind::Press)
                .unwrap();
        assert_eq!(event.code, AppKeyCode::Up);
        assert!(event.ctrl);
    }

    #[test]
    fn test_key_adapter_drops_releases_and_unmapped_keys() {
        assert!(
            crossterm_to_app_key_event(KeyCode::Char('q'), KeyModifiers::NONE, KeyEventKind::Release)
                .is_none()
        );
        assert!(
            crossterm_to_app_key_event(KeyCode::F(1), KeyModifiers::NONE, KeyEventKind::Press)
                .is_none()
        );
    }

    #[test]
    fn test_mouse_adapter() {
        let click = event::MouseEvent {
            kind: MouseEventKind::Down(event::MouseButton::Left),
            column: 3,
            row: 7,
            modifiers: KeyModifiers::NONE,
        };
        let app_event = crossterm_to_app_mouse_event(&click).unwrap();
        assert_eq!(app_event.kind, AppMouseKind::LeftDown);
        assert_eq!((app_event.column, app_event.row), (3, 7));

        let drag = event::MouseEvent {
            kind: MouseEventKind::Drag(event::MouseButton::Left),
            column: 3,
            row: 7,
            modifiers: KeyModifiers::NONE,
        };
        assert!(crossterm_to_app_mouse_event(&drag).is_none());
    }
}
