//! Shared application state, types, and state-mutation methods.
//!
//! This module is runtime-agnostic: it never touches the terminal or the
//! network. The native runtime drives the fetch flow and calls the mutation
//! methods here; the UI layer reads the state and records pane rects for
//! mouse hit-testing.

use crate::data::{DownloadProgress, ImageCard};
use crate::quiz::QuizRound;
use crate::theme::ThemeConfig;
use ratatui::layout::Rect;
use tracing::info;

/// What the user sees when a round could not be produced.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch doggo. Try again!";

/// What the image frame pane currently shows.
#[derive(Debug, Clone)]
pub enum FrameState {
    /// Waiting for the random-image endpoint to answer.
    Fetching,
    /// Image URL known; bytes are streaming in.
    Loading {
        file_name: String,
        progress: DownloadProgress,
    },
    /// Image fully loaded; the round is playable.
    Loaded(ImageCard),
    /// The round failed; only [`FETCH_FAILED_MESSAGE`] is shown.
    Failed,
}

#[derive(Debug, Clone)]
pub enum AppAction {
    NewRound,
}

/// Application state for the Ratatui app.
pub struct AppState {
    /// Breed names used for wrong answers.
    pub catalog: Vec<String>,
    /// Options per round (catalog-bounded, checked at startup).
    pub choice_count: usize,
    /// Current frame pane content.
    pub frame: FrameState,
    /// The active round, if one was produced.
    pub round: Option<QuizRound>,
    /// Index of the first (and only counted) answer. `Some` locks the round.
    pub answered: Option<usize>,
    /// Keyboard focus within the answer rows.
    pub focused_choice: usize,
    /// Rounds answered this session.
    pub rounds_played: u32,
    /// Rounds answered correctly this session.
    pub rounds_won: u32,
    /// Theme configuration
    pub theme: ThemeConfig,
    /// App version string
    pub app_version: String,
    /// Flag to quit app
    pub should_quit: bool,
    /// Whether help overlay is visible
    pub show_help: bool,
    /// Pending action to execute after input handling
    pub pending_action: Option<AppAction>,
    /// Screen region of the image frame pane (including borders)
    pub frame_area: Option<Rect>,
    /// Screen region of answer rows (inside borders)
    pub options_content_area: Option<Rect>,
    /// Screen region of the status-bar refresh button
    pub refresh_area: Option<Rect>,
}

impl AppState {
    pub fn new(
        catalog: Vec<String>,
        choice_count: usize,
        theme: ThemeConfig,
        app_version: String,
    ) -> Self {
        Self {
            catalog,
            choice_count,
            frame: FrameState::Fetching,
            round: None,
            answered: None,
            focused_choice: 0,
            rounds_played: 0,
            rounds_won: 0,
            theme,
            app_version,
            should_quit: false,
            show_help: false,
            pending_action: None,
            frame_area: None,
            options_content_area: None,
            refresh_area: None,
        }
    }

    /// Resets to the fetching placeholder; the answers pane empties.
    pub fn begin_fetch(&mut self) {
        self.frame = FrameState::Fetching;
        self.round = None;
        self.answered = None;
        self.focused_choice = 0;
    }

    /// Image URL resolved; bytes are about to stream in.
    pub fn begin_image_download(&mut self, file_name: String) {
        self.frame = FrameState::Loading {
            file_name,
            progress: DownloadProgress {
                downloaded: 0,
                total: None,
            },
        };
    }

    pub fn update_download(&mut self, update: DownloadProgress) {
        if let FrameState::Loading { progress, .. } = &mut self.frame {
            *progress = update;
        }
    }

    /// Installs a freshly built round behind a fully loaded image.
    pub fn apply_round(&mut self, round: QuizRound, card: ImageCard) {
        self.frame = FrameState::Loaded(card);
        self.round = Some(round);
        self.answered = None;
        self.focused_choice = 0;
    }

    /// Collapses any round failure into the fixed message. The answers pane
    /// stays empty until the next refresh.
    pub fn fail_round(&mut self) {
        self.frame = FrameState::Failed;
        self.round = None;
        self.answered = None;
        self.focused_choice = 0;
    }

    /// Registers an answer. The first answer wins; everything after the lock
    /// is a no-op, as is answering while no round is shown.
    pub fn select_choice(&mut self, choice_idx: usize) {
        let Some(round) = &self.round else {
            return;
        };
        if self.answered.is_some() || choice_idx >= round.choices.len() {
            return;
        }

        self.answered = Some(choice_idx);
        self.focused_choice = choice_idx;
        self.rounds_played += 1;
        let correct = round.is_correct(choice_idx);
        if correct {
            self.rounds_won += 1;
        }
        info!(
            picked = %round.choices[choice_idx],
            answer = %round.correct_breed,
            correct,
            "answer registered"
        );
    }

    /// Moves answer focus by `direction` (+1 or -1), wrapping.
    pub fn move_focus(&mut self, direction: i32) {
        let Some(round) = &self.round else {
            return;
        };
        let len = round.choices.len();
        if len == 0 {
            return;
        }
        let current = self.focused_choice.min(len - 1);
        self.focused_choice = if direction < 0 {
            (current + len - 1) % len
        } else {
            (current + 1) % len
        };
    }

    /// `Some(true)` once answered correctly, `Some(false)` once answered
    /// wrongly, `None` while the round is open.
    pub fn answered_correct(&self) -> Option<bool> {
        let round = self.round.as_ref()?;
        self.answered.map(|idx| round.is_correct(idx))
    }
}
