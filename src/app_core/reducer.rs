//! Shared event reducer: pure handlers for key and mouse events.
//!
//! The native runtime converts crossterm events to [`AppKeyEvent`] /
//! [`AppMouseEvent`] and calls these functions. Network work never happens
//! here; a refresh request is parked in `app.pending_action` for the runtime
//! to execute after the reducer returns.

use crate::app_core::input::{AppKeyCode, AppKeyEvent, AppMouseEvent, AppMouseKind};
use crate::app_core::state::{AppAction, AppState, FrameState};

/// Handle a runtime-agnostic key event, mutating `app` in place.
///
/// May set `app.pending_action`; the runtime is responsible for acting on it
/// after this function returns.
pub fn handle_key_event(app: &mut AppState, event: AppKeyEvent) {
    if event.is_release {
        return;
    }

    let code = event.code;

    if app.show_help {
        if matches!(code, AppKeyCode::Char('?') | AppKeyCode::Esc) {
            app.show_help = false;
        }
        return;
    }

    match code {
        AppKeyCode::Char('q') | AppKeyCode::Esc => app.should_quit = true,
        AppKeyCode::Char('?') => app.show_help = true,
        AppKeyCode::Char('r') | AppKeyCode::Char('n') => {
            app.pending_action = Some(AppAction::NewRound);
        }
        AppKeyCode::Up | AppKeyCode::Char('k') => app.move_focus(-1),
        AppKeyCode::Down | AppKeyCode::Char('j') => app.move_focus(1),
        AppKeyCode::Enter => app.select_choice(app.focused_choice),
        AppKeyCode::Char(c) if c.is_ascii_digit() && !event.ctrl && !event.alt => {
            if let Some(digit) = c.to_digit(10)
                && digit >= 1
            {
                app.select_choice(digit as usize - 1);
            }
        }
        _ => {}
    }
}

/// Handle a runtime-agnostic mouse event.
///
/// `event.column` and `event.row` must already be in terminal cell
/// coordinates. Returns `true` if the UI needs to be redrawn.
pub fn handle_mouse_event(app: &mut AppState, event: AppMouseEvent) -> bool {
    if app.show_help {
        return false;
    }

    let position = (event.column, event.row);

    match event.kind {
        AppMouseKind::LeftDown => {
            if let Some(area) = app.refresh_area
                && area.contains(position.into())
            {
                app.pending_action = Some(AppAction::NewRound);
                return true;
            }
            // A click on the failed frame retries directly.
            if let Some(area) = app.frame_area
                && area.contains(position.into())
                && matches!(app.frame, FrameState::Failed)
            {
                app.pending_action = Some(AppAction::NewRound);
                return true;
            }
            if let Some(idx) = option_row_at(app, event.column, event.row) {
                app.focused_choice = idx;
                app.select_choice(idx);
                return true;
            }
            false
        }
        AppMouseKind::ScrollUp | AppMouseKind::ScrollDown => {
            let over_options = app
                .options_content_area
                .is_some_and(|area| area.contains(position.into()));
            if over_options && app.round.is_some() {
                let direction = if event.kind == AppMouseKind::ScrollDown {
                    1
                } else {
                    -1
                };
                app.move_focus(direction);
                return true;
            }
            false
        }
    }
}

/// Answer row under the given cell coordinates, if any.
fn option_row_at(app: &AppState, column: u16, row: u16) -> Option<usize> {
    let area = app.options_content_area?;
    if !area.contains((column, row).into()) {
        return None;
    }
    let round = app.round.as_ref()?;
    let idx = row.saturating_sub(area.y) as usize;
    (idx < round.choices.len()).then_some(idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_core::input::{AppKeyCode, AppKeyEvent, AppMouseEvent, AppMouseKind};
    use crate::app_core::state::{AppAction, AppState, FrameState};
    use crate::data::ImageCard;
    use crate::quiz::QuizRound;
    use crate::theme;
    use ratatui::layout::Rect;

    fn make_key(code: AppKeyCode) -> AppKeyEvent {
        AppKeyEvent {
            code,
            ctrl: false,
            alt: false,
            is_release: false,
        }
    }

    fn make_mouse(kind: AppMouseKind, column: u16, row: u16) -> AppMouseEvent {
        AppMouseEvent { kind, column, row }
    }

    fn make_test_app() -> AppState {
        AppState::new(
            vec!["beagle".to_string(), "pug".to_string(), "akita".to_string()],
            3,
            theme::Theme::Dracula.config(),
            "v0.1.0".to_string(),
        )
    }

    fn make_answered_app(choices: &[&str], correct: &str) -> AppState {
        let mut app = make_test_app();
        app.apply_round(
            QuizRound {
                image_url: "https://images.dog.ceo/breeds/test/n0.jpg".to_string(),
                correct_breed: correct.to_string(),
                choices: choices.iter().map(|c| c.to_string()).collect(),
            },
            ImageCard {
                file_name: "n0.jpg".to_string(),
                content_type: Some("image/jpeg".to_string()),
                byte_len: 1,
            },
        );
        app
    }

    #[test]
    fn test_quit_keys() {
        let mut app = make_test_app();
        handle_key_event(&mut app, make_key(AppKeyCode::Char('q')));
        assert!(app.should_quit);

        let mut app = make_test_app();
        handle_key_event(&mut app, make_key(AppKeyCode::Esc));
        assert!(app.should_quit);
    }

    #[test]
    fn test_refresh_keys_park_action() {
        let mut app = make_test_app();
        handle_key_event(&mut app, make_key(AppKeyCode::Char('r')));
        assert!(matches!(app.pending_action, Some(AppAction::NewRound)));

        let mut app = make_test_app();
        handle_key_event(&mut app, make_key(AppKeyCode::Char('n')));
        assert!(matches!(app.pending_action, Some(AppAction::NewRound)));
    }

    #[test]
    fn test_digit_key_answers_correctly() {
        let mut app = make_answered_app(&["pug", "beagle", "akita"], "beagle");
        handle_key_event(&mut app, make_key(AppKeyCode::Char('2')));
        assert_eq!(app.answered, Some(1));
        assert_eq!(app.answered_correct(), Some(true));
    }

    #[test]
    fn test_wrong_digit_reveals_correct_row() {
        let mut app = make_answered_app(&["pug", "beagle", "akita"], "beagle");
        handle_key_event(&mut app, make_key(AppKeyCode::Char('3')));
        assert_eq!(app.answered, Some(2));
        assert_eq!(app.answered_correct(), Some(false));
        assert_eq!(app.round.as_ref().unwrap().correct_idx(), Some(1));
    }

    #[test]
    fn test_out_of_range_digits_do_nothing() {
        let mut app = make_answered_app(&["pug", "beagle", "akita"], "beagle");
        handle_key_event(&mut app, make_key(AppKeyCode::Char('0')));
        handle_key_event(&mut app, make_key(AppKeyCode::Char('9')));
        assert_eq!(app.answered, None);
    }

    #[test]
    fn test_answers_after_lock_are_noops() {
        let mut app = make_answered_app(&["pug", "beagle", "akita"], "beagle");
        handle_key_event(&mut app, make_key(AppKeyCode::Char('1')));
        assert_eq!(app.answered, Some(0));
        assert_eq!(app.rounds_played, 1);

        handle_key_event(&mut app, make_key(AppKeyCode::Char('2')));
        handle_key_event(&mut app, make_key(AppKeyCode::Enter));
        app.options_content_area = Some(Rect::new(1, 10, 30, 3));
        handle_mouse_event(&mut app, make_mouse(AppMouseKind::LeftDown, 2, 11));

        assert_eq!(app.answered, Some(0));
        assert_eq!(app.rounds_played, 1);
    }

    #[test]
    fn test_focus_navigation_and_enter() {
        let mut app = make_answered_app(&["pug", "beagle", "akita"], "beagle");

        handle_key_event(&mut app, make_key(AppKeyCode::Down));
        assert_eq!(app.focused_choice, 1);
        handle_key_event(&mut app, make_key(AppKeyCode::Char('j')));
        assert_eq!(app.focused_choice, 2);
        handle_key_event(&mut app, make_key(AppKeyCode::Char('k')));
        assert_eq!(app.focused_choice, 1);

        handle_key_event(&mut app, make_key(AppKeyCode::Enter));
        assert_eq!(app.answered, Some(1));
        assert_eq!(app.answered_correct(), Some(true));
    }

    #[test]
    fn test_keys_without_round_do_not_answer() {
        let mut app = make_test_app();
        handle_key_event(&mut app, make_key(AppKeyCode::Char('1')));
        handle_key_event(&mut app, make_key(AppKeyCode::Enter));
        handle_key_event(&mut app, make_key(AppKeyCode::Down));
        assert_eq!(app.answered, None);
        assert_eq!(app.rounds_played, 0);
    }

    #[test]
    fn test_help_overlay_captures_keys() {
        let mut app = make_answered_app(&["pug", "beagle", "akita"], "beagle");
        handle_key_event(&mut app, make_key(AppKeyCode::Char('?')));
        assert!(app.show_help);

        // Keys under the overlay neither answer nor refresh.
        handle_key_event(&mut app, make_key(AppKeyCode::Char('1')));
        handle_key_event(&mut app, make_key(AppKeyCode::Char('r')));
        assert_eq!(app.answered, None);
        assert!(app.pending_action.is_none());

        handle_key_event(&mut app, make_key(AppKeyCode::Esc));
        assert!(!app.show_help);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_release_events_are_ignored() {
        let mut app = make_test_app();
        let release = AppKeyEvent {
            code: AppKeyCode::Char('q'),
            ctrl: false,
            alt: false,
            is_release: true,
        };
        handle_key_event(&mut app, release);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_mouse_click_answers_row_under_cursor() {
        let mut app = make_answered_app(&["pug", "beagle", "akita"], "beagle");
        app.options_content_area = Some(Rect::new(1, 10, 30, 3));

        let transitioned = handle_mouse_event(&mut app, make_mouse(AppMouseKind::LeftDown, 5, 11));

        assert!(transitioned);
        assert_eq!(app.answered, Some(1));
        assert_eq!(app.answered_correct(), Some(true));
    }

    #[test]
    fn test_mouse_click_outside_rows_does_nothing() {
        let mut app = make_answered_app(&["pug", "beagle", "akita"], "beagle");
        app.options_content_area = Some(Rect::new(1, 10, 30, 3));

        let transitioned = handle_mouse_event(&mut app, make_mouse(AppMouseKind::LeftDown, 5, 20));
        assert!(!transitioned);
        assert_eq!(app.answered, None);
    }

    #[test]
    fn test_mouse_click_refresh_button_parks_action() {
        let mut app = make_test_app();
        app.refresh_area = Some(Rect::new(40, 20, 16, 1));

        let transitioned = handle_mouse_event(&mut app, make_mouse(AppMouseKind::LeftDown, 42, 20));
        assert!(transitioned);
        assert!(matches!(app.pending_action, Some(AppAction::NewRound)));
    }

    #[test]
    fn test_mouse_scroll_moves_focus() {
        let mut app = make_answered_app(&["pug", "beagle", "akita"], "beagle");
        app.options_content_area = Some(Rect::new(1, 10, 30, 3));

        assert!(handle_mouse_event(
            &mut app,
            make_mouse(AppMouseKind::ScrollDown, 2, 11)
        ));
        assert_eq!(app.focused_choice, 1);
        assert!(handle_mouse_event(
            &mut app,
            make_mouse(AppMouseKind::ScrollUp, 2, 11)
        ));
        assert_eq!(app.focused_choice, 0);
    }

    #[test]
    fn test_failed_round_leaves_options_inert() {
        let mut app = make_answered_app(&["pug", "beagle", "akita"], "beagle");
        app.options_content_area = Some(Rect::new(1, 10, 30, 3));
        app.fail_round();

        assert!(matches!(app.frame, FrameState::Failed));
        let transitioned = handle_mouse_event(&mut app, make_mouse(AppMouseKind::LeftDown, 2, 11));
        assert!(!transitioned);
        assert_eq!(app.answered, None);
    }

    #[test]
    fn test_click_on_failed_frame_retries() {
        let mut app = make_test_app();
        app.frame_area = Some(Rect::new(0, 0, 40, 8));
        app.fail_round();

        let transitioned = handle_mouse_event(&mut app, make_mouse(AppMouseKind::LeftDown, 5, 3));
        assert!(transitioned);
        assert!(matches!(app.pending_action, Some(AppAction::NewRound)));

        // A click on a healthy frame does nothing.
        let mut app = make_test_app();
        app.frame_area = Some(Rect::new(0, 0, 40, 8));
        let transitioned = handle_mouse_event(&mut app, make_mouse(AppMouseKind::LeftDown, 5, 3));
        assert!(!transitioned);
        assert!(app.pending_action.is_none());
    }
}
