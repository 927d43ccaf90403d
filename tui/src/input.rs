//! Crossterm event handling.
//!
//! Drains the event queue without blocking (the frame loop owns the
//! cadence) and maps key presses to App operations. The history overlay
//! captures navigation keys while open; everything else routes by mode.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use nebula_engine::{App, KeyType, Mode, NavDir};

/// Drain and apply all pending terminal events.
pub fn handle_events(app: &mut App) -> io::Result<()> {
    while event::poll(Duration::ZERO)? {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
            Event::Paste(text) => {
                if app.mode() == Mode::Ai && !app.history_open() {
                    app.chat_input_str(&text);
                }
            }
            _ => {}
        }
    }
    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Ctrl+C always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    if key.code == KeyCode::Tab {
        app.close_history();
        app.toggle_mode();
        return;
    }

    if key.code == KeyCode::F(2) {
        app.toggle_history();
        return;
    }

    if app.history_open() {
        handle_history_key(app, key);
        return;
    }

    match app.mode() {
        Mode::Standard => handle_calculator_key(app, key),
        Mode::Ai => handle_chat_key(app, key),
    }
}

fn handle_history_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.move_history_cursor(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_history_cursor(1),
        KeyCode::Enter => copy_selected_result(app),
        KeyCode::Char('d') | KeyCode::Delete => {
            app.clear_history();
            app.set_status("History cleared");
        }
        KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('q') => app.close_history(),
        _ => {}
    }
}

/// Copy the selected result to the system clipboard.
fn copy_selected_result(app: &mut App) {
    let Some(result) = app.selected_history().map(|item| item.result().to_string()) else {
        return;
    };
    match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(result)) {
        Ok(()) => app.set_status("Result copied to clipboard"),
        Err(e) => {
            tracing::warn!(%e, "clipboard unavailable");
            app.set_status("Clipboard unavailable");
        }
    }
}

fn handle_calculator_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c @ '0'..='9') => {
            let digit = c.to_string();
            app.press_key(&digit, KeyType::Number);
        }
        KeyCode::Char('.') => app.press_key(".", KeyType::Number),
        KeyCode::Char(op @ ('+' | '-' | '*' | '/')) => {
            let token = op.to_string();
            app.press_key(&token, KeyType::Operator);
        }
        KeyCode::Char('=') | KeyCode::Enter => app.press_key("=", KeyType::Action),
        KeyCode::Char('%') => app.press_key("%", KeyType::Action),
        KeyCode::Backspace => app.press_key("⌫", KeyType::Action),
        KeyCode::Char('c') => app.press_key("C", KeyType::Action),
        KeyCode::Esc => app.press_key("AC", KeyType::Action),
        KeyCode::Char('n') => app.press_key("+/-", KeyType::Action),
        KeyCode::Char('s') => app.toggle_scientific(),
        KeyCode::Char('h') => app.toggle_history(),
        KeyCode::Char('q') => app.quit(),
        KeyCode::Up => app.move_keypad_focus(NavDir::Up),
        KeyCode::Down => app.move_keypad_focus(NavDir::Down),
        KeyCode::Left => app.move_keypad_focus(NavDir::Left),
        KeyCode::Right => app.move_keypad_focus(NavDir::Right),
        KeyCode::Char(' ') => app.press_focused_key(),
        _ => {}
    }
}

fn handle_chat_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.submit_prompt(),
        KeyCode::Backspace => app.chat_backspace(),
        KeyCode::Up => app.chat_scroll_up(1),
        KeyCode::Down => app.chat_scroll_down(1),
        KeyCode::PageUp => app.chat_scroll_up(10),
        KeyCode::PageDown => app.chat_scroll_down(10),
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            if !app.solver_pending() {
                // Ctrl+U clears the draft, shell-style.
                while !app.chat().draft().is_empty() {
                    app.chat_backspace();
                }
            }
        }
        KeyCode::Char(c) => app.chat_input_char(c),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use nebula_engine::{App, AppOptions, Mode};

    use super::handle_key;

    fn app() -> App {
        App::with_api(AppOptions::default(), None)
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn typed_digits_reach_the_engine() {
        let mut app = app();
        press(&mut app, KeyCode::Char('4'));
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.calc().display_value(), "42");
    }

    #[test]
    fn enter_evaluates_expression() {
        let mut app = app();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('+'));
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.calc().display_value(), "4");
        assert_eq!(app.history().len(), 1);
    }

    #[test]
    fn escape_clears_all() {
        let mut app = app();
        press(&mut app, KeyCode::Char('9'));
        press(&mut app, KeyCode::Char('+'));
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.calc().display_value(), "0");
        assert_eq!(app.calc().expression_text(), "");
    }

    #[test]
    fn tab_switches_mode_and_q_types_in_chat() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.mode(), Mode::Ai);
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.chat().draft(), "q");
        assert!(!app.should_quit());
    }

    #[test]
    fn ctrl_c_quits_in_any_mode() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit());
    }

    #[test]
    fn history_overlay_captures_navigation() {
        let mut app = app();
        press(&mut app, KeyCode::Char('h'));
        assert!(app.history_open());
        // 'q' closes the overlay instead of quitting.
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.history_open());
        assert!(!app.should_quit());
    }

    #[test]
    fn space_presses_focused_key() {
        let mut app = app();
        press(&mut app, KeyCode::Char(' '));
        // Default focus is the "7" key.
        assert_eq!(app.calc().display_value(), "7");
    }

    #[test]
    fn backspace_maps_to_delete_action() {
        let mut app = app();
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.calc().display_value(), "1");
    }
}
