//! Key handling for the dashboard

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::App;
use super::event::Event;

pub fn handle_event(app: &mut App, event: Event) {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Resize(_, _) | Event::Tick => {}
    }
}

pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('c') {
            app.quit();
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => app.quit(),
        KeyCode::Left | KeyCode::Char('h') => app.prev_month(),
        KeyCode::Right | KeyCode::Char('l') => app.next_month(),
        KeyCode::Char('t') => app.current_month(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Char('r') => app.refresh(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::ExpensePaths;
    use crate::config::settings::Settings;
    use crate::models::Month;
    use crate::storage::Storage;
    use tempfile::TempDir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_navigation_keys() {
        let temp_dir = TempDir::new().unwrap();
        let storage =
            Storage::open(ExpensePaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        let settings = Settings::default();
        let mut app = App::new(&storage, &settings, Month::new(2025, 6).unwrap());

        handle_key_event(&mut app, key(KeyCode::Left));
        assert_eq!(app.month, Month::new(2025, 5).unwrap());

        handle_key_event(&mut app, key(KeyCode::Char('l')));
        handle_key_event(&mut app, key(KeyCode::Char('l')));
        assert_eq!(app.month, Month::new(2025, 7).unwrap());

        handle_key_event(&mut app, key(KeyCode::Char('t')));
        assert_eq!(app.month, Month::current());
        assert!(!app.should_quit);

        handle_key_event(&mut app, key(KeyCode::Esc));
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits_and_other_ctrl_keys_are_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let storage =
            Storage::open(ExpensePaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        let settings = Settings::default();
        let mut app = App::new(&storage, &settings, Month::new(2025, 6).unwrap());

        handle_key_event(&mut app, KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL));
        assert_eq!(app.month, Month::new(2025, 6).unwrap());

        handle_key_event(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }
}
