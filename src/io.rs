use crossterm::event::Event as CrossTermEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;

use crate::events::AppEvent;
use crate::events::CameraEvent;
use crate::events::Event;
use crate::events::FieldEvent;

/// Converts a crossterm event into a field event
pub fn convert_event(event: CrossTermEvent) -> Option<Event> {
    match event {
        CrossTermEvent::Key(key_event) => convert_key(key_event),
        CrossTermEvent::Resize(cols, rows) => Some(Event::AppEvent(AppEvent::CameraEvent(
            CameraEvent::Resize { cols, rows },
        ))),
        _ => None,
    }
}

fn convert_key(key_event: KeyEvent) -> Option<Event> {
    // Some terminals report releases too
    if key_event.kind == KeyEventKind::Release {
        return None;
    }

    let camera = |ev| Some(Event::AppEvent(AppEvent::CameraEvent(ev)));
    let pan = |dx, dy| camera(CameraEvent::Move { dx, dy });

    match key_event {
        KeyEvent {
            code: KeyCode::Char('q'),
            ..
        }
        | KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => Some(Event::AppEvent(AppEvent::Exit)),
        KeyEvent {
            code: KeyCode::Char('n'),
            ..
        } => Some(Event::FieldEvent(FieldEvent::NextStep)),
        KeyEvent {
            code: KeyCode::Char(']'),
            ..
        } => Some(Event::AppEvent(AppEvent::LevelUp)),
        KeyEvent {
            code: KeyCode::Char('['),
            ..
        } => Some(Event::AppEvent(AppEvent::LevelDown)),
        KeyEvent {
            code: KeyCode::Char('h') | KeyCode::Left,
            ..
        } => pan(-1, 0),
        KeyEvent {
            code: KeyCode::Char('j') | KeyCode::Down,
            ..
        } => pan(0, 1),
        KeyEvent {
            code: KeyCode::Char('k') | KeyCode::Up,
            ..
        } => pan(0, -1),
        KeyEvent {
            code: KeyCode::Char('l') | KeyCode::Right,
            ..
        } => pan(1, 0),
        KeyEvent {
            code: KeyCode::Char('0'),
            ..
        } => camera(CameraEvent::ResetView),
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use crossterm::event::Event as CrossTermEvent;
    use crossterm::event::KeyCode;
    use crossterm::event::KeyEvent;
    use crossterm::event::KeyEventKind;
    use crossterm::event::KeyModifiers;

    use super::convert_event;
    use crate::events::AppEvent;
    use crate::events::CameraEvent;
    use crate::events::Event;
    use crate::events::FieldEvent;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> CrossTermEvent {
        CrossTermEvent::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn exit_keys() {
        let exit = Some(Event::AppEvent(AppEvent::Exit));

        assert_eq!(convert_event(key(KeyCode::Char('q'), KeyModifiers::NONE)), exit);
        assert_eq!(
            convert_event(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            exit
        );
        assert_eq!(convert_event(key(KeyCode::Char('c'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn next_step_key() {
        assert_eq!(
            convert_event(key(KeyCode::Char('n'), KeyModifiers::NONE)),
            Some(Event::FieldEvent(FieldEvent::NextStep))
        );
    }

    #[test]
    fn pan_keys() {
        assert_eq!(
            convert_event(key(KeyCode::Char('h'), KeyModifiers::NONE)),
            Some(Event::AppEvent(AppEvent::CameraEvent(CameraEvent::Move {
                dx: -1,
                dy: 0
            })))
        );
        assert_eq!(
            convert_event(key(KeyCode::Down, KeyModifiers::NONE)),
            Some(Event::AppEvent(AppEvent::CameraEvent(CameraEvent::Move {
                dx: 0,
                dy: 1
            })))
        );
    }

    #[test]
    fn releases_are_ignored() {
        let mut ev = KeyEvent::new(KeyCode::Char('n'), KeyModifiers::NONE);
        ev.kind = KeyEventKind::Release;

        assert_eq!(convert_event(CrossTermEvent::Key(ev)), None);
    }

    #[test]
    fn resize() {
        assert_eq!(
            convert_event(CrossTermEvent::Resize(80, 24)),
            Some(Event::AppEvent(AppEvent::CameraEvent(CameraEvent::Resize {
                cols: 80,
                rows: 24
            })))
        );
    }
}
