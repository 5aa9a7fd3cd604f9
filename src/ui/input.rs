use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ui::message::AppMessage;

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key(key: KeyEvent) -> Option<AppMessage> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(AppMessage::Quit),
            (KeyCode::Char('q'), _) => Some(AppMessage::Quit),
            (KeyCode::Char(' '), _) => Some(AppMessage::TogglePlayPause),
            (KeyCode::Char('n'), _) => Some(AppMessage::NextTrack),
            (KeyCode::Char('p'), _) => Some(AppMessage::PreviousTrack),
            (KeyCode::Char('j') | KeyCode::Down, _) => Some(AppMessage::MoveDown),
            (KeyCode::Char('k') | KeyCode::Up, _) => Some(AppMessage::MoveUp),
            (KeyCode::Char('g'), _) => Some(AppMessage::JumpFirst),
            (KeyCode::Char('G'), _) => Some(AppMessage::JumpLast),
            (KeyCode::Enter, _) => Some(AppMessage::Activate),
            (KeyCode::Right, _) => Some(AppMessage::SeekForward),
            (KeyCode::Left, _) => Some(AppMessage::SeekBackward),
            (KeyCode::Char(c @ '0'..='9'), _) => Some(AppMessage::SeekTenth(c as u8 - b'0')),
            (KeyCode::Char('+') | KeyCode::Char('='), _) => Some(AppMessage::VolumeUp),
            (KeyCode::Char('-'), _) => Some(AppMessage::VolumeDown),
            (KeyCode::Char('m'), _) => Some(AppMessage::ToggleMute),
            (KeyCode::Char('t'), _) => Some(AppMessage::ToggleTheme),
            (KeyCode::Char('r'), _) => Some(AppMessage::Reload),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn transport_keys_map_to_transport_messages() {
        assert_eq!(
            InputHandler::handle_key(key(KeyCode::Char(' '))),
            Some(AppMessage::TogglePlayPause)
        );
        assert_eq!(
            InputHandler::handle_key(key(KeyCode::Char('n'))),
            Some(AppMessage::NextTrack)
        );
        assert_eq!(
            InputHandler::handle_key(key(KeyCode::Char('p'))),
            Some(AppMessage::PreviousTrack)
        );
    }

    #[test]
    fn digits_seek_to_tenths() {
        assert_eq!(
            InputHandler::handle_key(key(KeyCode::Char('0'))),
            Some(AppMessage::SeekTenth(0))
        );
        assert_eq!(
            InputHandler::handle_key(key(KeyCode::Char('7'))),
            Some(AppMessage::SeekTenth(7))
        );
    }

    #[test]
    fn unknown_keys_map_to_nothing() {
        assert_eq!(InputHandler::handle_key(key(KeyCode::Char('z'))), None);
    }
}
