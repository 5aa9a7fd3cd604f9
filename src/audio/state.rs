use crate::model::Song;

/// The playback state machine. `Paused` also covers the post-failure
/// state: a rejected load leaves the song selected but paused.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackState {
    Stopped,
    Playing(Song),
    Paused(Song),
}

impl PlaybackState {
    pub fn is_playing(&self) -> bool {
        matches!(self, PlaybackState::Playing(_))
    }

    pub fn song(&self) -> Option<&Song> {
        match self {
            PlaybackState::Playing(s) | PlaybackState::Paused(s) => Some(s),
            PlaybackState::Stopped => None,
        }
    }
}
