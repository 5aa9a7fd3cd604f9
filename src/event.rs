use crate::model::Song;

/// App-level events carried over the flume channel between background
/// tasks, the audio engine and the UI loop.
#[derive(Debug, Clone)]
pub enum Event {
    PlaylistFetched(Vec<Song>),
    PlaylistFailed(String),
    TrackStarted(Song),
    TrackEnded,
    PlaybackFailed(String),
}
