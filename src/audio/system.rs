use std::sync::Arc;
use std::time::Duration;

use flume::Sender;

use crate::audio::{
    controller::AudioController,
    engine::{Backend, Engine},
    error::AudioError,
    progress::TrackProgress,
    queue::SongQueue,
    state::PlaybackState,
};
use crate::event::Event;
use crate::http::ApiService;
use crate::model::Song;

/// Facade gluing the queue and the controller together; the UI talks to
/// playback exclusively through this.
pub struct AudioSystem {
    controller: AudioController,
    queue: SongQueue,
}

impl AudioSystem {
    pub fn new(
        event_tx: Sender<Event>,
        api: Arc<ApiService>,
        backend: Backend,
    ) -> Result<Self, AudioError> {
        let engine = Engine::spawn(backend, event_tx.clone())?;
        let controller = AudioController::new(engine, api, event_tx);
        Ok(Self {
            controller,
            queue: SongQueue::new(),
        })
    }

    /// Replace the playlist. If the prior selection no longer fits the new
    /// list, the selection is cleared and playback stops.
    pub async fn set_songs(&mut self, songs: Vec<Song>) {
        if !self.queue.set_songs(songs) {
            self.controller.stop().await;
        }
    }

    /// Row activation: selecting the current song toggles play/pause,
    /// anything else loads and plays it.
    pub async fn select(&mut self, index: usize) {
        if self.queue.current_index() == Some(index) {
            self.toggle_play_pause().await;
            return;
        }
        if let Some(song) = self.queue.select(index).cloned() {
            self.controller.play(song).await;
        }
    }

    /// The player bar's main button: toggles the current song, or starts
    /// the first song when nothing is selected yet.
    pub async fn toggle_play_pause(&mut self) {
        match self.controller.state() {
            PlaybackState::Playing(_) => self.controller.pause().await,
            PlaybackState::Paused(_) => self.controller.resume().await,
            PlaybackState::Stopped => {
                if self.queue.is_empty() {
                    return;
                }
                let index = self.queue.current_index().unwrap_or(0);
                if let Some(song) = self.queue.select(index).cloned() {
                    self.controller.play(song).await;
                }
            }
        }
    }

    pub async fn next(&mut self) {
        if let Some(song) = self.queue.advance().cloned() {
            self.controller.play(song).await;
        }
    }

    pub async fn previous(&mut self) {
        if let Some(song) = self.queue.retreat().cloned() {
            self.controller.play(song).await;
        }
    }

    /// End-of-track from the engine behaves exactly like `next`.
    pub async fn on_track_ended(&mut self) {
        self.next().await;
    }

    /// Engine rejected playback: fall back to paused, keep the selection.
    pub fn on_playback_failed(&self) {
        self.controller.mark_paused();
    }

    pub fn seek_fraction(&self, fraction: f64) {
        self.controller.seek_fraction(fraction);
    }

    pub fn seek_relative(&self, delta_seconds: i64) {
        let (pos_ms, _) = self.controller.progress().get();
        let pos = if delta_seconds >= 0 {
            pos_ms.saturating_add(delta_seconds as u64 * 1000)
        } else {
            pos_ms.saturating_sub(delta_seconds.unsigned_abs() * 1000)
        };
        self.controller.seek_to(Duration::from_millis(pos));
    }

    pub fn set_volume(&self, volume: u8) {
        self.controller.set_volume(volume);
    }

    pub fn volume_up(&self, amount: u8) {
        self.controller.volume_up(amount);
    }

    pub fn volume_down(&self, amount: u8) {
        self.controller.volume_down(amount);
    }

    pub fn toggle_mute(&self) {
        self.controller.toggle_mute();
    }

    pub fn songs(&self) -> &[Song] {
        self.queue.songs()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.queue.current_index()
    }

    pub fn current_song(&self) -> Option<Song> {
        self.controller.current_song()
    }

    pub fn is_playing(&self) -> bool {
        self.controller.is_playing()
    }

    pub fn progress(&self) -> &Arc<TrackProgress> {
        self.controller.progress()
    }

    pub fn volume(&self) -> u8 {
        self.controller.volume()
    }

    pub fn is_muted(&self) -> bool {
        self.controller.is_muted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(id: u64) -> Song {
        Song {
            id,
            title: format!("song-{id}"),
            artist: "artist".into(),
            duration: 120.0,
            src: format!("/music/{id}.mp3"),
            cover_gradient: None,
        }
    }

    // The current-thread test runtime does not poll the spawned load task
    // until the test awaits something pending, so the synchronous state
    // transitions below are deterministic.
    async fn system(n: u64) -> AudioSystem {
        let (event_tx, _event_rx) = flume::unbounded();
        let api = Arc::new(ApiService::new("http://127.0.0.1:9").unwrap());
        let mut sys = AudioSystem::new(event_tx, api, Backend::Null).unwrap();
        sys.set_songs((0..n).map(song).collect()).await;
        sys
    }

    #[tokio::test]
    async fn select_then_next_lands_on_i_plus_n_mod_len() {
        let mut sys = system(4).await;
        sys.select(1).await;
        for _ in 0..3 {
            sys.next().await;
        }
        assert_eq!(sys.current_index(), Some(0));
        assert!(sys.is_playing());
    }

    #[tokio::test]
    async fn previous_from_first_wraps_to_last() {
        let mut sys = system(5).await;
        sys.select(0).await;
        sys.previous().await;
        assert_eq!(sys.current_index(), Some(4));
        assert!(sys.is_playing());
    }

    #[tokio::test]
    async fn selecting_the_current_song_toggles_instead() {
        let mut sys = system(3).await;
        sys.select(2).await;
        assert!(sys.is_playing());
        sys.select(2).await;
        assert!(!sys.is_playing());
        assert_eq!(sys.current_index(), Some(2));
        sys.select(2).await;
        assert!(sys.is_playing());
    }

    #[tokio::test]
    async fn toggling_twice_keeps_the_flag_and_the_progress() {
        let mut sys = system(3).await;
        sys.select(0).await;

        sys.progress().set_position(Duration::from_secs(42));
        let before = sys.progress().get();

        sys.toggle_play_pause().await;
        assert!(!sys.is_playing());
        sys.toggle_play_pause().await;
        assert!(sys.is_playing());

        assert_eq!(sys.progress().get(), before);
        assert_eq!(sys.current_index(), Some(0));
    }

    #[tokio::test]
    async fn track_ended_behaves_like_next() {
        let mut by_next = system(4).await;
        let mut by_ended = system(4).await;
        by_next.select(3).await;
        by_ended.select(3).await;

        by_next.next().await;
        by_ended.on_track_ended().await;

        assert_eq!(by_next.current_index(), by_ended.current_index());
        assert_eq!(by_next.current_index(), Some(0));
        assert!(by_ended.is_playing());
    }

    #[tokio::test]
    async fn empty_playlist_ignores_all_transport() {
        let mut sys = system(0).await;
        sys.toggle_play_pause().await;
        sys.next().await;
        sys.previous().await;
        sys.on_track_ended().await;
        assert_eq!(sys.current_index(), None);
        assert!(!sys.is_playing());
    }

    #[tokio::test]
    async fn main_button_with_no_selection_starts_the_first_song() {
        let mut sys = system(3).await;
        sys.toggle_play_pause().await;
        assert_eq!(sys.current_index(), Some(0));
        assert!(sys.is_playing());
    }

    #[tokio::test]
    async fn seek_is_a_noop_without_a_song() {
        let sys = system(3).await;
        sys.seek_fraction(0.5);
        assert_eq!(sys.progress().get(), (0, 0));
    }

    #[tokio::test]
    async fn seek_fraction_targets_the_right_position() {
        let mut sys = system(1).await;
        sys.select(0).await;
        // play() seeds the total from the playlist duration (120 s)
        sys.seek_fraction(0.25);
        let (pos, total) = sys.progress().get();
        assert_eq!(total, 120_000);
        assert_eq!(pos, 30_000);
    }

    #[tokio::test]
    async fn pausing_does_not_change_the_index() {
        let mut sys = system(3).await;
        sys.select(1).await;
        sys.toggle_play_pause().await;
        assert_eq!(sys.current_index(), Some(1));
    }

    #[tokio::test]
    async fn replacing_the_list_under_the_cursor_stops_playback() {
        let mut sys = system(4).await;
        sys.select(3).await;
        assert!(sys.is_playing());

        sys.set_songs((0..2).map(song).collect()).await;
        assert_eq!(sys.current_index(), None);
        assert!(!sys.is_playing());
    }

    // Multi-thread runtime so the load tasks run concurrently with the
    // selections. Both fetches fail fast (connection refused); the first
    // song's failure tail can resolve after the second selection and must
    // not clobber it.
    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn a_late_failure_from_a_replaced_load_is_discarded() {
        let (event_tx, _event_rx) = flume::unbounded();
        let api = Arc::new(ApiService::new("http://127.0.0.1:9").unwrap());
        let mut sys = AudioSystem::new(event_tx, api, Backend::Null).unwrap();
        sys.set_songs((0..2).map(song).collect()).await;

        sys.select(0).await;
        sys.select(1).await;

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(sys.current_index(), Some(1));
        assert_eq!(sys.current_song().map(|s| s.id), Some(1));
    }

    #[tokio::test]
    async fn playback_failure_falls_back_to_paused() {
        let mut sys = system(2).await;
        sys.select(1).await;
        assert!(sys.is_playing());

        sys.on_playback_failed();
        assert!(!sys.is_playing());
        assert_eq!(sys.current_index(), Some(1));
        assert!(sys.current_song().is_some());
    }
}
