use std::sync::{
    Arc, RwLock,
    atomic::{AtomicBool, AtomicU8, Ordering},
};
use std::time::Duration;

use flume::Sender;
use tokio::sync::Mutex;
use tracing::warn;

use crate::audio::{
    engine::{Engine, EngineCommand},
    progress::TrackProgress,
    state::PlaybackState,
};
use crate::event::Event;
use crate::http::ApiService;
use crate::model::Song;

/// Drives the engine on behalf of the state machine: owns the shared
/// playback state, the progress mirror and the cancellable load task.
pub struct AudioController {
    engine: Arc<Engine>,
    api: Arc<ApiService>,
    state: Arc<RwLock<PlaybackState>>,
    progress: Arc<TrackProgress>,
    event_tx: Sender<Event>,
    load_task: Arc<Mutex<Option<tokio::task::JoinHandle<()>>>>,
    /// Set when a load was rejected; the next resume re-issues the load
    /// instead of resuming an empty sink.
    load_failed: Arc<AtomicBool>,
    volume: Arc<AtomicU8>,
    is_muted: Arc<AtomicBool>,
}

impl AudioController {
    pub fn new(engine: Engine, api: Arc<ApiService>, event_tx: Sender<Event>) -> Self {
        let progress = engine.progress();
        Self {
            engine: Arc::new(engine),
            api,
            state: Arc::new(RwLock::new(PlaybackState::Stopped)),
            progress,
            event_tx,
            load_task: Arc::new(Mutex::new(None)),
            load_failed: Arc::new(AtomicBool::new(false)),
            volume: Arc::new(AtomicU8::new(100)),
            is_muted: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Load `song` and start playback. Any in-flight load is aborted first;
    /// the state goes to `Playing` optimistically and falls back to
    /// `Paused` if the fetch is rejected.
    ///
    /// `abort()` only lands at an await point, so a load whose fetch has
    /// already resolved can still run its tail. Each load is stamped with
    /// the progress generation and skips its writes once the generation has
    /// moved; the stamp and all superseding writes happen under the state
    /// lock so the two cannot interleave.
    pub async fn play(&self, song: Song) {
        self.abort_load().await;

        let epoch = {
            let mut state = self.state.write().unwrap();
            self.progress.reset();
            let _ = self.engine.send(EngineCommand::Stop);
            self.progress
                .set_total_duration(Duration::from_secs_f64(song.duration.max(0.0)));
            self.load_failed.store(false, Ordering::Relaxed);
            self.apply_volume();
            *state = PlaybackState::Playing(song.clone());
            self.progress.generation()
        };

        let engine = self.engine.clone();
        let api = self.api.clone();
        let state = self.state.clone();
        let progress = self.progress.clone();
        let event_tx = self.event_tx.clone();
        let load_failed = self.load_failed.clone();
        let fallback_duration = Duration::from_secs_f64(song.duration.max(0.0));

        let task = tokio::spawn(async move {
            match api.fetch_audio(&song.src).await {
                Ok(bytes) => {
                    {
                        let _state = state.write().unwrap();
                        if progress.generation() != epoch {
                            return;
                        }
                        let _ = engine.send(EngineCommand::Load {
                            bytes,
                            fallback_duration,
                        });
                    }
                    let _ = event_tx.send(Event::TrackStarted(song));
                }
                Err(e) => {
                    {
                        let mut state = state.write().unwrap();
                        if progress.generation() != epoch {
                            return;
                        }
                        warn!(src = %song.src, error = %e, "track load rejected");
                        load_failed.store(true, Ordering::Relaxed);
                        *state = PlaybackState::Paused(song.clone());
                    }
                    let _ = event_tx.send(Event::PlaybackFailed(format!(
                        "could not load {}: {e}",
                        song.src
                    )));
                }
            }
        });

        let mut task_guard = self.load_task.lock().await;
        *task_guard = Some(task);
    }

    pub async fn pause(&self) {
        let _ = self.engine.send(EngineCommand::Pause);
        let mut state = self.state.write().unwrap();
        if let PlaybackState::Playing(song) = &*state {
            *state = PlaybackState::Paused(song.clone());
        }
    }

    /// Resume a paused song. If the last load was rejected this re-issues
    /// the load instead (user-initiated retry, once per call).
    pub async fn resume(&self) {
        if self.load_failed.swap(false, Ordering::Relaxed) {
            let song = {
                let state = self.state.read().unwrap();
                state.song().cloned()
            };
            if let Some(song) = song {
                self.play(song).await;
            }
            return;
        }

        let _ = self.engine.send(EngineCommand::Resume);
        let mut state = self.state.write().unwrap();
        if let PlaybackState::Paused(song) = &*state {
            *state = PlaybackState::Playing(song.clone());
        }
    }

    pub async fn stop(&self) {
        self.abort_load().await;
        let mut state = self.state.write().unwrap();
        self.progress.reset();
        let _ = self.engine.send(EngineCommand::Stop);
        self.load_failed.store(false, Ordering::Relaxed);
        *state = PlaybackState::Stopped;
    }

    /// Engine-reported playback failure: keep the song selected, fall back
    /// to paused. No automatic retry.
    pub fn mark_paused(&self) {
        self.load_failed.store(true, Ordering::Relaxed);
        let mut state = self.state.write().unwrap();
        if let PlaybackState::Playing(song) = &*state {
            *state = PlaybackState::Paused(song.clone());
        }
    }

    /// Seek to `fraction * duration`. No-op when nothing is loaded; does
    /// not change the playing/paused flag.
    pub fn seek_fraction(&self, fraction: f64) {
        if self.current_song().is_none() {
            return;
        }
        let (_, total_ms) = self.progress.get();
        if total_ms == 0 {
            return;
        }
        let pos = Duration::from_millis((fraction.clamp(0.0, 1.0) * total_ms as f64) as u64);
        self.seek_to(pos);
    }

    pub fn seek_to(&self, pos: Duration) {
        if self.current_song().is_none() {
            return;
        }
        let (_, total_ms) = self.progress.get();
        let pos = pos.min(Duration::from_millis(total_ms));
        let _ = self.engine.send(EngineCommand::Seek(pos));
        self.progress.set_position(pos);
    }

    async fn abort_load(&self) {
        let mut task_guard = self.load_task.lock().await;
        if let Some(task) = task_guard.take() {
            task.abort();
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state.read().unwrap().clone()
    }

    pub fn is_playing(&self) -> bool {
        self.state.read().unwrap().is_playing()
    }

    pub fn current_song(&self) -> Option<Song> {
        self.state.read().unwrap().song().cloned()
    }

    pub fn progress(&self) -> &Arc<TrackProgress> {
        &self.progress
    }

    pub fn volume(&self) -> u8 {
        self.volume.load(Ordering::Relaxed)
    }

    pub fn is_muted(&self) -> bool {
        self.is_muted.load(Ordering::Relaxed)
    }

    pub fn set_volume(&self, volume: u8) {
        self.volume.store(volume.min(100), Ordering::Relaxed);
        self.is_muted.store(false, Ordering::Relaxed);
        self.apply_volume();
    }

    pub fn volume_up(&self, amount: u8) {
        let current = self.volume.load(Ordering::Relaxed);
        self.set_volume(current.saturating_add(amount));
    }

    pub fn volume_down(&self, amount: u8) {
        let current = self.volume.load(Ordering::Relaxed);
        self.set_volume(current.saturating_sub(amount));
    }

    pub fn toggle_mute(&self) {
        let muted = self.is_muted.load(Ordering::Relaxed);
        self.is_muted.store(!muted, Ordering::Relaxed);
        self.apply_volume();
    }

    fn apply_volume(&self) {
        let volume = if self.is_muted.load(Ordering::Relaxed) {
            0.0
        } else {
            self.volume.load(Ordering::Relaxed) as f32 / 100.0
        };
        let _ = self.engine.send(EngineCommand::SetVolume(volume));
    }
}
