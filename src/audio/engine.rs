use std::io::Cursor;
use std::sync::Arc;
use std::time::{Duration, Instant};

use flume::{Receiver, RecvTimeoutError, Sender};
use rodio::{Decoder, OutputStreamBuilder, Sink, Source};
use tracing::{debug, warn};

use crate::audio::error::AudioError;
use crate::audio::progress::TrackProgress;
use crate::event::Event;

/// How often the engine mirrors its position into the shared progress
/// atomics and checks for end-of-track.
const TICK: Duration = Duration::from_millis(100);

#[derive(Debug)]
pub enum EngineCommand {
    /// Decode and start playing a fully fetched track. `fallback_duration`
    /// is the playlist's duration field, used until the decoder knows
    /// better.
    Load {
        bytes: Vec<u8>,
        fallback_duration: Duration,
    },
    Pause,
    Resume,
    Stop,
    Seek(Duration),
    SetVolume(f32),
}

/// Which playback backend the engine thread runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// The system output device via rodio.
    Rodio,
    /// A silent clock with the same command surface, for `--no-audio`
    /// and tests.
    Null,
}

/// Handle to the engine thread. The rodio output stream is not `Send`,
/// so the stream and sink live on a dedicated thread and commands travel
/// over a channel. The command loop's receive timeout doubles as the
/// progress/end-of-track tick.
pub struct Engine {
    cmd_tx: Sender<EngineCommand>,
    progress: Arc<TrackProgress>,
}

impl Engine {
    pub fn spawn(backend: Backend, event_tx: Sender<Event>) -> Result<Self, AudioError> {
        let (cmd_tx, cmd_rx) = flume::unbounded();
        let progress = Arc::new(TrackProgress::new());
        let thread_progress = progress.clone();
        let (init_tx, init_rx) = flume::bounded(1);

        std::thread::Builder::new()
            .name("spindle-audio".into())
            .spawn(move || match backend {
                Backend::Rodio => run_rodio(cmd_rx, event_tx, thread_progress, init_tx),
                Backend::Null => {
                    let _ = init_tx.send(Ok(()));
                    run_null(cmd_rx, event_tx, thread_progress);
                }
            })
            .map_err(|e| AudioError::Device(e.to_string()))?;

        init_rx.recv().map_err(|_| AudioError::EngineGone)??;
        Ok(Self { cmd_tx, progress })
    }

    pub fn progress(&self) -> Arc<TrackProgress> {
        self.progress.clone()
    }

    pub fn send(&self, cmd: EngineCommand) -> Result<(), AudioError> {
        self.cmd_tx.send(cmd).map_err(|_| AudioError::EngineGone)
    }
}

fn run_rodio(
    cmd_rx: Receiver<EngineCommand>,
    event_tx: Sender<Event>,
    progress: Arc<TrackProgress>,
    init_tx: Sender<Result<(), AudioError>>,
) {
    let stream = match OutputStreamBuilder::open_default_stream() {
        Ok(stream) => {
            let _ = init_tx.send(Ok(()));
            stream
        }
        Err(e) => {
            let _ = init_tx.send(Err(AudioError::Device(e.to_string())));
            return;
        }
    };
    let sink = Sink::connect_new(stream.mixer());
    let mut loaded = false;

    loop {
        match cmd_rx.recv_timeout(TICK) {
            Ok(EngineCommand::Load {
                bytes,
                fallback_duration,
            }) => {
                sink.stop();
                match Decoder::new(Cursor::new(bytes)) {
                    Ok(source) => {
                        let total = source.total_duration().unwrap_or(fallback_duration);
                        progress.set_total_duration(total);
                        progress.set_position(Duration::ZERO);
                        sink.append(source);
                        sink.play();
                        loaded = true;
                        debug!(total_ms = total.as_millis() as u64, "track loaded");
                    }
                    Err(e) => {
                        loaded = false;
                        let err = AudioError::Decode(e.to_string());
                        warn!(error = %err, "decode failed");
                        let _ = event_tx.send(Event::PlaybackFailed(err.to_string()));
                    }
                }
            }
            Ok(EngineCommand::Pause) => sink.pause(),
            Ok(EngineCommand::Resume) => sink.play(),
            Ok(EngineCommand::Stop) => {
                sink.stop();
                loaded = false;
            }
            Ok(EngineCommand::Seek(pos)) => match sink.try_seek(pos) {
                Ok(()) => progress.set_position(pos),
                Err(e) => warn!(error = %e, "seek rejected"),
            },
            Ok(EngineCommand::SetVolume(volume)) => sink.set_volume(volume),
            Err(RecvTimeoutError::Timeout) => {
                if loaded {
                    if sink.empty() {
                        loaded = false;
                        let (_, total) = progress.get();
                        progress.set_position(Duration::from_millis(total));
                        let _ = event_tx.send(Event::TrackEnded);
                    } else if !sink.is_paused() {
                        progress.set_position(sink.get_pos());
                    }
                }
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}

/// A track "playing" on the null backend: wall-clock position, no sound.
struct NullTrack {
    base: Duration,
    started: Option<Instant>,
    duration: Duration,
}

impl NullTrack {
    fn position(&self) -> Duration {
        match self.started {
            Some(at) => self.base + at.elapsed(),
            None => self.base,
        }
    }
}

fn run_null(
    cmd_rx: Receiver<EngineCommand>,
    event_tx: Sender<Event>,
    progress: Arc<TrackProgress>,
) {
    let mut track: Option<NullTrack> = None;

    loop {
        match cmd_rx.recv_timeout(TICK) {
            Ok(EngineCommand::Load {
                fallback_duration, ..
            }) => {
                progress.set_total_duration(fallback_duration);
                progress.set_position(Duration::ZERO);
                track = Some(NullTrack {
                    base: Duration::ZERO,
                    started: Some(Instant::now()),
                    duration: fallback_duration,
                });
            }
            Ok(EngineCommand::Pause) => {
                if let Some(t) = &mut track {
                    t.base = t.position();
                    t.started = None;
                }
            }
            Ok(EngineCommand::Resume) => {
                if let Some(t) = &mut track
                    && t.started.is_none()
                {
                    t.started = Some(Instant::now());
                }
            }
            Ok(EngineCommand::Stop) => track = None,
            Ok(EngineCommand::Seek(pos)) => {
                if let Some(t) = &mut track {
                    t.base = pos;
                    if t.started.is_some() {
                        t.started = Some(Instant::now());
                    }
                    progress.set_position(pos);
                }
            }
            Ok(EngineCommand::SetVolume(_)) => {}
            Err(RecvTimeoutError::Timeout) => {
                if let Some(t) = &track {
                    let pos = t.position();
                    progress.set_position(pos);
                    if t.duration > Duration::ZERO && pos >= t.duration {
                        progress.set_position(t.duration);
                        track = None;
                        let _ = event_tx.send(Event::TrackEnded);
                    }
                }
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_engine_mirrors_seek_into_progress() {
        let (event_tx, _event_rx) = flume::unbounded();
        let engine = Engine::spawn(Backend::Null, event_tx).unwrap();

        engine
            .send(EngineCommand::Load {
                bytes: Vec::new(),
                fallback_duration: Duration::from_secs(100),
            })
            .unwrap();
        engine.send(EngineCommand::Pause).unwrap();
        engine.send(EngineCommand::Seek(Duration::from_secs(30))).unwrap();

        // The engine thread applies commands in order; give it a moment.
        std::thread::sleep(Duration::from_millis(300));
        let (pos, total) = engine.progress().get();
        assert_eq!(total, 100_000);
        assert_eq!(pos, 30_000);
    }

    #[test]
    fn null_engine_signals_end_of_track() {
        let (event_tx, event_rx) = flume::unbounded();
        let engine = Engine::spawn(Backend::Null, event_tx).unwrap();

        engine
            .send(EngineCommand::Load {
                bytes: Vec::new(),
                fallback_duration: Duration::from_millis(50),
            })
            .unwrap();

        let evt = event_rx
            .recv_timeout(Duration::from_secs(2))
            .expect("expected a track-ended event");
        assert!(matches!(evt, Event::TrackEnded));
    }
}
