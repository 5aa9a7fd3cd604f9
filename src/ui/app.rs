use std::sync::Arc;

use color_eyre::Result;
use flume::{Receiver, Sender};
use ratatui::{
    style::Style,
    text::Line,
    widgets::Paragraph,
};
use tracing::{info, warn};

use crate::audio::engine::Backend;
use crate::audio::system::AudioSystem;
use crate::config::Settings;
use crate::event::Event;
use crate::http::ApiService;
use crate::ui::components::{player_bar::PlayerBar, song_list::SongList};
use crate::ui::layout::{self, Areas, ROW_HEIGHT};
use crate::ui::message::AppMessage;
use crate::ui::state::UiState;
use crate::ui::theme::{Theme, ThemeName};
use crate::ui::tui::Tui;

const SEEK_STEP_SECONDS: i64 = 5;
const VOLUME_STEP: u8 = 5;

pub struct App {
    pub(crate) settings: Settings,
    pub(crate) api: Arc<ApiService>,
    pub(crate) audio: AudioSystem,
    pub(crate) ui: UiState,
    pub(crate) event_tx: Sender<Event>,
    pub(crate) event_rx: Receiver<Event>,
    /// Regions of the last frame, for mouse hit-testing.
    pub(crate) areas: Option<Areas>,
    pub(crate) should_quit: bool,
}

impl App {
    pub fn new(settings: Settings) -> Result<Self> {
        let api = Arc::new(ApiService::new(&settings.server_url)?);
        let (event_tx, event_rx) = flume::unbounded();
        let backend = if settings.no_audio {
            Backend::Null
        } else {
            Backend::Rodio
        };
        let audio = AudioSystem::new(event_tx.clone(), api.clone(), backend)?;

        let ui = UiState {
            theme: ThemeName::load(&settings.theme_file()),
            ..Default::default()
        };

        Ok(Self {
            settings,
            api,
            audio,
            ui,
            event_tx,
            event_rx,
            areas: None,
            should_quit: false,
        })
    }

    pub async fn run(mut self) -> Result<()> {
        let mut tui = Tui::new()?.mouse(true);
        tui.enter()?;

        self.reload_playlist();
        while !self.should_quit {
            self.draw(&mut tui)?;
            self.handle_events(&mut tui).await?;
        }

        tui.exit()?;
        Ok(())
    }

    fn draw(&mut self, tui: &mut Tui) -> Result<()> {
        let theme = Theme::of(self.ui.theme);
        tui.draw(|frame| {
            let area = frame.area();
            let areas = layout::areas(area);
            self.areas = Some(areas);

            frame.buffer_mut().set_style(
                area,
                Style::default().bg(theme.background).fg(theme.foreground),
            );

            let len = self.audio.songs().len();
            self.ui.clamp_selection(len);
            self.ui
                .scroll_to_selection((areas.list.height / ROW_HEIGHT) as usize);

            let (position_ms, total_ms) = self.audio.progress().get();
            frame.render_widget(
                SongList::new(
                    self.audio.songs(),
                    self.audio.current_index(),
                    self.audio.is_playing(),
                    self.ui.selected,
                    self.ui.scroll,
                    position_ms,
                    total_ms,
                    theme,
                ),
                areas.list,
            );

            let song = self.audio.current_song();
            frame.render_widget(
                PlayerBar {
                    song: song.as_ref(),
                    is_playing: self.audio.is_playing(),
                    is_loading: self.ui.is_loading,
                    position_ms,
                    total_ms,
                    volume: self.audio.volume(),
                    is_muted: self.audio.is_muted(),
                    status: self.ui.status.as_deref(),
                    theme,
                },
                areas.player,
            );

            let hints = "enter play  j/k move  t theme  r reload  q quit";
            frame.render_widget(
                Paragraph::new(Line::raw(hints)).style(Style::default().fg(theme.muted)),
                areas.hints,
            );
        })?;
        Ok(())
    }

    pub(crate) async fn update(&mut self, message: AppMessage) {
        match message {
            AppMessage::Quit => self.should_quit = true,

            AppMessage::TogglePlayPause => {
                self.ui.status = None;
                self.audio.toggle_play_pause().await;
            }
            AppMessage::NextTrack => {
                self.ui.status = None;
                self.audio.next().await;
                self.follow_current();
            }
            AppMessage::PreviousTrack => {
                self.ui.status = None;
                self.audio.previous().await;
                self.follow_current();
            }
            AppMessage::SeekForward => self.audio.seek_relative(SEEK_STEP_SECONDS),
            AppMessage::SeekBackward => self.audio.seek_relative(-SEEK_STEP_SECONDS),
            AppMessage::SeekTenth(n) => self.audio.seek_fraction(f64::from(n) / 10.0),
            AppMessage::SeekFraction(fraction) => self.audio.seek_fraction(fraction),

            AppMessage::MoveUp => self.ui.move_up(),
            AppMessage::MoveDown => self.ui.move_down(self.audio.songs().len()),
            AppMessage::JumpFirst => self.ui.jump_first(),
            AppMessage::JumpLast => self.ui.jump_last(self.audio.songs().len()),
            AppMessage::Activate => {
                if self.ui.selected < self.audio.songs().len() {
                    self.ui.status = None;
                    self.audio.select(self.ui.selected).await;
                }
            }
            AppMessage::Select(index) => {
                if index < self.audio.songs().len() {
                    self.ui.status = None;
                    self.ui.selected = index;
                    self.audio.select(index).await;
                }
            }

            AppMessage::VolumeUp => self.audio.volume_up(VOLUME_STEP),
            AppMessage::VolumeDown => self.audio.volume_down(VOLUME_STEP),
            AppMessage::ToggleMute => self.audio.toggle_mute(),

            AppMessage::ToggleTheme => {
                self.ui.theme = self.ui.theme.toggled();
                self.ui.theme.persist(&self.settings.theme_file());
            }
            AppMessage::Reload => self.reload_playlist(),
        }
    }

    pub(crate) async fn on_event(&mut self, event: Event) {
        match event {
            Event::PlaylistFetched(songs) => {
                info!(count = songs.len(), "playlist loaded");
                self.ui.is_loading = false;
                self.ui.status = None;
                self.audio.set_songs(songs).await;
                self.ui.clamp_selection(self.audio.songs().len());
            }
            Event::PlaylistFailed(message) => {
                self.ui.is_loading = false;
                self.ui.status = Some(format!("playlist: {message}"));
            }
            Event::TrackStarted(song) => {
                info!(title = %song.title, "track started");
                self.ui.status = None;
            }
            Event::TrackEnded => {
                self.audio.on_track_ended().await;
                self.follow_current();
            }
            Event::PlaybackFailed(message) => {
                warn!(%message, "playback failed");
                self.audio.on_playback_failed();
                self.ui.status = Some(message);
            }
        }
    }

    /// Keep the keyboard cursor on the song the transport moved to.
    fn follow_current(&mut self) {
        if let Some(index) = self.audio.current_index() {
            self.ui.selected = index;
        }
    }

    fn reload_playlist(&mut self) {
        self.ui.is_loading = true;
        let api = self.api.clone();
        let event_tx = self.event_tx.clone();
        tokio::spawn(async move {
            match api.fetch_playlist().await {
                Ok(songs) => {
                    let _ = event_tx.send_async(Event::PlaylistFetched(songs)).await;
                }
                Err(e) => {
                    warn!(error = %e, "playlist fetch failed");
                    let _ = event_tx.send_async(Event::PlaylistFailed(e.to_string())).await;
                }
            }
        });
    }
}
