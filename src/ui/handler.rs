use color_eyre::Result;
use ratatui::crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::ui::app::App;
use crate::ui::input::InputHandler;
use crate::ui::layout;
use crate::ui::message::AppMessage;
use crate::ui::tui::{TerminalEvent, Tui};

impl App {
    /// Wait for one terminal event, then drain whatever the background
    /// tasks and the engine queued up in the meantime.
    pub(crate) async fn handle_events(&mut self, tui: &mut Tui) -> Result<()> {
        if let Some(event) = tui.next().await {
            match event {
                TerminalEvent::Key(key) => {
                    if let Some(message) = InputHandler::handle_key(key) {
                        self.update(message).await;
                    }
                }
                TerminalEvent::Mouse(mouse) => {
                    if let Some(message) = self.handle_mouse(mouse) {
                        self.update(message).await;
                    }
                }
                TerminalEvent::Tick
                | TerminalEvent::Resize(..)
                | TerminalEvent::FocusGained
                | TerminalEvent::FocusLost => {}
            }
        }

        while let Ok(event) = self.event_rx.try_recv() {
            self.on_event(event).await;
        }
        Ok(())
    }

    fn handle_mouse(&self, mouse: MouseEvent) -> Option<AppMessage> {
        let areas = self.areas?;
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let scrubber = layout::scrubber(areas.player);
                if layout::contains(scrubber, mouse.column, mouse.row) {
                    return Some(AppMessage::SeekFraction(layout::scrub_fraction(
                        scrubber,
                        mouse.column,
                    )));
                }
                layout::row_at(
                    areas.list,
                    mouse.column,
                    mouse.row,
                    self.ui.scroll,
                    self.audio.songs().len(),
                )
                .map(AppMessage::Select)
            }
            MouseEventKind::ScrollUp => Some(AppMessage::VolumeUp),
            MouseEventKind::ScrollDown => Some(AppMessage::VolumeDown),
            _ => None,
        }
    }
}
