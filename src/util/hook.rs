use tracing::error;

use crate::ui::tui::Tui;

/// Leave the terminal usable when the player panics, then hand the panic
/// to the default hook so the report still prints.
pub fn set_panic_hook() {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        if let Err(e) = Tui::restore() {
            error!(error = %e, "could not restore the terminal");
        }
        hook(info);
    }));
}
