/// Everything a key press or mouse click can ask the app to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppMessage {
    Quit,

    // Transport
    TogglePlayPause,
    NextTrack,
    PreviousTrack,
    SeekForward,
    SeekBackward,
    /// Jump to the n-th tenth of the track (the digit keys).
    SeekTenth(u8),
    /// Scrubber click, already resolved to a fraction of the bar width.
    SeekFraction(f64),

    // List navigation
    MoveUp,
    MoveDown,
    JumpFirst,
    JumpLast,
    /// Activate the keyboard selection.
    Activate,
    /// Activate a row by index (mouse).
    Select(usize),

    // Volume
    VolumeUp,
    VolumeDown,
    ToggleMute,

    ToggleTheme,
    Reload,
}
