use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "spindle", version, about = "Self-hosted playlist player for the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Base URL of the content service the player fetches from
    #[arg(long, env = "SPINDLE_SERVER_URL", default_value = "http://127.0.0.1:8080")]
    pub server_url: String,

    /// Override the data directory (defaults to the platform data dir)
    #[arg(long, env = "SPINDLE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the log filter (equivalent to setting RUST_LOG)
    #[arg(long, env = "RUST_LOG")]
    pub log_filter: Option<String>,

    /// Run without an audio device (state machine only, silent)
    #[arg(long, env = "SPINDLE_NO_AUDIO", default_value_t = false)]
    pub no_audio: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the content service instead of the player
    Serve(ServeArgs),
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, env = "SPINDLE_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "SPINDLE_PORT", default_value_t = 8080)]
    pub port: u16,

    /// JSON file holding the playlist
    #[arg(long, env = "SPINDLE_SONGS_FILE", default_value = "./data/songs.json")]
    pub songs_file: PathBuf,

    /// Directory the audio files are served from
    #[arg(long, env = "SPINDLE_MUSIC_DIR", default_value = "./music")]
    pub music_dir: PathBuf,

    /// Allowed CORS origins, comma-separated, or * for all
    #[arg(long, env = "SPINDLE_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,
}
