use std::path::PathBuf;

use directories::ProjectDirs;

use crate::cli::{Cli, Command};

/// Runtime settings merged from CLI arguments, `SPINDLE_*` env vars and defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base URL the player fetches the playlist and audio from.
    pub server_url: String,
    /// Platform data directory, used for logs and persisted UI state.
    pub data_dir: PathBuf,
    pub log_filter: Option<String>,
    pub no_audio: bool,

    /// Bind address for `serve`.
    pub host: String,
    pub port: u16,
    pub songs_file: PathBuf,
    pub music_dir: PathBuf,
    pub cors_origins: Vec<String>,
}

impl Settings {
    pub fn from_cli(cli: &Cli) -> color_eyre::Result<Self> {
        let data_dir = match &cli.data_dir {
            Some(dir) => dir.clone(),
            None => default_data_dir()?,
        };

        let (host, port, songs_file, music_dir, cors_origins) = match &cli.command {
            Some(Command::Serve(args)) => (
                args.host.clone(),
                args.port,
                args.songs_file.clone(),
                args.music_dir.clone(),
                parse_origins(&args.cors_origins),
            ),
            None => (
                "0.0.0.0".to_string(),
                8080,
                PathBuf::from("./data/songs.json"),
                PathBuf::from("./music"),
                vec!["*".to_string()],
            ),
        };

        Ok(Self {
            server_url: cli.server_url.trim_end_matches('/').to_string(),
            data_dir,
            log_filter: cli.log_filter.clone(),
            no_audio: cli.no_audio,
            host,
            port,
            songs_file,
            music_dir,
            cors_origins,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// File the selected theme is persisted to.
    pub fn theme_file(&self) -> PathBuf {
        self.data_dir.join("theme")
    }
}

fn default_data_dir() -> color_eyre::Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "spindle")
        .ok_or_else(|| color_eyre::eyre::eyre!("could not resolve a data directory"))?;
    Ok(dirs.data_local_dir().to_path_buf())
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
