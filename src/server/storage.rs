use std::collections::HashSet;
use std::path::PathBuf;

use tracing::warn;

use crate::model::Song;
use crate::server::error::ServerError;

/// JSON-file-backed playlist. The file is re-read on every `load`, so
/// edits show up on the next request without any invalidation.
#[derive(Debug, Clone)]
pub struct PlaylistStore {
    path: PathBuf,
}

impl PlaylistStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Read the backing file. A missing or corrupt file yields an empty
    /// playlist with a warning; any other I/O failure propagates and maps
    /// to a 500.
    pub fn load(&self) -> Result<Vec<Song>, ServerError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %self.path.display(), "songs file missing, serving an empty playlist");
                return Ok(Vec::new());
            }
            Err(e) => return Err(ServerError::Io(e)),
        };

        let songs: Vec<Song> = match serde_json::from_str(&raw) {
            Ok(songs) => songs,
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "songs file is not valid JSON, serving an empty playlist"
                );
                return Ok(Vec::new());
            }
        };

        let mut seen = HashSet::new();
        for song in &songs {
            if !seen.insert(song.id) {
                warn!(id = song.id, title = %song.title, "duplicate song id in playlist");
            }
        }

        Ok(songs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_an_empty_playlist() {
        let dir = tempdir().unwrap();
        let store = PlaylistStore::new(dir.path().join("songs.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn corrupt_file_yields_an_empty_playlist() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("songs.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = PlaylistStore::new(path);
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn valid_file_is_parsed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("songs.json");
        std::fs::write(
            &path,
            r#"[{"id":1,"title":"One","artist":"A","duration":61.0,"src":"/music/one.mp3"}]"#,
        )
        .unwrap();

        let store = PlaylistStore::new(path);
        let songs = store.load().unwrap();
        assert_eq!(songs.len(), 1);
        assert_eq!(songs[0].title, "One");
    }

    #[test]
    fn file_is_reread_on_every_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("songs.json");
        std::fs::write(&path, "[]").unwrap();

        let store = PlaylistStore::new(path.clone());
        assert!(store.load().unwrap().is_empty());

        std::fs::write(
            &path,
            r#"[{"id":7,"title":"Late","artist":"A","duration":10.0,"src":"/music/late.mp3"}]"#,
        )
        .unwrap();
        assert_eq!(store.load().unwrap().len(), 1);
    }
}
