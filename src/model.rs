use serde::{Deserialize, Serialize};

/// One playlist entry. Immutable once loaded; the whole list replaces
/// itself on every fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: u64,
    pub title: String,
    pub artist: String,
    /// Duration in seconds as listed by the playlist. The engine's decoded
    /// duration takes over once a track is loaded.
    pub duration: f64,
    /// Audio URL, usually relative to the content service (`/music/...`).
    pub src: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_gradient: Option<String>,
}

/// Wire shape of `GET /api/playlist`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistResponse {
    pub songs: Vec<Song>,
}

/// `M:SS` with zero-padded seconds, e.g. `3:07`.
pub fn fmt_mmss(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn song_fields_are_camel_case_on_the_wire() {
        let json = r#"{
            "id": 3,
            "title": "Night Drive",
            "artist": "Neon Fields",
            "duration": 214.0,
            "src": "/music/night-drive.mp3",
            "coverGradient": "from-purple-500 to-pink-500"
        }"#;
        let song: Song = serde_json::from_str(json).unwrap();
        assert_eq!(song.id, 3);
        assert_eq!(song.cover_gradient.as_deref(), Some("from-purple-500 to-pink-500"));

        let out = serde_json::to_string(&song).unwrap();
        assert!(out.contains("coverGradient"));
        assert!(!out.contains("cover_gradient"));
    }

    #[test]
    fn cover_gradient_is_optional_and_omitted_when_absent() {
        let json = r#"{"id":1,"title":"t","artist":"a","duration":10,"src":"/music/t.mp3"}"#;
        let song: Song = serde_json::from_str(json).unwrap();
        assert!(song.cover_gradient.is_none());

        let out = serde_json::to_string(&song).unwrap();
        assert!(!out.contains("coverGradient"));
    }

    #[test]
    fn playlist_response_wraps_songs() {
        let json = r#"{"songs":[{"id":1,"title":"t","artist":"a","duration":10,"src":"/m.mp3"}]}"#;
        let resp: PlaylistResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.songs.len(), 1);
    }

    #[test]
    fn mmss_pads_seconds() {
        assert_eq!(fmt_mmss(0), "0:00");
        assert_eq!(fmt_mmss(59), "0:59");
        assert_eq!(fmt_mmss(60), "1:00");
        assert_eq!(fmt_mmss(187), "3:07");
        assert_eq!(fmt_mmss(3600), "60:00");
    }
}
