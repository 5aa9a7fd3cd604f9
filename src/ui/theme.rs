use std::path::Path;

use ratatui::style::Color;
use tracing::warn;

use crate::model::Song;

/// Selected palette, persisted as a one-word file in the data directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeName {
    #[default]
    Dark,
    Light,
}

impl ThemeName {
    pub fn toggled(self) -> Self {
        match self {
            ThemeName::Dark => ThemeName::Light,
            ThemeName::Light => ThemeName::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeName::Dark => "dark",
            ThemeName::Light => "light",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "dark" => Some(ThemeName::Dark),
            "light" => Some(ThemeName::Light),
            _ => None,
        }
    }

    pub fn load(path: &Path) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|raw| Self::parse(&raw))
            .unwrap_or_default()
    }

    pub fn persist(self, path: &Path) {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if let Err(e) = std::fs::write(path, self.as_str()) {
            warn!(path = %path.display(), error = %e, "could not persist theme");
        }
    }
}

pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,
    pub primary: Color,
    pub secondary: Color,
    pub highlight: Color,
    pub error: Color,
    covers: [Color; 8],
}

// Cover fallbacks follow the original eight-gradient rotation: purple,
// blue, green, orange, indigo, yellow, pink, teal.
const COVERS: [Color; 8] = [
    Color::from_u32(0x00a855f7),
    Color::from_u32(0x003b82f6),
    Color::from_u32(0x0022c55e),
    Color::from_u32(0x00f97316),
    Color::from_u32(0x006366f1),
    Color::from_u32(0x00eab308),
    Color::from_u32(0x00ec4899),
    Color::from_u32(0x0014b8a6),
];

const DARK: Theme = Theme {
    background: Color::from_u32(0x000d0d0d),
    foreground: Color::from_u32(0x00e6e6e6),
    muted: Color::from_u32(0x00606060),
    primary: Color::from_u32(0x00f7d44b),
    secondary: Color::from_u32(0x009d8400),
    highlight: Color::from_u32(0x00262626),
    error: Color::from_u32(0x00e5484d),
    covers: COVERS,
};

const LIGHT: Theme = Theme {
    background: Color::from_u32(0x00f4f1e8),
    foreground: Color::from_u32(0x001c1c1c),
    muted: Color::from_u32(0x009a9a9a),
    primary: Color::from_u32(0x009d8400),
    secondary: Color::from_u32(0x00f7d44b),
    highlight: Color::from_u32(0x00e3ddc8),
    error: Color::from_u32(0x00c62a2f),
    covers: COVERS,
};

impl Theme {
    pub fn of(name: ThemeName) -> &'static Theme {
        match name {
            ThemeName::Dark => &DARK,
            ThemeName::Light => &LIGHT,
        }
    }

    /// Terminal stand-in for the song's cover gradient: the gradient's
    /// leading color when one is named, else a fixed rotation by id.
    pub fn cover_color(&self, song: &Song) -> Color {
        song.cover_gradient
            .as_deref()
            .and_then(gradient_color)
            .unwrap_or(self.covers[(song.id % 8) as usize])
    }
}

/// Map a gradient like `from-purple-500 to-pink-500` to its leading color.
fn gradient_color(gradient: &str) -> Option<Color> {
    let first = gradient.split_whitespace().next()?;
    let name = first.strip_prefix("from-")?.split('-').next()?;
    let color = match name {
        "purple" => Color::from_u32(0x00a855f7),
        "pink" => Color::from_u32(0x00ec4899),
        "blue" => Color::from_u32(0x003b82f6),
        "cyan" => Color::from_u32(0x0006b6d4),
        "green" => Color::from_u32(0x0022c55e),
        "teal" => Color::from_u32(0x0014b8a6),
        "orange" => Color::from_u32(0x00f97316),
        "red" => Color::from_u32(0x00ef4444),
        "indigo" => Color::from_u32(0x006366f1),
        "yellow" => Color::from_u32(0x00eab308),
        "rose" => Color::from_u32(0x00f43f5e),
        _ => return None,
    };
    Some(color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn song(id: u64, gradient: Option<&str>) -> Song {
        Song {
            id,
            title: "t".into(),
            artist: "a".into(),
            duration: 1.0,
            src: "/m.mp3".into(),
            cover_gradient: gradient.map(String::from),
        }
    }

    #[test]
    fn named_gradient_wins_over_the_rotation() {
        let theme = Theme::of(ThemeName::Dark);
        let teal = theme.cover_color(&song(0, Some("from-teal-500 to-green-500")));
        assert_eq!(teal, Color::from_u32(0x0014b8a6));
    }

    #[test]
    fn missing_gradient_rotates_by_id_mod_8() {
        let theme = Theme::of(ThemeName::Dark);
        assert_eq!(theme.cover_color(&song(1, None)), COVERS[1]);
        assert_eq!(theme.cover_color(&song(9, None)), COVERS[1]);
    }

    #[test]
    fn unknown_gradient_falls_back_to_the_rotation() {
        let theme = Theme::of(ThemeName::Dark);
        assert_eq!(theme.cover_color(&song(2, Some("from-mauve-500"))), COVERS[2]);
    }

    #[test]
    fn theme_round_trips_through_the_data_dir() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("theme");

        assert_eq!(ThemeName::load(&path), ThemeName::Dark);
        ThemeName::Light.persist(&path);
        assert_eq!(ThemeName::load(&path), ThemeName::Light);
    }
}
