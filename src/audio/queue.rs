use crate::model::Song;

/// The playlist plus an optional cursor. Insertion order defines the
/// next/previous traversal order; the cursor, when set, is always a valid
/// index into `songs`.
#[derive(Debug, Default)]
pub struct SongQueue {
    songs: Vec<Song>,
    cursor: Option<usize>,
}

impl SongQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.cursor
    }

    pub fn current(&self) -> Option<&Song> {
        self.cursor.and_then(|i| self.songs.get(i))
    }

    /// Replace the playlist. The cursor survives only if it still fits the
    /// new list; otherwise the selection is cleared and the caller is told
    /// to stop playback.
    pub fn set_songs(&mut self, songs: Vec<Song>) -> bool {
        self.songs = songs;
        match self.cursor {
            Some(i) if i < self.songs.len() => true,
            None => true,
            _ => {
                self.cursor = None;
                false
            }
        }
    }

    pub fn select(&mut self, index: usize) -> Option<&Song> {
        if index >= self.songs.len() {
            return None;
        }
        self.cursor = Some(index);
        self.songs.get(index)
    }

    /// Move forward with wraparound; with no selection, starts at the
    /// first song.
    pub fn advance(&mut self) -> Option<&Song> {
        if self.songs.is_empty() {
            return None;
        }
        let next = match self.cursor {
            Some(i) => (i + 1) % self.songs.len(),
            None => 0,
        };
        self.cursor = Some(next);
        self.songs.get(next)
    }

    /// Move backward with wraparound; with no selection, starts at the
    /// last song.
    pub fn retreat(&mut self) -> Option<&Song> {
        if self.songs.is_empty() {
            return None;
        }
        let prev = match self.cursor {
            Some(0) | None => self.songs.len() - 1,
            Some(i) => i - 1,
        };
        self.cursor = Some(prev);
        self.songs.get(prev)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(id: u64) -> Song {
        Song {
            id,
            title: format!("song-{id}"),
            artist: "artist".into(),
            duration: 100.0,
            src: format!("/music/{id}.mp3"),
            cover_gradient: None,
        }
    }

    fn queue(n: u64) -> SongQueue {
        let mut q = SongQueue::new();
        q.set_songs((0..n).map(song).collect());
        q
    }

    #[test]
    fn select_then_advance_n_times_lands_on_i_plus_n_mod_len() {
        for (start, steps) in [(0usize, 1usize), (2, 3), (4, 5), (1, 10)] {
            let mut q = queue(5);
            q.select(start).unwrap();
            for _ in 0..steps {
                q.advance().unwrap();
            }
            assert_eq!(q.current_index(), Some((start + steps) % 5));
        }
    }

    #[test]
    fn retreat_from_zero_wraps_to_last() {
        let mut q = queue(4);
        q.select(0).unwrap();
        q.retreat().unwrap();
        assert_eq!(q.current_index(), Some(3));
    }

    #[test]
    fn advance_with_no_selection_starts_at_first() {
        let mut q = queue(3);
        assert_eq!(q.advance().unwrap().id, 0);
        assert_eq!(q.current_index(), Some(0));
    }

    #[test]
    fn retreat_with_no_selection_starts_at_last() {
        let mut q = queue(3);
        assert_eq!(q.retreat().unwrap().id, 2);
        assert_eq!(q.current_index(), Some(2));
    }

    #[test]
    fn empty_queue_never_moves() {
        let mut q = SongQueue::new();
        assert!(q.advance().is_none());
        assert!(q.retreat().is_none());
        assert!(q.select(0).is_none());
        assert_eq!(q.current_index(), None);
    }

    #[test]
    fn select_out_of_bounds_is_rejected() {
        let mut q = queue(2);
        assert!(q.select(2).is_none());
        assert_eq!(q.current_index(), None);
    }

    #[test]
    fn replacing_the_list_keeps_a_fitting_cursor() {
        let mut q = queue(4);
        q.select(1).unwrap();
        assert!(q.set_songs((0..3).map(song).collect()));
        assert_eq!(q.current_index(), Some(1));
    }

    #[test]
    fn replacing_the_list_clears_an_unfitting_cursor() {
        let mut q = queue(4);
        q.select(3).unwrap();
        assert!(!q.set_songs((0..2).map(song).collect()));
        assert_eq!(q.current_index(), None);
    }
}
