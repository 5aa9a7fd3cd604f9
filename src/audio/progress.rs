use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Progress mirror shared between the engine thread and the render loop.
/// The engine is the source of truth for time and duration; widgets only
/// read the atomics.
#[derive(Debug, Default)]
pub struct TrackProgress {
    current_position_millis: AtomicU64,
    total_duration_millis: AtomicU64,
    generation: AtomicU64,
}

impl TrackProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_position(&self, position: Duration) {
        self.current_position_millis
            .store(position.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn set_total_duration(&self, duration: Duration) {
        self.total_duration_millis
            .store(duration.as_millis() as u64, Ordering::Relaxed);
    }

    /// `(position_ms, total_ms)`.
    pub fn get(&self) -> (u64, u64) {
        (
            self.current_position_millis.load(Ordering::Relaxed),
            self.total_duration_millis.load(Ordering::Relaxed),
        )
    }

    /// Derived percentage, 0.0 when nothing is loaded.
    pub fn percent(&self) -> f64 {
        let (pos, total) = self.get();
        if total == 0 {
            0.0
        } else {
            (pos as f64 / total as f64 * 100.0).min(100.0)
        }
    }

    /// Monotonic counter identifying the current track load; a load task
    /// compares this against the value it was stamped with to detect that
    /// it has been superseded.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Relaxed)
    }

    /// Zero out position and duration for a new track, bumping the
    /// generation.
    pub fn reset(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.set_position(Duration::ZERO);
        self.set_total_duration(Duration::ZERO);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_is_derived_from_position_and_total() {
        let progress = TrackProgress::new();
        assert_eq!(progress.percent(), 0.0);

        progress.set_total_duration(Duration::from_secs(200));
        progress.set_position(Duration::from_secs(50));
        assert_eq!(progress.percent(), 25.0);

        progress.set_position(Duration::from_secs(300));
        assert_eq!(progress.percent(), 100.0);
    }

    #[test]
    fn reset_zeroes_and_bumps_generation() {
        let progress = TrackProgress::new();
        progress.set_total_duration(Duration::from_secs(10));
        progress.set_position(Duration::from_secs(5));

        let generation = progress.generation();
        progress.reset();

        assert_eq!(progress.get(), (0, 0));
        assert_eq!(progress.generation(), generation + 1);
    }
}
