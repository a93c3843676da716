//! Pending start timestamp for title/completion pairs
//!
//! A title box starts the timer and the matching completion box stops it.
//! There is at most one pending start: starting again overwrites it.

use std::time::{Duration, Instant};

/// Single-slot monotonic timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Timer {
    pending: Option<Instant>,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record now as the pending start, replacing any previous one.
    pub fn start(&mut self) {
        self.pending = Some(Instant::now());
    }

    /// Elapsed time since the pending start, clearing it.
    ///
    /// Returns [`Duration::ZERO`] and changes nothing when no start is pending.
    pub fn stop(&mut self) -> Duration {
        self.pending
            .take()
            .map(|start| start.elapsed())
            .unwrap_or(Duration::ZERO)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Human-readable elapsed time: `850ms`, `1.3s`, `2m 5s`, `1h 1m`, `2d 3h`.
///
/// Sub-minute values keep one (floored) decimal; longer values list whole
/// days, hours, minutes and seconds, skipping zero components.
pub fn format_elapsed(elapsed: Duration) -> String {
    let millis = elapsed.as_millis();
    if millis < 1_000 {
        return format!("{millis}ms");
    }

    if millis < 60_000 {
        let tenths = millis / 100;
        return match tenths % 10 {
            0 => format!("{}s", tenths / 10),
            fraction => format!("{}.{}s", tenths / 10, fraction),
        };
    }

    let total_secs = elapsed.as_secs();
    let parts = [
        (total_secs / 86_400, "d"),
        (total_secs % 86_400 / 3_600, "h"),
        (total_secs % 3_600 / 60, "m"),
        (total_secs % 60, "s"),
    ];
    parts
        .iter()
        .filter(|(value, _)| *value > 0)
        .map(|(value, unit)| format!("{value}{unit}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_without_start_is_zero() {
        let mut timer = Timer::new();
        assert_eq!(timer.stop(), Duration::ZERO);
        assert_eq!(timer.stop(), Duration::ZERO);
        assert!(!timer.is_pending());
    }

    #[test]
    fn stop_consumes_the_pending_start() {
        let mut timer = Timer::new();
        timer.start();
        assert!(timer.is_pending());
        std::thread::sleep(Duration::from_millis(5));
        assert!(timer.stop() >= Duration::from_millis(5));
        assert!(!timer.is_pending());
        assert_eq!(timer.stop(), Duration::ZERO);
    }

    #[test]
    fn restart_overwrites_previous_start() {
        let mut timer = Timer::new();
        timer.start();
        std::thread::sleep(Duration::from_millis(30));
        timer.start();
        assert!(timer.stop() < Duration::from_millis(30));
    }

    #[test]
    fn formats_human_units() {
        assert_eq!(format_elapsed(Duration::ZERO), "0ms");
        assert_eq!(format_elapsed(Duration::from_millis(850)), "850ms");
        assert_eq!(format_elapsed(Duration::from_millis(1_000)), "1s");
        assert_eq!(format_elapsed(Duration::from_millis(1_337)), "1.3s");
        assert_eq!(format_elapsed(Duration::from_millis(59_990)), "59.9s");
        assert_eq!(format_elapsed(Duration::from_secs(60)), "1m");
        assert_eq!(format_elapsed(Duration::from_secs(125)), "2m 5s");
        assert_eq!(format_elapsed(Duration::from_secs(3_660)), "1h 1m");
        assert_eq!(format_elapsed(Duration::from_secs(2 * 86_400 + 3 * 3_600)), "2d 3h");
    }
}
