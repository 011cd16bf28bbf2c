//! Streaks of consecutive days with at least one intake.

use serde::Serialize;

/// Current and longest streak within the scanned window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Streaks {
    /// Run of logged days contiguous with today (or yesterday, if today is empty).
    pub current: usize,
    /// Longest run anywhere in the window.
    pub longest: usize,
}

/// Computes streaks from per-day log counts ordered newest first.
///
/// An empty today does not break the chain: the day simply hasn't finished
/// yet. Any other empty day resets the running count and ends the current
/// streak, although older runs still count toward the longest one.
pub fn compute_streaks(counts_newest_first: &[usize]) -> Streaks {
    let mut streaks = Streaks::default();
    let mut running = 0;
    let mut contiguous = true;

    for (offset, &count) in counts_newest_first.iter().enumerate() {
        if count > 0 {
            running += 1;
            if contiguous {
                streaks.current = running;
            }
            streaks.longest = streaks.longest.max(running);
        } else if offset > 0 {
            running = 0;
            contiguous = false;
        }
    }

    streaks
}
