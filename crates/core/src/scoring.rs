//! Scoring module - line-clear points, level progression, high score
//!
//! Points for a clear are `lines x 100 x level`, where `level` is the value
//! in effect *before* the clear is counted. The level is then recomputed as
//! `lines_cleared / 10 + 1`.

use crate::types::{LINES_PER_LEVEL, POINTS_PER_LINE};

/// Points awarded for clearing `lines` rows at `level`.
pub fn line_clear_points(lines: u32, level: u32) -> u32 {
    lines
        .saturating_mul(POINTS_PER_LINE)
        .saturating_mul(level)
}

/// Level for a running total of cleared lines (starts at 1).
pub fn level_for_lines(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Result of recording one clear event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearScore {
    pub lines: u32,
    pub points: u32,
    /// Level the points were multiplied by.
    pub level_before: u32,
    pub level_after: u32,
    /// Set when this clear pushed the score past the high score.
    pub new_high_score: Option<u32>,
}

/// Score, level, cleared-line and high-score counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scoreboard {
    score: u32,
    level: u32,
    lines_cleared: u32,
    high_score: u32,
}

impl Scoreboard {
    pub fn new(high_score: u32) -> Self {
        Self {
            score: 0,
            level: 1,
            lines_cleared: 0,
            high_score,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Zero the run counters. The high score survives.
    pub fn reset(&mut self) {
        *self = Self::new(self.high_score);
    }

    /// Count `lines` simultaneously cleared rows.
    ///
    /// A zero-line call is a no-op that returns an empty result.
    pub fn record_clear(&mut self, lines: u32) -> ClearScore {
        if lines == 0 {
            return ClearScore {
                level_before: self.level,
                level_after: self.level,
                ..ClearScore::default()
            };
        }

        let level_before = self.level;
        let points = line_clear_points(lines, level_before);

        self.lines_cleared = self.lines_cleared.saturating_add(lines);
        self.score = self.score.saturating_add(points);
        self.level = level_for_lines(self.lines_cleared);

        let new_high_score = if self.score > self.high_score {
            self.high_score = self.score;
            Some(self.high_score)
        } else {
            None
        };

        ClearScore {
            lines,
            points,
            level_before,
            level_after: self.level,
            new_high_score,
        }
    }
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_clear_points() {
        assert_eq!(line_clear_points(1, 1), 100);
        assert_eq!(line_clear_points(4, 1), 400);
        assert_eq!(line_clear_points(2, 3), 600);
        assert_eq!(line_clear_points(0, 9), 0);
    }

    #[test]
    fn test_level_for_lines() {
        assert_eq!(level_for_lines(0), 1);
        assert_eq!(level_for_lines(9), 1);
        assert_eq!(level_for_lines(10), 2);
        assert_eq!(level_for_lines(25), 3);
    }

    #[test]
    fn test_multiplier_uses_level_before_clear() {
        let mut board = Scoreboard::new(0);
        for _ in 0..9 {
            board.record_clear(1);
        }
        assert_eq!(board.level(), 1);
        assert_eq!(board.score(), 900);

        // Tenth and eleventh line: scored at level 1, level becomes 2 after.
        let r = board.record_clear(2);
        assert_eq!(r.points, 200);
        assert_eq!(r.level_before, 1);
        assert_eq!(r.level_after, 2);
        assert_eq!(board.level(), 2);

        let r = board.record_clear(1);
        assert_eq!(r.points, 200);
    }

    #[test]
    fn test_high_score_tracks_score() {
        let mut board = Scoreboard::new(250);
        assert_eq!(board.record_clear(2).new_high_score, None);
        assert_eq!(board.high_score(), 250);

        let r = board.record_clear(1);
        assert_eq!(r.new_high_score, Some(300));
        assert_eq!(board.high_score(), 300);
    }

    #[test]
    fn test_reset_keeps_high_score() {
        let mut board = Scoreboard::new(0);
        board.record_clear(3);
        board.reset();
        assert_eq!(board.score(), 0);
        assert_eq!(board.level(), 1);
        assert_eq!(board.lines_cleared(), 0);
        assert_eq!(board.high_score(), 300);
    }

    #[test]
    fn test_zero_lines_is_noop() {
        let mut board = Scoreboard::new(0);
        let r = board.record_clear(0);
        assert_eq!(r.points, 0);
        assert_eq!(board, Scoreboard::new(0));
    }
}
