use std::time::{Duration, Instant};

/// Session-level bookkeeping shown around the board
pub struct GameMetrics {
    pub run_started: Instant,
    pub run_time: Duration,
    /// All-time best, seeded from storage
    pub high_score: u32,
    /// Best player score since the program started
    pub session_best: u32,
    pub games_played: u32,
    /// Whether the last finished player run set a new high score
    pub new_record: bool,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self::with_high_score(0)
    }

    /// Start from a high score loaded from storage
    pub fn with_high_score(high_score: u32) -> Self {
        Self {
            run_started: Instant::now(),
            run_time: Duration::ZERO,
            high_score,
            session_best: 0,
            games_played: 0,
            new_record: false,
        }
    }

    /// Sample the run clock; called once per running tick
    pub fn update(&mut self) {
        self.run_time = self.run_started.elapsed();
    }

    pub fn on_game_start(&mut self) {
        self.run_started = Instant::now();
        self.run_time = Duration::ZERO;
        self.new_record = false;
    }

    /// Book a finished player run. Returns true when `final_score` beats the
    /// previous high score; a tie does not count.
    pub fn on_game_over(&mut self, final_score: u32) -> bool {
        self.games_played += 1;
        self.session_best = self.session_best.max(final_score);
        self.new_record = final_score > self.high_score;
        if self.new_record {
            self.high_score = final_score;
        }
        self.new_record
    }

    /// Run clock as `mm:ss`
    pub fn run_clock(&self) -> String {
        let secs = self.run_time.as_secs();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_clock() {
        let mut metrics = GameMetrics::new();
        assert_eq!(metrics.run_clock(), "00:00");

        metrics.run_time = Duration::from_secs(125);
        assert_eq!(metrics.run_clock(), "02:05");

        // Long demo runs keep counting minutes
        metrics.run_time = Duration::from_secs(3661);
        assert_eq!(metrics.run_clock(), "61:01");
    }

    #[test]
    fn test_high_score_tracking() {
        let mut metrics = GameMetrics::with_high_score(40);

        assert!(!metrics.on_game_over(10));
        assert_eq!(metrics.high_score, 40);
        assert_eq!(metrics.session_best, 10);
        assert_eq!(metrics.games_played, 1);

        assert!(metrics.on_game_over(150));
        assert!(metrics.new_record);
        assert_eq!(metrics.high_score, 150);
        assert_eq!(metrics.games_played, 2);
    }

    #[test]
    fn test_tie_is_not_a_record() {
        let mut metrics = GameMetrics::with_high_score(150);

        assert!(!metrics.on_game_over(150));
        assert!(!metrics.new_record);
        assert_eq!(metrics.high_score, 150);
        assert_eq!(metrics.session_best, 150);
    }

    #[test]
    fn test_game_start_clears_run() {
        let mut metrics = GameMetrics::new();
        metrics.on_game_over(90);
        assert!(metrics.new_record);
        metrics.run_time = Duration::from_secs(30);

        metrics.on_game_start();

        assert!(!metrics.new_record);
        assert_eq!(metrics.run_time, Duration::ZERO);
        assert_eq!(metrics.session_best, 90);
    }
}
