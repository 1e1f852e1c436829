use std::time::{Duration, Instant};

/// Per-process play statistics; nothing here outlives the process
pub struct GameMetrics {
    pub session_start: Instant,
    pub elapsed_time: Duration,
    pub best_score: u32,
    pub peak_speed: u32,
    pub games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            session_start: Instant::now(),
            elapsed_time: Duration::ZERO,
            best_score: 0,
            peak_speed: 0,
            games_played: 0,
        }
    }

    /// Refresh the session clock; called once per rendered frame while running
    pub fn update(&mut self) {
        self.elapsed_time = self.session_start.elapsed();
    }

    pub fn on_game_start(&mut self) {
        self.session_start = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_speed(&mut self, speed: u32) {
        self.peak_speed = self.peak_speed.max(speed);
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.games_played += 1;
        self.best_score = self.best_score.max(final_score);
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
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
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::ZERO;
        assert_eq!(metrics.format_time(), "00:00");
    }

    #[test]
    fn test_best_score_tracking() {
        let mut metrics = GameMetrics::new();

        metrics.on_game_over(4);
        metrics.on_game_over(2);
        assert_eq!(metrics.best_score, 4);
        assert_eq!(metrics.games_played, 2);

        metrics.on_game_over(9);
        assert_eq!(metrics.best_score, 9);
    }

    #[test]
    fn test_peak_speed_only_rises() {
        let mut metrics = GameMetrics::new();
        metrics.on_speed(110);
        metrics.on_speed(90);
        assert_eq!(metrics.peak_speed, 110);
    }
}
