use arcade_core::game_trait::GameEvent;

/// Tally of a hosting session, logged on exit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub runs: u32,
    pub finished: u32,
    pub best_score: i64,
    pub total_score: i64,
}

impl SessionSummary {
    pub fn record(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Started | GameEvent::Restarted => self.runs += 1,
            GameEvent::GameOver { score } => {
                self.finished += 1;
                self.total_score += score;
                self.best_score = self.best_score.max(*score);
            },
        }
    }

    pub fn mean_score(&self) -> Option<f64> {
        (self.finished > 0).then(|| self.total_score as f64 / f64::from(self.finished))
    }

    pub fn log(&self) {
        tracing::info!(
            runs = self.runs,
            finished = self.finished,
            best = self.best_score,
            mean = self.mean_score().unwrap_or(0.0),
            "Session summary"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tallies_runs_and_scores() {
        let mut s = SessionSummary::default();
        for e in [
            GameEvent::Started,
            GameEvent::GameOver { score: 300 },
            GameEvent::Restarted,
            GameEvent::GameOver { score: 500 },
            GameEvent::Restarted,
        ] {
            s.record(&e);
        }
        assert_eq!(s.runs, 3);
        assert_eq!(s.finished, 2);
        assert_eq!(s.best_score, 500);
        assert_eq!(s.mean_score(), Some(400.0));
    }

    #[test]
    fn no_finished_runs_has_no_mean() {
        let mut s = SessionSummary::default();
        s.record(&GameEvent::Started);
        assert_eq!(s.mean_score(), None);
    }
}
