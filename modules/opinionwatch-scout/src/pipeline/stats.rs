use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use opinionwatch_common::{Dataset, Sentiment};

use super::state::PipelineState;

/// Counters from one pipeline run.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct RunStats {
    pub videos_found: usize,
    pub videos_fetched: usize,
    pub videos_failed: usize,
    pub comments_collected: usize,
    pub rows_dropped: usize,
    pub rows_classified: usize,
    pub negative: usize,
    pub neutral: usize,
    pub positive: usize,
    pub errors: usize,
    pub rows_persisted: Option<usize>,
    pub persistence_error: Option<String>,
}

impl RunStats {
    pub fn record_classified(&mut self, dataset: &Dataset) {
        self.rows_classified = dataset.len();
        self.rows_dropped = self.comments_collected.saturating_sub(dataset.len());
        self.negative = dataset.count(Sentiment::Negative);
        self.neutral = dataset.count(Sentiment::Neutral);
        self.positive = dataset.count(Sentiment::Positive);
        self.errors = dataset.count(Sentiment::Error);
    }
}

/// Run-level summary derived from the terminal state and counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Everything collected was classified and persisted.
    Success,
    /// Persisted, but some comments or videos failed along the way.
    Partial,
    /// Nothing usable was persisted.
    Failed,
    /// Halted early: no videos or no comments.
    Empty,
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RunStatus::Success => "success",
            RunStatus::Partial => "partial",
            RunStatus::Failed => "failed",
            RunStatus::Empty => "empty",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub final_state: PipelineState,
    pub stats: RunStats,
}

impl RunReport {
    pub fn start() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            finished_at: None,
            final_state: PipelineState::Discovering,
            stats: RunStats::default(),
        }
    }

    pub fn finish(mut self, state: PipelineState) -> Self {
        self.final_state = state;
        self.finished_at = Some(Utc::now());
        self
    }

    pub fn status(&self) -> RunStatus {
        let s = &self.stats;
        match self.final_state {
            PipelineState::NoVideosFound | PipelineState::NoCommentsFound => RunStatus::Empty,
            PipelineState::Done => {
                if s.persistence_error.is_some() {
                    RunStatus::Failed
                } else if s.rows_classified > 0 && s.errors == s.rows_classified {
                    RunStatus::Failed
                } else if s.errors > 0 || s.videos_failed > 0 {
                    RunStatus::Partial
                } else {
                    RunStatus::Success
                }
            }
            // Not reachable through Pipeline::run.
            _ => RunStatus::Failed,
        }
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.stats;
        writeln!(f, "\n=== Pipeline Run {} ===", self.run_id)?;
        writeln!(f, "Status:             {}", self.status())?;
        writeln!(f, "Final state:        {:?}", self.final_state)?;
        writeln!(f, "Videos found:       {}", s.videos_found)?;
        writeln!(f, "Videos fetched:     {}", s.videos_fetched)?;
        writeln!(f, "Videos failed:      {}", s.videos_failed)?;
        writeln!(f, "Comments collected: {}", s.comments_collected)?;
        writeln!(f, "Rows dropped:       {}", s.rows_dropped)?;
        writeln!(f, "Rows classified:    {}", s.rows_classified)?;
        writeln!(f, "\nBy sentiment:")?;
        writeln!(f, "  Negative: {}", s.negative)?;
        writeln!(f, "  Neutral:  {}", s.neutral)?;
        writeln!(f, "  Positive: {}", s.positive)?;
        writeln!(f, "  Error:    {}", s.errors)?;
        match (&s.rows_persisted, &s.persistence_error) {
            (Some(rows), _) => writeln!(f, "\nPersisted:          {rows} rows")?,
            (None, Some(err)) => writeln!(f, "\nPersist failed:     {err}")?,
            (None, None) => writeln!(f, "\nPersisted:          nothing")?,
        }
        if let Some(finished) = self.finished_at {
            let secs = (finished - self.started_at).num_milliseconds() as f64 / 1000.0;
            writeln!(f, "Duration:           {secs:.1}s")?;
        }
        Ok(())
    }
}
