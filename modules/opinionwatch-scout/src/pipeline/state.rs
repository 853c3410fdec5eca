//! Pipeline state machine.
//!
//! `transition` is pure: given the current state and what the stage produced,
//! it returns the next state. Empty discovery and empty collection are
//! terminal; persistence always ends in `Done`.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    Discovering,
    Collecting,
    Classifying,
    Persisting,
    Done,
    NoVideosFound,
    NoCommentsFound,
}

impl PipelineState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PipelineState::Done | PipelineState::NoVideosFound | PipelineState::NoCommentsFound
        )
    }
}

/// Result of running the stage that belongs to the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageOutcome {
    Discovered { videos: usize },
    Collected { comments: usize },
    Classified,
    Persisted { saved: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("stage outcome {outcome:?} does not belong to state {state:?}")]
pub struct InvalidTransition {
    pub state: PipelineState,
    pub outcome: StageOutcome,
}

pub fn transition(
    state: PipelineState,
    outcome: StageOutcome,
) -> Result<PipelineState, InvalidTransition> {
    use PipelineState::*;
    use StageOutcome::*;

    match (state, outcome) {
        (Discovering, Discovered { videos: 0 }) => Ok(NoVideosFound),
        (Discovering, Discovered { .. }) => Ok(Collecting),
        (Collecting, Collected { comments: 0 }) => Ok(NoCommentsFound),
        (Collecting, Collected { .. }) => Ok(Classifying),
        (Classifying, Classified) => Ok(Persisting),
        // A failed save is reported, not retried.
        (Persisting, Persisted { .. }) => Ok(Done),
        (state, outcome) => Err(InvalidTransition { state, outcome }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::PipelineState::*;
    use super::StageOutcome::*;

    #[test]
    fn happy_path_reaches_done() {
        let mut state = Discovering;
        for outcome in [
            Discovered { videos: 3 },
            Collected { comments: 10 },
            Classified,
            Persisted { saved: true },
        ] {
            state = transition(state, outcome).unwrap();
        }
        assert_eq!(state, Done);
        assert!(state.is_terminal());
    }

    #[test]
    fn empty_discovery_halts() {
        assert_eq!(
            transition(Discovering, Discovered { videos: 0 }).unwrap(),
            NoVideosFound
        );
    }

    #[test]
    fn empty_collection_halts() {
        assert_eq!(
            transition(Collecting, Collected { comments: 0 }).unwrap(),
            NoCommentsFound
        );
    }

    #[test]
    fn failed_save_still_finishes() {
        assert_eq!(transition(Persisting, Persisted { saved: false }).unwrap(), Done);
    }

    #[test]
    fn mismatched_outcome_is_rejected() {
        let err = transition(Discovering, Classified).unwrap_err();
        assert_eq!(err.state, Discovering);
        assert!(transition(Done, Persisted { saved: true }).is_err());
        assert!(transition(NoVideosFound, Discovered { videos: 1 }).is_err());
    }

    #[test]
    fn only_end_states_are_terminal() {
        for state in [Discovering, Collecting, Classifying, Persisting] {
            assert!(!state.is_terminal());
        }
        for state in [Done, NoVideosFound, NoCommentsFound] {
            assert!(state.is_terminal());
        }
    }
}
