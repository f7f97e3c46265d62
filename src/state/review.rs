/// Review state machine for a single record
///
/// Transitions:
/// - accept: any state -> Accepted, (re)creating the link marker
/// - reject key: Accepted -> Neutral, otherwise -> Rejected, removing any marker
///
/// The in-memory state is committed even when the marker side effect fails;
/// the failure is returned in the `Transition` for the caller to log.

use super::chosen::ChosenDir;
use super::data::{ImageRecord, ReviewState};
use crate::error::PersistError;

#[derive(Debug)]
pub enum Transition {
    /// Requested state equals the current one; nothing touched
    Unchanged(ReviewState),
    Changed {
        from: ReviewState,
        to: ReviewState,
        persisted: Result<(), PersistError>,
    },
}

impl Transition {
    pub fn state(&self) -> ReviewState {
        match self {
            Transition::Unchanged(state) => *state,
            Transition::Changed { to, .. } => *to,
        }
    }

    pub fn persist_error(&self) -> Option<&PersistError> {
        match self {
            Transition::Changed {
                persisted: Err(e), ..
            } => Some(e),
            _ => None,
        }
    }
}

pub fn mark_accepted(record: &mut ImageRecord, chosen: &ChosenDir) -> Transition {
    let from = record.review;
    if from == ReviewState::Accepted {
        return Transition::Unchanged(from);
    }

    record.review = ReviewState::Accepted;
    let persisted = chosen.link(&record.filename, &record.path);

    Transition::Changed {
        from,
        to: ReviewState::Accepted,
        persisted,
    }
}

pub fn mark_rejected_or_toggle(record: &mut ImageRecord, chosen: &ChosenDir) -> Transition {
    let from = record.review;
    let to = match from {
        ReviewState::Accepted => ReviewState::Neutral,
        ReviewState::Neutral | ReviewState::Rejected => ReviewState::Rejected,
    };
    if to == from {
        return Transition::Unchanged(from);
    }

    record.review = to;
    let persisted = chosen.unlink(&record.filename).map(|_| ());

    Transition::Changed { from, to, persisted }
}
