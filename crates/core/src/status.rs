//! Per-glyph processing status.

use crate::error::{Error, Result};

/// Where a glyph is in the batch pipeline.
///
/// ```text
/// Pending -> Fetching -> Processing -> Converting -> Done
///    ^          |            |             |           |
///    |          +------------+-------------+--> Error  |
///    +-------------------------------------------------+
/// ```
///
/// `Done` and `Error` only go back to `Pending`, which is how a single
/// character is retried.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GlyphStatus {
    #[default]
    Pending,
    Fetching,
    Processing,
    Converting,
    Done,
    Error {
        message: String,
    },
}

impl GlyphStatus {
    /// Lower-case name, as shown to users and stored in project files.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Fetching => "fetching",
            Self::Processing => "processing",
            Self::Converting => "converting",
            Self::Done => "done",
            Self::Error { .. } => "error",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Error { .. })
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error { message } => Some(message),
            _ => None,
        }
    }

    pub fn can_transition_to(&self, next: &GlyphStatus) -> bool {
        match (self, next) {
            (Self::Pending, Self::Fetching)
            | (Self::Fetching, Self::Processing)
            | (Self::Processing, Self::Converting)
            | (Self::Converting, Self::Done)
            | (Self::Done | Self::Error { .. }, Self::Pending) => true,
            (from, Self::Error { .. }) => !from.is_terminal(),
            _ => false,
        }
    }

    /// Move to `next`, rejecting transitions the pipeline never makes.
    pub fn transition(&mut self, next: GlyphStatus) -> Result<()> {
        if !self.can_transition_to(&next) {
            return Err(Error::InvalidTransition { from: self.label(), to: next.label() });
        }
        *self = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error() -> GlyphStatus {
        GlyphStatus::Error { message: "boom".to_string() }
    }

    #[test]
    fn test_happy_path() {
        let mut status = GlyphStatus::default();
        for next in [
            GlyphStatus::Fetching,
            GlyphStatus::Processing,
            GlyphStatus::Converting,
            GlyphStatus::Done,
        ] {
            status.transition(next).unwrap();
        }
        assert!(status.is_done());
        assert!(status.is_terminal());
    }

    #[test]
    fn test_any_active_state_can_fail() {
        for from in [
            GlyphStatus::Pending,
            GlyphStatus::Fetching,
            GlyphStatus::Processing,
            GlyphStatus::Converting,
        ] {
            assert!(from.can_transition_to(&error()), "{from:?}");
        }
        assert!(!GlyphStatus::Done.can_transition_to(&error()));
        assert!(!error().can_transition_to(&error()));
    }

    #[test]
    fn test_retry_resets_to_pending() {
        let mut status = error();
        status.transition(GlyphStatus::Pending).unwrap();
        assert_eq!(status, GlyphStatus::Pending);

        let mut status = GlyphStatus::Done;
        status.transition(GlyphStatus::Pending).unwrap();
        assert_eq!(status, GlyphStatus::Pending);
    }

    #[test]
    fn test_invalid_transitions() {
        let mut status = GlyphStatus::Pending;
        let result = status.transition(GlyphStatus::Done);
        assert!(matches!(
            result,
            Err(Error::InvalidTransition { from: "pending", to: "done" })
        ));
        assert_eq!(status, GlyphStatus::Pending);

        assert!(!GlyphStatus::Fetching.can_transition_to(&GlyphStatus::Converting));
        assert!(!GlyphStatus::Converting.can_transition_to(&GlyphStatus::Processing));
        assert!(!GlyphStatus::Processing.can_transition_to(&GlyphStatus::Pending));
    }

    #[test]
    fn test_error_message() {
        assert_eq!(error().error_message(), Some("boom"));
        assert_eq!(error().label(), "error");
        assert_eq!(GlyphStatus::Done.error_message(), None);
    }
}
