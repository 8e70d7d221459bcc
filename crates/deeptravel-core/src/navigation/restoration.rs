//! One-shot launch restoration state machine.

use serde::Serialize;

use super::model::Screen;

/// Progress of launch restoration.
///
/// Transitions only move forward: `NotStarted -> Restoring -> Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum RestorationPhase {
    #[default]
    NotStarted,
    Restoring,
    Done,
}

/// Where the app should land after restoration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RestoreOutcome {
    /// Navigate to `screen` (the recorded journey has already been selected).
    Redirect {
        screen: Screen,
        journey_id: Option<String>,
    },
    /// Stay on the journey list.
    StayOnLanding,
}

impl RestorationPhase {
    /// Moves `NotStarted` to `Restoring`.
    ///
    /// Returns `false` (and leaves the phase untouched) once restoration has
    /// already begun.
    pub fn begin(&mut self) -> bool {
        if *self != RestorationPhase::NotStarted {
            return false;
        }
        *self = RestorationPhase::Restoring;
        true
    }

    pub fn finish(&mut self) {
        *self = RestorationPhase::Done;
    }

    pub fn is_done(&self) -> bool {
        *self == RestorationPhase::Done
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_only_once() {
        let mut phase = RestorationPhase::default();
        assert!(phase.begin());
        assert_eq!(phase, RestorationPhase::Restoring);
        assert!(!phase.begin());
        phase.finish();
        assert!(phase.is_done());
        assert!(!phase.begin());
        assert!(phase.is_done());
    }
}
