//! Conversation phases.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Phase of a dialogue session.
///
/// `Redirect` is transient: the controller enters it for one turn when
/// the user goes off-script and returns to the interrupted phase in the
/// same turn, so persisted sessions never carry it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogueState {
    Greeting,
    FocusSelection,
    SlotCollection,
    Determination,
    FollowUp,
    Redirect,
}

impl StateMachine for DialogueState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use DialogueState::*;

        // Any phase can be interrupted.
        if *target == Redirect {
            return *self != Redirect;
        }

        match self {
            Greeting => matches!(target, FocusSelection | SlotCollection),
            FocusSelection => matches!(target, FocusSelection | SlotCollection),
            SlotCollection => {
                matches!(target, SlotCollection | Determination | FocusSelection)
            }
            Determination => matches!(target, FollowUp | FocusSelection),
            FollowUp => matches!(target, FollowUp | FocusSelection | SlotCollection),
            // A redirect resumes whatever it interrupted.
            Redirect => true,
        }
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use DialogueState::*;
        let all = [
            Greeting,
            FocusSelection,
            SlotCollection,
            Determination,
            FollowUp,
            Redirect,
        ];
        all.iter()
            .filter(|s| self.can_transition_to(s))
            .copied()
            .collect()
    }
}

impl std::fmt::Display for DialogueState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Greeting => "greeting",
            Self::FocusSelection => "focus_selection",
            Self::SlotCollection => "slot_collection",
            Self::Determination => "determination",
            Self::FollowUp => "follow_up",
            Self::Redirect => "redirect",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greeting_cannot_jump_to_determination() {
        assert!(!DialogueState::Greeting.can_transition_to(&DialogueState::Determination));
    }

    #[test]
    fn greeting_can_skip_focus_selection() {
        assert!(DialogueState::Greeting.can_transition_to(&DialogueState::SlotCollection));
    }

    #[test]
    fn slot_collection_can_loop() {
        assert!(DialogueState::SlotCollection.can_transition_to(&DialogueState::SlotCollection));
    }

    #[test]
    fn determination_leads_to_follow_up() {
        assert!(DialogueState::Determination.can_transition_to(&DialogueState::FollowUp));
        assert!(!DialogueState::Determination.can_transition_to(&DialogueState::SlotCollection));
    }

    #[test]
    fn every_phase_can_be_redirected_and_resumed() {
        use DialogueState::*;
        for state in [Greeting, FocusSelection, SlotCollection, Determination, FollowUp] {
            assert!(state.can_transition_to(&Redirect), "{:?}", state);
            assert!(Redirect.can_transition_to(&state), "{:?}", state);
        }
        assert!(!Redirect.can_transition_to(&Redirect));
    }

    #[test]
    fn no_phase_is_terminal() {
        use DialogueState::*;
        for state in [Greeting, FocusSelection, SlotCollection, Determination, FollowUp, Redirect] {
            assert!(!state.is_terminal(), "{:?}", state);
        }
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&DialogueState::SlotCollection).unwrap();
        assert_eq!(json, "\"slot_collection\"");
    }
}
