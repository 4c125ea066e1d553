//! Turn-by-turn dialogue control.
//!
//! The controller owns all conversation flow decisions. It consults
//! the extractor for what the user said, the slot store for what is
//! already known, and the rules engine for where the focused service
//! stands, then emits a single [`ControllerAction`] for the formatter.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::eligibility::{
    EligibilityStatus, RulesEngine, Service, ServiceCatalog,
};
use crate::domain::extraction::{
    is_affirmative, is_negative, ExtractionError, SlotCandidate, UtteranceAnalysis,
    UtteranceExtractor, UtteranceIntent,
};
use crate::domain::foundation::{
    DomainError, ErrorCode, SessionId, StateMachine, TurnIndex,
};
use crate::domain::slots::{ProposalOutcome, SlotName, SlotStore, SlotValue};

use super::action::{ClarifyNote, ControllerAction};
use super::state::DialogueState;

/// How many times the same question is repeated verbatim before the
/// simplified phrasing takes over.
pub const MAX_IDENTICAL_REASKS: u8 = 1;

/// One completed exchange: what the user said, what was extracted
/// from it, what the controller decided, and what went back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub index: TurnIndex,
    pub utterance: String,
    /// Slot candidates pulled out of the utterance, before storage.
    pub extracted: Vec<SlotCandidate>,
    pub action: ControllerAction,
    pub response: String,
    pub state_after: DialogueState,
}

/// The service under discussion and the turn that locked it in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceFocus {
    pub service: Service,
    pub locked_at_turn: TurnIndex,
}

/// A conflicting value parked until the user confirms the replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct PendingCorrection {
    slot: SlotName,
    existing: SlotValue,
    proposed: SlotValue,
}

/// Per-session dialogue state machine.
///
/// Fully serializable so a session survives a round trip through the
/// session store between turns. Each session is driven by one request
/// at a time; there is no interior locking here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogueController {
    session_id: SessionId,
    state: DialogueState,
    focus: Option<ServiceFocus>,
    slots: SlotStore,
    turns: Vec<Turn>,
    /// Slot named by the most recent question, if any.
    awaiting: Option<SlotName>,
    /// Failed-answer counts per slot, cleared once the slot is filled.
    reask_counts: BTreeMap<SlotName, u8>,
    pending_correction: Option<PendingCorrection>,
    /// Candidates from the utterance being handled, moved into the
    /// transcript by [`Self::record_turn`].
    #[serde(default)]
    last_extracted: Vec<SlotCandidate>,
}

impl DialogueController {
    pub fn new(session_id: SessionId) -> Self {
        Self {
            session_id,
            state: DialogueState::Greeting,
            focus: None,
            slots: SlotStore::new(),
            turns: Vec::new(),
            awaiting: None,
            reask_counts: BTreeMap::new(),
            pending_correction: None,
            last_extracted: Vec::new(),
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn state(&self) -> DialogueState {
        self.state
    }

    pub fn focus(&self) -> Option<Service> {
        self.focus.map(|f| f.service)
    }

    /// The focused service together with the turn that locked it.
    pub fn focus_lock(&self) -> Option<ServiceFocus> {
        self.focus
    }

    pub fn slots(&self) -> &SlotStore {
        &self.slots
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn awaiting(&self) -> Option<SlotName> {
        self.awaiting
    }

    /// Opens the conversation with the service menu.
    pub fn start(&mut self, catalog: &ServiceCatalog) -> Result<ControllerAction, DomainError> {
        if self.state != DialogueState::Greeting {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "session has already been started",
            ));
        }
        self.advance(DialogueState::FocusSelection)?;
        Ok(self.list_services(catalog, Vec::new()))
    }

    /// Processes one user utterance and decides the next action.
    pub fn handle_utterance(
        &mut self,
        utterance: &str,
        catalog: &ServiceCatalog,
    ) -> Result<ControllerAction, DomainError> {
        if self.state == DialogueState::Greeting {
            self.advance(DialogueState::FocusSelection)?;
        }
        self.last_extracted.clear();

        if let Some(pending) = self.pending_correction.take() {
            if is_affirmative(utterance) {
                let turn = self.next_turn_index();
                self.slots.propose(pending.slot, pending.proposed.clone(), turn, true);
                return self.continue_collection(catalog, vec![(pending.slot, pending.proposed)]);
            }
            if is_negative(utterance) {
                // Keep the confirmed value and move on.
                return self.continue_collection(catalog, Vec::new());
            }
            // Anything else abandons the correction and is handled as a
            // fresh utterance.
        }

        let analysis: UtteranceAnalysis =
            match UtteranceExtractor::new().analyze(utterance, self.awaiting) {
                Ok(analysis) => analysis,
                Err(err) => return self.clarify(catalog, err),
            };
        self.last_extracted = analysis.candidates.clone();

        match analysis.intent {
            UtteranceIntent::Emergency => Ok(ControllerAction::EscalateEmergency),
            UtteranceIntent::BroadenRequest => {
                self.focus = None;
                self.awaiting = None;
                self.advance(DialogueState::FocusSelection)?;
                Ok(self.list_services(catalog, Vec::new()))
            }
            UtteranceIntent::ServiceRequest { service } => {
                self.handle_service_request(service, analysis.candidates, catalog)
            }
            UtteranceIntent::Correction => {
                self.apply_candidates(analysis.candidates, true, catalog)
            }
            UtteranceIntent::SlotAnswer => {
                self.apply_candidates(analysis.candidates, false, catalog)
            }
            UtteranceIntent::Acknowledgment => self.handle_acknowledgment(catalog),
            UtteranceIntent::OffTopic => {
                let resume = self.current_prompt(catalog)?;
                Ok(ControllerAction::Redirect {
                    resume: Box::new(resume),
                })
            }
            UtteranceIntent::Unrecognized => match self.state {
                DialogueState::FollowUp => self.reaffirm(catalog),
                _ => Ok(self.list_services(catalog, Vec::new())),
            },
        }
    }

    /// Appends the completed exchange to the transcript, taking the
    /// candidates staged by the matching `handle_utterance` call.
    pub fn record_turn(
        &mut self,
        utterance: impl Into<String>,
        action: &ControllerAction,
        response: impl Into<String>,
    ) {
        let index = self.next_turn_index();
        let extracted = std::mem::take(&mut self.last_extracted);
        self.turns.push(Turn {
            index,
            utterance: utterance.into(),
            extracted,
            action: action.clone(),
            response: response.into(),
            state_after: self.state,
        });
    }

    fn handle_service_request(
        &mut self,
        service: Service,
        candidates: Vec<SlotCandidate>,
        catalog: &ServiceCatalog,
    ) -> Result<ControllerAction, DomainError> {
        // Mid-collection mentions of another service do not switch the
        // focus; the user can say "what else" to unlock it.
        if self.state == DialogueState::SlotCollection {
            if let Some(current) = self.focus() {
                if current != service {
                    let resume = self.current_prompt(catalog)?;
                    return Ok(ControllerAction::Redirect {
                        resume: Box::new(resume),
                    });
                }
            }
        }

        if catalog.get(service).is_none() {
            return Err(DomainError::new(
                ErrorCode::ServiceNotFound,
                format!("service '{}' is not in the catalog", service),
            ));
        }

        // Re-mentioning the focused service keeps the original lock.
        if self.focus() != Some(service) {
            self.focus = Some(ServiceFocus {
                service,
                locked_at_turn: self.next_turn_index(),
            });
        }
        self.apply_candidates(candidates, false, catalog)
    }

    /// Proposes extracted candidates into the store, then decides what
    /// to do next for the focused service.
    fn apply_candidates(
        &mut self,
        candidates: Vec<SlotCandidate>,
        correction: bool,
        catalog: &ServiceCatalog,
    ) -> Result<ControllerAction, DomainError> {
        let turn = self.next_turn_index();
        let mut acknowledged = Vec::new();

        for candidate in candidates {
            match self
                .slots
                .propose(candidate.name, candidate.value.clone(), turn, correction)
            {
                ProposalOutcome::Accepted => {
                    acknowledged.push((candidate.name, candidate.value));
                }
                ProposalOutcome::AlreadyConfirmed => {}
                ProposalOutcome::Conflict(conflict) => {
                    self.pending_correction = Some(PendingCorrection {
                        slot: conflict.name,
                        existing: conflict.existing.clone(),
                        proposed: conflict.proposed.clone(),
                    });
                    return Ok(ControllerAction::ConfirmCorrection {
                        slot: conflict.name,
                        existing: conflict.existing,
                        proposed: conflict.proposed,
                    });
                }
            }
        }

        for (name, _) in &acknowledged {
            self.reask_counts.remove(name);
        }

        self.continue_collection(catalog, acknowledged)
    }

    /// Advances collection for the focused service: next question,
    /// or the determination once everything is in.
    fn continue_collection(
        &mut self,
        catalog: &ServiceCatalog,
        acknowledged: Vec<(SlotName, SlotValue)>,
    ) -> Result<ControllerAction, DomainError> {
        let service = match self.focus() {
            Some(service) => service,
            // Volunteered values with no focus yet are kept; the user
            // still has to pick a service.
            None => {
                let names = acknowledged.into_iter().map(|(name, _)| name).collect();
                return Ok(self.list_services(catalog, names));
            }
        };

        self.advance(DialogueState::SlotCollection)?;
        let result = RulesEngine::new(catalog).evaluate(service, &self.slots)?;

        match result.status {
            EligibilityStatus::Pending { required_slot } => {
                self.awaiting = Some(required_slot);
                let question = self.question_for(catalog, service, required_slot)?;
                if acknowledged.is_empty() {
                    Ok(ControllerAction::AskSlot {
                        service,
                        slot: required_slot,
                        question,
                    })
                } else {
                    Ok(ControllerAction::AcknowledgeAndAsk {
                        service,
                        acknowledged,
                        slot: required_slot,
                        question,
                    })
                }
            }
            EligibilityStatus::Eligible => {
                self.awaiting = None;
                self.advance(DialogueState::Determination)?;
                self.advance(DialogueState::FollowUp)?;
                let next_steps = self.definition(catalog, service)?.next_steps.clone();
                Ok(ControllerAction::DeliverEligible {
                    service,
                    next_steps,
                })
            }
            EligibilityStatus::Ineligible => {
                self.awaiting = None;
                self.advance(DialogueState::Determination)?;
                self.advance(DialogueState::FocusSelection)?;
                self.focus = None;
                let def = self.definition(catalog, service)?;
                let reasons = result
                    .reasons
                    .iter()
                    .filter(|r| !r.ends_with("requirement met"))
                    .cloned()
                    .collect();
                Ok(ControllerAction::DeliverIneligible {
                    service,
                    reasons,
                    fallback_options: def.fallback_options.clone(),
                })
            }
        }
    }

    /// Re-asks after an answer that could not be used, switching to the
    /// simplified phrasing once the identical re-ask is spent.
    fn clarify(
        &mut self,
        catalog: &ServiceCatalog,
        err: ExtractionError,
    ) -> Result<ControllerAction, DomainError> {
        let (slot, note) = match err {
            ExtractionError::OutOfRange { slot, min, max, .. } => {
                (slot, ClarifyNote::OutOfRange { min, max })
            }
            ExtractionError::Ambiguous { slot, .. } => (slot, ClarifyNote::Ambiguous),
            ExtractionError::Unrecognized { slot } => (slot, ClarifyNote::Unrecognized),
        };

        let service = match self.focus() {
            Some(service) => service,
            None => return Ok(self.list_services(catalog, Vec::new())),
        };

        let count = self.reask_counts.entry(slot).or_insert(0);
        *count = count.saturating_add(1);
        let simplified = *count > MAX_IDENTICAL_REASKS;

        let requirement = self
            .definition(catalog, service)?
            .requirement(slot)
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::SlotNotFound,
                    format!("slot '{}' is not required by '{}'", slot, service),
                )
            })?;
        let question = if simplified {
            requirement.simplified_question.clone()
        } else {
            requirement.question.clone()
        };

        Ok(ControllerAction::Clarify {
            service,
            slot,
            question,
            note,
        })
    }

    fn handle_acknowledgment(
        &mut self,
        catalog: &ServiceCatalog,
    ) -> Result<ControllerAction, DomainError> {
        match (self.state, self.awaiting, self.focus()) {
            (DialogueState::FollowUp, _, _) => self.reaffirm(catalog),
            // Repeat the open question; politeness is not a failed answer.
            (_, Some(slot), Some(service)) => {
                let question = self.question_for(catalog, service, slot)?;
                Ok(ControllerAction::AskSlot {
                    service,
                    slot,
                    question,
                })
            }
            _ => Ok(self.list_services(catalog, Vec::new())),
        }
    }

    fn reaffirm(&self, catalog: &ServiceCatalog) -> Result<ControllerAction, DomainError> {
        let service = match self.focus() {
            Some(service) => service,
            None => return Ok(self.list_services(catalog, Vec::new())),
        };
        let next_steps = self.definition(catalog, service)?.next_steps.clone();
        Ok(ControllerAction::ReaffirmNextSteps {
            service,
            next_steps,
        })
    }

    /// The prompt to restate after an interruption.
    fn current_prompt(&self, catalog: &ServiceCatalog) -> Result<ControllerAction, DomainError> {
        if let (Some(service), Some(slot)) = (self.focus(), self.awaiting) {
            let question = self.question_for(catalog, service, slot)?;
            return Ok(ControllerAction::AskSlot {
                service,
                slot,
                question,
            });
        }
        if self.state == DialogueState::FollowUp {
            return self.reaffirm(catalog);
        }
        Ok(self.list_services(catalog, Vec::new()))
    }

    fn question_for(
        &self,
        catalog: &ServiceCatalog,
        service: Service,
        slot: SlotName,
    ) -> Result<String, DomainError> {
        let requirement = self
            .definition(catalog, service)?
            .requirement(slot)
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::SlotNotFound,
                    format!("slot '{}' is not required by '{}'", slot, service),
                )
            })?;
        let simplified = self
            .reask_counts
            .get(&slot)
            .map(|count| *count > MAX_IDENTICAL_REASKS)
            .unwrap_or(false);
        Ok(if simplified {
            requirement.simplified_question.clone()
        } else {
            requirement.question.clone()
        })
    }

    fn definition<'a>(
        &self,
        catalog: &'a ServiceCatalog,
        service: Service,
    ) -> Result<&'a crate::domain::eligibility::ServiceDefinition, DomainError> {
        catalog.get(service).ok_or_else(|| {
            DomainError::new(
                ErrorCode::ServiceNotFound,
                format!("service '{}' is not in the catalog", service),
            )
        })
    }

    fn list_services(
        &self,
        catalog: &ServiceCatalog,
        acknowledged: Vec<SlotName>,
    ) -> ControllerAction {
        ControllerAction::ListServices {
            services: catalog.services().collect(),
            acknowledged,
        }
    }

    fn next_turn_index(&self) -> TurnIndex {
        TurnIndex::from_u32(self.turns.len() as u32)
    }

    fn advance(&mut self, target: DialogueState) -> Result<(), DomainError> {
        if self.state == target {
            return Ok(());
        }
        self.state = self.state.transition_to(target).map_err(|e| {
            DomainError::new(ErrorCode::InvalidStateTransition, e.to_string())
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started() -> DialogueController {
        let mut controller = DialogueController::new(SessionId::new());
        controller.start(ServiceCatalog::builtin()).unwrap();
        controller
    }

    fn send(controller: &mut DialogueController, text: &str) -> ControllerAction {
        let action = controller
            .handle_utterance(text, ServiceCatalog::builtin())
            .unwrap();
        controller.record_turn(text, &action, "");
        action
    }

    #[test]
    fn start_lists_services_and_enters_focus_selection() {
        let mut controller = DialogueController::new(SessionId::new());
        let action = controller.start(ServiceCatalog::builtin()).unwrap();

        assert!(matches!(action, ControllerAction::ListServices { .. }));
        assert_eq!(controller.state(), DialogueState::FocusSelection);
    }

    #[test]
    fn start_twice_is_rejected() {
        let mut controller = started();
        let err = controller.start(ServiceCatalog::builtin()).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
    }

    #[test]
    fn service_request_locks_focus_and_asks_first_slot() {
        let mut controller = started();
        let action = send(&mut controller, "I need RPM");

        assert_eq!(controller.focus(), Some(Service::Rpm));
        assert_eq!(controller.state(), DialogueState::SlotCollection);
        match action {
            ControllerAction::AskSlot { slot, .. } => assert_eq!(slot, SlotName::Age),
            other => panic!("expected AskSlot, got {:?}", other),
        }
    }

    #[test]
    fn rpm_happy_path_reaches_eligible() {
        let mut controller = started();
        send(&mut controller, "I need RPM");

        let action = send(&mut controller, "78");
        match &action {
            ControllerAction::AcknowledgeAndAsk { acknowledged, slot, .. } => {
                assert_eq!(acknowledged.len(), 1);
                assert_eq!(acknowledged[0].0, SlotName::Age);
                assert_eq!(*slot, SlotName::ChronicConditions);
            }
            other => panic!("expected AcknowledgeAndAsk, got {:?}", other),
        }

        send(&mut controller, "I have diabetes");
        let action = send(&mut controller, "I have medicare");

        match action {
            ControllerAction::DeliverEligible { service, next_steps } => {
                assert_eq!(service, Service::Rpm);
                assert!(next_steps.contains("enrollment specialist"));
            }
            other => panic!("expected DeliverEligible, got {:?}", other),
        }
        assert_eq!(controller.state(), DialogueState::FollowUp);
        assert_eq!(controller.focus(), Some(Service::Rpm));
    }

    #[test]
    fn failed_requirement_delivers_ineligible_with_fallbacks() {
        let mut controller = started();
        send(&mut controller, "I need RPM");
        send(&mut controller, "45");
        send(&mut controller, "no"); // no chronic conditions
        let action = send(&mut controller, "I have medicare");

        match action {
            ControllerAction::DeliverIneligible {
                service,
                reasons,
                fallback_options,
            } => {
                assert_eq!(service, Service::Rpm);
                assert_eq!(reasons.len(), 1);
                assert!(!fallback_options.is_empty());
                assert!(fallback_options.len() <= 5);
            }
            other => panic!("expected DeliverIneligible, got {:?}", other),
        }
        assert_eq!(controller.state(), DialogueState::FocusSelection);
        assert_eq!(controller.focus(), None);
    }

    #[test]
    fn conflicting_value_parks_a_correction() {
        let mut controller = started();
        send(&mut controller, "I need RPM");
        send(&mut controller, "78");

        let action = send(&mut controller, "I'm 65 years old");
        match action {
            ControllerAction::ConfirmCorrection { slot, existing, proposed } => {
                assert_eq!(slot, SlotName::Age);
                assert_eq!(existing, SlotValue::Integer(78));
                assert_eq!(proposed, SlotValue::Integer(65));
            }
            other => panic!("expected ConfirmCorrection, got {:?}", other),
        }
        // Store untouched until confirmed.
        assert_eq!(
            controller.slots().get(SlotName::Age).unwrap().value,
            SlotValue::Integer(78)
        );

        send(&mut controller, "yes");
        assert_eq!(
            controller.slots().get(SlotName::Age).unwrap().value,
            SlotValue::Integer(65)
        );
    }

    #[test]
    fn declined_correction_keeps_the_confirmed_value() {
        let mut controller = started();
        send(&mut controller, "I need RPM");
        send(&mut controller, "78");
        send(&mut controller, "I'm 65 years old");

        let action = send(&mut controller, "no");
        assert_eq!(
            controller.slots().get(SlotName::Age).unwrap().value,
            SlotValue::Integer(78)
        );
        // Collection resumes with the open question.
        assert!(matches!(action, ControllerAction::AskSlot { .. }));
    }

    #[test]
    fn explicit_correction_overwrites_without_asking() {
        let mut controller = started();
        send(&mut controller, "I need RPM");
        send(&mut controller, "78");

        let action = send(&mut controller, "actually I'm 65 years old");
        assert!(matches!(action, ControllerAction::AcknowledgeAndAsk { .. }));
        assert_eq!(
            controller.slots().get(SlotName::Age).unwrap().value,
            SlotValue::Integer(65)
        );
    }

    #[test]
    fn second_failed_answer_switches_to_simplified_question() {
        let mut controller = started();
        send(&mut controller, "I need RPM");

        let first = send(&mut controller, "qwerty asdf");
        let second = send(&mut controller, "zxcv uiop");

        let question_of = |action: &ControllerAction| match action {
            ControllerAction::Clarify { question, .. } => question.clone(),
            other => panic!("expected Clarify, got {:?}", other),
        };
        assert_eq!(question_of(&first), "Could you tell me your age?");
        assert_eq!(question_of(&second), "How old are you?");
    }

    #[test]
    fn out_of_range_age_asks_again_with_bounds() {
        let mut controller = started();
        send(&mut controller, "I need RPM");

        let action = send(&mut controller, "200");
        match action {
            ControllerAction::Clarify { slot, note, .. } => {
                assert_eq!(slot, SlotName::Age);
                assert_eq!(note, ClarifyNote::OutOfRange { min: 18, max: 120 });
            }
            other => panic!("expected Clarify, got {:?}", other),
        }
        assert!(controller.slots().get(SlotName::Age).is_none());
    }

    #[test]
    fn off_topic_redirects_without_losing_state() {
        let mut controller = started();
        send(&mut controller, "I need RPM");

        let action = send(&mut controller, "what restaurants do you recommend");
        match action {
            ControllerAction::Redirect { resume } => {
                assert_eq!(resume.asked_slot(), Some(SlotName::Age));
            }
            other => panic!("expected Redirect, got {:?}", other),
        }
        assert_eq!(controller.state(), DialogueState::SlotCollection);
        assert_eq!(controller.focus(), Some(Service::Rpm));
    }

    #[test]
    fn acknowledgment_repeats_the_question_without_slot_changes() {
        let mut controller = started();
        send(&mut controller, "I need RPM");

        let action = send(&mut controller, "okie doke");
        match action {
            ControllerAction::AskSlot { slot, .. } => assert_eq!(slot, SlotName::Age),
            other => panic!("expected AskSlot, got {:?}", other),
        }
        assert!(controller.slots().is_empty());
    }

    #[test]
    fn other_service_mention_mid_collection_is_redirected() {
        let mut controller = started();
        send(&mut controller, "I need RPM");

        let action = send(&mut controller, "what about telehealth");
        assert!(matches!(action, ControllerAction::Redirect { .. }));
        assert_eq!(controller.focus(), Some(Service::Rpm));
    }

    #[test]
    fn broaden_request_unlocks_focus() {
        let mut controller = started();
        send(&mut controller, "I need RPM");

        let action = send(&mut controller, "what else do you have");
        assert!(matches!(action, ControllerAction::ListServices { .. }));
        assert_eq!(controller.focus(), None);
        assert_eq!(controller.state(), DialogueState::FocusSelection);
    }

    #[test]
    fn emergency_symptoms_escalate_from_any_state() {
        let mut controller = started();
        send(&mut controller, "I need RPM");

        let action = send(&mut controller, "I have chest pain");
        assert_eq!(action, ControllerAction::EscalateEmergency);
    }

    #[test]
    fn confirmed_slots_are_not_asked_again_across_services() {
        let mut controller = started();
        send(&mut controller, "I need RPM");
        send(&mut controller, "78");
        send(&mut controller, "I have diabetes");
        send(&mut controller, "I have medicare");
        assert_eq!(controller.state(), DialogueState::FollowUp);

        // Age carries over; telehealth starts at its second requirement.
        let action = send(&mut controller, "I'd like telehealth too");
        match action {
            ControllerAction::AskSlot { service, slot, .. } => {
                assert_eq!(service, Service::Telehealth);
                assert_eq!(slot, SlotName::StateLicensed);
            }
            other => panic!("expected AskSlot, got {:?}", other),
        }
    }

    #[test]
    fn volunteered_values_before_focus_are_kept() {
        let mut controller = started();
        let action = send(&mut controller, "I have diabetes");

        match action {
            ControllerAction::ListServices { acknowledged, .. } => {
                assert_eq!(acknowledged, vec![SlotName::ChronicConditions]);
            }
            other => panic!("expected ListServices, got {:?}", other),
        }
        assert!(controller.slots().is_confirmed(SlotName::ChronicConditions));
    }

    #[test]
    fn follow_up_acknowledgment_reaffirms_next_steps() {
        let mut controller = started();
        send(&mut controller, "I need RPM");
        send(&mut controller, "78");
        send(&mut controller, "I have diabetes");
        send(&mut controller, "I have medicare");

        let action = send(&mut controller, "thanks");
        assert!(matches!(action, ControllerAction::ReaffirmNextSteps { .. }));
    }

    #[test]
    fn transcript_records_every_turn_in_order() {
        let mut controller = started();
        let first = send(&mut controller, "I need RPM");
        send(&mut controller, "78");

        let turns = controller.turns();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].index, TurnIndex::from_u32(0));
        assert!(turns[0].extracted.is_empty());
        assert_eq!(turns[0].action, first);
        assert_eq!(turns[1].index, TurnIndex::from_u32(1));
        assert_eq!(turns[1].utterance, "78");
        assert_eq!(turns[1].extracted.len(), 1);
        assert_eq!(turns[1].extracted[0].name, SlotName::Age);
        assert!(matches!(
            turns[1].action,
            ControllerAction::AcknowledgeAndAsk { .. }
        ));
    }

    #[test]
    fn focus_lock_remembers_the_turn_it_was_set() {
        let mut controller = started();
        send(&mut controller, "I need RPM");
        send(&mut controller, "78");
        // Restating the same service does not re-lock.
        send(&mut controller, "I need RPM");

        let lock = controller.focus_lock().unwrap();
        assert_eq!(lock.service, Service::Rpm);
        assert_eq!(lock.locked_at_turn, TurnIndex::from_u32(0));
    }

    #[test]
    fn blank_input_during_collection_reasks_the_open_question() {
        let mut controller = started();
        send(&mut controller, "I need RPM");

        let action = send(&mut controller, "   ");
        assert!(matches!(
            action,
            ControllerAction::Clarify {
                slot: SlotName::Age,
                note: ClarifyNote::Unrecognized,
                ..
            }
        ));
    }

    #[test]
    fn controller_survives_a_serde_round_trip() {
        let mut controller = started();
        send(&mut controller, "I need RPM");
        send(&mut controller, "78");

        let json = serde_json::to_string(&controller).unwrap();
        let mut restored: DialogueController = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.state(), DialogueState::SlotCollection);
        assert_eq!(restored.awaiting(), Some(SlotName::ChronicConditions));

        let action = send(&mut restored, "I have diabetes");
        assert!(matches!(action, ControllerAction::AcknowledgeAndAsk { .. }));
    }
}
