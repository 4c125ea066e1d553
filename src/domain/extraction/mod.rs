//! Utterance analysis.
//!
//! Pure functions from raw user text to typed intents and slot
//! candidates. Nothing here mutates the slot store; all writes happen
//! in the dialogue controller.

mod analysis;
mod extractor;

pub use analysis::{Confidence, ExtractionError, SlotCandidate, UtteranceAnalysis, UtteranceIntent};
pub use extractor::{is_affirmative, is_negative, UtteranceExtractor};
