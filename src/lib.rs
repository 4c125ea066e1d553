//! HealthSmart: a deterministic eligibility-screening dialogue service.
//!
//! The conversation flow is rule-driven end to end. A slot store holds
//! confirmed facts, a keyword extractor reads each utterance, a rules
//! engine evaluates service requirements, and a state-machine
//! controller decides every turn; a generative provider may only
//! reword the final text, never decide it.
//!
//! Layers follow the hexagonal layout: `domain` is pure logic, `ports`
//! are the traits it is driven through, `adapters` hold the HTTP
//! transport and the port implementations, and `application` wires the
//! use cases together.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
