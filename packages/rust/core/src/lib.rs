//! Questionnaire resolution for Signpost.
//!
//! [`resolver`] decides which question to ask next from the answers given so
//! far and reports the outcome once a single one remains. [`session`] wraps a
//! resolver with an identity and produces display transcripts.

pub mod resolver;
pub mod session;

pub use resolver::{DisplayedStep, Resolution, Resolver};
pub use session::{Session, SessionId, Transcript, TranscriptOutcome, TranscriptStep};
