//! Questionnaire sessions and their display transcripts.
//!
//! A [`Session`] is one user's pass through a catalogue. It is never
//! persisted; the [`Transcript`] exists so rendering layers can print or
//! export what was answered and where it led.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use signpost_shared::{Catalogue, OutcomeId, QuestionId, Result};

use crate::resolver::{Resolution, Resolver};

// ---------------------------------------------------------------------------
// SessionId
// ---------------------------------------------------------------------------

/// A UUID v7 wrapper for session identifiers (time-sortable).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Generate a new time-sortable session identifier.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

// ---------------------------------------------------------------------------
// Transcript
// ---------------------------------------------------------------------------

/// Everything a rendering layer needs to show a session's state.
#[derive(Debug, Clone, Serialize)]
pub struct Transcript {
    pub session_id: SessionId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalogue: Option<String>,
    pub started_at: DateTime<Utc>,
    pub generated_at: DateTime<Utc>,
    /// Displayed questions, answered first, then the pending one if any.
    pub steps: Vec<TranscriptStep>,
    /// Outcomes still compatible with the answers.
    pub candidates: Vec<OutcomeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<TranscriptOutcome>,
}

/// One displayed question with its prompt and chosen label.
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptStep {
    pub question: QuestionId,
    pub prompt: String,
    pub answers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// The reached outcome with its display text.
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptOutcome {
    pub id: OutcomeId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One pass through a catalogue.
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    started_at: DateTime<Utc>,
    resolver: Resolver,
}

impl Session {
    pub fn new(catalogue: Arc<Catalogue>) -> Self {
        let id = SessionId::new();
        info!(%id, "starting questionnaire session");
        Self {
            id,
            started_at: Utc::now(),
            resolver: Resolver::new(catalogue),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    pub fn catalogue(&self) -> &Catalogue {
        self.resolver.catalogue()
    }

    /// See [`Resolver::record_answer`].
    pub fn record_answer(&mut self, position: usize, question: &str, answer: usize) -> Result<()> {
        self.resolver.record_answer(position, question, answer)
    }

    /// See [`Resolver::resolve`].
    pub fn resolve(&self) -> Result<Resolution> {
        self.resolver.resolve()
    }

    /// Discard all answers; the session keeps its id.
    pub fn reset(&mut self) {
        info!(id = %self.id, "restarting questionnaire session");
        self.resolver.reset();
    }

    /// Build a transcript of the current state.
    ///
    /// Fails with the same configuration errors as [`Resolver::resolve`].
    #[instrument(skip_all, fields(id = %self.id))]
    pub fn transcript(&self) -> Result<Transcript> {
        let resolution = self.resolver.resolve()?;
        let catalogue = self.catalogue();

        let steps = resolution
            .steps
            .iter()
            .map(|step| {
                let question = catalogue.require_question(&step.question)?;
                Ok(TranscriptStep {
                    question: step.question.clone(),
                    prompt: question.prompt.clone(),
                    answers: question.answers.clone(),
                    answer: step.answer,
                    label: step
                        .answer
                        .and_then(|index| question.answer_label(index))
                        .map(String::from),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let outcome = resolution.outcome.map(|id| {
            let outcome = catalogue.outcome(id.as_str());
            TranscriptOutcome {
                title: catalogue.outcome_label(&id).to_string(),
                message: outcome.and_then(|o| o.message.clone()),
                id,
            }
        });

        Ok(Transcript {
            session_id: self.id.clone(),
            catalogue: catalogue.title.clone(),
            started_at: self.started_at,
            generated_at: Utc::now(),
            steps,
            candidates: self.resolver.candidates().into_iter().cloned().collect(),
            outcome,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signpost_shared::builtin_catalogue;

    fn session() -> Session {
        Session::new(Arc::new(builtin_catalogue()))
    }

    #[test]
    fn session_id_roundtrip() {
        let id = SessionId::new();
        let parsed: SessionId = id.to_string().parse().expect("parse SessionId");
        assert_eq!(id, parsed);
    }

    #[test]
    fn sessions_get_distinct_ids() {
        let first = session();
        let second = session();
        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn transcript_of_fresh_session() {
        let transcript = session().transcript().expect("transcript");
        assert_eq!(transcript.catalogue.as_deref(), Some("Getting Started with Irmin"));
        assert_eq!(transcript.steps.len(), 1);
        assert_eq!(transcript.steps[0].question, "git");
        assert_eq!(transcript.steps[0].answer, None);
        assert_eq!(transcript.candidates.len(), 5);
        assert!(transcript.outcome.is_none());
    }

    #[test]
    fn transcript_of_resolved_session() {
        let mut session = session();
        session.record_answer(0, "git", 1).expect("answer git");
        session.record_answer(1, "storage", 1).expect("answer storage");
        session.record_answer(2, "large", 0).expect("answer large");
        session.record_answer(3, "server", 1).expect("answer server");

        let transcript = session.transcript().expect("transcript");
        assert_eq!(transcript.steps.len(), 4);
        assert_eq!(transcript.steps[1].label.as_deref(), Some("On the filesystem"));
        assert_eq!(transcript.steps[3].label.as_deref(), Some("Using GraphQL"));

        let outcome = transcript.outcome.expect("resolved");
        assert_eq!(outcome.id, "pack");
        assert_eq!(outcome.title, "Pack store");
        assert!(outcome.message.is_some_and(|m| m.contains("irmin-pack")));
    }

    #[test]
    fn transcript_serializes_to_json() {
        let mut session = session();
        session.record_answer(0, "git", 0).expect("answer git");

        let json = serde_json::to_value(session.transcript().expect("transcript"))
            .expect("serialize");
        assert_eq!(json["session_id"], session.id().to_string());
        assert_eq!(json["steps"][0]["label"], "Yes");
        assert_eq!(json["steps"][1]["question"], "storage");
        assert!(json["steps"][1].get("answer").is_none());
        assert!(json.get("outcome").is_none());
    }

    #[test]
    fn reset_keeps_identity() {
        let mut session = session();
        let id = session.id().clone();
        session.record_answer(0, "git", 0).expect("answer git");
        session.reset();

        assert_eq!(session.id(), &id);
        assert!(session.resolver().trail().is_empty());
    }
}
