//! Core domain types for Signpost questionnaires.

use std::borrow::Borrow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SignpostError};

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Unique key of a question in a catalogue (e.g. `git`, `storage`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub String);

/// Unique key of an outcome in a catalogue (e.g. `git-mem`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutcomeId(pub String);

macro_rules! string_id {
    ($name:ident) => {
        impl $name {
            /// Borrow the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

string_id!(QuestionId);
string_id!(OutcomeId);

// ---------------------------------------------------------------------------
// Question
// ---------------------------------------------------------------------------

/// A single question with its possible answers.
///
/// Answers are referenced by their index in [`Question::answers`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Prompt shown to the user.
    pub prompt: String,
    /// Ordered answer labels.
    pub answers: Vec<String>,
}

impl Question {
    pub fn new(prompt: impl Into<String>, answers: &[&str]) -> Self {
        Self {
            prompt: prompt.into(),
            answers: answers.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Label of the answer at `index`, if it exists.
    pub fn answer_label(&self, index: usize) -> Option<&str> {
        self.answers.get(index).map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// Step / Answer
// ---------------------------------------------------------------------------

/// One position in an outcome's path.
///
/// On disk a specific step is written `["git", 0]` and a wildcard `"server"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Step {
    /// The question must be answered with this exact answer index.
    Specific(QuestionId, usize),
    /// Any answer to the question is consistent with the outcome.
    Wildcard(QuestionId),
}

impl Step {
    pub fn specific(question: impl Into<QuestionId>, answer: usize) -> Self {
        Self::Specific(question.into(), answer)
    }

    pub fn wildcard(question: impl Into<QuestionId>) -> Self {
        Self::Wildcard(question.into())
    }

    /// The question asked at this step, whichever form it takes.
    pub fn question(&self) -> &QuestionId {
        match self {
            Self::Specific(question, _) | Self::Wildcard(question) => question,
        }
    }

    /// Whether a recorded answer is consistent with this step.
    pub fn accepts(&self, answer: &Answer) -> bool {
        match self {
            Self::Specific(question, index) => {
                *question == answer.question && *index == answer.answer
            }
            Self::Wildcard(question) => *question == answer.question,
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Specific(question, index) => write!(f, "{question}={index}"),
            Self::Wildcard(question) => write!(f, "{question}=*"),
        }
    }
}

/// An answer recorded in the trail: which question, which answer index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub question: QuestionId,
    pub answer: usize,
}

impl Answer {
    pub fn new(question: impl Into<QuestionId>, answer: usize) -> Self {
        Self {
            question: question.into(),
            answer,
        }
    }
}

impl std::fmt::Display for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.question, self.answer)
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// A labeled result reached by following its path of answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// Short human-readable title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Message displayed once the outcome is reached.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Ordered steps leading to this outcome.
    pub path: Vec<Step>,
}

impl Outcome {
    pub fn new(path: Vec<Step>) -> Self {
        Self {
            title: None,
            message: None,
            path,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Whether every recorded answer is consistent with this outcome's path.
    ///
    /// A path shorter than the trail is never compatible.
    pub fn is_compatible(&self, trail: &[Answer]) -> bool {
        trail.len() <= self.path.len()
            && trail
                .iter()
                .zip(&self.path)
                .all(|(answer, step)| step.accepts(answer))
    }
}

// ---------------------------------------------------------------------------
// Catalogue
// ---------------------------------------------------------------------------

/// The static set of questions and outcomes driving a questionnaire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalogue {
    /// Display name of the questionnaire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Questions keyed by id.
    #[serde(default)]
    pub questions: BTreeMap<QuestionId, Question>,
    /// Outcomes keyed by id.
    #[serde(default)]
    pub outcomes: BTreeMap<OutcomeId, Outcome>,
}

impl Catalogue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_question(
        mut self,
        id: impl Into<QuestionId>,
        prompt: impl Into<String>,
        answers: &[&str],
    ) -> Self {
        self.questions.insert(id.into(), Question::new(prompt, answers));
        self
    }

    pub fn with_outcome(mut self, id: impl Into<OutcomeId>, outcome: Outcome) -> Self {
        self.outcomes.insert(id.into(), outcome);
        self
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.get(id)
    }

    /// Look up a question that an outcome path refers to.
    ///
    /// A missing question means the catalogue is malformed.
    pub fn require_question(&self, id: &QuestionId) -> Result<&Question> {
        self.questions
            .get(id)
            .ok_or_else(|| SignpostError::UnknownQuestion {
                question: id.clone(),
            })
    }

    pub fn outcome(&self, id: &str) -> Option<&Outcome> {
        self.outcomes.get(id)
    }

    /// Title of an outcome, falling back to its id.
    pub fn outcome_label<'a>(&'a self, id: &'a OutcomeId) -> &'a str {
        self.outcomes
            .get(id)
            .and_then(|o| o.title.as_deref())
            .unwrap_or(id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_accepts_answers() {
        let specific = Step::specific("git", 1);
        assert!(specific.accepts(&Answer::new("git", 1)));
        assert!(!specific.accepts(&Answer::new("git", 0)));
        assert!(!specific.accepts(&Answer::new("storage", 1)));

        let wildcard = Step::wildcard("server");
        assert!(wildcard.accepts(&Answer::new("server", 0)));
        assert!(wildcard.accepts(&Answer::new("server", 2)));
        assert!(!wildcard.accepts(&Answer::new("git", 0)));
    }

    #[test]
    fn outcome_shorter_than_trail_is_incompatible() {
        let outcome = Outcome::new(vec![Step::specific("git", 0)]);
        assert!(outcome.is_compatible(&[]));
        assert!(outcome.is_compatible(&[Answer::new("git", 0)]));
        assert!(!outcome.is_compatible(&[Answer::new("git", 0), Answer::new("storage", 1)]));
    }

    #[test]
    fn steps_use_compact_notation() {
        let outcome = Outcome::new(vec![Step::specific("git", 1), Step::wildcard("server")]);
        let json = serde_json::to_string(&outcome).expect("serialize");
        assert_eq!(json, r#"{"path":[["git",1],"server"]}"#);

        let parsed: Outcome = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, outcome);
    }

    #[test]
    fn catalogue_lookup_by_str() {
        let catalogue = Catalogue::new()
            .with_question("git", "Git?", &["Yes", "No"])
            .with_outcome(
                "git-mem",
                Outcome::new(vec![Step::specific("git", 0)]).with_title("Git in memory"),
            )
            .with_outcome("plain", Outcome::new(vec![Step::specific("git", 1)]));

        assert_eq!(
            catalogue.question("git").and_then(|q| q.answer_label(1)),
            Some("No")
        );
        assert!(catalogue.question("storage").is_none());

        let git_mem = OutcomeId::from("git-mem");
        let plain = OutcomeId::from("plain");
        assert_eq!(catalogue.outcome_label(&git_mem), "Git in memory");
        assert_eq!(catalogue.outcome_label(&plain), "plain");
    }

    #[test]
    fn require_question_reports_unknown_ids() {
        let catalogue = Catalogue::new();
        let err = catalogue
            .require_question(&QuestionId::from("ghost"))
            .expect_err("question is missing");
        assert!(err.is_configuration_defect());
        assert!(err.to_string().contains("ghost"));
    }
}
