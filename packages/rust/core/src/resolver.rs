//! Decision-tree questionnaire resolver.
//!
//! The resolver owns the answer trail for one session and derives, on
//! demand, which questions to display and whether an outcome has been
//! reached. Candidate outcomes are the ones whose path accepts every answer
//! in the trail; the next question is the one all candidates agree on at the
//! first unanswered position.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error, instrument};

use signpost_shared::{Answer, Catalogue, OutcomeId, QuestionId, Result, SignpostError};

/// A question as shown to the user, with the chosen answer if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayedStep {
    pub question: QuestionId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<usize>,
}

impl DisplayedStep {
    fn answered(answer: &Answer) -> Self {
        Self {
            question: answer.question.clone(),
            answer: Some(answer.answer),
        }
    }

    fn pending(question: QuestionId) -> Self {
        Self {
            question,
            answer: None,
        }
    }
}

/// Result of [`Resolver::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Answered questions in order, followed by the next question when unresolved.
    pub steps: Vec<DisplayedStep>,
    /// The reached outcome, once resolved.
    pub outcome: Option<OutcomeId>,
}

impl Resolution {
    pub fn is_resolved(&self) -> bool {
        self.outcome.is_some()
    }

    /// The question waiting for an answer, if the questionnaire is unresolved.
    pub fn pending_question(&self) -> Option<&QuestionId> {
        self.steps
            .last()
            .filter(|step| step.answer.is_none())
            .map(|step| &step.question)
    }
}

/// What the trail currently leads to.
enum State {
    Resolved(OutcomeId),
    Pending(QuestionId),
}

/// Resolver for a single questionnaire session.
#[derive(Debug, Clone)]
pub struct Resolver {
    catalogue: Arc<Catalogue>,
    trail: Vec<Answer>,
}

impl Resolver {
    pub fn new(catalogue: Arc<Catalogue>) -> Self {
        Self {
            catalogue,
            trail: Vec::new(),
        }
    }

    pub fn catalogue(&self) -> &Arc<Catalogue> {
        &self.catalogue
    }

    /// Answers recorded so far, by position.
    pub fn trail(&self) -> &[Answer] {
        &self.trail
    }

    /// Forget every answer and start over.
    pub fn reset(&mut self) {
        debug!(discarded = self.trail.len(), "resetting answer trail");
        self.trail.clear();
    }

    /// Outcomes still compatible with the trail.
    pub fn candidates(&self) -> Vec<&OutcomeId> {
        self.catalogue
            .outcomes
            .iter()
            .filter(|(_, outcome)| outcome.is_compatible(&self.trail))
            .map(|(id, _)| id)
            .collect()
    }

    /// Record `answer` to `question` at `position` in the trail.
    ///
    /// `question` must be the question displayed at `position`. Answering an
    /// earlier position discards every later answer. Answering past the end
    /// of a resolved trail is rejected. The trail is unchanged on error.
    #[instrument(skip(self), fields(answered = self.trail.len()))]
    pub fn record_answer(&mut self, position: usize, question: &str, answer: usize) -> Result<()> {
        let answered = self.trail.len();
        if position > answered {
            return Err(SignpostError::out_of_sequence(
                position,
                format!("only {answered} question(s) have been answered"),
            ));
        }

        let displayed = if position < answered {
            self.trail[position].question.clone()
        } else {
            match self.state()? {
                State::Pending(next) => next,
                State::Resolved(outcome) => {
                    return Err(SignpostError::out_of_sequence(
                        position,
                        format!("the answers already lead to outcome `{outcome}`"),
                    ));
                }
            }
        };

        if displayed != *question {
            return Err(SignpostError::out_of_sequence(
                position,
                format!("expected an answer to `{displayed}`, got `{question}`"),
            ));
        }

        let available = self.catalogue.require_question(&displayed)?.answers.len();
        if answer >= available {
            return Err(SignpostError::InvalidAnswer {
                question: displayed,
                index: answer,
                available,
            });
        }

        let discarded = answered.saturating_sub(position + 1);
        self.trail.truncate(position);
        self.trail.push(Answer {
            question: displayed,
            answer,
        });
        debug!(position, answer, discarded, "recorded answer");

        Ok(())
    }

    /// Derive the questions to display and the outcome, if reached.
    #[instrument(skip(self), fields(answered = self.trail.len()))]
    pub fn resolve(&self) -> Result<Resolution> {
        let mut steps: Vec<DisplayedStep> =
            self.trail.iter().map(DisplayedStep::answered).collect();

        let outcome = match self.state()? {
            State::Resolved(outcome) => {
                debug!(%outcome, "questionnaire resolved");
                Some(outcome)
            }
            State::Pending(next) => {
                debug!(%next, "waiting for next answer");
                steps.push(DisplayedStep::pending(next));
                None
            }
        };

        Ok(Resolution { steps, outcome })
    }

    fn state(&self) -> Result<State> {
        let position = self.trail.len();
        let candidates: Vec<_> = self
            .catalogue
            .outcomes
            .iter()
            .filter(|(_, outcome)| outcome.is_compatible(&self.trail))
            .collect();

        debug!(position, candidates = candidates.len(), "filtered candidate outcomes");

        match candidates.as_slice() {
            [] => {
                return Err(defect(SignpostError::NoMatchingOutcome {
                    trail: self.trail.clone(),
                }));
            }
            [(id, outcome)] if outcome.path.len() == position => {
                return Ok(State::Resolved((*id).clone()));
            }
            _ => {}
        }

        // Every candidate must ask the same question next.
        let mut next: Option<(&OutcomeId, &QuestionId)> = None;
        for (id, outcome) in &candidates {
            let Some(step) = outcome.path.get(position) else {
                return Err(defect(SignpostError::ambiguous(
                    position,
                    format!("outcome `{id}` ends here while other outcomes continue"),
                )));
            };

            match next {
                None => next = Some((*id, step.question())),
                Some((first_id, first)) if first != step.question() => {
                    return Err(defect(SignpostError::ambiguous(
                        position,
                        format!(
                            "should `{first}` (for `{first_id}`) or `{}` (for `{id}`) be asked?",
                            step.question()
                        ),
                    )));
                }
                Some(_) => {}
            }
        }

        let (_, question) = next.ok_or_else(|| SignpostError::NoMatchingOutcome {
            trail: self.trail.clone(),
        })?;
        self.catalogue.require_question(question).map_err(defect)?;

        Ok(State::Pending(question.clone()))
    }
}

/// Log a malformed-catalogue error before handing it back.
fn defect(err: SignpostError) -> SignpostError {
    error!(error = %err, "catalogue is malformed");
    err
}
