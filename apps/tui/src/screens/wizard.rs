//! "Wizard" screen — the displayed questions with answer buttons, and the
//! outcome once reached.

use crossterm::event::KeyCode;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use signpost_core::{Session, Transcript};

use crate::widgets::answer_buttons;

pub(crate) struct WizardScreen {
    /// Last successfully derived view of the session.
    transcript: Option<Transcript>,
    /// Index of the focused question among the displayed ones.
    selected: usize,
    /// Highlighted answer of the focused question.
    choice: usize,
    status: String,
    /// Set when the catalogue turns out to be malformed; answering stops.
    defect: Option<String>,
}

impl WizardScreen {
    pub(crate) fn new() -> Self {
        Self {
            transcript: None,
            selected: 0,
            choice: 0,
            status: String::new(),
            defect: None,
        }
    }

    pub(crate) fn status(&self) -> &str {
        &self.status
    }

    /// Re-derive the view after the session changed.
    ///
    /// Focus moves to the question waiting for an answer, or to the last
    /// question once an outcome is reached.
    pub(crate) fn refresh(&mut self, session: &Session) {
        match session.transcript() {
            Ok(transcript) => {
                self.status = match &transcript.outcome {
                    Some(outcome) => format!("You have reached outcome {}.", outcome.id),
                    None => format!(
                        "You haven't reached an outcome yet — {} outcomes still possible",
                        transcript.candidates.len()
                    ),
                };
                self.selected = transcript.steps.len().saturating_sub(1);
                self.choice = transcript
                    .steps
                    .get(self.selected)
                    .and_then(|step| step.answer)
                    .unwrap_or(0);
                self.transcript = Some(transcript);
                self.defect = None;
            }
            Err(err) => {
                tracing::error!(error = %err, "cannot derive questionnaire view");
                self.status = "Catalogue error — press r to start over".to_string();
                self.defect = Some(err.to_string());
            }
        }
    }

    pub(crate) fn handle_key(&mut self, code: KeyCode, session: &mut Session) {
        if let KeyCode::Char('r') = code {
            session.reset();
            self.refresh(session);
            return;
        }

        if self.defect.is_some() {
            return;
        }
        let Some(transcript) = &self.transcript else {
            return;
        };
        let Some(step) = transcript.steps.get(self.selected) else {
            return;
        };

        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                if self.selected > 0 {
                    self.selected -= 1;
                    self.choice = transcript.steps[self.selected].answer.unwrap_or(0);
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < transcript.steps.len() {
                    self.selected += 1;
                    self.choice = transcript.steps[self.selected].answer.unwrap_or(0);
                }
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.choice = self.choice.saturating_sub(1);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if self.choice + 1 < step.answers.len() {
                    self.choice += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let question = step.question.clone();
                match session.record_answer(self.selected, question.as_str(), self.choice) {
                    Ok(()) => self.refresh(session),
                    Err(err) if err.is_configuration_defect() => {
                        tracing::error!(error = %err, "catalogue is malformed");
                        self.status = "Catalogue error — press r to start over".to_string();
                        self.defect = Some(err.to_string());
                    }
                    Err(err) => self.status = err.to_string(),
                }
            }
            _ => {}
        }
    }

    pub(crate) fn draw(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Min(1),    // Questions
                Constraint::Length(5), // Outcome
            ])
            .split(area);

        let mut lines: Vec<Line> = Vec::new();
        if let Some(transcript) = &self.transcript {
            for (i, step) in transcript.steps.iter().enumerate() {
                let focused = i == self.selected;
                let style = if focused {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                let prefix = if focused { "▸" } else { " " };

                lines.push(Line::from(format!("{prefix} {}. {}", i + 1, step.prompt)).style(style));
                lines.push(answer_buttons(
                    &step.answers,
                    step.answer,
                    focused.then_some(self.choice),
                ));
                lines.push(Line::from(""));
            }
        }

        let questions = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(" Questions "));
        f.render_widget(questions, chunks[0]);

        let (text, style) = match (&self.defect, self.transcript.as_ref().and_then(|t| t.outcome.as_ref())) {
            (Some(defect), _) => (defect.clone(), Style::default().fg(Color::Red)),
            (None, Some(outcome)) => (
                match &outcome.message {
                    Some(message) => format!("{}\n{message}", outcome.title),
                    None => outcome.title.clone(),
                },
                Style::default().fg(Color::Green),
            ),
            (None, None) => (
                "You haven't reached an outcome yet.".to_string(),
                Style::default().fg(Color::DarkGray),
            ),
        };

        let outcome = Paragraph::new(text)
            .style(style)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title(" Outcome "));
        f.render_widget(outcome, chunks[1]);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use signpost_shared::{Catalogue, Outcome, Step, builtin_catalogue};

    fn setup() -> (WizardScreen, Session) {
        let session = Session::new(Arc::new(builtin_catalogue()));
        let mut screen = WizardScreen::new();
        screen.refresh(&session);
        (screen, session)
    }

    #[test]
    fn answering_moves_focus_to_next_question() {
        let (mut screen, mut session) = setup();
        screen.handle_key(KeyCode::Right, &mut session);
        screen.handle_key(KeyCode::Enter, &mut session);

        assert_eq!(screen.selected, 1);
        assert_eq!(screen.choice, 0);
        assert!(screen.status().contains("3 outcomes"));
    }

    #[test]
    fn revising_earlier_question_truncates() {
        let (mut screen, mut session) = setup();
        screen.handle_key(KeyCode::Right, &mut session); // git = No
        screen.handle_key(KeyCode::Enter, &mut session);
        screen.handle_key(KeyCode::Right, &mut session); // storage = filesystem
        screen.handle_key(KeyCode::Enter, &mut session);
        assert_eq!(session.resolver().trail().len(), 2);

        screen.handle_key(KeyCode::Up, &mut session);
        screen.handle_key(KeyCode::Up, &mut session);
        assert_eq!(screen.selected, 0);
        assert_eq!(screen.choice, 1);

        screen.handle_key(KeyCode::Left, &mut session); // git = Yes
        screen.handle_key(KeyCode::Enter, &mut session);
        assert_eq!(session.resolver().trail().len(), 1);
        assert_eq!(screen.selected, 1);
    }

    #[test]
    fn choice_stays_within_answers() {
        let (mut screen, mut session) = setup();
        for _ in 0..5 {
            screen.handle_key(KeyCode::Right, &mut session);
        }
        assert_eq!(screen.choice, 1);
        for _ in 0..5 {
            screen.handle_key(KeyCode::Left, &mut session);
        }
        assert_eq!(screen.choice, 0);
    }

    #[test]
    fn reaching_outcome_updates_status() {
        let (mut screen, mut session) = setup();
        // git = Yes, storage = In memory, server = OCaml API
        for _ in 0..3 {
            screen.handle_key(KeyCode::Enter, &mut session);
        }
        assert_eq!(screen.status(), "You have reached outcome git-mem.");

        screen.handle_key(KeyCode::Char('r'), &mut session);
        assert!(session.resolver().trail().is_empty());
        assert!(screen.status().contains("5 outcomes"));
    }

    #[test]
    fn malformed_catalogue_stops_answering() {
        let catalogue = Catalogue::new()
            .with_question("git", "Git?", &["Yes", "No"])
            .with_question("storage", "Storage?", &["Memory", "Disk"])
            .with_question("large", "Large?", &["Yes", "No"])
            .with_outcome(
                "mem",
                Outcome::new(vec![Step::specific("git", 0), Step::specific("storage", 0)]),
            )
            .with_outcome(
                "pack",
                Outcome::new(vec![Step::specific("git", 0), Step::specific("large", 0)]),
            );
        let mut session = Session::new(Arc::new(catalogue));
        let mut screen = WizardScreen::new();
        screen.refresh(&session);

        screen.handle_key(KeyCode::Enter, &mut session);
        assert!(screen.defect.as_deref().is_some_and(|d| d.contains("ambiguous")));

        screen.handle_key(KeyCode::Enter, &mut session);
        assert_eq!(session.resolver().trail().len(), 1);
    }
}
