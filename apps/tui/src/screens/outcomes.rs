//! "Outcomes" screen — lists every outcome of the catalogue, marks the ones
//! still reachable, and shows the path of the selected one.

use crossterm::event::KeyCode;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};
use signpost_core::Session;
use signpost_shared::{Catalogue, Outcome, Step};

pub(crate) struct OutcomesScreen {
    selected: usize,
}

impl OutcomesScreen {
    pub(crate) fn new() -> Self {
        Self { selected: 0 }
    }

    pub(crate) fn handle_key(&mut self, code: KeyCode, catalogue: &Catalogue) {
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                if self.selected > 0 {
                    self.selected -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < catalogue.outcomes.len() {
                    self.selected += 1;
                }
            }
            _ => {}
        }
    }

    pub(crate) fn draw(&self, f: &mut Frame, area: Rect, session: &Session) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .margin(1)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(area);

        let catalogue = session.catalogue();
        let candidates = session.resolver().candidates();

        let items: Vec<ListItem> = catalogue
            .outcomes
            .iter()
            .enumerate()
            .map(|(i, (id, outcome))| {
                let reachable = candidates.contains(&id);
                let mut style = if reachable {
                    Style::default()
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                if i == self.selected {
                    style = style.fg(Color::Cyan).add_modifier(Modifier::BOLD);
                }
                let prefix = if i == self.selected { "▸" } else { " " };
                let mark = if reachable { "●" } else { "○" };
                let title = outcome.title.as_deref().unwrap_or(id.as_str());

                ListItem::new(format!("{prefix} {mark} {title}")).style(style)
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Outcomes ({}) ", catalogue.outcomes.len())),
        );
        f.render_widget(list, chunks[0]);

        let details = match catalogue.outcomes.iter().nth(self.selected) {
            Some((id, outcome)) => details_lines(catalogue, id.as_str(), outcome),
            None => vec![Line::from("This catalogue has no outcomes.")],
        };
        let details = Paragraph::new(details)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(" Details "));
        f.render_widget(details, chunks[1]);
    }
}

fn details_lines<'a>(catalogue: &'a Catalogue, id: &'a str, outcome: &'a Outcome) -> Vec<Line<'a>> {
    let mut lines = vec![
        Line::from(outcome.title.as_deref().unwrap_or(id))
            .style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from(format!("id: {id}")).style(Style::default().fg(Color::DarkGray)),
        Line::from(""),
    ];
    if let Some(message) = &outcome.message {
        lines.push(Line::from(message.as_str()));
        lines.push(Line::from(""));
    }

    lines.push(Line::from("Path:").style(Style::default().add_modifier(Modifier::BOLD)));
    for step in &outcome.path {
        lines.push(Line::from(format!("  {}", step_text(catalogue, step))));
    }
    lines
}

/// "prompt → label" for one step of an outcome path.
fn step_text(catalogue: &Catalogue, step: &Step) -> String {
    let question = catalogue.question(step.question().as_str());
    let prompt = question.map_or(step.question().as_str(), |q| q.prompt.as_str());

    let answer = match step {
        Step::Wildcard(_) => "any answer".to_string(),
        Step::Specific(_, index) => question
            .and_then(|q| q.answer_label(*index))
            .map_or_else(|| format!("answer {index}"), str::to_string),
    };
    format!("{prompt} → {answer}")
}
