//! Reusable TUI widgets.

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Bottom status bar.
pub(crate) fn status_bar(msg: &str) -> Paragraph<'_> {
    Paragraph::new(format!(" {msg}")).style(Style::default().bg(Color::DarkGray).fg(Color::White))
}

/// A row of answer "buttons".
///
/// The chosen answer is filled in; the highlighted one (where the cursor
/// sits) is underlined.
pub(crate) fn answer_buttons<'a>(
    answers: &'a [String],
    chosen: Option<usize>,
    highlighted: Option<usize>,
) -> Line<'a> {
    let mut spans = vec![Span::raw("    ")];

    for (i, label) in answers.iter().enumerate() {
        let mut style = if chosen == Some(i) {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };
        if highlighted == Some(i) {
            style = style.add_modifier(Modifier::UNDERLINED | Modifier::BOLD);
        }

        spans.push(Span::styled(format!(" {label} "), style));
        spans.push(Span::raw("  "));
    }

    Line::from(spans)
}

/// Create a centered rectangle with percentage width and height.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buttons_mark_chosen_answer() {
        let answers = vec!["Yes".to_string(), "No".to_string()];
        let line = answer_buttons(&answers, Some(1), Some(0));

        // indent + (button + gap) per answer
        assert_eq!(line.spans.len(), 5);
        assert_eq!(line.spans[3].content, " No ");
        assert_eq!(line.spans[3].style.bg, Some(Color::Cyan));
        assert!(line.spans[1].style.add_modifier.contains(Modifier::UNDERLINED));
    }

    #[test]
    fn centered_rect_is_inside() {
        let outer = Rect::new(0, 0, 100, 50);
        let inner = centered_rect(60, 60, outer);
        assert_eq!(inner.width, 60);
        assert_eq!(inner.height, 30);
        assert_eq!(inner.x, 20);
    }
}
