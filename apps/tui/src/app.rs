//! Core TUI application state and event loop.

use std::io;
use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};
use signpost_core::Session;

use crate::screens::{OutcomesScreen, ScreenId, WizardScreen};
use crate::widgets::{centered_rect, status_bar};

/// Application state.
pub(crate) struct App {
    /// Currently active screen tab.
    pub active_tab: usize,
    /// Available screens.
    pub screens: Vec<ScreenId>,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Whether help overlay is visible.
    pub show_help: bool,
    /// The questionnaire being answered.
    pub session: Session,
    pub wizard: WizardScreen,
    pub outcomes: OutcomesScreen,
}

impl App {
    pub(crate) fn new(session: Session) -> Self {
        let mut wizard = WizardScreen::new();
        wizard.refresh(&session);

        Self {
            active_tab: 0,
            screens: vec![ScreenId::Wizard, ScreenId::Outcomes],
            should_quit: false,
            show_help: false,
            outcomes: OutcomesScreen::new(),
            wizard,
            session,
        }
    }

    fn current_screen(&self) -> ScreenId {
        self.screens[self.active_tab]
    }

    fn status(&self) -> String {
        match self.current_screen() {
            ScreenId::Wizard => self.wizard.status().to_string(),
            ScreenId::Outcomes => format!(
                "{} of {} outcomes still possible — press ? for help",
                self.session.resolver().candidates().len(),
                self.session.catalogue().outcomes.len()
            ),
        }
    }
}

/// Entry point — sets up terminal, runs event loop, restores terminal.
pub(crate) fn run(session: Session) -> Result<()> {
    // Setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, App::new(session));

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| draw(f, &app))?;

        // Poll for events with 100ms timeout for responsive UI
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(&mut app, key.code, key.modifiers);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    tracing::info!(id = %app.session.id(), "questionnaire session ended");
    Ok(())
}

fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    // Global keybindings (always active)
    match code {
        KeyCode::Char('q') | KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('q') => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('?') => {
            app.show_help = !app.show_help;
            return;
        }
        KeyCode::Esc if app.show_help => {
            app.show_help = false;
            return;
        }
        KeyCode::Tab => {
            app.active_tab = (app.active_tab + 1) % app.screens.len();
            return;
        }
        KeyCode::BackTab => {
            app.active_tab = if app.active_tab == 0 {
                app.screens.len() - 1
            } else {
                app.active_tab - 1
            };
            return;
        }
        _ => {}
    }

    // If help is showing, consume any key to dismiss
    if app.show_help {
        app.show_help = false;
        return;
    }

    // Delegate to current screen
    match app.current_screen() {
        ScreenId::Wizard => app.wizard.handle_key(code, &mut app.session),
        ScreenId::Outcomes => app.outcomes.handle_key(code, app.session.catalogue()),
    }
}

fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    // Tab bar
    let tab_titles: Vec<Line> = app
        .screens
        .iter()
        .map(|s| Line::from(format!("{s}")))
        .collect();

    let title = app
        .session
        .catalogue()
        .title
        .as_deref()
        .unwrap_or("Signpost");

    let tabs = Tabs::new(tab_titles)
        .block(Block::default().borders(Borders::ALL).title(format!(" {title} ")))
        .select(app.active_tab)
        .style(Style::default().fg(Color::White))
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .divider(" │ ");

    f.render_widget(tabs, chunks[0]);

    // Content area — delegate to screen
    match app.current_screen() {
        ScreenId::Wizard => app.wizard.draw(f, chunks[1]),
        ScreenId::Outcomes => app.outcomes.draw(f, chunks[1], &app.session),
    }

    // Status bar
    let status = app.status();
    f.render_widget(status_bar(&status), chunks[2]);

    // Help overlay
    if app.show_help {
        draw_help_overlay(f);
    }
}

fn draw_help_overlay(f: &mut Frame) {
    let area = centered_rect(60, 60, f.area());

    let help_text = vec![
        Line::from("Keybindings").style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from(""),
        Line::from("  Tab/S-Tab    Next/previous screen"),
        Line::from("  ?            Toggle this help"),
        Line::from("  q / Ctrl-C   Quit"),
        Line::from(""),
        Line::from("Wizard:").style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from("  ↑/↓          Select question"),
        Line::from("  ←/→          Select answer"),
        Line::from("  Enter        Record answer"),
        Line::from("  r            Start over"),
        Line::from(""),
        Line::from("Outcomes:").style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from("  ↑/↓          Browse outcomes"),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help — press any key to close ")
                .style(Style::default().bg(Color::DarkGray)),
        )
        .style(Style::default().fg(Color::White).bg(Color::DarkGray));

    // Clear background
    f.render_widget(ratatui::widgets::Clear, area);
    f.render_widget(help, area);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use signpost_shared::builtin_catalogue;

    fn app() -> App {
        App::new(Session::new(Arc::new(builtin_catalogue())))
    }

    #[test]
    fn tab_cycles_screens() {
        let mut app = app();
        handle_key(&mut app, KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(app.current_screen(), ScreenId::Outcomes);
        handle_key(&mut app, KeyCode::BackTab, KeyModifiers::NONE);
        assert_eq!(app.current_screen(), ScreenId::Wizard);
    }

    #[test]
    fn enter_records_answers_on_wizard() {
        let mut app = app();
        handle_key(&mut app, KeyCode::Right, KeyModifiers::NONE);
        handle_key(&mut app, KeyCode::Enter, KeyModifiers::NONE);

        assert_eq!(app.session.resolver().trail().len(), 1);
        assert_eq!(app.session.resolver().trail()[0].answer, 1);
        assert!(app.status().contains("3 outcomes"));
    }

    #[test]
    fn help_overlay_swallows_next_key() {
        let mut app = app();
        handle_key(&mut app, KeyCode::Char('?'), KeyModifiers::NONE);
        assert!(app.show_help);
        handle_key(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        assert!(!app.show_help);
        assert!(app.session.resolver().trail().is_empty());
    }

    #[test]
    fn quit_keys() {
        let mut app = app();
        handle_key(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
    }
}
