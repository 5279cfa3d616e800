// 🖥️ Terminal client - one screen per view, keyboard driven

mod account;
mod analytics;
pub mod app;
mod cards;
mod dashboard;
pub mod input;
mod login;
mod theme;
mod wizard;

pub use app::App;

use crate::config::Settings;
use crate::router::ViewId;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::io;
use std::time::Instant;

pub fn run_ui(settings: Settings) -> Result<()> {
    let mut app = App::new(settings);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        tracing::error!(error = %err, "event loop failed");
    }

    res?;
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let tick_rate = app.settings.tick_rate();

    loop {
        terminal.draw(|f| draw(f, app))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Windows reports key releases too
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        app.on_tick(Instant::now());

        if app.should_quit {
            return Ok(());
        }
    }
}

pub fn draw(f: &mut Frame, app: &mut App) {
    let view = app.mounted();

    if view == ViewId::Login {
        let area = f.size();
        login::render(f, area, app);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Screen
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    match view {
        ViewId::Dashboard => dashboard::render(f, chunks[1], app),
        ViewId::Send => wizard::render_send(f, chunks[1], app),
        ViewId::Pay => wizard::render_pay(f, chunks[1], app),
        ViewId::Cards => cards::render(f, chunks[1], app),
        ViewId::Analytics => analytics::render(f, chunks[1], app),
        ViewId::Account => account::render(f, chunks[1], app),
        ViewId::Login => {}
    }

    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled("VeloBank", theme::title()),
        Span::raw("  │  "),
        Span::styled(
            app.mounted().title(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
    ];

    if let Some(user) = app.router.user() {
        spans.push(Span::raw("  │  "));
        spans.push(Span::styled(
            format!("[{}] {}", user.avatar_initials, user.name),
            Style::default().fg(Color::White),
        ));
    }

    let header = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(theme::ACCENT)));

    f.render_widget(header, area);
}

fn key_hints(view: ViewId) -> &'static [(&'static str, &'static str)] {
    match view {
        ViewId::Dashboard => &[
            ("1", "Envoyer"),
            ("2", "Payer"),
            ("3", "Cartes"),
            ("4", "Analyse"),
            ("a", "Compte"),
            ("b", "Solde"),
            ("l", "Déconnexion"),
            ("q", "Quitter"),
        ],
        ViewId::Send | ViewId::Pay => &[
            ("Entrée", "Continuer"),
            ("Tab", "Champ"),
            ("↑/↓", "Choisir"),
            ("Esc", "Retour"),
        ],
        ViewId::Cards => &[
            ("n", "Nouvelle carte"),
            ("d", "Supprimer"),
            ("↑/↓", "Choisir"),
            ("Esc", "Retour"),
        ],
        ViewId::Analytics => &[
            ("←/→", "Période"),
            ("↑/↓", "Catégorie"),
            ("Entrée", "Surligner"),
            ("Esc", "Retour"),
        ],
        ViewId::Account => &[
            ("←/→", "Filtre"),
            ("Entrée", "Appliquer"),
            ("e", "Exporter"),
            ("Esc", "Retour"),
        ],
        ViewId::Login => &[("Tab", "Champ"), ("F2", "Afficher"), ("Entrée", "Connexion")],
    }
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = Vec::new();

    if let Some(status) = &app.status {
        spans.push(Span::styled(format!(" {} ", status), Style::default().fg(Color::Green)));
        spans.push(Span::raw("│"));
    }

    for (i, (key, label)) in key_hints(app.mounted()).iter().enumerate() {
        spans.push(Span::raw(if i == 0 { " " } else { " | " }));
        spans.push(Span::styled(*key, theme::key_hint()));
        spans.push(Span::raw(format!(" {}", label)));
    }

    let status_bar = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

/// Clip to `max_len` characters, ending with "..."
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Fixed-size box in the middle of `area`, shrunk to fit
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use ratatui::backend::TestBackend;

    pub fn render(app: &mut App) -> String {
        let backend = TestBackend::new(100, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer.get(x, y).symbol());
            }
            out.push('\n');
        }
        out
    }

    pub fn logged_in_app() -> App {
        let mut app = App::new(Settings::default());
        let auth = crate::auth::DemoAuthenticator::default();
        app.router.try_login(&auth, "sarah@velobank.fr", "secret1").unwrap();
        app
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_is_char_safe() {
        assert_eq!(truncate("Café du Commerce", 30), "Café du Commerce");
        assert_eq!(truncate("Téléphone portable", 8), "Télép...");
    }

    #[test]
    fn test_centered_rect_fits_small_area() {
        let area = Rect::new(0, 0, 20, 10);
        let rect = centered_rect(50, 14, area);
        assert_eq!(rect, area);

        let rect = centered_rect(10, 4, area);
        assert_eq!(rect, Rect::new(5, 3, 10, 4));
    }

    #[test]
    fn test_header_shows_view_and_user() {
        let mut app = test_support::logged_in_app();
        app.navigate(ViewId::Cards);
        let screen = test_support::render(&mut app);

        assert!(screen.contains("Mes cartes"));
        assert!(screen.contains("[SM] Sarah Martin"));
        assert!(screen.contains("Nouvelle carte"));
    }
}
