use super::app::{App, LoginField};
use super::{centered_rect, theme};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let form = app.login.clone();
    let outer = centered_rect(54, 17, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::ACCENT))
        .title(" VeloBank ");
    let inner = block.inner(outer);
    f.render_widget(block, outer);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Welcome
            Constraint::Length(3), // Email
            Constraint::Length(3), // Password
            Constraint::Length(2), // Error
            Constraint::Min(0),    // Hints
        ])
        .split(inner);

    let welcome = Paragraph::new(vec![
        Line::from(Span::styled("Bienvenue", theme::title())),
        Line::from(Span::styled("Connectez-vous à votre compte", theme::muted())),
    ])
    .alignment(Alignment::Center);
    f.render_widget(welcome, chunks[0]);

    let email = Paragraph::new(form.email.display()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme::focused_border(form.focus == LoginField::Email))
            .title(" Email "),
    );
    f.render_widget(email, chunks[1]);

    let password_title = if form.password.is_masked() {
        " Mot de passe "
    } else {
        " Mot de passe (visible) "
    };
    let password = Paragraph::new(form.password.display()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme::focused_border(form.focus == LoginField::Password))
            .title(password_title),
    );
    f.render_widget(password, chunks[2]);

    if let Some(error) = &form.error {
        let error = Paragraph::new(Span::styled(error.as_str(), theme::error())).alignment(Alignment::Center);
        f.render_widget(error, chunks[3]);
    }

    let hints = Paragraph::new(Line::from(vec![
        Span::styled("Tab", theme::key_hint()),
        Span::raw(" champ  "),
        Span::styled("F2", theme::key_hint()),
        Span::raw(" afficher  "),
        Span::styled("Entrée", theme::key_hint()),
        Span::raw(" se connecter  "),
        Span::styled("Esc", theme::key_hint()),
        Span::raw(" quitter"),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(hints, chunks[4]);
}

#[cfg(test)]
mod tests {
    use super::super::test_support::render;
    use crate::config::Settings;
    use crate::ui::App;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_password_is_masked_until_toggled() {
        let mut app = App::new(Settings::default());
        app.handle_key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));
        for c in "hunter22".chars() {
            app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }

        let screen = render(&mut app);
        assert!(screen.contains("Bienvenue"));
        assert!(screen.contains("••••••••"));
        assert!(!screen.contains("hunter22"));

        app.handle_key(KeyEvent::new(KeyCode::F(2), KeyModifiers::NONE));
        assert!(render(&mut app).contains("hunter22"));
    }

    #[test]
    fn test_error_is_shown() {
        let mut app = App::new(Settings::default());
        app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));

        assert!(render(&mut app).contains("Veuillez remplir tous les champs"));
    }
}
