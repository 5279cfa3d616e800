use super::app::{App, CardField, CardForm};
use super::{centered_rect, theme};
use crate::entities::Card;
use crate::money::format_eur;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let cards = &mut app.cards;

    let items: Vec<ListItem> = cards
        .registry
        .cards()
        .iter()
        .map(|card| {
            let (border, _) = theme::card_colors(card.theme);
            ListItem::new(Line::from(vec![
                Span::styled("▌ ", Style::default().fg(border)),
                Span::raw(format!("{:<20}", card.name)),
                Span::styled(format!("•••• {}", card.last4), theme::muted()),
            ]))
        })
        .collect();

    let title = format!(" Mes cartes ({}) ", cards.registry.len());
    if items.is_empty() {
        let empty = Paragraph::new(Span::styled(" Aucune carte. n pour en créer une.", theme::muted()))
            .block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(empty, chunks[0]);
    } else {
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(theme::highlight())
            .highlight_symbol("→ ");
        f.render_stateful_widget(list, chunks[0], &mut cards.list);
    }

    let selected = cards.list.selected().and_then(|i| cards.registry.cards().get(i));
    render_card_face(f, chunks[1], selected);

    if let Some(form) = &cards.form {
        render_form(f, area, form);
    }
}

fn render_card_face(f: &mut Frame, area: Rect, card: Option<&Card>) {
    let Some(card) = card else {
        f.render_widget(Block::default().borders(Borders::ALL).title(" Détails "), area);
        return;
    };

    let (border, text) = theme::card_colors(card.theme);
    let face = Paragraph::new(vec![
        Line::from(Span::styled("VeloBank", Style::default().fg(text).add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(Span::styled(card.masked_number(), Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(vec![Span::styled("Nom      ", theme::muted()), Span::raw(card.name.clone())]),
        Line::from(vec![Span::styled("Limite   ", theme::muted()), Span::raw(format_eur(card.limit))]),
        Line::from(vec![
            Span::styled("Créée le ", theme::muted()),
            Span::raw(card.created_at.format("%d/%m/%Y").to_string()),
        ]),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(" Détails "),
    );
    f.render_widget(face, area);
}

fn render_form(f: &mut Frame, area: Rect, form: &CardForm) {
    let popup = centered_rect(48, 12, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::ACCENT))
        .title(" Nouvelle carte ");
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let name = Paragraph::new(form.name.display()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme::focused_border(form.focus == CardField::Name))
            .title(" Nom de la carte "),
    );
    f.render_widget(name, chunks[0]);

    let limit = Paragraph::new(form.limit.display()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme::focused_border(form.focus == CardField::Limit))
            .title(" Limite de dépense (€) "),
    );
    f.render_widget(limit, chunks[1]);

    if let Some(error) = &form.error {
        f.render_widget(Paragraph::new(Span::styled(error.as_str(), theme::error())), chunks[2]);
    }

    let hints = Paragraph::new(Line::from(vec![
        Span::styled("Entrée", theme::key_hint()),
        Span::raw(" créer  "),
        Span::styled("Tab", theme::key_hint()),
        Span::raw(" champ  "),
        Span::styled("Esc", theme::key_hint()),
        Span::raw(" annuler"),
    ]));
    f.render_widget(hints, chunks[3]);
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{logged_in_app, render};
    use crate::router::ViewId;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_seed_card_details() {
        let mut app = logged_in_app();
        app.navigate(ViewId::Cards);

        let screen = render(&mut app);
        assert!(screen.contains("Mes cartes (1)"));
        assert!(screen.contains("Carte Principale"));
        assert!(screen.contains("€5000.00"));
    }

    #[test]
    fn test_form_popup_and_error() {
        let mut app = logged_in_app();
        app.navigate(ViewId::Cards);
        app.handle_key(KeyEvent::new(KeyCode::Char('n'), KeyModifiers::NONE));
        app.handle_key(KeyEvent::new(KeyCode::Char('X'), KeyModifiers::NONE));
        app.handle_key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));
        app.handle_key(KeyEvent::new(KeyCode::Char('-'), KeyModifiers::NONE));
        app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));

        let screen = render(&mut app);
        assert!(screen.contains("Nouvelle carte"));
        assert!(screen.contains("Limite de dépense invalide"));
    }

    #[test]
    fn test_empty_registry_message() {
        let mut app = logged_in_app();
        app.navigate(ViewId::Cards);
        app.handle_key(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::NONE));

        let screen = render(&mut app);
        assert!(screen.contains("Aucune carte"));
    }
}
