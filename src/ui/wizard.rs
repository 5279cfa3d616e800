// Send and pay wizards: one panel per step plus a step indicator

use super::app::{AmountField, App, PayState, SendState};
use super::input::TextInput;
use super::theme;
use crate::flow::{PaymentMethod, PaymentStep, TransferStep};
use crate::money::format_eur;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};

pub fn render_send(f: &mut Frame, area: Rect, app: &mut App) {
    let Some(send) = app.send.as_mut() else {
        return;
    };

    let (index, total) = send.flow.position();
    let body = frame_step(f, area, "Envoyer de l'argent", index, total);

    match send.flow.current_step() {
        TransferStep::Select => render_contacts(f, body, send),
        TransferStep::Amount => render_transfer_amount(f, body, send),
        TransferStep::Confirm => {
            let draft = send.flow.draft();
            let recipient = draft.recipient.as_ref().map(|r| r.display_name.as_str()).unwrap_or("");
            let mut lines = vec![
                summary_line("Destinataire", recipient.to_string()),
                summary_line("Montant", draft.amount.map(format_eur).unwrap_or_default()),
            ];
            if let Some(note) = &draft.note {
                lines.push(summary_line("Note", note.clone()));
            }
            render_confirm(f, body, lines, send.error.as_deref());
        }
        TransferStep::Success => {
            let receipt = send.flow.draft().receipt().unwrap_or_default();
            let remaining = send.flow.completion_remaining(Instant::now());
            render_success(f, body, "Transfert réussi !", &receipt, remaining.map(whole_seconds));
        }
    }
}

pub fn render_pay(f: &mut Frame, area: Rect, app: &mut App) {
    let Some(pay) = app.pay.as_mut() else {
        return;
    };

    let (index, total) = pay.flow.position();
    let body = frame_step(f, area, "Payer", index, total);

    match pay.flow.current_step() {
        PaymentStep::Method => render_methods(f, body, pay),
        PaymentStep::Merchant => render_merchants(f, body, pay),
        PaymentStep::Amount => {
            let merchant = pay.flow.draft().merchant.as_ref().map(|m| m.display_name.clone()).unwrap_or_default();
            let chunks = vertical(body, &[2, 3, 2]);
            f.render_widget(
                Paragraph::new(Line::from(vec![Span::styled("Payer à ", theme::muted()), Span::raw(merchant)])),
                chunks[0],
            );
            render_field(f, chunks[1], "Montant (€)", &pay.amount, true);
            render_error(f, chunks[2], pay.error.as_deref());
        }
        PaymentStep::Confirm => {
            let draft = pay.flow.draft();
            let lines = vec![
                summary_line("Commerçant", draft.merchant.as_ref().map(|m| m.display_name.clone()).unwrap_or_default()),
                summary_line("Méthode", draft.method.map(|m| m.funding_source()).unwrap_or("").to_string()),
                summary_line("Montant", draft.amount.map(format_eur).unwrap_or_default()),
            ];
            render_confirm(f, body, lines, pay.error.as_deref());
        }
        PaymentStep::Success => {
            let receipt = pay.flow.draft().receipt().unwrap_or_default();
            let remaining = pay.flow.completion_remaining(Instant::now());
            render_success(f, body, "Paiement réussi !", &receipt, remaining.map(whole_seconds));
        }
    }
}

// ============================================================================
// STEP PANELS
// ============================================================================

/// Outer block with the step indicator; returns the inner area
fn frame_step(f: &mut Frame, area: Rect, title: &str, index: usize, total: usize) -> Rect {
    // Success is not counted as a step of its own
    let shown = (index + 1).min(total.saturating_sub(1)).max(1);
    let dots: String = (0..total.saturating_sub(1))
        .map(|i| if i <= index { '●' } else { '○' })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::ACCENT))
        .title(format!(" {} - Étape {}/{} {} ", title, shown, total.saturating_sub(1), dots));
    let inner = block.inner(area);
    f.render_widget(block, area);
    inner
}

fn render_contacts(f: &mut Frame, area: Rect, send: &mut SendState) {
    let items: Vec<ListItem> = send
        .contacts
        .iter()
        .map(|c| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("[{}] ", c.short_label), Style::default().fg(theme::ACCENT)),
                Span::raw(format!("{:<22}", c.display_name)),
                Span::styled(c.contact_detail.clone().unwrap_or_default(), theme::muted()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Choisir un contact "))
        .highlight_style(theme::highlight())
        .highlight_symbol("→ ");
    f.render_stateful_widget(list, area, &mut send.list);
}

fn render_transfer_amount(f: &mut Frame, area: Rect, send: &SendState) {
    let recipient = send
        .flow
        .draft()
        .recipient
        .as_ref()
        .map(|r| format!("[{}] {}", r.short_label, r.display_name))
        .unwrap_or_default();

    let chunks = vertical(area, &[2, 3, 3, 2]);
    f.render_widget(
        Paragraph::new(Line::from(vec![Span::styled("Envoyer à ", theme::muted()), Span::raw(recipient)])),
        chunks[0],
    );
    render_field(f, chunks[1], "Montant (€)", &send.amount, send.focus == AmountField::Amount);
    render_field(f, chunks[2], "Note (optionnel)", &send.note, send.focus == AmountField::Note);
    render_error(f, chunks[3], send.error.as_deref());
}

fn render_methods(f: &mut Frame, area: Rect, pay: &mut PayState) {
    let items: Vec<ListItem> = PaymentMethod::ALL
        .iter()
        .map(|m| {
            ListItem::new(vec![
                Line::from(Span::styled(m.label(), Style::default().add_modifier(Modifier::BOLD))),
                Line::from(Span::styled(format!("  {}", m.description()), theme::muted())),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Méthode de paiement "))
        .highlight_style(theme::highlight())
        .highlight_symbol("→ ");
    f.render_stateful_widget(list, area, &mut pay.method_list);
}

fn render_merchants(f: &mut Frame, area: Rect, pay: &mut PayState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(3), Constraint::Length(2)])
        .split(area);

    let items: Vec<ListItem> = pay
        .merchants
        .iter()
        .map(|m| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("[{}] ", m.short_label), Style::default().fg(theme::ACCENT)),
                Span::raw(m.display_name.clone()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Commerçant "))
        .highlight_style(theme::highlight())
        .highlight_symbol("→ ");
    f.render_stateful_widget(list, chunks[0], &mut pay.merchant_list);

    render_field(f, chunks[1], "Ou saisir un nom", &pay.custom_merchant, true);
    render_error(f, chunks[2], pay.error.as_deref());
}

fn render_confirm(f: &mut Frame, area: Rect, mut lines: Vec<Line<'static>>, error: Option<&str>) {
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Entrée", theme::key_hint()),
        Span::raw(" confirmer   "),
        Span::styled("Esc", theme::key_hint()),
        Span::raw(" modifier"),
    ]));
    if let Some(error) = error {
        lines.push(Line::from(Span::styled(error.to_string(), theme::error())));
    }

    let panel = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Confirmer "));
    f.render_widget(panel, area);
}

fn render_success(f: &mut Frame, area: Rect, headline: &str, receipt: &str, seconds_left: Option<u64>) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            headline.to_string(),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(receipt.to_string()),
        Line::from(""),
    ];
    if let Some(secs) = seconds_left {
        lines.push(Line::from(Span::styled(format!("Retour à l'accueil dans {}s", secs), theme::muted())));
    }

    let panel = Paragraph::new(lines).alignment(Alignment::Center).block(Block::default().borders(Borders::ALL));
    f.render_widget(panel, area);
}

// ============================================================================
// WIDGET HELPERS
// ============================================================================

fn vertical(area: Rect, heights: &[u16]) -> Vec<Rect> {
    let mut constraints: Vec<Constraint> = heights.iter().map(|h| Constraint::Length(*h)).collect();
    constraints.push(Constraint::Min(0));
    Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area)
        .to_vec()
}

fn render_field(f: &mut Frame, area: Rect, title: &str, input: &TextInput, focused: bool) {
    let field = Paragraph::new(input.display()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme::focused_border(focused))
            .title(format!(" {} ", title)),
    );
    f.render_widget(field, area);
}

fn render_error(f: &mut Frame, area: Rect, error: Option<&str>) {
    if let Some(error) = error {
        f.render_widget(Paragraph::new(Span::styled(error.to_string(), theme::error())), area);
    }
}

/// Countdown shown to the user, rounded up
fn whole_seconds(d: Duration) -> u64 {
    d.as_secs() + u64::from(d.subsec_nanos() > 0)
}

fn summary_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<14}", label), theme::muted()),
        Span::styled(value, Style::default().add_modifier(Modifier::BOLD)),
    ])
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{logged_in_app, render};
    use crate::router::ViewId;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::time::Duration;

    fn press(app: &mut crate::ui::App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_countdown_rounds_up() {
        assert_eq!(super::whole_seconds(Duration::from_millis(2001)), 3);
        assert_eq!(super::whole_seconds(Duration::from_secs(3)), 3);
        assert_eq!(super::whole_seconds(Duration::ZERO), 0);
    }

    #[test]
    fn test_send_steps_render() {
        let mut app = logged_in_app();
        app.navigate(ViewId::Send);

        let screen = render(&mut app);
        assert!(screen.contains("Étape 1/3"));
        assert!(screen.contains("Alexandre Dubois"));

        press(&mut app, KeyCode::Enter);
        for c in "42".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);

        let screen = render(&mut app);
        assert!(screen.contains("Étape 3/3"));
        assert!(screen.contains("€42.00"));

        press(&mut app, KeyCode::Enter);
        let screen = render(&mut app);
        assert!(screen.contains("Transfert réussi !"));
        assert!(screen.contains("€42.00 envoyé à Alexandre Dubois"));
        assert!(screen.contains("Retour à l'accueil dans"));
    }

    #[test]
    fn test_pay_confirm_shows_funding_source() {
        let mut app = logged_in_app();
        app.navigate(ViewId::Pay);

        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        for c in "9,99".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);

        let screen = render(&mut app);
        assert!(screen.contains("Spotify"));
        assert!(screen.contains("Carte virtuelle VeloBank"));
        assert!(screen.contains("€9.99"));
    }
}
