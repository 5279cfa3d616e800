use super::account::transaction_table;
use super::app::App;
use super::theme;
use crate::catalog::{self, AccountOverview};
use crate::money::format_eur;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, TableState},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let overview = catalog::account_overview();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Greeting
            Constraint::Length(7), // Card + balance
            Constraint::Length(4), // Quick actions
            Constraint::Min(0),    // Recent transactions
        ])
        .split(area);

    let first_name = app.router.user().map(|u| u.first_name()).unwrap_or("");
    let greeting = Paragraph::new(vec![
        Line::from(Span::styled(format!(" Bonjour, {}", first_name), theme::title())),
        Line::from(Span::styled(" Voici un aperçu de vos finances", theme::muted())),
    ]);
    f.render_widget(greeting, rows[0]);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(rows[1]);

    render_card(f, top[0], app);
    render_balance(f, top[1], &overview, app.dashboard.show_balance);
    render_actions(f, rows[2]);

    let recent = catalog::recent_transactions();
    let mut state = TableState::default();
    let table = transaction_table(&recent).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Transactions récentes (a: tout voir) "),
    );
    f.render_stateful_widget(table, rows[3], &mut state);
}

fn render_card(f: &mut Frame, area: Rect, app: &App) {
    let Some(card) = app.cards.registry.cards().first() else {
        let empty = Paragraph::new(Span::styled(" Aucune carte", theme::muted()))
            .block(Block::default().borders(Borders::ALL).title(" Carte virtuelle "));
        f.render_widget(empty, area);
        return;
    };

    let (border, text) = theme::card_colors(card.theme);
    let holder = app.router.user().map(|u| u.name.to_uppercase()).unwrap_or_default();

    let face = Paragraph::new(vec![
        Line::from(Span::styled(card.name.clone(), Style::default().fg(text).add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(Span::styled(card.masked_number(), Style::default().fg(Color::White))),
        Line::from(vec![
            Span::styled(holder, theme::muted()),
            Span::raw("  "),
            Span::styled("12/28", theme::muted()),
        ]),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(" Carte virtuelle "),
    );
    f.render_widget(face, area);
}

fn render_balance(f: &mut Frame, area: Rect, overview: &AccountOverview, show_balance: bool) {
    let balance = if show_balance {
        format_eur(overview.balance)
    } else {
        "€••••••".to_string()
    };

    let content = Paragraph::new(vec![
        Line::from(Span::styled("Solde disponible", theme::muted())),
        Line::from(Span::styled(balance, Style::default().fg(Color::White).add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(vec![
            Span::raw("Revenus "),
            Span::styled(format!("+{}", format_eur(overview.monthly_income)), Style::default().fg(Color::Green)),
            Span::raw("   Dépenses "),
            Span::styled(format!("-{}", format_eur(overview.monthly_expense)), Style::default().fg(Color::Red)),
        ]),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .title(" Compte "),
    );
    f.render_widget(content, area);
}

fn render_actions(f: &mut Frame, area: Rect) {
    let actions = [("1", "Envoyer"), ("2", "Payer"), ("3", "Cartes"), ("4", "Analyse")];

    let mut spans = Vec::new();
    for (key, label) in actions {
        spans.push(Span::raw("  ["));
        spans.push(Span::styled(key, theme::key_hint()));
        spans.push(Span::raw(format!("] {}  ", label)));
    }

    let bar = Paragraph::new(vec![Line::from(""), Line::from(spans)])
        .block(Block::default().borders(Borders::ALL).title(" Actions rapides "));
    f.render_widget(bar, area);
}
