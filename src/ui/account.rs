use super::app::App;
use super::{theme, truncate};
use crate::catalog::{self, CategoryFilter};
use crate::entities::Transaction;
use crate::money::{format_eur, format_signed};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

/// History table shared with the dashboard's recent list
pub(super) fn transaction_table(transactions: &[Transaction]) -> Table<'static> {
    let header_cells = ["", "Libellé", "Catégorie", "Date", "Montant"].iter().map(|h| {
        Cell::from(*h).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    });
    let header = Row::new(header_cells).style(Style::default().bg(Color::DarkGray)).height(1);

    let rows: Vec<Row> = transactions
        .iter()
        .map(|tx| {
            let glyph = theme::category_glyph(tx.category).to_string();
            Row::new(vec![
                Cell::from(glyph).style(Style::default().fg(theme::category_color(tx.category))),
                Cell::from(truncate(&tx.name, 28)),
                Cell::from(tx.category.as_str()),
                Cell::from(format!("{} {}", tx.date, tx.time)),
                Cell::from(format_signed(tx.signed_amount())).style(theme::amount(tx.kind)),
            ])
            .height(1)
        })
        .collect();

    Table::new(
        rows,
        [
            Constraint::Length(2),
            Constraint::Length(30),
            Constraint::Length(16),
            Constraint::Length(22),
            Constraint::Length(14),
        ],
    )
    .header(header)
    .highlight_style(theme::highlight())
    .highlight_symbol("→ ")
}

pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let overview = catalog::account_overview();
    let visible = app.account.visible();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Summary
            Constraint::Length(3), // Filter bar
            Constraint::Length(1), // Total + count
            Constraint::Min(0),    // History
        ])
        .split(area);

    let summary = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("Solde ", theme::muted()),
            Span::styled(format_eur(overview.balance), Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
            Span::raw("   "),
            Span::styled(overview.masked_account_id.clone(), theme::muted()),
        ]),
        Line::from(vec![
            Span::raw("Revenus du mois "),
            Span::styled(format!("+{}", format_eur(overview.monthly_income)), Style::default().fg(Color::Green)),
            Span::raw("   Dépenses du mois "),
            Span::styled(format!("-{}", format_eur(overview.monthly_expense)), Style::default().fg(Color::Red)),
        ]),
    ])
    .block(Block::default().borders(Borders::ALL).title(" Compte courant "));
    f.render_widget(summary, chunks[0]);

    let mut chips = Vec::new();
    for (i, chip) in CategoryFilter::bar().iter().enumerate() {
        let mut style = if *chip == app.account.filter {
            Style::default().fg(Color::Black).bg(theme::ACCENT)
        } else {
            Style::default().fg(Color::White)
        };
        if i == app.account.cursor {
            style = style.add_modifier(Modifier::UNDERLINED | Modifier::BOLD);
        }
        chips.push(Span::styled(format!(" {} ", chip.label()), style));
    }
    let bar = Paragraph::new(Line::from(chips)).block(Block::default().borders(Borders::ALL).title(" Catégories "));
    f.render_widget(bar, chunks[1]);

    let mut info = vec![Span::styled(format!(" {} transaction(s)", visible.len()), theme::muted())];
    if let CategoryFilter::Only(category) = app.account.filter {
        let total = catalog::sum_by_category(&visible).get(&category).copied().unwrap_or_default();
        info.push(Span::raw("   Total "));
        info.push(Span::styled(
            format!("{}: {}", category, format_signed(total)),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(info)), chunks[2]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(" Historique ");

    if visible.is_empty() {
        let empty = Paragraph::new(Span::styled(" Aucune transaction dans cette catégorie", theme::muted())).block(block);
        f.render_widget(empty, chunks[3]);
        return;
    }

    let table = transaction_table(&visible).block(block);
    f.render_stateful_widget(table, chunks[3], &mut app.account.table);
}
