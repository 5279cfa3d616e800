use super::app::App;
use super::theme;
use crate::analytics::{self, Timeframe, WeeklyFlow};
use crate::money::format_eur;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

const BAR_WIDTH: usize = 30;

pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let headline = analytics::headline();
    let trends = analytics::trends(&headline, &app.analytics.breakdown);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Timeframe tabs
            Constraint::Length(4), // Headline
            Constraint::Min(8),    // Charts
            Constraint::Length(5), // Trends
        ])
        .split(area);

    let mut tabs = vec![Span::raw(" ")];
    for tf in Timeframe::ALL {
        let style = if tf == app.analytics.timeframe {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            theme::muted()
        };
        tabs.push(Span::styled(tf.label(), style));
        tabs.push(Span::raw("  "));
    }
    f.render_widget(Paragraph::new(Line::from(tabs)), rows[0]);

    let stats = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("Revenus ", theme::muted()),
            Span::styled(format_eur(headline.income), Style::default().fg(Color::Green)),
            Span::styled("   Dépenses ", theme::muted()),
            Span::styled(format_eur(headline.expenses), Style::default().fg(Color::Red)),
            Span::styled("   Restant ", theme::muted()),
            Span::styled(format_eur(headline.remaining), Style::default().add_modifier(Modifier::BOLD)),
        ]),
    ])
    .block(Block::default().borders(Borders::ALL).title(" Ce mois-ci "));
    f.render_widget(stats, rows[1]);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[2]);

    render_cash_flow(f, charts[0], &analytics::weekly_cash_flow());

    let total: Decimal = app.analytics.breakdown.iter().map(|c| c.amount).sum();
    let highlighted = app.analytics.highlighted;
    let items: Vec<ListItem> = app
        .analytics
        .breakdown
        .iter()
        .map(|spend| {
            let share = if total.is_zero() {
                Decimal::ZERO
            } else {
                (spend.amount / total * Decimal::ONE_HUNDRED).round()
            };
            let mut style = Style::default().fg(theme::category_color(spend.category));
            if highlighted == Some(spend.category) {
                style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
            }
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<14}", spend.category.as_str()), style),
                Span::raw(format!("{:>10}", format_eur(spend.amount))),
                Span::styled(format!("  {}%", share), theme::muted()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Dépenses par catégorie "))
        .highlight_symbol("→ ");
    f.render_stateful_widget(list, charts[1], &mut app.analytics.list);

    let top = trends
        .top_category
        .as_ref()
        .map(|c| format!("{} ({})", c.category, format_eur(c.amount)))
        .unwrap_or_else(|| "-".to_string());
    let trend_panel = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("Dépense moyenne / jour  ", theme::muted()),
            Span::raw(format_eur(trends.average_daily_spend)),
        ]),
        Line::from(vec![Span::styled("Catégorie principale    ", theme::muted()), Span::raw(top)]),
        Line::from(vec![
            Span::styled("Économies               ", theme::muted()),
            Span::styled(format_eur(trends.savings), Style::default().fg(Color::Green)),
        ]),
    ])
    .block(Block::default().borders(Borders::ALL).title(" Tendances "));
    f.render_widget(trend_panel, rows[3]);
}

fn bar(value: Decimal, max: Decimal) -> String {
    if max.is_zero() {
        return String::new();
    }
    let cells = (value / max * Decimal::from(BAR_WIDTH)).round().to_usize().unwrap_or(0);
    "█".repeat(cells.min(BAR_WIDTH))
}

fn render_cash_flow(f: &mut Frame, area: Rect, weeks: &[WeeklyFlow]) {
    let max = weeks
        .iter()
        .flat_map(|w| [w.income, w.expenses])
        .max()
        .unwrap_or(Decimal::ZERO);

    let mut lines = Vec::new();
    for week in weeks {
        lines.push(Line::from(vec![
            Span::styled(format!("{:<6}", week.label), theme::muted()),
            Span::styled(bar(week.income, max), Style::default().fg(Color::Green)),
            Span::raw(format!(" {}", format_eur(week.income))),
        ]));
        lines.push(Line::from(vec![
            Span::raw("      "),
            Span::styled(bar(week.expenses, max), Style::default().fg(Color::Red)),
            Span::raw(format!(" {}", format_eur(week.expenses))),
        ]));
    }

    let chart = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Flux de trésorerie "));
    f.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{logged_in_app, render};
    use super::*;
    use crate::router::ViewId;
    use rust_decimal_macros::dec;

    #[test]
    fn test_bar_scales_to_max() {
        assert_eq!(bar(dec!(2500), dec!(2500)).chars().count(), BAR_WIDTH);
        assert_eq!(bar(dec!(1250), dec!(2500)).chars().count(), BAR_WIDTH / 2);
        assert_eq!(bar(dec!(0), dec!(2500)), "");
        assert_eq!(bar(dec!(10), dec!(0)), "");
    }

    #[test]
    fn test_analytics_screen() {
        let mut app = logged_in_app();
        app.navigate(ViewId::Analytics);

        let screen = render(&mut app);
        assert!(screen.contains("Mois"));
        assert!(screen.contains("€3200.00"));
        assert!(screen.contains("€1750.00"));
        assert!(screen.contains("€48.33"));
        assert!(screen.contains("Shopping (€450.00)"));
        assert!(screen.contains("Sem 4"));
    }
}
