// Colours and glyphs shared by the screens

use crate::entities::{CardTheme, Category, TransactionKind};
use ratatui::style::{Color, Modifier, Style};

pub const ACCENT: Color = Color::Cyan;

pub fn title() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn key_hint() -> Style {
    Style::default().fg(Color::Yellow)
}

pub fn muted() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn error() -> Style {
    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
}

pub fn highlight() -> Style {
    Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
}

pub fn focused_border(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    }
}

pub fn amount(kind: TransactionKind) -> Style {
    match kind {
        TransactionKind::Income => Style::default().fg(Color::Green),
        TransactionKind::Expense => Style::default().fg(Color::Red),
    }
}

/// Single-width stand-in for the category icon
pub fn category_glyph(category: Category) -> char {
    match category {
        Category::Alimentation => 'A',
        Category::Shopping => 'S',
        Category::Factures => 'F',
        Category::Revenus => 'R',
        Category::Divertissement => 'D',
        Category::Logement => 'L',
        Category::Jeux => 'J',
        Category::Telephone => 'T',
        Category::Transport => 'M',
    }
}

pub fn category_color(category: Category) -> Color {
    match category {
        Category::Alimentation => Color::LightRed,
        Category::Shopping => Color::Magenta,
        Category::Factures => Color::Yellow,
        Category::Revenus => Color::Green,
        Category::Divertissement => Color::LightMagenta,
        Category::Logement => Color::LightBlue,
        Category::Jeux => Color::LightCyan,
        Category::Telephone => Color::Blue,
        Category::Transport => Color::Cyan,
    }
}

/// Border and text colours of a card face
pub fn card_colors(theme: CardTheme) -> (Color, Color) {
    match theme {
        CardTheme::PinkPurple => (Color::LightMagenta, Color::Magenta),
        CardTheme::CyanEmerald => (Color::Cyan, Color::Green),
        CardTheme::PurplePink => (Color::Magenta, Color::LightRed),
        CardTheme::RedYellow => (Color::Red, Color::Yellow),
    }
}
