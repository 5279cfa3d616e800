// 🧾 Transaction Entity - display-only history rows
//
// Amounts are stored unsigned; the sign always comes from the kind.
// Icons and colours are NOT part of the record, the UI maps categories to glyphs.

use crate::validation::ValidationError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// TRANSACTION KIND
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Expense,
    Income,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Expense => "expense",
            TransactionKind::Income => "income",
        }
    }

    /// Apply this kind's sign to an unsigned amount
    pub fn signed(&self, amount: Decimal) -> Decimal {
        match self {
            TransactionKind::Expense => -amount,
            TransactionKind::Income => amount,
        }
    }
}

// ============================================================================
// CATEGORY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Alimentation,
    Shopping,
    Factures,
    Revenus,
    Divertissement,
    Logement,
    Jeux,
    Telephone,
    Transport,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Alimentation,
        Category::Shopping,
        Category::Factures,
        Category::Revenus,
        Category::Divertissement,
        Category::Logement,
        Category::Jeux,
        Category::Telephone,
        Category::Transport,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Alimentation => "Alimentation",
            Category::Shopping => "Shopping",
            Category::Factures => "Factures",
            Category::Revenus => "Revenus",
            Category::Divertissement => "Divertissement",
            Category::Logement => "Logement",
            Category::Jeux => "Jeux",
            Category::Telephone => "Téléphone",
            Category::Transport => "Transport",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            // Accept the unaccented spelling from a plain keyboard
            .or_else(|| wanted.eq_ignore_ascii_case("telephone").then_some(Category::Telephone))
            .ok_or_else(|| ValidationError::UnknownCategory(wanted.to_string()))
    }
}

// ============================================================================
// TRANSACTION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub name: String,
    pub category: Category,

    /// Always >= 0, see `signed_amount`
    pub amount: Decimal,
    pub kind: TransactionKind,

    /// Relative label ("Hier", "Il y a 2 jours")
    pub date: String,
    pub time: String,

    /// Statement descriptor as the bank prints it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant: Option<String>,
}

impl Transaction {
    pub fn signed_amount(&self) -> Decimal {
        self.kind.signed(self.amount)
    }
}
