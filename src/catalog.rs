// 📚 Static Catalogs - seed data and the lookups over it
//
// Every list is returned in insertion order. Nothing here mutates: cards
// become mutable only once they are moved into a CardRegistry.

use crate::entities::{Card, CardRegistry, Category, Identity, Transaction, TransactionKind};
use crate::validation::ValidationError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// CONTACTS & MERCHANTS
// ============================================================================

pub fn list_contacts() -> Vec<Identity> {
    vec![
        Identity::new("1", "Alexandre Dubois", "AD", Some("alex@example.com")),
        Identity::new("2", "Emma Rousseau", "ER", Some("emma@example.com")),
        Identity::new("3", "Marc Lefevre", "ML", Some("marc@example.com")),
        Identity::new("4", "Isabelle Moreau", "IM", Some("isabelle@example.com")),
    ]
}

pub fn list_merchants() -> Vec<Identity> {
    vec![
        Identity::new("1", "Amazon", "AM", None),
        Identity::new("2", "Spotify", "SP", None),
        Identity::new("3", "Netflix", "NF", None),
        Identity::new("4", "Apple", "AP", None),
        Identity::new("5", "PlayStation", "PS", None),
        Identity::new("6", "Autre", "+", None),
    ]
}

pub fn list_cards() -> Vec<Card> {
    CardRegistry::with_defaults().cards().to_vec()
}

// ============================================================================
// TRANSACTIONS
// ============================================================================

#[allow(clippy::too_many_arguments)]
fn tx(
    id: &str,
    name: &str,
    category: Category,
    amount: Decimal,
    kind: TransactionKind,
    date: &str,
    time: &str,
    merchant: &str,
) -> Transaction {
    Transaction {
        id: id.to_string(),
        name: name.to_string(),
        category,
        amount,
        kind,
        date: date.to_string(),
        time: time.to_string(),
        merchant: Some(merchant.to_string()),
    }
}

pub fn list_transactions() -> Vec<Transaction> {
    use Category::*;
    use TransactionKind::{Expense, Income};

    vec![
        tx("1", "Café du Commerce", Alimentation, dec!(4.50), Expense, "Aujourd'hui", "14:32", "CAFE COMMERCE PARIS"),
        tx("2", "Amazon", Shopping, dec!(89.99), Expense, "Hier", "10:15", "AMAZON EU SARL"),
        tx("3", "EDF Électricité", Factures, dec!(125.00), Expense, "Il y a 2 jours", "09:00", "EDF ENERGIE"),
        tx("4", "Orange Mobile", Telephone, dec!(35.00), Expense, "Il y a 3 jours", "13:45", "ORANGE TELECOM"),
        tx("5", "Virement reçu - Employeur", Revenus, dec!(2500.00), Income, "Il y a 5 jours", "08:00", "TECH CORP SA"),
        tx("6", "Spotify Premium", Divertissement, dec!(12.99), Expense, "Il y a 6 jours", "11:20", "SPOTIFY AB"),
        tx("7", "Rent Payment", Logement, dec!(800.00), Expense, "Il y a 8 jours", "07:00", "LANDLORD VIREMENT"),
        tx("8", "PlayStation Store", Jeux, dec!(29.99), Expense, "Il y a 10 jours", "19:30", "PLAYSTATION STORE"),
    ]
}

/// Dashboard widget: the five most recent rows
pub fn recent_transactions() -> Vec<Transaction> {
    list_transactions().into_iter().take(5).collect()
}

// ============================================================================
// CATEGORY FILTER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// The "Tous" sentinel
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub const ALL_LABEL: &'static str = "Tous";

    /// Filter bar, in display order
    pub fn bar() -> Vec<CategoryFilter> {
        use Category::*;
        vec![
            CategoryFilter::All,
            CategoryFilter::Only(Alimentation),
            CategoryFilter::Only(Shopping),
            CategoryFilter::Only(Factures),
            CategoryFilter::Only(Revenus),
            CategoryFilter::Only(Divertissement),
            CategoryFilter::Only(Logement),
            CategoryFilter::Only(Jeux),
            CategoryFilter::Only(Telephone),
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            CategoryFilter::All => Self::ALL_LABEL,
            CategoryFilter::Only(category) => category.as_str(),
        }
    }

    pub fn matches(&self, tx: &Transaction) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => tx.category == *category,
        }
    }

    /// Clicking the active chip again falls back to "Tous"
    pub fn toggle(self, clicked: CategoryFilter) -> CategoryFilter {
        if self == clicked {
            CategoryFilter::All
        } else {
            clicked
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CategoryFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case(Self::ALL_LABEL) || s.eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse::<Category>().map(CategoryFilter::Only)
    }
}

/// Filter bar labels: "Tous" first, then the categories in display order
pub fn categories() -> Vec<&'static str> {
    CategoryFilter::bar().iter().map(|f| f.label()).collect()
}

/// Rows of the given category, or every row for the "Tous" sentinel
pub fn filter_by_category(transactions: &[Transaction], filter: CategoryFilter) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|tx| filter.matches(tx))
        .cloned()
        .collect()
}

/// Signed total per category (income +, expense -). Zero totals are left out.
pub fn sum_by_category(transactions: &[Transaction]) -> BTreeMap<Category, Decimal> {
    let mut totals: BTreeMap<Category, Decimal> = BTreeMap::new();

    for tx in transactions {
        *totals.entry(tx.category).or_insert(Decimal::ZERO) += tx.signed_amount();
    }

    totals.retain(|_, total| !total.is_zero());
    totals
}

// ============================================================================
// ACCOUNT OVERVIEW
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountOverview {
    pub balance: Decimal,
    pub monthly_income: Decimal,
    pub monthly_expense: Decimal,
    pub masked_account_id: String,
}

pub fn account_overview() -> AccountOverview {
    AccountOverview {
        balance: dec!(4850.75),
        monthly_income: dec!(3200.00),
        monthly_expense: dec!(1450.25),
        masked_account_id: "****-****-****-7891".to_string(),
    }
}
