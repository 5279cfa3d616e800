// 💳 Card Entity - virtual cards held in memory
//
// The registry starts with the main card and lets the user add and remove
// cards for the rest of the session. Nothing is written anywhere: a restart
// brings back the single seed card.

use crate::validation::{validate_card_form, ValidationError};
use chrono::{DateTime, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

// ============================================================================
// CARD THEME
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardTheme {
    /// Main card
    PinkPurple,
    CyanEmerald,
    PurplePink,
    RedYellow,
}

impl CardTheme {
    /// Themes drawn at random for newly created cards
    pub const NEW_CARD_THEMES: [CardTheme; 3] =
        [CardTheme::CyanEmerald, CardTheme::PurplePink, CardTheme::RedYellow];

    pub fn as_str(&self) -> &'static str {
        match self {
            CardTheme::PinkPurple => "pink-purple",
            CardTheme::CyanEmerald => "cyan-emerald",
            CardTheme::PurplePink => "purple-pink",
            CardTheme::RedYellow => "red-yellow",
        }
    }
}

// ============================================================================
// CARD
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,

    /// Last four digits, always 4 ASCII digits
    pub last4: String,
    pub name: String,
    pub limit: Decimal,
    pub theme: CardTheme,
    pub created_at: DateTime<Utc>,
}

impl Card {
    pub fn masked_number(&self) -> String {
        format!("•••• •••• •••• {}", self.last4)
    }
}

// ============================================================================
// CARD REGISTRY
// ============================================================================

#[derive(Debug, Clone)]
pub struct CardRegistry {
    cards: Vec<Card>,
}

impl CardRegistry {
    /// Create new empty registry
    pub fn new() -> Self {
        CardRegistry { cards: Vec::new() }
    }

    /// Registry holding the main card
    pub fn with_defaults() -> Self {
        CardRegistry {
            cards: vec![Card {
                id: "1".to_string(),
                last4: "4829".to_string(),
                name: "Carte Principale".to_string(),
                limit: dec!(5000),
                theme: CardTheme::PinkPurple,
                created_at: Utc::now(),
            }],
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn get(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Validate the form and append a new card with random digits and theme
    pub fn create<R: Rng>(&mut self, name: &str, limit: &str, rng: &mut R) -> Result<&Card, ValidationError> {
        let (name, limit) = validate_card_form(name, limit)?;

        let last4 = rng.gen_range(1000..=9999u16).to_string();
        let theme = CardTheme::NEW_CARD_THEMES[rng.gen_range(0..CardTheme::NEW_CARD_THEMES.len())];

        let card = Card {
            id: uuid::Uuid::new_v4().to_string(),
            last4,
            name,
            limit,
            theme,
            created_at: Utc::now(),
        };

        tracing::info!(card_id = %card.id, last4 = %card.last4, "virtual card created");
        self.cards.push(card);
        Ok(&self.cards[self.cards.len() - 1])
    }

    /// Remove the card with this id; returns it if it existed
    pub fn delete(&mut self, id: &str) -> Option<Card> {
        let index = self.cards.iter().position(|c| c.id == id)?;
        let card = self.cards.remove(index);
        tracing::info!(card_id = %card.id, "virtual card deleted");
        Some(card)
    }
}

impl Default for CardRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_registry_starts_with_main_card() {
        let registry = CardRegistry::with_defaults();
        assert_eq!(registry.len(), 1);
        let main = &registry.cards()[0];
        assert_eq!(main.last4, "4829");
        assert_eq!(main.name, "Carte Principale");
        assert_eq!(main.limit, dec!(5000));
        assert_eq!(main.theme, CardTheme::PinkPurple);
    }

    #[test]
    fn test_create_card() {
        let mut registry = CardRegistry::with_defaults();
        let mut rng = StdRng::seed_from_u64(7);

        let card = registry.create("Test", "100", &mut rng).unwrap().clone();

        assert_eq!(registry.len(), 2);
        assert_eq!(card.name, "Test");
        assert_eq!(card.limit, dec!(100.00));
        assert_eq!(format!("{:.2}", card.limit), "100.00");
        assert_eq!(card.last4.len(), 4);
        assert!(card.last4.chars().all(|c| c.is_ascii_digit()));
        assert!(CardTheme::NEW_CARD_THEMES.contains(&card.theme));
    }

    #[test]
    fn test_create_card_rejects_invalid_form() {
        let mut registry = CardRegistry::with_defaults();
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(registry.create("", "100", &mut rng).unwrap_err(), ValidationError::MissingCardName);
        assert_eq!(registry.create("Test", "beaucoup", &mut rng).unwrap_err(), ValidationError::InvalidLimit);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_last4_never_has_leading_zero() {
        let mut registry = CardRegistry::new();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            registry.create("Loop", "1", &mut rng).unwrap();
        }
        assert!(registry.cards().iter().all(|c| c.last4.len() == 4 && !c.last4.starts_with('0')));
    }

    #[test]
    fn test_delete_removes_only_that_card() {
        let mut registry = CardRegistry::with_defaults();
        let mut rng = StdRng::seed_from_u64(3);
        let first = registry.create("A", "10", &mut rng).unwrap().id.clone();
        let second = registry.create("B", "20", &mut rng).unwrap().id.clone();

        let removed = registry.delete(&first).unwrap();

        assert_eq!(removed.name, "A");
        assert_eq!(registry.len(), 2);
        assert!(registry.get(&first).is_none());
        assert!(registry.get(&second).is_some());
        assert!(registry.get("1").is_some());
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let mut registry = CardRegistry::with_defaults();
        assert!(registry.delete("nope").is_none());
        assert_eq!(registry.len(), 1);
    }
}
