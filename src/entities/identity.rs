// 👤 Identity - contacts and merchants
//
// A transfer goes to a contact, a payment goes to a merchant. Both are the same
// shape: a stable id, a display name, a short label for the avatar bubble and an
// optional contact detail. Catalog identities never change; the only ones built
// at runtime are merchants typed in by hand on the payment screen.

use crate::validation::ValidationError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,

    pub display_name: String,

    /// Initials shown in the avatar bubble
    pub short_label: String,

    /// Email for contacts, None for merchants
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_detail: Option<String>,
}

impl Identity {
    pub fn new(id: &str, display_name: &str, short_label: &str, contact_detail: Option<&str>) -> Self {
        Identity {
            id: id.to_string(),
            display_name: display_name.to_string(),
            short_label: short_label.to_string(),
            contact_detail: contact_detail.map(str::to_string),
        }
    }

    /// Merchant typed in by the user instead of picked from the catalog
    pub fn custom_merchant(name: &str) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingMerchantName);
        }

        // Same name, same id: going back and forth must not change the draft
        let id = uuid::Uuid::new_v5(&uuid::Uuid::NAMESPACE_OID, name.as_bytes());
        Ok(Identity {
            id: format!("custom-{}", id),
            display_name: name.to_string(),
            short_label: initials(name),
            contact_detail: None,
        })
    }
}

/// First letter of the first two words, uppercased ("Emma Rousseau" → "ER")
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initials() {
        assert_eq!(initials("Emma Rousseau"), "ER");
        assert_eq!(initials("boulangerie paul du coin"), "BP");
        assert_eq!(initials("Amazon"), "A");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn test_custom_merchant() {
        let merchant = Identity::custom_merchant("  Boulangerie Paul ").unwrap();
        assert_eq!(merchant.display_name, "Boulangerie Paul");
        assert_eq!(merchant.short_label, "BP");
        assert!(merchant.id.starts_with("custom-"));
        assert!(merchant.contact_detail.is_none());
    }

    #[test]
    fn test_custom_merchant_id_is_stable() {
        let first = Identity::custom_merchant("Boulangerie Paul").unwrap();
        let again = Identity::custom_merchant(" Boulangerie Paul  ").unwrap();
        let other = Identity::custom_merchant("Boulangerie Pierre").unwrap();
        assert_eq!(first, again);
        assert_ne!(first.id, other.id);
    }

    #[test]
    fn test_custom_merchant_requires_a_name() {
        assert_eq!(Identity::custom_merchant("   "), Err(ValidationError::MissingMerchantName));
    }
}
