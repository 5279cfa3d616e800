// Entity Models
//
// - Identity: contacts and merchants (immutable catalog rows)
// - Transaction: display-only history rows, unsigned amount + kind
// - Card: virtual cards, the only entity the user can create and delete
// - AuthenticatedUser: the single active session

pub mod identity;
pub mod transaction;
pub mod card;
pub mod user;

pub use identity::{Identity, initials};
pub use transaction::{Transaction, TransactionKind, Category};
pub use card::{Card, CardTheme, CardRegistry};
pub use user::AuthenticatedUser;
