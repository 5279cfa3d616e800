// 🛒 Merchant payment: method, merchant, amount, confirm

use super::{Flow, FlowError, FlowKind};
use crate::entities::Identity;
use crate::money::format_eur;
use crate::validation::parse_amount;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PaymentMethod {
    /// Pay with the VeloBank virtual card
    VirtualCard,
    /// Debit the account balance directly
    Direct,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 2] = [PaymentMethod::VirtualCard, PaymentMethod::Direct];

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::VirtualCard => "Carte virtuelle",
            PaymentMethod::Direct => "Paiement direct",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PaymentMethod::VirtualCard => "Utilisez votre carte VeloBank",
            PaymentMethod::Direct => "Débiter directement votre solde",
        }
    }

    /// Wording used on the confirmation screen
    pub fn funding_source(&self) -> &'static str {
        match self {
            PaymentMethod::VirtualCard => "Carte virtuelle VeloBank",
            PaymentMethod::Direct => "Solde du compte",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PaymentStep {
    Method,
    Merchant,
    Amount,
    Confirm,
    Success,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PaymentDraft {
    pub method: Option<PaymentMethod>,
    pub merchant: Option<Identity>,
    pub amount: Option<Decimal>,
}

impl PaymentDraft {
    /// "€9.99 payé à Spotify"
    pub fn receipt(&self) -> Option<String> {
        let merchant = self.merchant.as_ref()?;
        let amount = self.amount?;
        Some(format!("{} payé à {}", format_eur(amount), merchant.display_name))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PaymentInput {
    Method(PaymentMethod),
    Merchant(Identity),
    Amount(String),
}

pub struct Payment;

impl FlowKind for Payment {
    const NAME: &'static str = "payment";

    type Step = PaymentStep;
    type Draft = PaymentDraft;
    type Input = PaymentInput;

    const STEPS: &'static [PaymentStep] = &[
        PaymentStep::Method,
        PaymentStep::Merchant,
        PaymentStep::Amount,
        PaymentStep::Confirm,
        PaymentStep::Success,
    ];

    fn accept(step: PaymentStep, input: PaymentInput, draft: &mut PaymentDraft) -> Result<(), FlowError> {
        match (step, input) {
            (PaymentStep::Method, PaymentInput::Method(method)) => {
                draft.method = Some(method);
            }
            (PaymentStep::Merchant, PaymentInput::Merchant(merchant)) => {
                draft.merchant = Some(merchant);
            }
            (PaymentStep::Amount, PaymentInput::Amount(raw)) => {
                draft.amount = Some(parse_amount(&raw)?);
            }
            (step, _) => return Err(FlowError::unexpected(step)),
        }
        Ok(())
    }

    fn is_ready(draft: &PaymentDraft) -> bool {
        draft.method.is_some() && draft.merchant.is_some() && draft.amount.is_some()
    }
}

pub type PaymentFlow = Flow<Payment>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::list_merchants;
    use rust_decimal_macros::dec;
    use std::time::{Duration, Instant};

    fn spotify() -> Identity {
        list_merchants().into_iter().nth(1).unwrap()
    }

    #[test]
    fn test_full_sequence() {
        let mut flow = PaymentFlow::new();
        assert_eq!(flow.position(), (0, 5));

        flow.advance(PaymentInput::Method(PaymentMethod::Direct)).unwrap();
        flow.advance(PaymentInput::Merchant(spotify())).unwrap();
        assert_eq!(flow.advance(PaymentInput::Amount("9.99".into())), Ok(PaymentStep::Confirm));
        assert_eq!(flow.complete(Instant::now(), Duration::from_secs(3)), Ok(PaymentStep::Success));

        let draft = flow.draft();
        assert_eq!(draft.method, Some(PaymentMethod::Direct));
        assert_eq!(draft.amount, Some(dec!(9.99)));
        assert_eq!(draft.receipt().unwrap(), "€9.99 payé à Spotify");
    }

    #[test]
    fn test_steps_cannot_be_skipped() {
        let mut flow = PaymentFlow::new();

        // Merchant before method
        assert!(flow.advance(PaymentInput::Merchant(spotify())).is_err());
        assert_eq!(flow.current_step(), PaymentStep::Method);

        flow.advance(PaymentInput::Method(PaymentMethod::VirtualCard)).unwrap();

        // Amount before merchant
        assert!(flow.advance(PaymentInput::Amount("10".into())).is_err());
        assert_eq!(flow.current_step(), PaymentStep::Merchant);
        assert!(flow.draft().amount.is_none());
    }

    #[test]
    fn test_custom_merchant() {
        let mut flow = PaymentFlow::new();
        flow.advance(PaymentInput::Method(PaymentMethod::VirtualCard)).unwrap();
        let custom = Identity::custom_merchant("Boulangerie Paul").unwrap();
        flow.advance(PaymentInput::Merchant(custom)).unwrap();

        assert_eq!(flow.current_step(), PaymentStep::Amount);
        assert_eq!(flow.draft().merchant.as_ref().unwrap().display_name, "Boulangerie Paul");
    }

    #[test]
    fn test_retreat_from_confirm_keeps_amount() {
        let mut flow = PaymentFlow::new();
        flow.advance(PaymentInput::Method(PaymentMethod::VirtualCard)).unwrap();
        flow.advance(PaymentInput::Merchant(spotify())).unwrap();
        flow.advance(PaymentInput::Amount("15".into())).unwrap();
        let before = flow.draft().clone();

        assert_eq!(flow.retreat(), Ok(PaymentStep::Amount));
        assert_eq!(flow.draft(), &before);
        flow.advance(PaymentInput::Amount("15".into())).unwrap();
        assert_eq!(flow.draft(), &before);
    }

    #[test]
    fn test_method_labels() {
        assert_eq!(PaymentMethod::VirtualCard.funding_source(), "Carte virtuelle VeloBank");
        assert_eq!(PaymentMethod::Direct.funding_source(), "Solde du compte");
    }
}
