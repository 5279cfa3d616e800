// 💸 Money transfer: pick a contact, enter an amount, confirm

use super::{Flow, FlowError, FlowKind};
use crate::entities::Identity;
use crate::money::format_eur;
use crate::validation::parse_amount;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TransferStep {
    Select,
    Amount,
    Confirm,
    Success,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransferDraft {
    pub recipient: Option<Identity>,
    pub amount: Option<Decimal>,
    pub note: Option<String>,
}

impl TransferDraft {
    /// "€42.00 envoyé à Emma Rousseau"
    pub fn receipt(&self) -> Option<String> {
        let recipient = self.recipient.as_ref()?;
        let amount = self.amount?;
        Some(format!("{} envoyé à {}", format_eur(amount), recipient.display_name))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TransferInput {
    Recipient(Identity),
    /// Raw form values; the note may be blank
    Amount { amount: String, note: String },
}

pub struct Transfer;

impl FlowKind for Transfer {
    const NAME: &'static str = "transfer";

    type Step = TransferStep;
    type Draft = TransferDraft;
    type Input = TransferInput;

    const STEPS: &'static [TransferStep] = &[
        TransferStep::Select,
        TransferStep::Amount,
        TransferStep::Confirm,
        TransferStep::Success,
    ];

    fn accept(step: TransferStep, input: TransferInput, draft: &mut TransferDraft) -> Result<(), FlowError> {
        match (step, input) {
            (TransferStep::Select, TransferInput::Recipient(contact)) => {
                draft.recipient = Some(contact);
                Ok(())
            }
            (TransferStep::Amount, TransferInput::Amount { amount, note }) => {
                draft.amount = Some(parse_amount(&amount)?);
                let note = note.trim();
                draft.note = (!note.is_empty()).then(|| note.to_string());
                Ok(())
            }
            (step, _) => Err(FlowError::unexpected(step)),
        }
    }

    fn is_ready(draft: &TransferDraft) -> bool {
        draft.recipient.is_some() && draft.amount.is_some()
    }
}

pub type TransferFlow = Flow<Transfer>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::list_contacts;
    use crate::flow::Transition;
    use crate::validation::ValidationError;
    use rust_decimal_macros::dec;
    use std::time::{Duration, Instant};

    fn emma() -> Identity {
        list_contacts().into_iter().nth(1).unwrap()
    }

    fn amount(value: &str, note: &str) -> TransferInput {
        TransferInput::Amount { amount: value.to_string(), note: note.to_string() }
    }

    fn at_confirm() -> TransferFlow {
        let mut flow = TransferFlow::new();
        flow.advance(TransferInput::Recipient(emma())).unwrap();
        flow.advance(amount("42", "Resto")).unwrap();
        flow
    }

    #[test]
    fn test_full_sequence() {
        let mut flow = TransferFlow::new();
        assert_eq!(flow.current_step(), TransferStep::Select);

        assert_eq!(flow.advance(TransferInput::Recipient(emma())), Ok(TransferStep::Amount));
        assert_eq!(flow.advance(amount("42", "  Resto ")), Ok(TransferStep::Confirm));
        assert_eq!(flow.complete(Instant::now(), Duration::from_secs(3)), Ok(TransferStep::Success));

        let draft = flow.draft();
        assert_eq!(draft.recipient.as_ref().unwrap().display_name, "Emma Rousseau");
        assert_eq!(draft.amount, Some(dec!(42)));
        assert_eq!(draft.note.as_deref(), Some("Resto"));
        assert_eq!(draft.receipt().unwrap(), "€42.00 envoyé à Emma Rousseau");
    }

    #[test]
    fn test_missing_or_bad_amount_keeps_step() {
        let mut flow = TransferFlow::new();
        flow.advance(TransferInput::Recipient(emma())).unwrap();

        for bad in ["", "abc", "0", "-5"] {
            assert!(flow.advance(amount(bad, "")).is_err());
            assert_eq!(flow.current_step(), TransferStep::Amount);
            assert_eq!(flow.draft().amount, None);
        }

        assert_eq!(
            flow.advance(amount("", "")),
            Err(FlowError::Invalid(ValidationError::MissingAmount))
        );
    }

    #[test]
    fn test_wrong_input_for_step_is_refused() {
        let mut flow = TransferFlow::new();
        assert!(matches!(flow.advance(amount("10", "")), Err(FlowError::UnexpectedInput { .. })));
        assert_eq!(flow.current_step(), TransferStep::Select);
    }

    #[test]
    fn test_retreat_then_advance_restores_draft() {
        let mut flow = at_confirm();
        let before = flow.draft().clone();

        assert_eq!(flow.retreat(), Ok(TransferStep::Amount));
        assert_eq!(flow.draft(), &before);

        flow.advance(amount("42", "Resto")).unwrap();
        assert_eq!(flow.current_step(), TransferStep::Confirm);
        assert_eq!(flow.draft(), &before);
    }

    #[test]
    fn test_changing_recipient_keeps_amount() {
        let mut flow = at_confirm();
        flow.retreat().unwrap();
        flow.retreat().unwrap();
        assert_eq!(flow.current_step(), TransferStep::Select);

        let marc = list_contacts().into_iter().nth(2).unwrap();
        flow.advance(TransferInput::Recipient(marc)).unwrap();

        assert_eq!(flow.draft().amount, Some(dec!(42)));
        assert_eq!(flow.draft().recipient.as_ref().unwrap().short_label, "ML");
    }

    #[test]
    fn test_complete_only_from_confirm() {
        let mut flow = TransferFlow::new();
        assert_eq!(flow.complete(Instant::now(), Duration::ZERO), Err(FlowError::NotAtConfirmation));
        flow.advance(TransferInput::Recipient(emma())).unwrap();
        assert_eq!(flow.complete(Instant::now(), Duration::ZERO), Err(FlowError::NotAtConfirmation));
        assert!(!flow.available_transitions().contains(&Transition::Complete));
    }

    #[test]
    fn test_success_returns_after_delay() {
        let start = Instant::now();
        let mut flow = at_confirm();
        flow.complete(start, Duration::from_secs(3)).unwrap();

        assert_eq!(flow.completion_remaining(start), Some(Duration::from_secs(3)));
        assert!(!flow.poll_completion(start + Duration::from_secs(2)));
        assert!(flow.poll_completion(start + Duration::from_secs(3)));
    }
}
