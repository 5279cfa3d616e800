// 🧭 Linear Flows - one state machine for every multi-step wizard
//
// A flow kind declares its ordered steps and how each step accepts input.
// The machine does the rest:
// - first step is the entry, last step is the terminal "success" step
// - the step before last is the confirmation step, left only via complete()
// - input is validated against a copy of the draft, so a refused step
//   leaves both the step and the draft untouched
// - back-navigation keeps everything already typed

pub mod completion;
pub mod payment;
pub mod transfer;

pub use completion::{CompletionTimer, DEFAULT_COMPLETION_DELAY};
pub use payment::{Payment, PaymentDraft, PaymentFlow, PaymentInput, PaymentMethod, PaymentStep};
pub use transfer::{Transfer, TransferDraft, TransferFlow, TransferInput, TransferStep};

use crate::validation::ValidationError;
use std::fmt;
use std::time::{Duration, Instant};
use thiserror::Error;

// ============================================================================
// FLOW KIND
// ============================================================================

pub trait FlowKind {
    /// Name used in logs
    const NAME: &'static str;

    type Step: Copy + Eq + fmt::Debug + 'static;
    type Draft: Clone + Default + fmt::Debug;
    type Input;

    /// Ordered steps. At least entry, confirmation and terminal.
    const STEPS: &'static [Self::Step];

    /// Validate `input` for `step` and write it into `draft`
    fn accept(step: Self::Step, input: Self::Input, draft: &mut Self::Draft) -> Result<(), FlowError>;

    /// Everything the confirmation step shows is present
    fn is_ready(draft: &Self::Draft) -> bool;
}

// ============================================================================
// ERRORS & TRANSITIONS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("{0}")]
    Invalid(#[from] ValidationError),

    #[error("input does not belong to step {step}")]
    UnexpectedInput { step: String },

    #[error("the confirmation step is left with complete()")]
    AwaitingConfirmation,

    #[error("not at the confirmation step")]
    NotAtConfirmation,

    #[error("draft is missing {0}")]
    Incomplete(&'static str),

    #[error("already at the first step")]
    AtStart,

    #[error("flow is finished")]
    Finished,
}

impl FlowError {
    pub fn unexpected<S: fmt::Debug>(step: S) -> Self {
        FlowError::UnexpectedInput { step: format!("{:?}", step) }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Advance,
    Retreat,
    Complete,
    Reset,
}

// ============================================================================
// FLOW
// ============================================================================

pub struct Flow<K: FlowKind> {
    index: usize,
    draft: K::Draft,
    completion: CompletionTimer,
}

impl<K: FlowKind> Flow<K> {
    pub fn new() -> Self {
        debug_assert!(K::STEPS.len() >= 3, "a flow needs entry, confirmation and terminal steps");

        Flow {
            index: 0,
            draft: K::Draft::default(),
            completion: CompletionTimer::default(),
        }
    }

    pub fn current_step(&self) -> K::Step {
        K::STEPS[self.index]
    }

    pub fn draft(&self) -> &K::Draft {
        &self.draft
    }

    /// (zero-based index, number of steps) for the step indicator
    pub fn position(&self) -> (usize, usize) {
        (self.index, K::STEPS.len())
    }

    pub fn is_terminal(&self) -> bool {
        self.index + 1 == K::STEPS.len()
    }

    fn is_confirmation(&self) -> bool {
        self.index + 2 == K::STEPS.len()
    }

    pub fn available_transitions(&self) -> Vec<Transition> {
        let mut transitions = Vec::new();

        if self.is_terminal() {
            transitions.push(Transition::Reset);
            return transitions;
        }

        if self.is_confirmation() {
            if K::is_ready(&self.draft) {
                transitions.push(Transition::Complete);
            }
        } else {
            transitions.push(Transition::Advance);
        }

        if self.index > 0 {
            transitions.push(Transition::Retreat);
        }

        transitions.push(Transition::Reset);
        transitions
    }

    /// Feed the current step its input and move on
    pub fn advance(&mut self, input: K::Input) -> Result<K::Step, FlowError> {
        if self.is_terminal() {
            return Err(FlowError::Finished);
        }
        if self.is_confirmation() {
            return Err(FlowError::AwaitingConfirmation);
        }

        let step = self.current_step();
        let mut next_draft = self.draft.clone();

        if let Err(err) = K::accept(step, input, &mut next_draft) {
            tracing::debug!(flow = K::NAME, step = ?step, error = %err, "step refused");
            return Err(err);
        }

        self.draft = next_draft;
        self.index += 1;

        let next = self.current_step();
        tracing::debug!(flow = K::NAME, from = ?step, to = ?next, "flow advanced");
        Ok(next)
    }

    /// Go back one step, keeping the draft
    pub fn retreat(&mut self) -> Result<K::Step, FlowError> {
        if self.is_terminal() {
            return Err(FlowError::Finished);
        }
        if self.index == 0 {
            return Err(FlowError::AtStart);
        }

        self.index -= 1;
        let step = self.current_step();
        tracing::debug!(flow = K::NAME, to = ?step, "flow retreated");
        Ok(step)
    }

    /// Confirm: move to the terminal step and arm the completion timer
    pub fn complete(&mut self, now: Instant, delay: Duration) -> Result<K::Step, FlowError> {
        if self.is_terminal() {
            return Err(FlowError::Finished);
        }
        if !self.is_confirmation() {
            return Err(FlowError::NotAtConfirmation);
        }
        if !K::is_ready(&self.draft) {
            return Err(FlowError::Incomplete("required fields"));
        }

        self.index += 1;
        self.completion.schedule(now, delay);

        tracing::info!(flow = K::NAME, draft = ?self.draft, "flow completed");
        Ok(self.current_step())
    }

    /// Drop the draft, disarm the timer and go back to the entry step
    pub fn reset(&mut self) {
        self.index = 0;
        self.draft = K::Draft::default();
        self.completion.cancel();
        tracing::debug!(flow = K::NAME, "flow reset");
    }

    /// True once when the post-completion delay has elapsed
    pub fn poll_completion(&mut self, now: Instant) -> bool {
        self.completion.poll(now)
    }

    pub fn completion_remaining(&self, now: Instant) -> Option<Duration> {
        self.completion.remaining(now)
    }
}

impl<K: FlowKind> Default for Flow<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: FlowKind> fmt::Debug for Flow<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flow")
            .field("kind", &K::NAME)
            .field("step", &self.current_step())
            .field("draft", &self.draft)
            .field("completion", &self.completion)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimal three-step kind to exercise the machine on its own
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Step {
        Pick,
        Confirm,
        Done,
    }

    struct Picker;

    impl FlowKind for Picker {
        const NAME: &'static str = "picker";
        type Step = Step;
        type Draft = Option<u8>;
        type Input = u8;
        const STEPS: &'static [Step] = &[Step::Pick, Step::Confirm, Step::Done];

        fn accept(step: Step, input: u8, draft: &mut Option<u8>) -> Result<(), FlowError> {
            match step {
                Step::Pick if input > 0 => {
                    *draft = Some(input);
                    Ok(())
                }
                Step::Pick => Err(ValidationError::NonPositiveAmount.into()),
                other => Err(FlowError::unexpected(other)),
            }
        }

        fn is_ready(draft: &Option<u8>) -> bool {
            draft.is_some()
        }
    }

    #[test]
    fn test_refused_input_changes_nothing() {
        let mut flow: Flow<Picker> = Flow::new();
        assert_eq!(flow.advance(0), Err(FlowError::Invalid(ValidationError::NonPositiveAmount)));
        assert_eq!(flow.current_step(), Step::Pick);
        assert_eq!(*flow.draft(), None);
    }

    #[test]
    fn test_confirmation_only_leaves_through_complete() {
        let mut flow: Flow<Picker> = Flow::new();
        flow.advance(4).unwrap();

        assert_eq!(flow.advance(5), Err(FlowError::AwaitingConfirmation));
        assert_eq!(flow.available_transitions(), vec![Transition::Complete, Transition::Retreat, Transition::Reset]);

        let now = Instant::now();
        assert_eq!(flow.complete(now, Duration::from_secs(3)), Ok(Step::Done));
        assert!(flow.is_terminal());
        assert_eq!(flow.available_transitions(), vec![Transition::Reset]);
    }

    #[test]
    fn test_complete_refused_before_confirmation() {
        let mut flow: Flow<Picker> = Flow::new();
        assert_eq!(flow.complete(Instant::now(), Duration::ZERO), Err(FlowError::NotAtConfirmation));
        assert_eq!(flow.retreat(), Err(FlowError::AtStart));
    }

    #[test]
    fn test_terminal_step_refuses_everything_but_reset() {
        let mut flow: Flow<Picker> = Flow::new();
        flow.advance(1).unwrap();
        flow.complete(Instant::now(), Duration::from_secs(1)).unwrap();

        assert_eq!(flow.advance(1), Err(FlowError::Finished));
        assert_eq!(flow.retreat(), Err(FlowError::Finished));
        assert_eq!(flow.complete(Instant::now(), Duration::ZERO), Err(FlowError::Finished));

        flow.reset();
        assert_eq!(flow.current_step(), Step::Pick);
        assert_eq!(*flow.draft(), None);
    }

    #[test]
    fn test_reset_cancels_pending_completion() {
        let start = Instant::now();
        let mut flow: Flow<Picker> = Flow::new();
        flow.advance(1).unwrap();
        flow.complete(start, Duration::from_secs(3)).unwrap();

        flow.reset();

        assert!(!flow.poll_completion(start + Duration::from_secs(60)));
    }

    #[test]
    fn test_completion_fires_once() {
        let start = Instant::now();
        let mut flow: Flow<Picker> = Flow::new();
        flow.advance(1).unwrap();
        flow.complete(start, Duration::from_secs(3)).unwrap();

        assert!(!flow.poll_completion(start + Duration::from_secs(1)));
        assert!(flow.poll_completion(start + Duration::from_secs(3)));
        assert!(!flow.poll_completion(start + Duration::from_secs(4)));
    }
}
