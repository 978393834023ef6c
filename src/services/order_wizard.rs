//! Order wizard state machine
//!
//! A wizard walks `product -> payment -> contact -> complete`, one step at a
//! time. The only side effect is the single gateway call made when leaving
//! `contact`; while that call is pending the wizard is marked as submitting
//! and further continue actions are ignored.

use crate::catalog::Offering;
use crate::config::Wallets;
use crate::error::{DeliveryError, WizardError};
use crate::models::{
    ContactField, DeliveryId, OrderFormState, OrderSubmission, Step, UpdateForm, WizardView,
};
use crate::services::notification_service::NotificationGateway;

/// Result of the first half of a continue action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Continue {
    /// Moved forward without side effects
    Moved(Step),
    /// Validation passed; the caller must deliver this submission and report
    /// back through [`OrderWizard::finish_submission`]
    Submit(OrderSubmission),
    /// A submission is already in flight
    Ignored,
    /// Continue from `complete` closes the wizard
    Closed,
}

/// Result of a full continue action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Moved(Step),
    Ignored,
    Closed,
}

#[derive(Debug, Clone)]
pub struct OrderWizard {
    offering: Offering,
    required: Vec<ContactField>,
    state: OrderFormState,
    delivery_id: Option<DeliveryId>,
    last_error: Option<WizardError>,
}

impl OrderWizard {
    pub fn new(offering: Offering, required: Vec<ContactField>) -> Self {
        Self {
            offering,
            required,
            state: OrderFormState::default(),
            delivery_id: None,
            last_error: None,
        }
    }

    pub fn offering(&self) -> &Offering {
        &self.offering
    }

    pub fn state(&self) -> &OrderFormState {
        &self.state
    }

    pub fn step(&self) -> Step {
        self.state.step
    }

    pub fn is_submitting(&self) -> bool {
        self.state.submitting
    }

    pub fn delivery_id(&self) -> Option<DeliveryId> {
        self.delivery_id
    }

    pub fn last_error(&self) -> Option<&WizardError> {
        self.last_error.as_ref()
    }

    /// Apply a form patch. Returns `false` when the form is locked.
    pub fn update(&mut self, update: UpdateForm) -> bool {
        if self.state.submitting || self.state.step == Step::Complete {
            return false;
        }
        if let Some(name) = update.name {
            self.state.name = name;
        }
        if let Some(email) = update.email {
            self.state.email = email;
        }
        if let Some(message) = update.message {
            self.state.message = message;
        }
        if let Some(wallet) = update.wallet_address {
            self.state.wallet_address = wallet;
        }
        if let Some(method) = update.payment_method {
            self.state.payment_method = method;
        }
        true
    }

    /// Required fields that are currently blank
    pub fn validate(&self) -> Vec<ContactField> {
        self.required
            .iter()
            .copied()
            .filter(|field| self.state.field(*field).trim().is_empty())
            .collect()
    }

    /// Start a continue action.
    ///
    /// On `Continue::Submit` the wizard stays in `contact` with the
    /// submitting flag raised until `finish_submission` is called.
    pub fn begin_continue(&mut self) -> Result<Continue, WizardError> {
        if self.state.submitting {
            tracing::debug!(offering = self.offering.id, "continue ignored, submission in flight");
            return Ok(Continue::Ignored);
        }

        match self.state.step {
            Step::Product | Step::Payment => {
                let next = self.state.step.next().unwrap_or(self.state.step);
                self.state.step = next;
                self.last_error = None;
                Ok(Continue::Moved(next))
            }
            Step::Contact => {
                let missing = self.validate();
                if !missing.is_empty() {
                    let err = WizardError::Validation { missing };
                    self.last_error = Some(err.clone());
                    return Err(err);
                }
                self.state.submitting = true;
                self.last_error = None;
                Ok(Continue::Submit(self.submission()))
            }
            Step::Complete => {
                self.close();
                Ok(Continue::Closed)
            }
        }
    }

    /// Record the gateway outcome of a submission started by `begin_continue`
    pub fn finish_submission(
        &mut self,
        result: Result<DeliveryId, DeliveryError>,
    ) -> Result<Step, WizardError> {
        if !self.state.submitting {
            tracing::warn!(offering = self.offering.id, "submission result with nothing in flight");
            return Ok(self.state.step);
        }
        self.state.submitting = false;

        match result {
            Ok(id) => {
                tracing::info!(offering = self.offering.id, delivery_id = %id, "order delivered");
                self.delivery_id = Some(id);
                self.state.step = Step::Complete;
                Ok(Step::Complete)
            }
            Err(err) => {
                tracing::warn!(offering = self.offering.id, error = %err, "order delivery failed");
                let err = WizardError::Delivery(err);
                self.last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Full continue action, delivering through `gateway` when leaving `contact`
    pub async fn advance(&mut self, gateway: &dyn NotificationGateway) -> Result<Advance, WizardError> {
        match self.begin_continue()? {
            Continue::Moved(step) => Ok(Advance::Moved(step)),
            Continue::Ignored => Ok(Advance::Ignored),
            Continue::Closed => Ok(Advance::Closed),
            Continue::Submit(submission) => {
                let result = gateway.submit(&submission).await;
                self.finish_submission(result).map(Advance::Moved)
            }
        }
    }

    /// Move back one step. Returns `false` when not permitted.
    pub fn back(&mut self) -> bool {
        if self.state.submitting {
            return false;
        }
        match self.state.step.previous() {
            Some(previous) => {
                self.state.step = previous;
                self.last_error = None;
                true
            }
            None => false,
        }
    }

    /// Reset every form field to its initial value
    pub fn close(&mut self) {
        self.state = OrderFormState::default();
        self.delivery_id = None;
        self.last_error = None;
    }

    pub fn view(&self, wallets: &Wallets) -> WizardView {
        WizardView {
            offering: self.offering.clone(),
            form: self.state.clone(),
            receiving_address: wallets.address(self.state.payment_method).to_string(),
            can_go_back: !self.state.submitting && self.state.step.previous().is_some(),
            required_fields: self.required.clone(),
            delivery_id: self.delivery_id,
            error: self.last_error.as_ref().map(ToString::to_string),
        }
    }

    fn submission(&self) -> OrderSubmission {
        let non_empty = |value: &str| {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        };
        OrderSubmission {
            product_name: self.offering.name.to_string(),
            name: self.state.name.trim().to_string(),
            email: self.state.email.trim().to_string(),
            crypto_type: self.state.payment_method,
            message: non_empty(&self.state.message),
            wallet_address: non_empty(&self.state.wallet_address),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::models::PaymentMethod;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingGateway {
        calls: Mutex<Vec<OrderSubmission>>,
        fail: bool,
    }

    #[async_trait]
    impl NotificationGateway for RecordingGateway {
        async fn submit(&self, submission: &OrderSubmission) -> Result<DeliveryId, DeliveryError> {
            self.calls.lock().unwrap().push(submission.clone());
            if self.fail {
                Err(DeliveryError::Transport("connection refused".into()))
            } else {
                Ok(DeliveryId(7))
            }
        }
    }

    fn wizard(offering_id: u32) -> OrderWizard {
        let offering = Catalog::builtin().get(offering_id).cloned().unwrap();
        OrderWizard::new(offering, vec![ContactField::Name, ContactField::Email])
    }

    fn fill(wizard: &mut OrderWizard, name: &str, email: &str) {
        wizard.update(UpdateForm {
            name: Some(name.into()),
            email: Some(email.into()),
            ..UpdateForm::default()
        });
    }

    #[tokio::test]
    async fn link_encrypter_order_reaches_complete() {
        let gateway = RecordingGateway::default();
        let mut wizard = wizard(3);

        assert_eq!(wizard.advance(&gateway).await, Ok(Advance::Moved(Step::Payment)));
        assert_eq!(wizard.state().payment_method, PaymentMethod::Bitcoin);
        assert_eq!(wizard.advance(&gateway).await, Ok(Advance::Moved(Step::Contact)));
        fill(&mut wizard, "Ada", "ada@example.com");
        assert_eq!(wizard.advance(&gateway).await, Ok(Advance::Moved(Step::Complete)));

        let calls = gateway.calls.lock().unwrap();
        assert_eq!(
            *calls,
            vec![OrderSubmission {
                product_name: "Link Encrypter".into(),
                name: "Ada".into(),
                email: "ada@example.com".into(),
                crypto_type: PaymentMethod::Bitcoin,
                message: None,
                wallet_address: None,
            }]
        );
        assert_eq!(wizard.delivery_id(), Some(DeliveryId(7)));
        assert!(!wizard.is_submitting());
    }

    #[tokio::test]
    async fn empty_name_never_submits() {
        let gateway = RecordingGateway::default();
        let mut wizard = wizard(1);
        wizard.advance(&gateway).await.unwrap();
        wizard.advance(&gateway).await.unwrap();
        fill(&mut wizard, "   ", "ada@example.com");

        let result = wizard.advance(&gateway).await;

        assert_eq!(
            result,
            Err(WizardError::Validation { missing: vec![ContactField::Name] })
        );
        assert_eq!(wizard.step(), Step::Contact);
        assert!(gateway.calls.lock().unwrap().is_empty());
        assert!(wizard.last_error().is_some());
    }

    #[tokio::test]
    async fn delivery_failure_keeps_form_editable() {
        let gateway = RecordingGateway { fail: true, ..RecordingGateway::default() };
        let mut wizard = wizard(2);
        wizard.advance(&gateway).await.unwrap();
        wizard.advance(&gateway).await.unwrap();
        fill(&mut wizard, "Ada", "ada@example.com");

        let result = wizard.advance(&gateway).await;

        assert!(matches!(result, Err(WizardError::Delivery(_))));
        assert_eq!(wizard.step(), Step::Contact);
        assert!(!wizard.is_submitting());
        assert!(wizard.update(UpdateForm { message: Some("retry".into()), ..UpdateForm::default() }));

        // a retry is a fresh call
        let _ = wizard.advance(&gateway).await;
        assert_eq!(gateway.calls.lock().unwrap().len(), 2);
    }

    #[test]
    fn continue_while_submitting_is_ignored() {
        let mut wizard = wizard(3);
        wizard.begin_continue().unwrap();
        wizard.begin_continue().unwrap();
        fill(&mut wizard, "Ada", "ada@example.com");

        let first = wizard.begin_continue().unwrap();
        assert!(matches!(first, Continue::Submit(_)));
        assert!(wizard.is_submitting());

        assert_eq!(wizard.begin_continue(), Ok(Continue::Ignored));
        assert!(!wizard.back());
        assert!(!wizard.update(UpdateForm { name: Some("Eve".into()), ..UpdateForm::default() }));

        assert_eq!(wizard.finish_submission(Ok(DeliveryId(1))), Ok(Step::Complete));
        assert_eq!(wizard.state().name, "Ada");
    }

    #[test]
    fn back_moves_exactly_one_step() {
        let mut wizard = wizard(4);
        assert!(!wizard.back());
        wizard.begin_continue().unwrap();
        wizard.begin_continue().unwrap();
        assert_eq!(wizard.step(), Step::Contact);

        assert!(wizard.back());
        assert_eq!(wizard.step(), Step::Payment);
        assert!(wizard.back());
        assert_eq!(wizard.step(), Step::Product);
        assert!(!wizard.back());
    }

    #[tokio::test]
    async fn continue_from_complete_closes_and_resets() {
        let gateway = RecordingGateway::default();
        let mut wizard = wizard(5);
        wizard.advance(&gateway).await.unwrap();
        wizard.update(UpdateForm {
            payment_method: Some(PaymentMethod::Ethereum),
            ..UpdateForm::default()
        });
        wizard.advance(&gateway).await.unwrap();
        fill(&mut wizard, "Ada", "ada@example.com");
        wizard.advance(&gateway).await.unwrap();
        assert!(!wizard.back());

        assert_eq!(wizard.advance(&gateway).await, Ok(Advance::Closed));
        assert_eq!(wizard.state(), &OrderFormState::default());
        assert_eq!(wizard.delivery_id(), None);
    }

    #[test]
    fn wallet_address_can_be_required() {
        let offering = Catalog::builtin().get(1).cloned().unwrap();
        let mut wizard = OrderWizard::new(
            offering,
            vec![ContactField::Name, ContactField::Email, ContactField::WalletAddress],
        );
        wizard.begin_continue().unwrap();
        wizard.begin_continue().unwrap();
        fill(&mut wizard, "Ada", "ada@example.com");

        assert_eq!(
            wizard.begin_continue(),
            Err(WizardError::Validation { missing: vec![ContactField::WalletAddress] })
        );

        wizard.update(UpdateForm {
            wallet_address: Some("bc1qexample".into()),
            ..UpdateForm::default()
        });
        match wizard.begin_continue() {
            Ok(Continue::Submit(submission)) => {
                assert_eq!(submission.wallet_address.as_deref(), Some("bc1qexample"));
            }
            other => panic!("expected submission, got {other:?}"),
        }
    }

    #[derive(Debug, Clone)]
    enum Action {
        Continue,
        Back,
        Update(String, String),
        FinishOk,
        FinishErr,
    }

    fn any_action() -> impl Strategy<Value = Action> {
        prop_oneof![
            3 => Just(Action::Continue),
            2 => Just(Action::Back),
            2 => ("[a-z ]{0,3}", "[a-z@.]{0,4}").prop_map(|(name, email)| Action::Update(name, email)),
            1 => Just(Action::FinishOk),
            1 => Just(Action::FinishErr),
        ]
    }

    fn rank(step: Step) -> i32 {
        match step {
            Step::Product => 0,
            Step::Payment => 1,
            Step::Contact => 2,
            Step::Complete => 3,
        }
    }

    proptest! {
        #[test]
        fn steps_move_one_at_a_time(actions in prop::collection::vec(any_action(), 0..60)) {
            let mut wizard = wizard(3);

            for action in actions {
                let before = wizard.state().clone();
                let mut closed = false;

                match action {
                    Action::Continue => {
                        let outcome = wizard.begin_continue();
                        if before.submitting {
                            prop_assert_eq!(&outcome, &Ok(Continue::Ignored));
                        }
                        if let Ok(Continue::Submit(_)) = &outcome {
                            prop_assert_eq!(before.step, Step::Contact);
                            prop_assert!(wizard.is_submitting());
                        }
                        closed = matches!(outcome, Ok(Continue::Closed));
                    }
                    Action::Back => {
                        let moved = wizard.back();
                        if before.submitting {
                            prop_assert!(!moved);
                        }
                    }
                    Action::Update(name, email) => {
                        let applied = wizard.update(UpdateForm {
                            name: Some(name),
                            email: Some(email),
                            ..UpdateForm::default()
                        });
                        if before.submitting {
                            prop_assert!(!applied);
                            prop_assert_eq!(wizard.state(), &before);
                        }
                    }
                    Action::FinishOk => {
                        let _ = wizard.finish_submission(Ok(DeliveryId(1)));
                    }
                    Action::FinishErr => {
                        let _ = wizard
                            .finish_submission(Err(DeliveryError::Transport("down".into())));
                    }
                }

                let after = wizard.state();
                if closed {
                    prop_assert_eq!(before.step, Step::Complete);
                    prop_assert_eq!(after, &OrderFormState::default());
                } else if before.step == Step::Complete {
                    prop_assert_eq!(after.step, Step::Complete);
                } else {
                    prop_assert!((rank(after.step) - rank(before.step)).abs() <= 1);
                }
                if before.submitting {
                    prop_assert!(after.step == before.step || after.step == Step::Complete);
                }
            }
        }
    }

    #[test]
    fn view_reflects_selected_wallet() {
        let mut wizard = wizard(3);
        let wallets = Wallets::default();
        wizard.update(UpdateForm {
            payment_method: Some(PaymentMethod::Ethereum),
            ..UpdateForm::default()
        });

        let view = wizard.view(&wallets);

        assert_eq!(view.receiving_address, wallets.ethereum);
        assert!(!view.can_go_back);
        assert_eq!(view.error, None);
    }
}
