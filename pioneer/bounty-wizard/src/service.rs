use std::collections::VecDeque;

use async_trait::async_trait;
use futures::{
	stream::BoxStream,
	StreamExt,
};
use pioneer_proxy_api::{
	client::ProxyClient,
	errors::ProxyError,
};
use tracing::{
	debug,
	error,
	info,
	trace,
	warn,
};

use crate::{
	errors::WizardError,
	machine::{
		bounty,
		validators::{
			is_next_step_valid,
			validate_step,
			ValidationBounds,
		},
	},
	types::{
		AccountId,
		CreateBountyCall,
		Event,
		FieldValue,
		IdentitySelected,
		Member,
		Next,
		SetField,
		StateChange,
		TransactionEvent,
		TransactionStatus,
		TransactionStatusUpdate,
		WizardState,
		WizardStep,
	},
};

pub type Result<T> = std::result::Result<T, WizardError>;

/// Statuses of a submitted call, ending after a terminal one.
pub type StatusStream = BoxStream<'static, std::result::Result<TransactionStatus, ProxyError>>;

/// Source of the identity the user currently acts as.
#[async_trait]
pub trait MembershipProvider: Send + Sync {
	async fn active_member(&self) -> Option<Member>;
}

/// Signs and submits built calls.
#[async_trait]
pub trait TransactionSubmitter: Send + Sync {
	async fn submit(&self, call: &CreateBountyCall, signer: &AccountId) -> Result<StatusStream>;
}

/// Submits through the worker proxy.
pub struct ProxySubmitter {
	client: ProxyClient,
}

impl ProxySubmitter {
	pub fn new(client: ProxyClient) -> Self {
		Self { client }
	}
}

#[async_trait]
impl TransactionSubmitter for ProxySubmitter {
	async fn submit(&self, call: &CreateBountyCall, signer: &AccountId) -> Result<StatusStream> {
		let transaction =
			self.client.create_transaction(CreateBountyCall::path(), call.to_params()?).await?;
		match transaction.payment_info(signer.clone()).await {
			Ok(fee) => debug!(message = "Transaction fee", fee = %fee),
			Err(e) => warn!(message = "Could not estimate fee", error = format!("{}", e)),
		}
		let statuses = transaction.sign_and_send(signer.clone())?;
		Ok(statuses.boxed())
	}
}

/// How a finished wizard ended.
#[derive(Clone, Debug, PartialEq)]
pub enum WizardOutcome {
	Success(Vec<TransactionEvent>),
	Error { reason: String, events: Vec<TransactionEvent> },
	Canceled,
}

/// Drives one wizard instance: applies state changes, keeps the `NEXT` gate current and acts on
/// the emitted events.
pub struct BountyWizard<M, S> {
	state: WizardState,
	bounds: ValidationBounds,
	membership: M,
	submitter: S,
	next_step_valid: bool,
	awaiting_identity: bool,
}

impl<M, S> BountyWizard<M, S>
where
	M: MembershipProvider,
	S: TransactionSubmitter,
{
	pub fn new(bounds: ValidationBounds, membership: M, submitter: S) -> Self {
		let state = WizardState::default();
		let next_step_valid = is_next_step_valid(&state, &bounds);
		Self { state, bounds, membership, submitter, next_step_valid, awaiting_identity: false }
	}

	pub fn state(&self) -> &WizardState {
		&self.state
	}

	pub fn step(&self) -> WizardStep {
		self.state.step
	}

	/// Whether `NEXT` is enabled.
	pub fn is_next_step_valid(&self) -> bool {
		self.next_step_valid
	}

	/// First field keeping the current step from advancing.
	pub fn validate_step(&self) -> Result<()> {
		validate_step(&self.state, &self.bounds)
	}

	/// Whether the flow is suspended until an identity is selected.
	pub fn awaiting_identity(&self) -> bool {
		self.awaiting_identity
	}

	pub fn outcome(&self) -> Option<WizardOutcome> {
		let context = &self.state.context;
		match self.state.step {
			WizardStep::Success => Some(WizardOutcome::Success(context.transaction_events.clone())),
			WizardStep::Error => Some(WizardOutcome::Error {
				reason: context.failure_reason.clone().unwrap_or_default(),
				events: context.transaction_events.clone(),
			}),
			WizardStep::Canceled => Some(WizardOutcome::Canceled),
			_ => None,
		}
	}

	/// Run a single transition and refresh the `NEXT` gate.
	fn apply(&mut self, state_change: StateChange) -> Result<Vec<Event>> {
		trace!(
			message = "Wizard transition",
			step = %self.state.step,
			state_change = state_change.type_name()
		);
		let transition = bounty::state_transition(self.state.clone(), state_change, &self.bounds)?;
		self.state = transition.new_state;

		let valid = is_next_step_valid(&self.state, &self.bounds);
		if valid != self.next_step_valid {
			debug!(message = "Next step gate changed", step = %self.state.step, valid);
			self.next_step_valid = valid;
		}
		Ok(transition.events)
	}

	/// Dispatch a state change along with everything it triggers.
	pub async fn dispatch(&mut self, state_change: StateChange) -> Result<()> {
		let mut queue = VecDeque::from([state_change]);
		while let Some(state_change) = queue.pop_front() {
			for event in self.apply(state_change)? {
				self.handle_event(event, &mut queue).await?;
			}
		}
		Ok(())
	}

	pub async fn set_field(&mut self, value: FieldValue) -> Result<()> {
		self.dispatch(SetField { value }.into()).await
	}

	pub async fn next(&mut self) -> Result<()> {
		self.dispatch(Next {}.into()).await
	}

	/// Resume a suspended flow with the picked identity.
	pub async fn select_identity(&mut self, member: Member) -> Result<()> {
		self.dispatch(IdentitySelected { member }.into()).await?;
		self.awaiting_identity = false;
		self.next().await
	}

	async fn handle_event(&mut self, event: Event, queue: &mut VecDeque<StateChange>) -> Result<()> {
		match event {
			Event::RequirementsCheckRequested(_) => match self.membership.active_member().await {
				Some(member) => {
					queue.push_back(IdentitySelected { member }.into());
					queue.push_back(Next {}.into());
				},
				None => {
					info!(message = "No active member, identity selection required");
					self.awaiting_identity = true;
				},
			},
			Event::SubmitTransaction(inner) => self.submit(inner.call, inner.signer).await?,
			other => report(&other),
		}
		Ok(())
	}

	/// Follow the submission until the wizard reaches a terminal step.
	async fn submit(&mut self, call: CreateBountyCall, signer: AccountId) -> Result<()> {
		let mut statuses = match self.submitter.submit(&call, &signer).await {
			Ok(statuses) => statuses,
			Err(e) => return self.fail(e.to_string()),
		};

		while let Some(status) = statuses.next().await {
			let status = status.unwrap_or_else(|e| TransactionStatus::Failed {
				reason: e.to_string(),
				events: vec![],
			});
			self.apply_status(status)?;
			if self.state.step.is_terminal() {
				return Ok(())
			}
		}
		self.fail("status stream ended before a final status".to_owned())
	}

	fn apply_status(&mut self, status: TransactionStatus) -> Result<()> {
		for event in self.apply(TransactionStatusUpdate { status }.into())? {
			report(&event);
		}
		Ok(())
	}

	fn fail(&mut self, reason: String) -> Result<()> {
		self.apply_status(TransactionStatus::Failed { reason, events: vec![] })
	}
}

/// Log events that need no further handling.
fn report(event: &Event) {
	match event {
		Event::StepChanged(inner) => {
			debug!(message = "Wizard step changed", from = %inner.from, to = %inner.to);
		},
		Event::TransactionSucceeded(inner) => {
			info!(message = "Bounty created", events = inner.events.len());
		},
		Event::TransactionFailed(inner) => {
			error!(message = "Bounty creation failed", reason = inner.reason.as_str());
		},
		Event::TransactionCanceled(_) => {
			info!(message = "Bounty creation canceled");
		},
		other => trace!(message = "Wizard event", event = other.type_name()),
	}
}
