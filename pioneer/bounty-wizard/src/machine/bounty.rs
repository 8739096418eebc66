use crate::{
	errors::StateTransitionError,
	machine::{
		factories::create_bounty_call,
		validators::{
			is_next_step_valid,
			ValidationBounds,
		},
	},
	types::{
		Back,
		Event,
		FieldValue,
		IdentitySelected,
		Next,
		RequirementsCheckRequested,
		SetField,
		StateChange,
		StepChanged,
		SubmitTransaction,
		TransactionCanceled,
		TransactionFailed,
		TransactionStatus,
		TransactionStatusUpdate,
		TransactionSucceeded,
		WizardContext,
		WizardState,
		WizardStep,
	},
};

type TransitionResult = std::result::Result<WizardTransition, StateTransitionError>;

pub struct WizardTransition {
	pub new_state: WizardState,
	pub events: Vec<Event>,
}

impl From<WizardState> for WizardTransition {
	fn from(new_state: WizardState) -> Self {
		Self { new_state, events: vec![] }
	}
}

fn apply_field(context: &mut WizardContext, value: FieldValue) {
	match value {
		FieldValue::Title(title) => context.title = title,
		FieldValue::Description(description) => context.description = description,
		FieldValue::Creator(member) => context.creator = Some(member),
		FieldValue::CoverPhoto(link) =>
			context.cover_photo_link = if link.trim().is_empty() { None } else { Some(link) },
		FieldValue::Cherry(amount) => context.cherry = amount,
		FieldValue::FundingMaximalRange(amount) => context.funding_maximal_range = amount,
		FieldValue::FundingMinimalRange(amount) => context.funding_minimal_range = amount,
		FieldValue::FundingPeriodType(period_type) => context.funding_period_type = period_type,
		FieldValue::FundingPeriodLength(length) => context.funding_period_length = length,
		FieldValue::WorkingPeriodWhitelist(members) => context.working_period_whitelist = members,
		FieldValue::WorkingPeriodLength(length) => context.working_period_length = length,
		FieldValue::WorkingPeriodStake(amount) => context.working_period_stake = amount,
		FieldValue::AllowWorkingPeriodStake(allowed) =>
			context.working_period_stake_allowance = allowed,
		FieldValue::WorkingPeriodType(period_type) => context.working_period_type = period_type,
		FieldValue::JudgingPeriodLength(length) => context.judging_period_length = length,
		FieldValue::Oracle(member) => context.oracle = Some(member),
		FieldValue::ForumThreadTopic(topic) => context.forum_thread_topic = topic,
		FieldValue::ForumThreadDescription(description) =>
			context.forum_thread_description = description,
	}
}

fn handle_set_field(mut state: WizardState, state_change: SetField) -> TransitionResult {
	let owner = state_change.value.owner();
	if state.step != owner {
		return Err(StateTransitionError {
			msg: format!("Field belongs to {} but the wizard is at {}", owner, state.step),
		})
	}
	apply_field(&mut state.context, state_change.value);
	Ok(state.into())
}

fn handle_next(
	mut state: WizardState,
	_state_change: Next,
	bounds: &ValidationBounds,
) -> TransitionResult {
	if !is_next_step_valid(&state, bounds) {
		return Ok(state.into())
	}
	let to = match state.step.next() {
		Some(step) => step,
		None => return Ok(state.into()),
	};

	let mut events: Vec<Event> = vec![StepChanged { from: state.step, to }.into()];
	match to {
		WizardStep::RequirementsVerification => {
			events.push(RequirementsCheckRequested {}.into());
		},
		WizardStep::Transaction => {
			// The requirements step only validates with an active member.
			let signer = match &state.active_member {
				Some(member) => member.controller_account.clone(),
				None => return Ok(state.into()),
			};
			let call = create_bounty_call(&state.context)
				.map_err(|e| StateTransitionError { msg: e.to_string() })?;
			state.context.transaction = Some(call.clone());
			state.context.transaction_events.clear();
			state.context.failure_reason = None;
			events.push(SubmitTransaction { call, signer }.into());
		},
		_ => {},
	}
	state.step = to;

	Ok(WizardTransition { new_state: state, events })
}

fn handle_back(mut state: WizardState, _state_change: Back) -> TransitionResult {
	let to = match state.step.previous() {
		Some(step) => step,
		None =>
			return Err(StateTransitionError {
				msg: format!("Cannot go back from {}", state.step),
			}),
	};
	let from = state.step;
	state.step = to;
	Ok(WizardTransition { new_state: state, events: vec![StepChanged { from, to }.into()] })
}

fn handle_identity_selected(
	mut state: WizardState,
	state_change: IdentitySelected,
) -> TransitionResult {
	if state.step != WizardStep::RequirementsVerification {
		return Err(StateTransitionError {
			msg: format!("Identity selected while the wizard is at {}", state.step),
		})
	}
	state.active_member = Some(state_change.member);
	Ok(state.into())
}

fn finish(mut state: WizardState, to: WizardStep, event: Event) -> TransitionResult {
	let from = state.step;
	state.step = to;
	Ok(WizardTransition { new_state: state, events: vec![StepChanged { from, to }.into(), event] })
}

fn handle_transaction_status(
	mut state: WizardState,
	state_change: TransactionStatusUpdate,
) -> TransitionResult {
	if state.step != WizardStep::Transaction {
		return Err(StateTransitionError {
			msg: format!("Transaction status received while the wizard is at {}", state.step),
		})
	}

	match state_change.status {
		TransactionStatus::Ready => Ok(state.into()),
		TransactionStatus::InBlock { events, .. } => {
			state.context.transaction_events = events;
			Ok(state.into())
		},
		TransactionStatus::Finalized { events, .. } => {
			state.context.transaction_events = events.clone();
			if events.iter().any(|event| event.is_extrinsic_failed()) {
				let reason = "ExtrinsicFailed".to_owned();
				state.context.failure_reason = Some(reason.clone());
				finish(state, WizardStep::Error, TransactionFailed { reason, events }.into())
			} else {
				finish(state, WizardStep::Success, TransactionSucceeded { events }.into())
			}
		},
		TransactionStatus::Failed { reason, events } => {
			state.context.transaction_events = events.clone();
			state.context.failure_reason = Some(reason.clone());
			finish(state, WizardStep::Error, TransactionFailed { reason, events }.into())
		},
		TransactionStatus::Canceled =>
			finish(state, WizardStep::Canceled, TransactionCanceled {}.into()),
	}
}

/// Apply `state_change` to `state`. Terminal states absorb every input.
pub fn state_transition(
	state: WizardState,
	state_change: StateChange,
	bounds: &ValidationBounds,
) -> TransitionResult {
	if state.step.is_terminal() {
		return Ok(state.into())
	}

	match state_change {
		StateChange::SetField(inner) => handle_set_field(state, inner),
		StateChange::Next(inner) => handle_next(state, inner, bounds),
		StateChange::Back(inner) => handle_back(state, inner),
		StateChange::IdentitySelected(inner) => handle_identity_selected(state, inner),
		StateChange::TransactionStatusUpdate(inner) => handle_transaction_status(state, inner),
	}
}
