use pioneer_primitives::{
	constants::BOUNTY_SECTION,
	types::{
		TokenAmount,
		U256,
	},
};
use pioneer_proxy_api::messages::RuntimeConstants;

use crate::{
	constants::{
		CLOSED_CONTRACT_SIZE_LIMIT,
		MIN_CHERRY_LIMIT,
		MIN_FUNDING_LIMIT,
		MIN_WORK_ENTRANT_STAKE,
	},
	errors::WizardError,
	types::{
		FundingPeriodType,
		WizardState,
		WizardStep,
		WorkingPeriodType,
	},
};

type Result = std::result::Result<(), WizardError>;

/// Limits the form values are checked against. A missing bound fails every rule using it.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ValidationBounds {
	pub min_cherry_limit: Option<TokenAmount>,
	/// Transferable balance of the creator.
	pub max_cherry_limit: Option<TokenAmount>,
	pub min_funding_limit: Option<TokenAmount>,
	pub max_whitelist_size: Option<u64>,
	pub min_work_entrant_stake: Option<TokenAmount>,
}

impl ValidationBounds {
	pub fn from_constants(consts: &RuntimeConstants, transferable: Option<TokenAmount>) -> Self {
		Self {
			min_cherry_limit: consts.amount(BOUNTY_SECTION, MIN_CHERRY_LIMIT),
			max_cherry_limit: transferable,
			min_funding_limit: consts.amount(BOUNTY_SECTION, MIN_FUNDING_LIMIT),
			max_whitelist_size: consts.count(BOUNTY_SECTION, CLOSED_CONTRACT_SIZE_LIMIT),
			min_work_entrant_stake: consts.amount(BOUNTY_SECTION, MIN_WORK_ENTRANT_STAKE),
		}
	}
}

/// Fail with `field` unless `condition` holds.
fn ensure(condition: bool, field: &'static str) -> Result {
	if condition {
		Ok(())
	} else {
		Err(WizardError::ValidationFailed(field))
	}
}

fn ensure_bound<T>(bound: Option<T>, field: &'static str, check: impl FnOnce(T) -> bool) -> Result {
	ensure(bound.map_or(false, check), field)
}

fn validate_general_parameters(state: &WizardState) -> Result {
	let context = &state.context;
	ensure(!context.title.trim().is_empty(), "title")?;
	ensure(!context.description.trim().is_empty(), "description")?;
	ensure(context.creator.is_some(), "creator")
}

fn validate_funding_period_details(state: &WizardState, bounds: &ValidationBounds) -> Result {
	let context = &state.context;
	ensure_bound(bounds.min_cherry_limit, "cherry", |min| context.cherry >= min)?;
	ensure_bound(bounds.max_cherry_limit, "cherry", |max| context.cherry <= max)?;
	ensure_bound(bounds.min_funding_limit, "fundingMaximalRange", |min| {
		context.funding_maximal_range >= min
	})?;

	if context.funding_period_type == FundingPeriodType::Limited {
		ensure(
			context.funding_minimal_range > U256::zero() &&
				context.funding_minimal_range <= context.funding_maximal_range,
			"fundingMinimalRange",
		)?;
		ensure(context.funding_period_length > 0, "fundingPeriodLength")?;
	}
	Ok(())
}

fn validate_working_period_details(state: &WizardState, bounds: &ValidationBounds) -> Result {
	let context = &state.context;
	ensure(context.working_period_length > 0, "workingPeriodLength")?;

	if context.working_period_type == WorkingPeriodType::Closed {
		let size = context.working_period_whitelist.len() as u64;
		ensure_bound(bounds.max_whitelist_size, "workingPeriodWhitelist", |max| {
			size >= 1 && size <= max
		})?;
	}
	if context.working_period_stake_allowance {
		ensure_bound(bounds.min_work_entrant_stake, "workingPeriodStake", |min| {
			context.working_period_stake >= min
		})?;
	}
	Ok(())
}

fn validate_judging_period_details(state: &WizardState) -> Result {
	ensure(state.context.judging_period_length > 0, "judgingPeriodLength")?;
	ensure(state.context.oracle.is_some(), "oracle")
}

fn validate_forum_thread_details(state: &WizardState) -> Result {
	ensure(!state.context.forum_thread_topic.trim().is_empty(), "forumThreadTopic")?;
	ensure(!state.context.forum_thread_description.trim().is_empty(), "forumThreadDescription")
}

/// Report the first field keeping the current step from advancing.
pub fn validate_step(state: &WizardState, bounds: &ValidationBounds) -> Result {
	match state.step {
		WizardStep::GeneralParameters => validate_general_parameters(state),
		WizardStep::FundingPeriodDetails => validate_funding_period_details(state, bounds),
		WizardStep::WorkingPeriodDetails => validate_working_period_details(state, bounds),
		WizardStep::JudgingPeriodDetails => validate_judging_period_details(state),
		WizardStep::ForumThreadDetails => validate_forum_thread_details(state),
		WizardStep::RequirementsVerification =>
			ensure(state.active_member.is_some(), "activeMember"),
		WizardStep::Transaction |
		WizardStep::Success |
		WizardStep::Error |
		WizardStep::Canceled => Err(WizardError::ValidationFailed("step")),
	}
}

/// Whether `NEXT` is enabled for the current step.
pub fn is_next_step_valid(state: &WizardState, bounds: &ValidationBounds) -> bool {
	validate_step(state, bounds).is_ok()
}
