use pioneer_primitives::types::U256;
use pioneer_proxy_api::messages::RuntimeConstants;
use serde_json::json;

use crate::{
	errors::WizardError,
	machine::validators::{
		is_next_step_valid,
		validate_step,
		ValidationBounds,
	},
	tests::factories::{
		bounds,
		filled_state,
		member,
	},
	types::{
		FundingPeriodType,
		WizardState,
		WizardStep,
		WorkingPeriodType,
	},
};

fn failing_field(state: &WizardState, bounds: &ValidationBounds) -> Option<&'static str> {
	match validate_step(state, bounds) {
		Err(WizardError::ValidationFailed(field)) => Some(field),
		_ => None,
	}
}

#[test]
fn validation_is_pure() {
	let state = filled_state(WizardStep::FundingPeriodDetails);
	let before = state.clone();
	let first = is_next_step_valid(&state, &bounds());
	let second = is_next_step_valid(&state, &bounds());
	assert_eq!(first, second);
	assert_eq!(state, before);
}

#[test]
fn general_parameters_require_title_description_and_creator() {
	let mut state = filled_state(WizardStep::GeneralParameters);
	assert_eq!(failing_field(&state, &bounds()), None);

	state.context.title = "  ".to_owned();
	assert_eq!(failing_field(&state, &bounds()), Some("title"));

	let mut state = filled_state(WizardStep::GeneralParameters);
	state.context.creator = None;
	assert_eq!(failing_field(&state, &bounds()), Some("creator"));
}

#[test]
fn cherry_must_be_within_limits() {
	let mut state = filled_state(WizardStep::FundingPeriodDetails);
	state.context.cherry = U256::from(99);
	assert_eq!(failing_field(&state, &bounds()), Some("cherry"));

	state.context.cherry = U256::from(10_001);
	assert_eq!(failing_field(&state, &bounds()), Some("cherry"));

	state.context.cherry = U256::from(10_000);
	assert!(is_next_step_valid(&state, &bounds()));
}

#[test]
fn missing_bound_fails_its_rule() {
	let state = filled_state(WizardStep::FundingPeriodDetails);
	let bounds = ValidationBounds { max_cherry_limit: None, ..bounds() };
	assert_eq!(failing_field(&state, &bounds), Some("cherry"));

	let state = filled_state(WizardStep::WorkingPeriodDetails);
	let bounds = ValidationBounds { max_whitelist_size: None, ..self::bounds() };
	assert_eq!(failing_field(&state, &bounds), Some("workingPeriodWhitelist"));
}

#[test]
fn limited_funding_needs_a_consistent_range() {
	let mut state = filled_state(WizardStep::FundingPeriodDetails);
	state.context.funding_minimal_range = U256::from(5_000);
	assert_eq!(failing_field(&state, &bounds()), Some("fundingMinimalRange"));

	state.context.funding_minimal_range = U256::zero();
	assert_eq!(failing_field(&state, &bounds()), Some("fundingMinimalRange"));

	state.context.funding_minimal_range = U256::from(1_000);
	state.context.funding_period_length = 0;
	assert_eq!(failing_field(&state, &bounds()), Some("fundingPeriodLength"));

	// A perpetual bounty ignores the limited period fields.
	state.context.funding_period_type = FundingPeriodType::Perpetual;
	assert!(is_next_step_valid(&state, &bounds()));

	state.context.funding_maximal_range = U256::from(999);
	assert_eq!(failing_field(&state, &bounds()), Some("fundingMaximalRange"));
}

#[test]
fn working_period_rules() {
	let mut state = filled_state(WizardStep::WorkingPeriodDetails);
	state.context.working_period_whitelist = vec![];
	assert_eq!(failing_field(&state, &bounds()), Some("workingPeriodWhitelist"));

	state.context.working_period_whitelist = vec![1, 2, 3, 4];
	assert_eq!(failing_field(&state, &bounds()), Some("workingPeriodWhitelist"));

	state.context.working_period_type = WorkingPeriodType::Open;
	assert!(is_next_step_valid(&state, &bounds()));

	state.context.working_period_stake = U256::from(10);
	assert_eq!(failing_field(&state, &bounds()), Some("workingPeriodStake"));

	state.context.working_period_stake_allowance = false;
	assert!(is_next_step_valid(&state, &bounds()));

	state.context.working_period_length = 0;
	assert_eq!(failing_field(&state, &bounds()), Some("workingPeriodLength"));
}

#[test]
fn judging_and_forum_rules() {
	let mut state = filled_state(WizardStep::JudgingPeriodDetails);
	state.context.oracle = None;
	assert_eq!(failing_field(&state, &bounds()), Some("oracle"));

	let mut state = filled_state(WizardStep::ForumThreadDetails);
	state.context.forum_thread_topic.clear();
	assert_eq!(failing_field(&state, &bounds()), Some("forumThreadTopic"));
}

#[test]
fn requirements_need_an_active_member() {
	let mut state = filled_state(WizardStep::RequirementsVerification);
	assert_eq!(failing_field(&state, &bounds()), Some("activeMember"));

	state.active_member = Some(member(1, "alice"));
	assert!(is_next_step_valid(&state, &bounds()));
}

#[test]
fn other_steps_never_validate() {
	for step in
		[WizardStep::Transaction, WizardStep::Success, WizardStep::Error, WizardStep::Canceled]
	{
		assert!(!is_next_step_valid(&filled_state(step), &bounds()));
	}
}

#[test]
fn bounds_from_runtime_constants() {
	let consts: RuntimeConstants = serde_json::from_value(json!({
		"bounty": {
			"minCherryLimit": "100",
			"minFundingLimit": 1000,
			"closedContractSizeLimit": "0x03",
			"minWorkEntrantStake": "50",
		}
	}))
	.expect("Constants should deserialize");

	let bounds = ValidationBounds::from_constants(&consts, Some(U256::from(10_000)));
	assert_eq!(bounds, self::bounds());

	let bounds = ValidationBounds::from_constants(&RuntimeConstants::default(), None);
	assert_eq!(bounds, ValidationBounds::default());
}
