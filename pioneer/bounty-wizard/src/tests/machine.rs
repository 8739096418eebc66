use pioneer_primitives::types::U256;
use serde_json::json;

use crate::{
	machine::{
		bounty::state_transition,
		factories::{
			create_bounty_metadata,
			create_bounty_parameters,
		},
		validators::is_next_step_valid,
	},
	tests::factories::{
		bounds,
		created_event,
		failed_event,
		filled_state,
		member,
	},
	types::{
		AssuranceContractType,
		Back,
		BountyActor,
		Event,
		FieldValue,
		FundingPeriodType,
		FundingType,
		IdentitySelected,
		Next,
		SetField,
		StateChange,
		StepChanged,
		TransactionStatus,
		TransactionStatusUpdate,
		WizardState,
		WizardStep,
		WorkingPeriodType,
	},
};

#[test]
fn next_is_a_noop_when_the_step_is_invalid() {
	let state = WizardState::default();
	let result = state_transition(state.clone(), Next {}.into(), &bounds())
		.expect("State transition should succeed");
	assert_eq!(result.new_state, state);
	assert!(result.events.is_empty());
}

#[test]
fn next_walks_the_form_steps_in_order() {
	let mut state = filled_state(WizardStep::GeneralParameters);
	let expected = [
		WizardStep::FundingPeriodDetails,
		WizardStep::WorkingPeriodDetails,
		WizardStep::JudgingPeriodDetails,
		WizardStep::ForumThreadDetails,
		WizardStep::RequirementsVerification,
	];
	for to in expected {
		let from = state.step;
		let result = state_transition(state, Next {}.into(), &bounds())
			.expect("State transition should succeed");
		assert_eq!(result.new_state.step, to);
		assert_eq!(result.events[0], Event::from(StepChanged { from, to }));
		state = result.new_state;
	}
}

#[test]
fn entering_requirements_verification_requests_the_check() {
	let state = filled_state(WizardStep::ForumThreadDetails);
	let result = state_transition(state, Next {}.into(), &bounds())
		.expect("State transition should succeed");
	assert!(matches!(result.events.last(), Some(Event::RequirementsCheckRequested(_))));

	// Without an active member the flow waits at the requirements step.
	let suspended = state_transition(result.new_state, Next {}.into(), &bounds())
		.expect("State transition should succeed");
	assert_eq!(suspended.new_state.step, WizardStep::RequirementsVerification);
	assert!(suspended.events.is_empty());
}

#[test]
fn identity_selection_then_next_builds_the_transaction() {
	let state = filled_state(WizardStep::RequirementsVerification);
	let result = state_transition(
		state,
		IdentitySelected { member: member(1, "alice") }.into(),
		&bounds(),
	)
	.expect("State transition should succeed");
	assert!(is_next_step_valid(&result.new_state, &bounds()));

	let result = state_transition(result.new_state, Next {}.into(), &bounds())
		.expect("State transition should succeed");
	assert_eq!(result.new_state.step, WizardStep::Transaction);
	let submit = match result.events.last() {
		Some(Event::SubmitTransaction(inner)) => inner.clone(),
		other => panic!("Unexpected event {:?}", other),
	};
	assert_eq!(submit.signer, "alice-controller");
	assert_eq!(result.new_state.context.transaction, Some(submit.call));
}

#[test]
fn identity_selection_outside_requirements_is_rejected() {
	let state = filled_state(WizardStep::JudgingPeriodDetails);
	let result =
		state_transition(state, IdentitySelected { member: member(1, "alice") }.into(), &bounds());
	assert!(result.is_err());
}

#[test]
fn back_then_next_keeps_the_context_and_validation() {
	let state = filled_state(WizardStep::WorkingPeriodDetails);
	let valid_before = is_next_step_valid(&state, &bounds());

	let back = state_transition(state.clone(), Back {}.into(), &bounds())
		.expect("State transition should succeed");
	assert_eq!(back.new_state.step, WizardStep::FundingPeriodDetails);
	assert_eq!(back.new_state.context, state.context);

	let next = state_transition(back.new_state, Next {}.into(), &bounds())
		.expect("State transition should succeed");
	assert_eq!(next.new_state, state);
	assert_eq!(is_next_step_valid(&next.new_state, &bounds()), valid_before);
}

#[test]
fn back_is_unavailable_at_the_edges() {
	for step in [WizardStep::GeneralParameters, WizardStep::Transaction] {
		let result = state_transition(filled_state(step), Back {}.into(), &bounds());
		assert!(result.is_err(), "Back should be rejected at {}", step);
	}
}

#[test]
fn fields_are_owned_by_their_step() {
	let state = WizardState::default();
	let result = state_transition(
		state.clone(),
		SetField { value: FieldValue::Title("Audit".to_owned()) }.into(),
		&bounds(),
	)
	.expect("State transition should succeed");
	assert_eq!(result.new_state.context.title, "Audit");

	let result = state_transition(
		state,
		SetField { value: FieldValue::Cherry(U256::from(100)) }.into(),
		&bounds(),
	);
	assert!(result.is_err());
}

#[test]
fn finalized_transaction_succeeds() {
	let state = filled_state(WizardStep::Transaction);
	let result = state_transition(
		state,
		TransactionStatusUpdate {
			status: TransactionStatus::InBlock {
				block_hash: "0x01".to_owned(),
				events: vec![created_event()],
			},
		}
		.into(),
		&bounds(),
	)
	.expect("State transition should succeed");
	assert_eq!(result.new_state.step, WizardStep::Transaction);
	assert_eq!(result.new_state.context.transaction_events, vec![created_event()]);

	let result = state_transition(
		result.new_state,
		TransactionStatusUpdate {
			status: TransactionStatus::Finalized {
				block_hash: "0x01".to_owned(),
				events: vec![created_event()],
			},
		}
		.into(),
		&bounds(),
	)
	.expect("State transition should succeed");
	assert_eq!(result.new_state.step, WizardStep::Success);
	assert!(matches!(result.events.last(), Some(Event::TransactionSucceeded(_))));
}

#[test]
fn extrinsic_failure_ends_in_error_with_events() {
	let state = filled_state(WizardStep::Transaction);
	let result = state_transition(
		state,
		TransactionStatusUpdate {
			status: TransactionStatus::Finalized {
				block_hash: "0x02".to_owned(),
				events: vec![failed_event()],
			},
		}
		.into(),
		&bounds(),
	)
	.expect("State transition should succeed");
	assert_eq!(result.new_state.step, WizardStep::Error);
	assert_eq!(result.new_state.context.transaction_events, vec![failed_event()]);
}

#[test]
fn canceled_signing_ends_in_canceled() {
	let state = filled_state(WizardStep::Transaction);
	let result = state_transition(
		state,
		TransactionStatusUpdate { status: TransactionStatus::Canceled }.into(),
		&bounds(),
	)
	.expect("State transition should succeed");
	assert_eq!(result.new_state.step, WizardStep::Canceled);
}

#[test]
fn terminal_states_absorb_every_input() {
	for step in [WizardStep::Success, WizardStep::Error, WizardStep::Canceled] {
		let state = filled_state(step);
		let state_changes: [StateChange; 4] = [
			Next {}.into(),
			Back {}.into(),
			SetField { value: FieldValue::Title("Other".to_owned()) }.into(),
			TransactionStatusUpdate { status: TransactionStatus::Canceled }.into(),
		];
		for state_change in state_changes {
			let result = state_transition(state.clone(), state_change, &bounds())
				.expect("Terminal states should not fail");
			assert_eq!(result.new_state, state);
			assert!(result.events.is_empty());
		}
	}
}

#[test]
fn create_bounty_parameters_from_context() {
	let state = filled_state(WizardStep::Transaction);
	let params = create_bounty_parameters(&state.context).expect("Parameters should build");

	assert_eq!(params.oracle, BountyActor::Member(4));
	assert_eq!(params.creator, BountyActor::Member(1));
	assert_eq!(params.contract_type, AssuranceContractType::Closed(vec![2, 3]));
	assert_eq!(params.entrant_stake, U256::from(75));
	assert_eq!(
		params.funding_type,
		FundingType::Limited {
			min_funding_amount: U256::from(2_000),
			max_funding_amount: U256::from(4_000),
			funding_period: 100,
		}
	);
	assert_eq!(
		serde_json::to_value(&params).expect("Parameters should serialize"),
		json!({
			"oracle": { "Member": 4 },
			"contractType": { "Closed": [2, 3] },
			"creator": { "Member": 1 },
			"cherry": "500",
			"entrantStake": "75",
			"fundingType": {
				"Limited": {
					"minFundingAmount": "2000",
					"maxFundingAmount": "4000",
					"fundingPeriod": 100,
				}
			},
			"workPeriod": 200,
			"judgingPeriod": 50,
		})
	);
}

#[test]
fn open_perpetual_bounty_without_stake() {
	let mut state = filled_state(WizardStep::Transaction);
	state.context.working_period_type = WorkingPeriodType::Open;
	state.context.funding_period_type = FundingPeriodType::Perpetual;
	state.context.working_period_stake_allowance = false;

	let params = create_bounty_parameters(&state.context).expect("Parameters should build");
	assert_eq!(params.contract_type, AssuranceContractType::Open);
	assert_eq!(params.funding_type, FundingType::Perpetual { target: U256::from(4_000) });
	assert_eq!(params.entrant_stake, U256::zero());
	assert_eq!(
		serde_json::to_value(&params.funding_type).expect("Funding type should serialize"),
		json!({ "Perpetual": { "target": "4000" } })
	);
}

#[test]
fn create_bounty_metadata_from_context() {
	let state = filled_state(WizardStep::Transaction);
	let metadata = create_bounty_metadata(&state.context);
	assert_eq!(
		serde_json::to_value(&metadata).expect("Metadata should serialize"),
		json!({
			"title": "Translate the handbook",
			"description": "Into Spanish",
			"coverPhoto": "https://example.com/cover.png",
			"discussionThread": {
				"topic": "Handbook translation",
				"description": "Discussion of the translation bounty",
			},
		})
	);
}
