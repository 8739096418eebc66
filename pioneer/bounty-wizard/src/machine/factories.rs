use pioneer_primitives::types::TokenAmount;

use crate::{
	errors::WizardError,
	types::{
		AssuranceContractType,
		BountyActor,
		BountyMetadata,
		CreateBountyCall,
		CreateBountyParameters,
		DiscussionThread,
		FundingPeriodType,
		FundingType,
		WizardContext,
		WorkingPeriodType,
	},
};

/// Build the extrinsic parameters from the wizard context.
pub fn create_bounty_parameters(
	context: &WizardContext,
) -> Result<CreateBountyParameters, WizardError> {
	let oracle = context.oracle.as_ref().ok_or(WizardError::ValidationFailed("oracle"))?;
	let creator = context.creator.as_ref().ok_or(WizardError::ValidationFailed("creator"))?;

	let contract_type = match context.working_period_type {
		WorkingPeriodType::Open => AssuranceContractType::Open,
		WorkingPeriodType::Closed =>
			AssuranceContractType::Closed(context.working_period_whitelist.clone()),
	};

	let funding_type = match context.funding_period_type {
		FundingPeriodType::Perpetual =>
			FundingType::Perpetual { target: context.funding_maximal_range },
		FundingPeriodType::Limited => FundingType::Limited {
			min_funding_amount: context.funding_minimal_range,
			max_funding_amount: context.funding_maximal_range,
			funding_period: context.funding_period_length,
		},
	};

	let entrant_stake = if context.working_period_stake_allowance {
		context.working_period_stake
	} else {
		TokenAmount::zero()
	};

	Ok(CreateBountyParameters {
		oracle: BountyActor::Member(oracle.id),
		contract_type,
		creator: BountyActor::Member(creator.id),
		cherry: context.cherry,
		entrant_stake,
		funding_type,
		work_period: context.working_period_length,
		judging_period: context.judging_period_length,
	})
}

/// Build the metadata describing the bounty and its forum thread.
pub fn create_bounty_metadata(context: &WizardContext) -> BountyMetadata {
	BountyMetadata {
		title: context.title.clone(),
		description: context.description.clone(),
		cover_photo: context.cover_photo_link.clone(),
		discussion_thread: DiscussionThread {
			topic: context.forum_thread_topic.clone(),
			description: context.forum_thread_description.clone(),
		},
	}
}

pub fn create_bounty_call(context: &WizardContext) -> Result<CreateBountyCall, WizardError> {
	Ok(CreateBountyCall {
		params: create_bounty_parameters(context)?,
		metadata: create_bounty_metadata(context),
	})
}
