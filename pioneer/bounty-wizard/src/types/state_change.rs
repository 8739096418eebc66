#![warn(clippy::missing_docs_in_private_items)]

use pioneer_macros::IntoStateChange;
use pioneer_primitives::{
	deserializers::u256_from_str,
	serializers::u256_to_str,
};
use serde::{
	Deserialize,
	Serialize,
};

use super::{
	BlockCount,
	FundingPeriodType,
	Member,
	MemberId,
	TokenAmount,
	TransactionStatus,
	WizardStep,
	WorkingPeriodType,
};

/// An enum containing all possible wizard inputs.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type")]
pub enum StateChange {
	SetField(SetField),
	Next(Next),
	Back(Back),
	IdentitySelected(IdentitySelected),
	TransactionStatusUpdate(TransactionStatusUpdate),
}

impl StateChange {
	/// Returns a string of the inner state change's type name.
	pub fn type_name(&self) -> &'static str {
		match self {
			StateChange::SetField(_) => "SetField",
			StateChange::Next(_) => "Next",
			StateChange::Back(_) => "Back",
			StateChange::IdentitySelected(_) => "IdentitySelected",
			StateChange::TransactionStatusUpdate(_) => "TransactionStatusUpdate",
		}
	}
}

/// A value entered in one of the form steps.
#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum FieldValue {
	Title(String),
	Description(String),
	Creator(Member),
	CoverPhoto(String),
	Cherry(
		#[serde(serialize_with = "u256_to_str", deserialize_with = "u256_from_str")] TokenAmount,
	),
	FundingMaximalRange(
		#[serde(serialize_with = "u256_to_str", deserialize_with = "u256_from_str")] TokenAmount,
	),
	FundingMinimalRange(
		#[serde(serialize_with = "u256_to_str", deserialize_with = "u256_from_str")] TokenAmount,
	),
	FundingPeriodType(FundingPeriodType),
	FundingPeriodLength(BlockCount),
	WorkingPeriodWhitelist(Vec<MemberId>),
	WorkingPeriodLength(BlockCount),
	WorkingPeriodStake(
		#[serde(serialize_with = "u256_to_str", deserialize_with = "u256_from_str")] TokenAmount,
	),
	AllowWorkingPeriodStake(bool),
	WorkingPeriodType(WorkingPeriodType),
	JudgingPeriodLength(BlockCount),
	Oracle(Member),
	ForumThreadTopic(String),
	ForumThreadDescription(String),
}

impl FieldValue {
	/// The step whose form holds the field.
	pub fn owner(&self) -> WizardStep {
		match self {
			FieldValue::Title(_) |
			FieldValue::Description(_) |
			FieldValue::Creator(_) |
			FieldValue::CoverPhoto(_) => WizardStep::GeneralParameters,
			FieldValue::Cherry(_) |
			FieldValue::FundingMaximalRange(_) |
			FieldValue::FundingMinimalRange(_) |
			FieldValue::FundingPeriodType(_) |
			FieldValue::FundingPeriodLength(_) => WizardStep::FundingPeriodDetails,
			FieldValue::WorkingPeriodWhitelist(_) |
			FieldValue::WorkingPeriodLength(_) |
			FieldValue::WorkingPeriodStake(_) |
			FieldValue::AllowWorkingPeriodStake(_) |
			FieldValue::WorkingPeriodType(_) => WizardStep::WorkingPeriodDetails,
			FieldValue::JudgingPeriodLength(_) | FieldValue::Oracle(_) =>
				WizardStep::JudgingPeriodDetails,
			FieldValue::ForumThreadTopic(_) | FieldValue::ForumThreadDescription(_) =>
				WizardStep::ForumThreadDetails,
		}
	}
}

/// Update a single context field.
#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq, IntoStateChange)]
pub struct SetField {
	pub value: FieldValue,
}

/// Move to the next step if the current one validates.
#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq, IntoStateChange)]
pub struct Next {}

/// Return to the previous step.
#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq, IntoStateChange)]
pub struct Back {}

/// An identity was picked to sign with.
#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq, IntoStateChange)]
pub struct IdentitySelected {
	pub member: Member,
}

/// Progress reported for the submitted call.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, IntoStateChange)]
pub struct TransactionStatusUpdate {
	pub status: TransactionStatus,
}
