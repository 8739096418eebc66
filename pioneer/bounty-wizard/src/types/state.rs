use derive_more::Display;
use serde::{
	Deserialize,
	Serialize,
};

use super::{
	BlockCount,
	CreateBountyCall,
	Member,
	MemberId,
	TokenAmount,
	TransactionEvent,
};

/// Steps of the wizard in the order they are walked through.
#[derive(Copy, Clone, Debug, Display, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WizardStep {
	#[display(fmt = "generalParameters")]
	GeneralParameters,
	#[display(fmt = "fundingPeriodDetails")]
	FundingPeriodDetails,
	#[display(fmt = "workingPeriodDetails")]
	WorkingPeriodDetails,
	#[display(fmt = "judgingPeriodDetails")]
	JudgingPeriodDetails,
	#[display(fmt = "forumThreadDetails")]
	ForumThreadDetails,
	#[display(fmt = "requirementsVerification")]
	RequirementsVerification,
	#[display(fmt = "transaction")]
	Transaction,
	#[display(fmt = "success")]
	Success,
	#[display(fmt = "error")]
	Error,
	#[display(fmt = "canceled")]
	Canceled,
}

impl WizardStep {
	/// Step reached by a valid `NEXT`.
	pub fn next(&self) -> Option<WizardStep> {
		match self {
			WizardStep::GeneralParameters => Some(WizardStep::FundingPeriodDetails),
			WizardStep::FundingPeriodDetails => Some(WizardStep::WorkingPeriodDetails),
			WizardStep::WorkingPeriodDetails => Some(WizardStep::JudgingPeriodDetails),
			WizardStep::JudgingPeriodDetails => Some(WizardStep::ForumThreadDetails),
			WizardStep::ForumThreadDetails => Some(WizardStep::RequirementsVerification),
			WizardStep::RequirementsVerification => Some(WizardStep::Transaction),
			_ => None,
		}
	}

	/// Step reached by `BACK`, if it is available.
	pub fn previous(&self) -> Option<WizardStep> {
		match self {
			WizardStep::FundingPeriodDetails => Some(WizardStep::GeneralParameters),
			WizardStep::WorkingPeriodDetails => Some(WizardStep::FundingPeriodDetails),
			WizardStep::JudgingPeriodDetails => Some(WizardStep::WorkingPeriodDetails),
			WizardStep::ForumThreadDetails => Some(WizardStep::JudgingPeriodDetails),
			WizardStep::RequirementsVerification => Some(WizardStep::ForumThreadDetails),
			_ => None,
		}
	}

	pub fn is_terminal(&self) -> bool {
		matches!(self, WizardStep::Success | WizardStep::Error | WizardStep::Canceled)
	}
}

impl Default for WizardStep {
	fn default() -> Self {
		WizardStep::GeneralParameters
	}
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FundingPeriodType {
	Perpetual,
	Limited,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WorkingPeriodType {
	Open,
	Closed,
}

/// Everything entered so far plus the derived transaction state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardContext {
	pub title: String,
	pub description: String,
	pub cover_photo_link: Option<String>,
	pub creator: Option<Member>,
	pub cherry: TokenAmount,
	pub funding_period_type: FundingPeriodType,
	pub funding_maximal_range: TokenAmount,
	pub funding_minimal_range: TokenAmount,
	pub funding_period_length: BlockCount,
	pub working_period_type: WorkingPeriodType,
	pub working_period_length: BlockCount,
	pub working_period_stake_allowance: bool,
	pub working_period_stake: TokenAmount,
	pub working_period_whitelist: Vec<MemberId>,
	pub judging_period_length: BlockCount,
	pub oracle: Option<Member>,
	pub forum_thread_topic: String,
	pub forum_thread_description: String,
	/// Call built when entering the transaction step.
	pub transaction: Option<CreateBountyCall>,
	/// Events reported by the chain for the submitted call.
	pub transaction_events: Vec<TransactionEvent>,
	/// Reason given when the submission failed outright.
	pub failure_reason: Option<String>,
}

impl Default for WizardContext {
	fn default() -> Self {
		Self {
			title: String::new(),
			description: String::new(),
			cover_photo_link: None,
			creator: None,
			cherry: TokenAmount::zero(),
			funding_period_type: FundingPeriodType::Perpetual,
			funding_maximal_range: TokenAmount::zero(),
			funding_minimal_range: TokenAmount::zero(),
			funding_period_length: 0,
			working_period_type: WorkingPeriodType::Open,
			working_period_length: 0,
			working_period_stake_allowance: false,
			working_period_stake: TokenAmount::zero(),
			working_period_whitelist: vec![],
			judging_period_length: 0,
			oracle: None,
			forum_thread_topic: String::new(),
			forum_thread_description: String::new(),
			transaction: None,
			transaction_events: vec![],
			failure_reason: None,
		}
	}
}

/// The wizard as a whole: the active step, the context and the identity that signs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardState {
	pub step: WizardStep,
	pub context: WizardContext,
	pub active_member: Option<Member>,
}
