use pioneer_primitives::{
	math::proportional_cherry,
	types::{
		Bounty,
		BountyStage,
		TokenAmount,
	},
};
use serde::{
	Deserialize,
	Serialize,
};

/// What is being withdrawn from a bounty.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WithdrawType {
	Stake,
	Contribution,
	Reward,
}

/// Amounts shown before signing a withdrawal.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawalSummary {
	pub withdraw_type: WithdrawType,
	pub amount: TokenAmount,
	/// Share of the cherry refunded along with a contribution.
	pub extra: TokenAmount,
	pub total: TokenAmount,
	/// The bounty failed and the withdrawer funded it, so the cherry is being refunded.
	pub bounty_failed: bool,
}

/// Summarize withdrawing `amount`. Contributors of a known bounty get their share of the cherry
/// back on top.
pub fn withdrawal_summary(
	withdraw_type: WithdrawType,
	amount: TokenAmount,
	bounty: Option<&Bounty>,
	is_contributor: bool,
) -> WithdrawalSummary {
	let (extra, bounty_failed) = match bounty {
		Some(bounty) if is_contributor => (
			proportional_cherry(bounty.cherry, amount, bounty.total_funding),
			bounty.stage == BountyStage::Failed,
		),
		_ => (TokenAmount::zero(), false),
	};

	WithdrawalSummary {
		withdraw_type,
		amount,
		extra,
		total: amount.saturating_add(extra),
		bounty_failed,
	}
}
