use serde::{
	Deserialize,
	Serialize,
};

use super::{
	BountyId,
	TokenAmount,
};
use crate::{
	deserializers::u256_from_str,
	serializers::u256_to_str,
};

/// Lifecycle stage of a bounty.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BountyStage {
	Funding,
	Expired,
	WorkSubmission,
	Judgment,
	Successful,
	Failed,
	Terminated,
}

/// The parts of an on-chain bounty the withdraw flows read.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounty {
	pub id: BountyId,
	pub title: String,
	pub stage: BountyStage,
	#[serde(serialize_with = "u256_to_str", deserialize_with = "u256_from_str")]
	pub cherry: TokenAmount,
	#[serde(serialize_with = "u256_to_str", deserialize_with = "u256_from_str")]
	pub total_funding: TokenAmount,
}
