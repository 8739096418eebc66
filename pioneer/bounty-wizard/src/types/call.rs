use pioneer_primitives::{
	constants::{
		BOUNTY_SECTION,
		CREATE_BOUNTY_METHOD,
	},
	deserializers::u256_from_str,
	serializers::u256_to_str,
	types::ApiPath,
};
use serde::{
	Deserialize,
	Serialize,
};
use serde_json::Value;

use super::{
	BlockCount,
	MemberId,
	TokenAmount,
};

/// Who acts on a bounty.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum BountyActor {
	Member(MemberId),
}

/// Who may enter the working period.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum AssuranceContractType {
	Open,
	Closed(Vec<MemberId>),
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum FundingType {
	Perpetual {
		#[serde(serialize_with = "u256_to_str", deserialize_with = "u256_from_str")]
		target: TokenAmount,
	},
	#[serde(rename_all = "camelCase")]
	Limited {
		#[serde(serialize_with = "u256_to_str", deserialize_with = "u256_from_str")]
		min_funding_amount: TokenAmount,
		#[serde(serialize_with = "u256_to_str", deserialize_with = "u256_from_str")]
		max_funding_amount: TokenAmount,
		funding_period: BlockCount,
	},
}

/// First argument of `bounty.createBounty`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBountyParameters {
	pub oracle: BountyActor,
	pub contract_type: AssuranceContractType,
	pub creator: BountyActor,
	#[serde(serialize_with = "u256_to_str", deserialize_with = "u256_from_str")]
	pub cherry: TokenAmount,
	#[serde(serialize_with = "u256_to_str", deserialize_with = "u256_from_str")]
	pub entrant_stake: TokenAmount,
	pub funding_type: FundingType,
	pub work_period: BlockCount,
	pub judging_period: BlockCount,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DiscussionThread {
	pub topic: String,
	pub description: String,
}

/// Second argument of `bounty.createBounty`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BountyMetadata {
	pub title: String,
	pub description: String,
	pub cover_photo: Option<String>,
	pub discussion_thread: DiscussionThread,
}

/// The extrinsic built from the wizard context.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CreateBountyCall {
	pub params: CreateBountyParameters,
	pub metadata: BountyMetadata,
}

impl CreateBountyCall {
	pub fn path() -> ApiPath {
		ApiPath::new(BOUNTY_SECTION, CREATE_BOUNTY_METHOD)
	}

	/// Positional arguments of the extrinsic.
	pub fn to_params(&self) -> Result<Vec<Value>, serde_json::Error> {
		Ok(vec![serde_json::to_value(&self.params)?, serde_json::to_value(&self.metadata)?])
	}
}
