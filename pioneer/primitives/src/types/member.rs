use serde::{
	Deserialize,
	Serialize,
};

use super::{
	AccountId,
	MemberId,
};

/// A governance platform membership as consumed by the core.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
	pub id: MemberId,
	pub handle: String,
	pub root_account: AccountId,
	pub controller_account: AccountId,
}
