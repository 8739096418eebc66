use serde::{
	Deserialize,
	Serialize,
};
use serde_json::Value;

/// A runtime event emitted while a transaction was being included.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransactionEvent {
	pub section: String,
	pub method: String,
	#[serde(default)]
	pub data: Value,
}

impl TransactionEvent {
	/// Whether the runtime reported the dispatch as failed.
	pub fn is_extrinsic_failed(&self) -> bool {
		self.section == "system" && self.method == "ExtrinsicFailed"
	}
}

/// Progress of a signed and submitted transaction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum TransactionStatus {
	Ready,
	#[serde(rename_all = "camelCase")]
	InBlock {
		block_hash: String,
		#[serde(default)]
		events: Vec<TransactionEvent>,
	},
	#[serde(rename_all = "camelCase")]
	Finalized {
		block_hash: String,
		#[serde(default)]
		events: Vec<TransactionEvent>,
	},
	Failed {
		reason: String,
		#[serde(default)]
		events: Vec<TransactionEvent>,
	},
	Canceled,
}

impl TransactionStatus {
	/// No further status follows a terminal one.
	pub fn is_terminal(&self) -> bool {
		matches!(
			self,
			TransactionStatus::Finalized { .. } |
				TransactionStatus::Failed { .. } |
				TransactionStatus::Canceled
		)
	}

	pub fn events(&self) -> &[TransactionEvent] {
		match self {
			TransactionStatus::InBlock { events, .. } |
			TransactionStatus::Finalized { events, .. } |
			TransactionStatus::Failed { events, .. } => events,
			TransactionStatus::Ready | TransactionStatus::Canceled => &[],
		}
	}
}
