use async_trait::async_trait;
use futures::stream::BoxStream;
use pioneer_primitives::types::{
	AccountId,
	ApiKind,
	ApiPath,
	TransactionStatus,
};
use serde_json::Value;
use tokio::sync::watch;

use crate::{
	errors::ChainError,
	messages::RuntimeConstants,
};

mod jsonrpc;
pub use jsonrpc::*;

pub type Result<T> = std::result::Result<T, ChainError>;

/// Stream of values pushed by a subscription.
pub type ValueStream = BoxStream<'static, Result<Value>>;

/// Stream of statuses of a submitted transaction.
pub type StatusStream = BoxStream<'static, Result<TransactionStatus>>;

/// The single connection to a chain node, owned by the worker.
#[async_trait]
pub trait ChainApi: Send + Sync + 'static {
	/// Establish the connection and read the runtime constants.
	async fn connect(&self, endpoint: &str) -> Result<RuntimeConstants>;

	/// Connectivity updates, `true` while the node is reachable.
	fn connectivity(&self) -> watch::Receiver<bool>;

	/// Perform a single call against one of the read surfaces.
	async fn call(&self, kind: ApiKind, path: &ApiPath, params: Vec<Value>) -> Result<Value>;

	/// Subscribe to updates of a read surface entry.
	async fn subscribe(&self, kind: ApiKind, path: &ApiPath, params: Vec<Value>)
		-> Result<ValueStream>;

	/// Build a transaction object for the given extrinsic.
	async fn create_transaction(
		&self,
		path: &ApiPath,
		params: Vec<Value>,
	) -> Result<Box<dyn Transaction>>;

	/// Tear the connection down.
	async fn disconnect(&self);
}

/// An unsigned extrinsic held on the worker side. Methods take `&mut self` as a transaction can
/// only be signed once and the worker serializes calls on it.
#[async_trait]
pub trait Transaction: Send + Sync {
	/// Serializable description handed back to the client on creation.
	fn describe(&self) -> Value;

	/// Estimated fees when signed by `signer`.
	async fn payment_info(&mut self, signer: &AccountId) -> Result<Value>;

	/// Sign with `signer`, submit and watch the inclusion progress.
	async fn sign_and_send(&mut self, signer: &AccountId) -> Result<StatusStream>;
}
