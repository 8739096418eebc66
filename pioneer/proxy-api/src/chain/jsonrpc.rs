use std::sync::Arc;

use async_trait::async_trait;
use futures::{
	stream,
	StreamExt,
};
use parking_lot::{
	Mutex,
	RwLock,
};
use pioneer_primitives::types::{
	AccountId,
	ApiKind,
	ApiPath,
	TransactionEvent,
	TransactionStatus,
};
use serde_json::{
	json,
	Value,
};
use tokio::{
	sync::watch,
	task::JoinHandle,
	time::interval,
};
use tokio_stream::wrappers::IntervalStream;
use tracing::{
	debug,
	info,
	warn,
};
use web3::{
	transports::WebSocket,
	api::SubscriptionId,
	DuplexTransport,
	Transport,
};

use super::{
	ChainApi,
	Result,
	StatusStream,
	Transaction,
	ValueStream,
};
use crate::{
	config::ConnectionConfig,
	errors::ChainError,
	messages::RuntimeConstants,
};

/// Health check issued by the heartbeat.
const HEALTH_METHOD: &str = "system_health";

/// Shared slot holding the live transport, `None` while disconnected.
type TransportSlot = Arc<RwLock<Option<WebSocket>>>;

/// Chain connection speaking JSON-RPC over a websocket.
///
/// `rpc` calls are forwarded as `<section>_<method>`. The `query`, `derive` and `tx` surfaces need
/// runtime metadata to encode and are served by a gateway namespace as
/// `<namespace>_<kind>(path, params)`.
pub struct JsonRpcChain {
	config: ConnectionConfig,
	transport: TransportSlot,
	connected: Arc<watch::Sender<bool>>,
	connectivity: watch::Receiver<bool>,
	heartbeat: Mutex<Option<JoinHandle<()>>>,
}

impl JsonRpcChain {
	pub fn new(config: ConnectionConfig) -> Self {
		let (connected, connectivity) = watch::channel(false);
		Self {
			config,
			transport: Arc::new(RwLock::new(None)),
			connected: Arc::new(connected),
			connectivity,
			heartbeat: Mutex::new(None),
		}
	}

	fn transport(&self) -> Result<WebSocket> {
		self.transport.read().clone().ok_or(ChainError::NotConnected)
	}

	/// Whether a heartbeat task is watching the connection.
	pub fn is_monitored(&self) -> bool {
		self.heartbeat.lock().is_some()
	}

	fn gateway_method(&self, name: &str) -> String {
		format!("{}_{}", self.config.gateway_namespace, name)
	}

	/// Execute a request, flagging the connection as lost on transport failures.
	async fn execute(&self, method: &str, params: Vec<Value>) -> Result<Value> {
		let transport = self.transport()?;
		match transport.execute(method, params).await.map_err(ChainError::from) {
			Err(ChainError::Connection(reason)) => {
				warn!(message = "Connection lost", method, reason = reason.as_str());
				mark_disconnected(&self.transport, &self.connected);
				Err(ChainError::NotConnected)
			},
			result => result,
		}
	}

	/// Start a subscription and map its notifications.
	async fn open_subscription(&self, method: &str, params: Vec<Value>) -> Result<ValueStream> {
		let transport = self.transport()?;
		let subscription_id = subscription_id(self.execute(method, params).await?)?;
		let notifications = transport.subscribe(subscription_id).map_err(ChainError::from)?;
		Ok(notifications.map(Ok).boxed())
	}

	fn spawn_heartbeat(&self, endpoint: String) {
		let transport = self.transport.clone();
		let connected = self.connected.clone();
		let period = self.config.heartbeat_interval;

		let handle = tokio::spawn(async move {
			let ticks = IntervalStream::new(interval(period));
			tokio::pin!(ticks);
			// The first tick fires immediately, right after connecting.
			ticks.next().await;

			while ticks.next().await.is_some() {
				let current = transport.read().clone();
				match current {
					Some(ws) =>
						if let Err(e) = ws.execute(HEALTH_METHOD, vec![]).await {
							warn!(message = "Health check failed", error = format!("{}", e));
							mark_disconnected(&transport, &connected);
						},
					None => match WebSocket::new(&endpoint).await {
						Ok(ws) => {
							info!(message = "Reconnected", endpoint = endpoint.as_str());
							*transport.write() = Some(ws);
							let _ = connected.send(true);
						},
						Err(e) => {
							debug!(message = "Reconnect failed", error = format!("{}", e));
						},
					},
				}
			}
		});

		if let Some(previous) = self.heartbeat.lock().replace(handle) {
			previous.abort();
		}
	}
}

fn mark_disconnected(transport: &TransportSlot, connected: &watch::Sender<bool>) {
	*transport.write() = None;
	let _ = connected.send(false);
}

fn subscription_id(value: Value) -> Result<SubscriptionId> {
	match value {
		Value::String(id) => Ok(SubscriptionId::from(id)),
		Value::Number(id) => Ok(SubscriptionId::from(id.to_string())),
		other => Err(ChainError::Call(format!("Invalid subscription id {}", other))),
	}
}

fn events_of(value: &Value) -> Vec<TransactionEvent> {
	value
		.get("events")
		.cloned()
		.and_then(|events| serde_json::from_value(events).ok())
		.unwrap_or_default()
}

/// Translate an extrinsic status notification into a `TransactionStatus`.
///
/// Accepts both the node's native shapes (`"ready"`, `{"inBlock": hash}`, ...) and already typed
/// statuses.
pub fn status_from_notification(value: &Value) -> Option<TransactionStatus> {
	if let Ok(status) = serde_json::from_value::<TransactionStatus>(value.clone()) {
		return Some(status)
	}

	let block_hash = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_owned);

	match value {
		Value::String(status) => match status.as_str() {
			"future" | "ready" => Some(TransactionStatus::Ready),
			"dropped" | "invalid" =>
				Some(TransactionStatus::Failed { reason: status.clone(), events: vec![] }),
			_ => None,
		},
		Value::Object(_) => {
			if let Some(block_hash) = block_hash("inBlock") {
				return Some(TransactionStatus::InBlock { block_hash, events: events_of(value) })
			}
			if let Some(block_hash) = block_hash("finalized") {
				return Some(TransactionStatus::Finalized { block_hash, events: events_of(value) })
			}
			if value.get("broadcast").is_some() || value.get("retracted").is_some() {
				return Some(TransactionStatus::Ready)
			}
			for reason in ["usurped", "finalityTimeout"] {
				if value.get(reason).is_some() {
					return Some(TransactionStatus::Failed {
						reason: reason.to_owned(),
						events: events_of(value),
					})
				}
			}
			None
		},
		_ => None,
	}
}

#[async_trait]
impl ChainApi for JsonRpcChain {
	async fn connect(&self, endpoint: &str) -> Result<RuntimeConstants> {
		let ws =
			WebSocket::new(endpoint).await.map_err(|e| ChainError::Connection(e.to_string()))?;

		// Nothing is published until the node answered with usable constants.
		let consts = ws
			.execute(&self.gateway_method("consts"), vec![])
			.await
			.map_err(ChainError::from)?;
		let consts =
			RuntimeConstants::from_value(consts).map_err(|e| ChainError::Call(e.to_string()))?;

		*self.transport.write() = Some(ws);
		let _ = self.connected.send(true);
		info!(message = "Connected", endpoint);
		self.spawn_heartbeat(endpoint.to_owned());

		Ok(consts)
	}

	fn connectivity(&self) -> watch::Receiver<bool> {
		self.connectivity.clone()
	}

	async fn call(&self, kind: ApiKind, path: &ApiPath, params: Vec<Value>) -> Result<Value> {
		match kind {
			ApiKind::Rpc =>
				self.execute(&format!("{}_{}", path.section, path.method), params).await,
			kind =>
				self.execute(
					&self.gateway_method(kind.as_str()),
					vec![json!(path.to_string()), Value::Array(params)],
				)
				.await,
		}
	}

	async fn subscribe(
		&self,
		kind: ApiKind,
		path: &ApiPath,
		params: Vec<Value>,
	) -> Result<ValueStream> {
		match kind {
			ApiKind::Rpc =>
				self.open_subscription(&format!("{}_{}", path.section, path.method), params)
					.await,
			kind =>
				self.open_subscription(
					&self.gateway_method("subscribe"),
					vec![json!(kind.as_str()), json!(path.to_string()), Value::Array(params)],
				)
				.await,
		}
	}

	async fn create_transaction(
		&self,
		path: &ApiPath,
		params: Vec<Value>,
	) -> Result<Box<dyn Transaction>> {
		let call = self.call(ApiKind::Tx, path, params).await?;
		Ok(Box::new(JsonRpcTransaction {
			transport: self.transport()?,
			namespace: self.config.gateway_namespace.clone(),
			path: path.clone(),
			call,
			submitted: false,
		}))
	}

	async fn disconnect(&self) {
		if let Some(heartbeat) = self.heartbeat.lock().take() {
			heartbeat.abort();
		}
		mark_disconnected(&self.transport, &self.connected);
		info!(message = "Disconnected");
	}
}

/// Encoded extrinsic created through the gateway.
struct JsonRpcTransaction {
	transport: WebSocket,
	namespace: String,
	path: ApiPath,
	call: Value,
	submitted: bool,
}

#[async_trait]
impl Transaction for JsonRpcTransaction {
	fn describe(&self) -> Value {
		json!({ "path": self.path.to_string(), "call": self.call })
	}

	async fn payment_info(&mut self, signer: &AccountId) -> Result<Value> {
		self.transport
			.execute(&format!("{}_paymentInfo", self.namespace), vec![self.call.clone(), json!(signer)])
			.await
			.map_err(ChainError::from)
	}

	async fn sign_and_send(&mut self, signer: &AccountId) -> Result<StatusStream> {
		if self.submitted {
			return Err(ChainError::Call("Transaction already submitted".to_owned()))
		}
		self.submitted = true;

		let response = self
			.transport
			.execute(&format!("{}_signAndSend", self.namespace), vec![self.call.clone(), json!(signer)])
			.await;

		let subscription = match response {
			Ok(value) => subscription_id(value)?,
			Err(web3::Error::Rpc(e)) if e.message.to_lowercase().contains("cancel") =>
				return Ok(stream::iter(vec![Ok(TransactionStatus::Canceled)]).boxed()),
			Err(e) => return Err(e.into()),
		};

		let notifications = self.transport.subscribe(subscription).map_err(ChainError::from)?;
		Ok(notifications
			.filter_map(|value| async move {
				match status_from_notification(&value) {
					Some(status) => Some(Ok(status)),
					None => {
						debug!(message = "Ignoring unknown extrinsic status", status = %value);
						None
					},
				}
			})
			.boxed())
	}
}
