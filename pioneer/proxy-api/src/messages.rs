use pioneer_primitives::{
	deserializers::u256_from_value,
	types::{
		AccountId,
		ApiKind,
		ApiPath,
		CorrelationId,
		U256,
	},
};
use serde::{
	Deserialize,
	Serialize,
};
use serde_json::{
	Map,
	Value,
};

use crate::errors::MessageError;

/// Boundary check applied to every decoded message before it is handed over.
pub trait Validate {
	fn validate(&self) -> Result<(), MessageError>;
}

/// Messages posted by the client context to the worker.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "messageType", content = "payload", rename_all = "camelCase")]
pub enum ClientMessage {
	/// Connect to the node at the given endpoint.
	Init(String),
	Query(ClientQueryMessage),
	Tx(ClientTxMessage),
	Proxy(ClientProxyMessage),
}

impl ClientMessage {
	pub fn type_name(&self) -> &'static str {
		match self {
			ClientMessage::Init(_) => "init",
			ClientMessage::Query(_) => "query",
			ClientMessage::Tx(_) => "tx",
			ClientMessage::Proxy(_) => "proxy",
		}
	}

	/// Correlation id of the request, lifecycle messages have none.
	pub fn id(&self) -> Option<CorrelationId> {
		match self {
			ClientMessage::Init(_) => None,
			ClientMessage::Query(inner) => Some(inner.id),
			ClientMessage::Tx(inner) => Some(inner.id),
			ClientMessage::Proxy(inner) => Some(inner.id),
		}
	}
}

impl Validate for ClientMessage {
	fn validate(&self) -> Result<(), MessageError> {
		match self {
			ClientMessage::Init(endpoint) if endpoint.trim().is_empty() =>
				Err(MessageError::InvalidPayload("init requires an endpoint".to_owned())),
			ClientMessage::Query(inner) if inner.kind == ApiKind::Tx =>
				Err(MessageError::InvalidPayload("transactions are created with tx".to_owned())),
			_ => Ok(()),
		}
	}
}

/// Read-only call against the `derive`, `query` or `rpc` surface.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClientQueryMessage {
	pub id: CorrelationId,
	pub kind: ApiKind,
	pub path: ApiPath,
	#[serde(default)]
	pub params: Vec<Value>,
	/// Stream every update instead of answering once.
	#[serde(default)]
	pub subscribe: bool,
}

/// Create a transaction object on the worker, stored under `id`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClientTxMessage {
	pub id: CorrelationId,
	pub path: ApiPath,
	#[serde(default)]
	pub params: Vec<Value>,
}

/// Methods callable on a worker held transaction.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransactionMethod {
	PaymentInfo,
	SignAndSend,
}

/// Invoke `method` on the transaction created by the tx call `target`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClientProxyMessage {
	pub id: CorrelationId,
	pub target: CorrelationId,
	pub method: TransactionMethod,
	pub signer: AccountId,
}

/// Messages posted by the worker to the client context.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "messageType", content = "payload", rename_all = "camelCase")]
pub enum WorkerMessage {
	Init(WorkerInitPayload),
	IsConnected(bool),
	Query(WorkerResponse),
	Tx(WorkerResponse),
	Proxy(WorkerResponse),
}

impl WorkerMessage {
	pub fn type_name(&self) -> &'static str {
		match self {
			WorkerMessage::Init(_) => "init",
			WorkerMessage::IsConnected(_) => "isConnected",
			WorkerMessage::Query(_) => "query",
			WorkerMessage::Tx(_) => "tx",
			WorkerMessage::Proxy(_) => "proxy",
		}
	}
}

impl Validate for WorkerMessage {
	fn validate(&self) -> Result<(), MessageError> {
		match self {
			WorkerMessage::Init(inner) => inner.consts.validate(),
			_ => Ok(()),
		}
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkerInitPayload {
	pub consts: RuntimeConstants,
}

/// Answer to a correlated request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkerResponse {
	pub id: CorrelationId,
	pub result: ResponseBody,
}

impl WorkerResponse {
	pub fn new(id: CorrelationId, result: ResponseBody) -> Self {
		Self { id, result }
	}
}

/// `Value` and `Error` settle a call. Streams send any number of `Next` followed by `Complete` or
/// `Error`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum ResponseBody {
	Value(Value),
	Next(Value),
	Complete,
	Error(ErrorPayload),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
	NotConnected,
	RemoteCallFailed,
}

/// Structured error crossing the boundary.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ErrorPayload {
	pub kind: ErrorKind,
	pub message: String,
}

impl ErrorPayload {
	pub fn not_connected() -> Self {
		Self { kind: ErrorKind::NotConnected, message: "not connected".to_owned() }
	}

	pub fn remote_call_failed(message: impl Into<String>) -> Self {
		Self { kind: ErrorKind::RemoteCallFailed, message: message.into() }
	}
}

/// Chain runtime constants grouped by pallet section, e.g. `bounty.minCherryLimit`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuntimeConstants(pub Map<String, Value>);

impl RuntimeConstants {
	/// Accept a node answer only if it maps section names to objects.
	pub fn from_value(value: Value) -> Result<Self, MessageError> {
		let consts = match value {
			Value::Object(sections) => RuntimeConstants(sections),
			other => return Err(MessageError::InvalidPayload(format!("invalid constants {}", other))),
		};
		consts.validate()?;
		Ok(consts)
	}

	pub fn get(&self, section: &str, name: &str) -> Option<&Value> {
		self.0.get(section).and_then(|section| section.get(name))
	}

	pub fn amount(&self, section: &str, name: &str) -> Option<U256> {
		self.get(section, name).and_then(u256_from_value)
	}

	pub fn count(&self, section: &str, name: &str) -> Option<u64> {
		self.amount(section, name).filter(|v| *v <= U256::from(u64::MAX)).map(|v| v.as_u64())
	}
}

impl Validate for RuntimeConstants {
	fn validate(&self) -> Result<(), MessageError> {
		match self.0.iter().find(|(_, constants)| !constants.is_object()) {
			Some((section, _)) =>
				Err(MessageError::InvalidPayload(format!("constants section `{}` is not an object", section))),
			None => Ok(()),
		}
	}
}
