use std::{
	sync::{
		atomic::{
			AtomicUsize,
			Ordering,
		},
		Arc,
	},
	time::Duration,
};

use async_trait::async_trait;
use futures::StreamExt;
use futures_util::FutureExt;
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
use tokio::sync::watch;

use crate::{
	chain::{
		ChainApi,
		Result,
		StatusStream,
		Transaction,
		ValueStream,
	},
	channel::channel,
	client::ProxyClient,
	config::ProxyConfig,
	errors::ChainError,
	messages::RuntimeConstants,
	worker::ProxyWorker,
};

pub fn runtime_constants() -> RuntimeConstants {
	let consts = json!({
		"bounty": {
			"minCherryLimit": "100",
			"minFundingLimit": "1000",
			"minWorkEntrantStake": 50,
			"closedContractSizeLimit": 3,
		}
	});
	serde_json::from_value(consts).expect("Constants should deserialize")
}

/// Tracks how many calls are in flight at once.
#[derive(Default)]
pub struct Concurrency {
	current: AtomicUsize,
	pub max: AtomicUsize,
}

impl Concurrency {
	fn enter(&self) {
		let current = self.current.fetch_add(1, Ordering::SeqCst) + 1;
		self.max.fetch_max(current, Ordering::SeqCst);
	}

	fn exit(&self) {
		self.current.fetch_sub(1, Ordering::SeqCst);
	}
}

/// In-memory chain. Calls echo their path and params, the first param of a call is an optional
/// delay in milliseconds and methods named `fail` always error.
pub struct MockChain {
	connected: watch::Sender<bool>,
	connectivity: watch::Receiver<bool>,
	pub concurrency: Arc<Concurrency>,
}

impl MockChain {
	pub fn new(connected: bool) -> Arc<Self> {
		let (sender, connectivity) = watch::channel(connected);
		Arc::new(Self { connected: sender, connectivity, concurrency: Arc::default() })
	}

	pub fn set_connected(&self, connected: bool) {
		let _ = self.connected.send(connected);
	}

	fn ensure_connected(&self) -> Result<()> {
		if *self.connectivity.borrow() {
			Ok(())
		} else {
			Err(ChainError::NotConnected)
		}
	}
}

#[async_trait]
impl ChainApi for MockChain {
	async fn connect(&self, endpoint: &str) -> Result<RuntimeConstants> {
		if endpoint == "ws://unreachable" {
			return Err(ChainError::Connection("unreachable".to_owned()))
		}
		self.set_connected(true);
		Ok(runtime_constants())
	}

	fn connectivity(&self) -> watch::Receiver<bool> {
		self.connectivity.clone()
	}

	async fn call(&self, kind: ApiKind, path: &ApiPath, params: Vec<Value>) -> Result<Value> {
		self.ensure_connected()?;
		if path.method == "fail" {
			return Err(ChainError::Call("boom".to_owned()))
		}
		if let Some(delay) = params.first().and_then(Value::as_u64) {
			tokio::time::sleep(Duration::from_millis(delay)).await;
		}
		Ok(json!({ "kind": kind.as_str(), "path": path.to_string(), "params": params }))
	}

	async fn subscribe(
		&self,
		_kind: ApiKind,
		_path: &ApiPath,
		params: Vec<Value>,
	) -> Result<ValueStream> {
		self.ensure_connected()?;
		Ok(futures::stream::iter(params.into_iter().map(Ok)).boxed())
	}

	async fn create_transaction(
		&self,
		path: &ApiPath,
		params: Vec<Value>,
	) -> Result<Box<dyn Transaction>> {
		self.ensure_connected()?;
		Ok(Box::new(MockTransaction {
			path: path.clone(),
			params,
			submitted: false,
			concurrency: self.concurrency.clone(),
		}))
	}

	async fn disconnect(&self) {
		self.set_connected(false);
	}
}

/// Signer whose submissions the mock chain refuses.
pub const REJECTED_SIGNER: &str = "mallory";

pub struct MockTransaction {
	path: ApiPath,
	params: Vec<Value>,
	submitted: bool,
	concurrency: Arc<Concurrency>,
}

pub fn inclusion_statuses() -> Vec<TransactionStatus> {
	let events = vec![TransactionEvent {
		section: "bounty".to_owned(),
		method: "BountyCreated".to_owned(),
		data: json!([1]),
	}];
	vec![
		TransactionStatus::Ready,
		TransactionStatus::InBlock { block_hash: "0x01".to_owned(), events: events.clone() },
		TransactionStatus::Finalized { block_hash: "0x01".to_owned(), events },
	]
}

#[async_trait]
impl Transaction for MockTransaction {
	fn describe(&self) -> Value {
		json!({ "method": self.path.to_string(), "args": self.params })
	}

	async fn payment_info(&mut self, signer: &AccountId) -> Result<Value> {
		self.concurrency.enter();
		tokio::time::sleep(Duration::from_millis(20)).await;
		self.concurrency.exit();
		Ok(json!({ "partialFee": "125", "signer": signer }))
	}

	async fn sign_and_send(&mut self, signer: &AccountId) -> Result<StatusStream> {
		if signer == REJECTED_SIGNER {
			self.submitted = true;
			return Err(ChainError::Call("bad signature".to_owned()))
		}
		if self.submitted {
			return Err(ChainError::Call("already submitted".to_owned()))
		}
		self.submitted = true;
		Ok(futures::stream::iter(inclusion_statuses().into_iter().map(Ok)).boxed())
	}
}

pub fn test_config() -> ProxyConfig {
	ProxyConfig { pending_call_timeout: None, sweep_interval: Duration::from_millis(10) }
}

/// Wire a client and a worker over a fresh channel and run both.
pub fn spawn_proxy(chain: Arc<MockChain>, config: ProxyConfig) -> ProxyClient {
	let (client_endpoint, worker_endpoint) = channel();
	let worker = ProxyWorker::new(chain, worker_endpoint);
	let (client, service) = ProxyClient::new(client_endpoint, config);

	let (worker_job, worker_handle) = FutureExt::remote_handle(worker.run());
	let (service_job, service_handle) = FutureExt::remote_handle(service.run());
	tokio::spawn(worker_job);
	tokio::spawn(service_job);
	worker_handle.forget();
	service_handle.forget();

	client
}

pub fn path(path: &str) -> ApiPath {
	path.parse().expect("Path should parse")
}
