use std::{
	collections::HashMap,
	pin::Pin,
	task::{
		Context,
		Poll,
	},
};

use chrono::{
	offset::Local,
	DateTime,
	Duration,
};
use futures::{
	Stream,
	StreamExt,
};
use pioneer_primitives::types::{
	AccountId,
	ApiKind,
	ApiPath,
	CorrelationId,
	TransactionStatus,
};
use serde_json::Value;
use tokio::{
	select,
	sync::{
		mpsc::{
			self,
			UnboundedReceiver,
			UnboundedSender,
		},
		oneshot,
		watch,
	},
	time::interval,
};
use tokio_stream::wrappers::{
	IntervalStream,
	UnboundedReceiverStream,
};
use tracing::{
	debug,
	error,
	trace,
	warn,
};

use crate::{
	channel::{
		ClientEndpoint,
		MessageReceiver,
		MessageSender,
	},
	config::ProxyConfig,
	errors::ProxyError,
	messages::{
		ClientMessage,
		ClientProxyMessage,
		ClientQueryMessage,
		ClientTxMessage,
		ResponseBody,
		RuntimeConstants,
		TransactionMethod,
		WorkerMessage,
		WorkerResponse,
	},
};

pub type Result<T> = std::result::Result<T, ProxyError>;

/// Connectivity of the worker as last reported.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ConnectionStatus {
	/// No report from the worker yet.
	Connecting,
	Connected,
	Disconnected,
}

/// Where the outcome of a pending request goes.
enum Responder {
	Once(oneshot::Sender<Result<Value>>),
	Stream(UnboundedSender<Result<Value>>),
}

impl Responder {
	fn is_closed(&self) -> bool {
		match self {
			Responder::Once(sender) => sender.is_closed(),
			Responder::Stream(sender) => sender.is_closed(),
		}
	}

	fn reject(self, error: ProxyError) {
		match self {
			Responder::Once(sender) => {
				let _ = sender.send(Err(error));
			},
			Responder::Stream(sender) => {
				let _ = sender.send(Err(error));
			},
		}
	}
}

/// A request waiting for its response.
struct PendingCall {
	responder: Responder,
	created_at: DateTime<Local>,
}

/// Requests from facade handles to the dispatcher.
enum ClientCommand {
	Post(ClientMessage),
	Call { message: ClientMessage, id: CorrelationId, responder: Responder },
}

/// Dispatcher owning the pending call table. Runs on its own task, created with
/// [`ProxyClient::new`].
pub struct ClientService {
	config: ProxyConfig,
	sender: MessageSender<ClientMessage>,
	receiver: MessageReceiver<WorkerMessage>,
	commands: UnboundedReceiver<ClientCommand>,
	pending: HashMap<CorrelationId, PendingCall>,
	status: watch::Sender<ConnectionStatus>,
	consts: watch::Sender<Option<RuntimeConstants>>,
}

impl ClientService {
	/// Number of requests waiting for a response.
	pub fn pending_count(&self) -> usize {
		self.pending.len()
	}

	/// Process the commands queued by facade handles so far.
	#[cfg(test)]
	pub(crate) fn process_queued_commands(&mut self) {
		while let Ok(command) = self.commands.try_recv() {
			self.process_command(command);
		}
	}

	fn is_disconnected(&self) -> bool {
		*self.status.borrow() == ConnectionStatus::Disconnected
	}

	fn process_command(&mut self, command: ClientCommand) {
		match command {
			ClientCommand::Post(message) =>
				if let Err(e) = self.sender.post(&message) {
					error!(message = "Failed to post message to worker", error = format!("{}", e));
				},
			ClientCommand::Call { message, id, responder } => {
				if self.is_disconnected() {
					return responder.reject(ProxyError::NotConnected)
				}
				if let Err(e) = self.sender.post(&message) {
					error!(message = "Failed to post message to worker", error = format!("{}", e));
					return responder.reject(ProxyError::ServiceStopped)
				}
				trace!(message = "Call issued", id = %id, message_type = message.type_name());
				self.pending.insert(id, PendingCall { responder, created_at: Local::now() });
			},
		}
	}

	pub(crate) fn process_worker_message(&mut self, message: WorkerMessage) {
		match message {
			WorkerMessage::Init(payload) => {
				debug!(message = "Worker initialized");
				let _ = self.consts.send(Some(payload.consts));
				let _ = self.status.send(ConnectionStatus::Connected);
			},
			WorkerMessage::IsConnected(connected) => {
				debug!(message = "Worker connectivity", connected);
				if connected {
					let _ = self.status.send(ConnectionStatus::Connected);
				} else {
					let _ = self.status.send(ConnectionStatus::Disconnected);
					self.reject_all(ProxyError::NotConnected);
				}
			},
			WorkerMessage::Query(response) |
			WorkerMessage::Tx(response) |
			WorkerMessage::Proxy(response) => self.settle(response),
		}
	}

	/// Route a response to its pending call by correlation id only.
	fn settle(&mut self, response: WorkerResponse) {
		let WorkerResponse { id, result } = response;
		let pending = match self.pending.remove(&id) {
			Some(pending) => pending,
			None => {
				trace!(message = "Discarding response for unknown call", id = %id);
				return
			},
		};

		match (pending.responder, result) {
			(Responder::Once(sender), ResponseBody::Value(value)) => {
				let _ = sender.send(Ok(value));
			},
			(Responder::Once(sender), ResponseBody::Error(e)) => {
				let _ = sender.send(Err(e.into()));
			},
			(Responder::Once(sender), other) => {
				let _ = sender.send(Err(ProxyError::InvalidResponse(format!(
					"expected a single value, got {:?}",
					other
				))));
			},
			(Responder::Stream(sender), ResponseBody::Next(value)) => {
				// Keep the stream registered until it completes or the consumer is gone.
				if sender.send(Ok(value)).is_ok() {
					self.pending.insert(
						id,
						PendingCall { responder: Responder::Stream(sender), created_at: pending.created_at },
					);
				}
			},
			(Responder::Stream(sender), ResponseBody::Value(value)) => {
				let _ = sender.send(Ok(value));
			},
			(Responder::Stream(_), ResponseBody::Complete) => {},
			(Responder::Stream(sender), ResponseBody::Error(e)) => {
				let _ = sender.send(Err(e.into()));
			},
		}
	}

	fn reject_all(&mut self, error: ProxyError) {
		for (id, pending) in self.pending.drain() {
			trace!(message = "Rejecting pending call", id = %id, error = format!("{}", error));
			pending.responder.reject(error.clone());
		}
	}

	/// Drop calls nobody waits for anymore and time out stale ones.
	pub(crate) fn sweep(&mut self) {
		let now = Local::now();
		let timeout = self
			.config
			.pending_call_timeout
			.and_then(|timeout| Duration::from_std(timeout).ok());

		let expired: Vec<CorrelationId> = self
			.pending
			.iter()
			.filter(|(_, pending)| {
				pending.responder.is_closed() ||
					timeout.map_or(false, |timeout| pending.created_at + timeout <= now)
			})
			.map(|(id, _)| *id)
			.collect();

		for id in expired {
			if let Some(pending) = self.pending.remove(&id) {
				if pending.responder.is_closed() {
					trace!(message = "Discarding abandoned call", id = %id);
				} else {
					warn!(message = "Call timed out", id = %id);
					pending.responder.reject(ProxyError::TimedOut);
				}
			}
		}
	}

	pub async fn run(mut self) {
		let sweeps = IntervalStream::new(interval(self.config.sweep_interval));
		tokio::pin!(sweeps);

		loop {
			select! {
				command = self.commands.recv() => match command {
					Some(command) => self.process_command(command),
					None => break,
				},
				message = self.receiver.recv() => match message {
					Some(message) => self.process_worker_message(message),
					None => {
						warn!(message = "Worker gone");
						break
					},
				},
				_ = sweeps.next() => {
					if !self.pending.is_empty() {
						self.sweep();
					}
				}
			}
		}

		self.reject_all(ProxyError::ServiceStopped);
	}
}

/// Call/await facade over the worker channel. Cheap to clone.
#[derive(Clone)]
pub struct ProxyClient {
	commands: UnboundedSender<ClientCommand>,
	status: watch::Receiver<ConnectionStatus>,
	consts: watch::Receiver<Option<RuntimeConstants>>,
}

impl ProxyClient {
	/// Create the facade and the dispatcher service that has to be spawned for it to make
	/// progress.
	pub fn new(endpoint: ClientEndpoint, config: ProxyConfig) -> (Self, ClientService) {
		let (commands_sender, commands) = mpsc::unbounded_channel();
		let (status_sender, status) = watch::channel(ConnectionStatus::Connecting);
		let (consts_sender, consts) = watch::channel(None);
		let service = ClientService {
			config,
			sender: endpoint.sender,
			receiver: endpoint.receiver,
			commands,
			pending: HashMap::new(),
			status: status_sender,
			consts: consts_sender,
		};
		(Self { commands: commands_sender, status, consts }, service)
	}

	/// Ask the worker to connect to `endpoint`.
	pub fn init(&self, endpoint: impl Into<String>) -> Result<()> {
		self.commands
			.send(ClientCommand::Post(ClientMessage::Init(endpoint.into())))
			.map_err(|_| ProxyError::ServiceStopped)
	}

	pub fn status(&self) -> ConnectionStatus {
		*self.status.borrow()
	}

	pub fn is_connected(&self) -> bool {
		self.status() == ConnectionStatus::Connected
	}

	/// Resolve with the runtime constants once the worker reported it is ready.
	pub async fn wait_ready(&self) -> Result<RuntimeConstants> {
		let mut consts = self.consts.clone();
		let mut status = self.status.clone();
		loop {
			if let Some(consts) = consts.borrow().clone() {
				return Ok(consts)
			}
			select! {
				changed = consts.changed() => changed.map_err(|_| ProxyError::ServiceStopped)?,
				changed = status.changed() => {
					changed.map_err(|_| ProxyError::ServiceStopped)?;
					if *status.borrow() == ConnectionStatus::Disconnected {
						return Err(ProxyError::NotConnected)
					}
				}
			}
		}
	}

	fn issue(&self, message: ClientMessage, id: CorrelationId, responder: Responder) -> Result<()> {
		self.commands
			.send(ClientCommand::Call { message, id, responder })
			.map_err(|_| ProxyError::ServiceStopped)
	}

	async fn request(&self, id: CorrelationId, message: ClientMessage) -> Result<Value> {
		let (sender, receiver) = oneshot::channel();
		self.issue(message, id, Responder::Once(sender))?;
		receiver.await.map_err(|_| ProxyError::ServiceStopped)?
	}

	fn stream(&self, id: CorrelationId, message: ClientMessage) -> Result<Subscription> {
		let (sender, receiver) = mpsc::unbounded_channel();
		self.issue(message, id, Responder::Stream(sender))?;
		Ok(Subscription { id, inner: UnboundedReceiverStream::new(receiver) })
	}

	/// Single call against a read surface. Dropping the future discards the answer.
	pub async fn call(&self, kind: ApiKind, path: ApiPath, params: Vec<Value>) -> Result<Value> {
		if kind == ApiKind::Tx {
			return Err(ProxyError::RemoteCallFailed(
				"transactions are created with create_transaction".to_owned(),
			))
		}
		let id = CorrelationId::new();
		let message =
			ClientMessage::Query(ClientQueryMessage { id, kind, path, params, subscribe: false });
		self.request(id, message).await
	}

	pub async fn query(&self, path: ApiPath, params: Vec<Value>) -> Result<Value> {
		self.call(ApiKind::Query, path, params).await
	}

	pub async fn derive(&self, path: ApiPath, params: Vec<Value>) -> Result<Value> {
		self.call(ApiKind::Derive, path, params).await
	}

	pub async fn rpc(&self, path: ApiPath, params: Vec<Value>) -> Result<Value> {
		self.call(ApiKind::Rpc, path, params).await
	}

	/// Stream updates of a read surface entry until the worker completes it.
	pub fn subscribe(
		&self,
		kind: ApiKind,
		path: ApiPath,
		params: Vec<Value>,
	) -> Result<Subscription> {
		if kind == ApiKind::Tx {
			return Err(ProxyError::RemoteCallFailed("transactions cannot be subscribed".to_owned()))
		}
		let id = CorrelationId::new();
		self.stream(
			id,
			ClientMessage::Query(ClientQueryMessage { id, kind, path, params, subscribe: true }),
		)
	}

	/// Create a transaction object on the worker.
	pub async fn create_transaction(
		&self,
		path: ApiPath,
		params: Vec<Value>,
	) -> Result<TransactionHandle> {
		let id = CorrelationId::new();
		let description =
			self.request(id, ClientMessage::Tx(ClientTxMessage { id, path, params })).await?;
		Ok(TransactionHandle { client: self.clone(), id, description })
	}
}

/// Updates of a subscription, ends after the worker completes it.
pub struct Subscription {
	id: CorrelationId,
	inner: UnboundedReceiverStream<Result<Value>>,
}

impl Subscription {
	pub fn id(&self) -> CorrelationId {
		self.id
	}
}

impl Stream for Subscription {
	type Item = Result<Value>;

	fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
		Pin::new(&mut self.inner).poll_next(cx)
	}
}

/// Client side reference to a transaction object held by the worker.
#[derive(Clone)]
pub struct TransactionHandle {
	client: ProxyClient,
	id: CorrelationId,
	description: Value,
}

impl TransactionHandle {
	pub fn id(&self) -> CorrelationId {
		self.id
	}

	pub fn description(&self) -> &Value {
		&self.description
	}

	fn message(&self, id: CorrelationId, method: TransactionMethod, signer: AccountId) -> ClientMessage {
		ClientMessage::Proxy(ClientProxyMessage { id, target: self.id, method, signer })
	}

	/// Estimated fees when signed by `signer`.
	pub async fn payment_info(&self, signer: AccountId) -> Result<Value> {
		let id = CorrelationId::new();
		self.client
			.request(id, self.message(id, TransactionMethod::PaymentInfo, signer))
			.await
	}

	/// Sign, submit and follow the inclusion of the transaction.
	pub fn sign_and_send(
		&self,
		signer: AccountId,
	) -> Result<impl Stream<Item = Result<TransactionStatus>> + Send + Unpin + 'static> {
		let id = CorrelationId::new();
		let statuses = self.client.stream(id, self.message(id, TransactionMethod::SignAndSend, signer))?;
		Ok(statuses.map(|update| {
			update.and_then(|value| {
				serde_json::from_value(value).map_err(|e| ProxyError::InvalidResponse(e.to_string()))
			})
		}))
	}
}
