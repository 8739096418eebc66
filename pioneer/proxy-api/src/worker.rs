use std::{
	collections::HashMap,
	sync::Arc,
};

use futures::StreamExt;
use parking_lot::RwLock;
use pioneer_primitives::types::{
	AccountId,
	CorrelationId,
};
use tokio::{
	select,
	sync::{
		watch,
		Mutex,
	},
};
use tracing::{
	debug,
	error,
	info,
	trace,
	warn,
};

use crate::{
	chain::{
		ChainApi,
		Transaction,
	},
	channel::{
		MessageSender,
		WorkerEndpoint,
	},
	messages::{
		ClientMessage,
		ClientProxyMessage,
		ClientQueryMessage,
		ClientTxMessage,
		ErrorPayload,
		ResponseBody,
		TransactionMethod,
		WorkerInitPayload,
		WorkerMessage,
		WorkerResponse,
	},
};

/// Transaction objects held on behalf of the client, keyed by the id of the tx call creating them.
type TransactionRecord = Arc<RwLock<HashMap<CorrelationId, Arc<Mutex<Box<dyn Transaction>>>>>>;

/// Wraps a response into the worker message matching the request concern.
type Respond = fn(WorkerResponse) -> WorkerMessage;

/// Posts responses back to the client.
#[derive(Clone)]
struct Responder {
	sender: MessageSender<WorkerMessage>,
}

impl Responder {
	fn post(&self, message: WorkerMessage) {
		if let Err(e) = self.sender.post(&message) {
			error!(
				message = "Failed to post message to client",
				message_type = message.type_name(),
				error = format!("{}", e)
			);
		}
	}

	fn respond(&self, wrap: Respond, id: CorrelationId, result: ResponseBody) {
		self.post(wrap(WorkerResponse::new(id, result)))
	}

	fn error(&self, wrap: Respond, id: CorrelationId, payload: ErrorPayload) {
		self.respond(wrap, id, ResponseBody::Error(payload))
	}
}

/// Worker side of the proxy. Owns the chain connection and answers client requests.
pub struct ProxyWorker<C: ChainApi> {
	chain: Arc<C>,
	endpoint: WorkerEndpoint,
	transactions: TransactionRecord,
	connectivity: watch::Receiver<bool>,
}

impl<C: ChainApi> ProxyWorker<C> {
	pub fn new(chain: Arc<C>, endpoint: WorkerEndpoint) -> Self {
		let connectivity = chain.connectivity();
		Self { chain, endpoint, transactions: Arc::new(RwLock::new(HashMap::new())), connectivity }
	}

	fn responder(&self) -> Responder {
		Responder { sender: self.endpoint.sender.clone() }
	}

	fn is_connected(&self) -> bool {
		*self.connectivity.borrow()
	}

	/// Process client messages until the client side of the channel is closed, then tear the
	/// connection down.
	pub async fn run(mut self) {
		let mut connectivity = self.connectivity.clone();
		let mut watching = true;

		loop {
			select! {
				message = self.endpoint.receiver.recv() => match message {
					Some(message) => self.handle(message),
					None => break,
				},
				changed = connectivity.changed(), if watching => {
					if changed.is_err() {
						watching = false;
						continue;
					}
					let connected = *connectivity.borrow();
					debug!(message = "Connectivity changed", connected);
					self.responder().post(WorkerMessage::IsConnected(connected));
				}
			}
		}

		info!(message = "Client gone, shutting down worker");
		self.transactions.write().clear();
		self.chain.disconnect().await;
	}

	/// Dispatch a single client message. Every correlated request eventually gets exactly one
	/// final response.
	pub fn handle(&self, message: ClientMessage) {
		trace!(message = "Handling client message", message_type = message.type_name());
		match message {
			ClientMessage::Init(endpoint) => self.handle_init(endpoint),
			ClientMessage::Query(inner) => self.handle_query(inner),
			ClientMessage::Tx(inner) => self.handle_tx(inner),
			ClientMessage::Proxy(inner) => self.handle_proxy(inner),
		}
	}

	fn handle_init(&self, endpoint: String) {
		let chain = self.chain.clone();
		let responder = self.responder();
		tokio::spawn(async move {
			match chain.connect(&endpoint).await {
				Ok(consts) => {
					info!(message = "Chain API ready", endpoint = endpoint.as_str());
					responder.post(WorkerMessage::Init(WorkerInitPayload { consts }));
				},
				Err(e) => {
					error!(message = "Could not connect", error = format!("{}", e));
					responder.post(WorkerMessage::IsConnected(false));
				},
			}
		});
	}

	fn handle_query(&self, query: ClientQueryMessage) {
		let responder = self.responder();
		let wrap: Respond = WorkerMessage::Query;
		if !self.is_connected() {
			return responder.error(wrap, query.id, ErrorPayload::not_connected())
		}

		let chain = self.chain.clone();
		tokio::spawn(async move {
			let ClientQueryMessage { id, kind, path, params, subscribe } = query;
			if !subscribe {
				let result = match chain.call(kind, &path, params).await {
					Ok(value) => ResponseBody::Value(value),
					Err(e) => ResponseBody::Error(e.into()),
				};
				return responder.respond(wrap, id, result)
			}

			let mut updates = match chain.subscribe(kind, &path, params).await {
				Ok(updates) => updates,
				Err(e) => return responder.error(wrap, id, e.into()),
			};
			while let Some(update) = updates.next().await {
				match update {
					Ok(value) => responder.respond(wrap, id, ResponseBody::Next(value)),
					Err(e) => return responder.error(wrap, id, e.into()),
				}
				if responder.sender.is_closed() {
					return
				}
			}
			responder.respond(wrap, id, ResponseBody::Complete);
		});
	}

	fn handle_tx(&self, tx: ClientTxMessage) {
		let responder = self.responder();
		let wrap: Respond = WorkerMessage::Tx;
		if !self.is_connected() {
			return responder.error(wrap, tx.id, ErrorPayload::not_connected())
		}

		let chain = self.chain.clone();
		let transactions = self.transactions.clone();
		tokio::spawn(async move {
			let ClientTxMessage { id, path, params } = tx;
			match chain.create_transaction(&path, params).await {
				Ok(transaction) => {
					let description = transaction.describe();
					transactions.write().insert(id, Arc::new(Mutex::new(transaction)));
					debug!(message = "Transaction created", id = %id, path = %path);
					responder.respond(wrap, id, ResponseBody::Value(description));
				},
				Err(e) => responder.error(wrap, id, e.into()),
			}
		});
	}

	fn handle_proxy(&self, proxy: ClientProxyMessage) {
		let responder = self.responder();
		let wrap: Respond = WorkerMessage::Proxy;
		if !self.is_connected() {
			return responder.error(wrap, proxy.id, ErrorPayload::not_connected())
		}

		let transaction = match self.transactions.read().get(&proxy.target) {
			Some(transaction) => transaction.clone(),
			None => {
				warn!(message = "Proxy call for unknown transaction", target = %proxy.target);
				return responder.error(
					wrap,
					proxy.id,
					ErrorPayload::remote_call_failed("unknown transaction"),
				)
			},
		};

		let transactions = self.transactions.clone();
		tokio::spawn(async move {
			let ClientProxyMessage { id, target, method, signer } = proxy;
			// Calls on the same transaction run one at a time.
			let mut transaction = transaction.lock().await;

			match method {
				TransactionMethod::PaymentInfo => {
					let result = match transaction.payment_info(&signer).await {
						Ok(value) => ResponseBody::Value(value),
						Err(e) => ResponseBody::Error(e.into()),
					};
					responder.respond(wrap, id, result);
				},
				TransactionMethod::SignAndSend => {
					let result = follow_statuses(&mut **transaction, &signer, &responder, id).await;
					// Spent once submission ended, whatever the outcome.
					transactions.write().remove(&target);
					responder.respond(wrap, id, result);
				},
			}
		});
	}
}

/// Forward statuses of a submission as `next` items and return the final body.
async fn follow_statuses(
	transaction: &mut dyn Transaction,
	signer: &AccountId,
	responder: &Responder,
	id: CorrelationId,
) -> ResponseBody {
	let mut statuses = match transaction.sign_and_send(signer).await {
		Ok(statuses) => statuses,
		Err(e) => return ResponseBody::Error(e.into()),
	};
	while let Some(status) = statuses.next().await {
		let status = match status {
			Ok(status) => status,
			Err(e) => return ResponseBody::Error(e.into()),
		};
		let terminal = status.is_terminal();
		let value = match serde_json::to_value(&status) {
			Ok(value) => value,
			Err(e) => return ResponseBody::Error(ErrorPayload::remote_call_failed(e.to_string())),
		};
		responder.respond(WorkerMessage::Proxy, id, ResponseBody::Next(value));
		if terminal {
			break
		}
	}
	ResponseBody::Complete
}
