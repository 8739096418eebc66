use std::marker::PhantomData;

use serde::{
	de::DeserializeOwned,
	Serialize,
};
use tokio::sync::mpsc::{
	self,
	UnboundedReceiver,
	UnboundedSender,
};
use tracing::warn;

use crate::{
	errors::MessageError,
	messages::{
		ClientMessage,
		Validate,
		WorkerMessage,
	},
};

/// Serialized message as it crosses the isolation boundary.
pub type Frame = String;

/// Encode a message into a frame.
pub fn encode<M: Serialize>(message: &M) -> Result<Frame, MessageError> {
	serde_json::to_string(message).map_err(MessageError::Encode)
}

/// Decode and validate a frame.
pub fn decode<M: DeserializeOwned + Validate>(frame: &str) -> Result<M, MessageError> {
	let message: M = serde_json::from_str(frame).map_err(MessageError::Decode)?;
	message.validate()?;
	Ok(message)
}

/// Sending half for messages of type `M`.
pub struct MessageSender<M> {
	inner: UnboundedSender<Frame>,
	_marker: PhantomData<fn(M)>,
}

impl<M> Clone for MessageSender<M> {
	fn clone(&self) -> Self {
		Self { inner: self.inner.clone(), _marker: PhantomData }
	}
}

impl<M: Serialize> MessageSender<M> {
	pub fn post(&self, message: &M) -> Result<(), MessageError> {
		let frame = encode(message)?;
		self.post_frame(frame)
	}

	pub(crate) fn post_frame(&self, frame: Frame) -> Result<(), MessageError> {
		self.inner.send(frame).map_err(|_| MessageError::ChannelClosed)
	}

	pub fn is_closed(&self) -> bool {
		self.inner.is_closed()
	}
}

/// Receiving half for messages of type `M`.
pub struct MessageReceiver<M> {
	inner: UnboundedReceiver<Frame>,
	_marker: PhantomData<fn() -> M>,
}

impl<M: DeserializeOwned + Validate> MessageReceiver<M> {
	/// Wait for the next well formed message. Frames failing to decode or validate are dropped.
	///
	/// Returns `None` once every sender is gone.
	pub async fn recv(&mut self) -> Option<M> {
		loop {
			let frame = self.inner.recv().await?;
			match decode(&frame) {
				Ok(message) => return Some(message),
				Err(e) => {
					warn!(message = "Dropping malformed frame", error = format!("{}", e));
				},
			}
		}
	}
}

/// Create a sender/receiver pair for a single direction.
fn unidirectional<M>() -> (MessageSender<M>, MessageReceiver<M>) {
	let (sender, receiver) = mpsc::unbounded_channel();
	(
		MessageSender { inner: sender, _marker: PhantomData },
		MessageReceiver { inner: receiver, _marker: PhantomData },
	)
}

/// The client context's view of the channel.
pub struct ClientEndpoint {
	pub sender: MessageSender<ClientMessage>,
	pub receiver: MessageReceiver<WorkerMessage>,
}

/// The worker context's view of the channel.
pub struct WorkerEndpoint {
	pub sender: MessageSender<WorkerMessage>,
	pub receiver: MessageReceiver<ClientMessage>,
}

/// Create a connected pair of endpoints. Frames are delivered in send order per direction.
pub fn channel() -> (ClientEndpoint, WorkerEndpoint) {
	let (client_sender, worker_receiver) = unidirectional();
	let (worker_sender, client_receiver) = unidirectional();
	(
		ClientEndpoint { sender: client_sender, receiver: client_receiver },
		WorkerEndpoint { sender: worker_sender, receiver: worker_receiver },
	)
}
