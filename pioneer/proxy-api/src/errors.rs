use thiserror::Error;

use crate::messages::{
	ErrorKind,
	ErrorPayload,
};

/// Errors surfaced to callers of the client facade.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum ProxyError {
	#[error("Not connected to the chain node")]
	NotConnected,
	#[error("Remote call failed: `{0}`")]
	RemoteCallFailed(String),
	#[error("Call was not answered in time")]
	TimedOut,
	#[error("Proxy service stopped")]
	ServiceStopped,
	#[error("Unexpected response: `{0}`")]
	InvalidResponse(String),
}

impl From<ErrorPayload> for ProxyError {
	fn from(payload: ErrorPayload) -> Self {
		match payload.kind {
			ErrorKind::NotConnected => ProxyError::NotConnected,
			ErrorKind::RemoteCallFailed => ProxyError::RemoteCallFailed(payload.message),
		}
	}
}

/// Errors raised while moving frames across the channel.
#[derive(Error, Debug)]
pub enum MessageError {
	#[error("Could not encode message: `{0}`")]
	Encode(serde_json::Error),
	#[error("Could not decode message: `{0}`")]
	Decode(serde_json::Error),
	#[error("Invalid payload: `{0}`")]
	InvalidPayload(String),
	#[error("Channel closed")]
	ChannelClosed,
}

/// Errors raised by a chain connection.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum ChainError {
	#[error("Not connected")]
	NotConnected,
	#[error("Connection error: `{0}`")]
	Connection(String),
	#[error("Call error: `{0}`")]
	Call(String),
}

impl From<web3::Error> for ChainError {
	fn from(e: web3::Error) -> Self {
		match e {
			web3::Error::Unreachable | web3::Error::Transport(_) => Self::Connection(e.to_string()),
			e => Self::Call(e.to_string()),
		}
	}
}

impl From<ChainError> for ErrorPayload {
	fn from(e: ChainError) -> Self {
		match e {
			ChainError::NotConnected => ErrorPayload::not_connected(),
			e => ErrorPayload::remote_call_failed(e.to_string()),
		}
	}
}
