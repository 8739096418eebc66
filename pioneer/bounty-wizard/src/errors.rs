use std::{
	error,
	fmt,
};

use pioneer_proxy_api::errors::ProxyError;
use thiserror::Error;

/// The state transition error type.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct StateTransitionError {
	pub msg: String,
}

impl fmt::Display for StateTransitionError {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}", self.msg)
	}
}

impl error::Error for StateTransitionError {
	fn source(&self) -> Option<&(dyn error::Error + 'static)> {
		None
	}
}

impl From<String> for StateTransitionError {
	fn from(msg: String) -> Self {
		StateTransitionError { msg }
	}
}

/// Errors surfaced by the wizard and its collaborators.
#[derive(Error, Debug)]
pub enum WizardError {
	#[error("Invalid value for `{0}`")]
	ValidationFailed(&'static str),
	#[error("Transaction rejected: `{0}`")]
	TransactionRejected(String),
	#[error("Transaction canceled")]
	TransactionCanceled,
	#[error(transparent)]
	Proxy(#[from] ProxyError),
	#[error("Could not encode call: `{0}`")]
	Encode(#[from] serde_json::Error),
	#[error(transparent)]
	StateTransition(#[from] StateTransitionError),
}
