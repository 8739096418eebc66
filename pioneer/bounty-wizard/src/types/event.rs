use pioneer_macros::IntoEvent;
use serde::{
	Deserialize,
	Serialize,
};

use super::{
	AccountId,
	CreateBountyCall,
	TransactionEvent,
	WizardStep,
};

/// Outputs of a wizard transition, handled by the driver.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Event {
	StepChanged(StepChanged),
	RequirementsCheckRequested(RequirementsCheckRequested),
	SubmitTransaction(SubmitTransaction),
	TransactionSucceeded(TransactionSucceeded),
	TransactionFailed(TransactionFailed),
	TransactionCanceled(TransactionCanceled),
}

impl Event {
	pub fn type_name(&self) -> &'static str {
		match self {
			Event::StepChanged(_) => "StepChanged",
			Event::RequirementsCheckRequested(_) => "RequirementsCheckRequested",
			Event::SubmitTransaction(_) => "SubmitTransaction",
			Event::TransactionSucceeded(_) => "TransactionSucceeded",
			Event::TransactionFailed(_) => "TransactionFailed",
			Event::TransactionCanceled(_) => "TransactionCanceled",
		}
	}
}

#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq, IntoEvent)]
pub struct StepChanged {
	pub from: WizardStep,
	pub to: WizardStep,
}

/// The active identity has to be checked before the transaction step.
#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq, IntoEvent)]
pub struct RequirementsCheckRequested {}

/// The call is ready to be signed by `signer` and submitted.
#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq, IntoEvent)]
pub struct SubmitTransaction {
	pub call: CreateBountyCall,
	pub signer: AccountId,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, IntoEvent)]
pub struct TransactionSucceeded {
	pub events: Vec<TransactionEvent>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, IntoEvent)]
pub struct TransactionFailed {
	pub reason: String,
	pub events: Vec<TransactionEvent>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq, IntoEvent)]
pub struct TransactionCanceled {}
