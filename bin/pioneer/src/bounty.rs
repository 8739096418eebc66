use std::{
	fs,
	path::Path,
};

use async_trait::async_trait;
use pioneer_bounty_wizard::{
	errors::WizardError,
	machine::validators::ValidationBounds,
	service::{
		BountyWizard,
		MembershipProvider,
		ProxySubmitter,
		WizardOutcome,
	},
	types::{
		AccountId,
		FieldValue,
		Member,
		TokenAmount,
	},
};
use pioneer_primitives::{
	constants::BOUNTY_SECTION,
	deserializers::u256_from_value,
	types::ApiPath,
};
use pioneer_proxy_api::{
	client::ProxyClient,
	messages::RuntimeConstants,
};
use serde_json::Value;
use tracing::{
	debug,
	info,
};

/// Acts as the creator found in the draft, signing with the given account.
struct DraftMembership {
	member: Option<Member>,
}

#[async_trait]
impl MembershipProvider for DraftMembership {
	async fn active_member(&self) -> Option<Member> {
		self.member.clone()
	}
}

/// Read a JSON array of `{"field", "value"}` entries.
pub fn load_draft(path: &Path) -> Result<Vec<FieldValue>, String> {
	let content = fs::read_to_string(path)
		.map_err(|e| format!("Could not read {}: {}", path.display(), e))?;
	serde_json::from_str(&content).map_err(|e| format!("Invalid draft {}: {}", path.display(), e))
}

async fn fetch_transferable(client: &ProxyClient, account: &AccountId) -> Result<TokenAmount, String> {
	let path = ApiPath::new("balances", "all");
	let balances = client
		.derive(path, vec![Value::String(account.clone())])
		.await
		.map_err(|e| format!("Could not fetch balance of {}: {}", account, e))?;
	balances
		.get("availableBalance")
		.and_then(u256_from_value)
		.ok_or_else(|| format!("Node returned no available balance for {}", account))
}

/// Walk the wizard through every step using the draft values and submit the resulting call.
pub async fn create_bounty(
	client: ProxyClient,
	consts: &RuntimeConstants,
	fields: Vec<FieldValue>,
	signer: AccountId,
	transferable: Option<TokenAmount>,
) -> Result<WizardOutcome, String> {
	let transferable = match transferable {
		Some(amount) => amount,
		None => fetch_transferable(&client, &signer).await?,
	};
	let bounds = ValidationBounds::from_constants(consts, Some(transferable));
	debug!(message = "Validation bounds", bounds = ?bounds);

	let member = fields.iter().find_map(|value| match value {
		FieldValue::Creator(member) =>
			Some(Member { controller_account: signer.clone(), ..member.clone() }),
		_ => None,
	});
	let mut wizard =
		BountyWizard::new(bounds, DraftMembership { member }, ProxySubmitter::new(client));

	while !wizard.step().is_terminal() {
		let step = wizard.step();
		for value in fields.iter().filter(|value| value.owner() == step) {
			wizard.set_field(value.clone()).await.map_err(|e| e.to_string())?;
		}

		if !wizard.is_next_step_valid() {
			let reason = match wizard.validate_step() {
				Err(e) => e.to_string(),
				Ok(()) => "unknown reason".to_owned(),
			};
			return Err(format!("Step {} is incomplete: {}", step, reason))
		}

		info!(message = "Step complete", step = %step);
		wizard.next().await.map_err(|e| e.to_string())?;

		if wizard.awaiting_identity() {
			return Err("No creator in the draft to sign with".to_owned())
		}
	}

	wizard.outcome().ok_or_else(|| "Wizard stopped without an outcome".to_owned())
}

/// Human readable summary of a finished wizard.
pub fn describe(outcome: WizardOutcome) -> Result<String, WizardError> {
	match outcome {
		WizardOutcome::Success(events) => {
			let created = events
				.iter()
				.find(|event| event.section == BOUNTY_SECTION && event.method == "BountyCreated")
				.map(|event| event.data.to_string());
			Ok(match created {
				Some(data) => format!("Bounty created: {}", data),
				None => format!("Bounty created ({} events)", events.len()),
			})
		},
		WizardOutcome::Error { reason, .. } => Err(WizardError::TransactionRejected(reason)),
		WizardOutcome::Canceled => Err(WizardError::TransactionCanceled),
	}
}
