use std::process;

use futures::StreamExt;
use pioneer_proxy_api::client::ProxyClient;
use pioneer_primitives::types::{
	ApiKind,
	ApiPath,
};
use serde_json::Value;
use structopt::StructOpt;
use tracing::info;

use crate::cli::{
	Command,
	Opt,
};

mod bounty;
mod cli;
mod logging;
mod proxy;

#[tokio::main]
async fn main() {
	let cli = Opt::from_args();

	let _guard = match logging::init(&cli.log_config) {
		Ok(guard) => guard,
		Err(e) => {
			eprintln!("Error initializing logging: {}", e);
			process::exit(1);
		},
	};

	// Parameters and drafts are checked before connecting.
	let draft = match &cli.cmd {
		Command::CreateBounty { file, .. } => match bounty::load_draft(file) {
			Ok(fields) => fields,
			Err(e) => {
				eprintln!("{}", e);
				process::exit(1);
			},
		},
		_ => vec![],
	};
	let params = match &cli.cmd {
		Command::Call { params: Some(params), .. } => match parse_params(params) {
			Ok(params) => params,
			Err(e) => {
				eprintln!("{}", e);
				process::exit(1);
			},
		},
		_ => vec![],
	};

	info!(message = "Starting proxy", endpoint = cli.endpoint.as_str());
	let (client, consts) = match proxy::start(&cli.endpoint, &cli.proxy_config).await {
		Ok(result) => result,
		Err(e) => {
			eprintln!("{}", e);
			process::exit(1);
		},
	};

	match cli.cmd {
		Command::Consts => match serde_json::to_string_pretty(&consts) {
			Ok(consts) => println!("{}", consts),
			Err(e) => {
				eprintln!("Could not print constants: {}", e);
				process::exit(1);
			},
		},
		Command::Call { kind, path, subscribe, .. } => {
			if let Err(e) = call(client, kind, path, params, subscribe).await {
				eprintln!("{}", e);
				process::exit(1);
			}
		},
		Command::CreateBounty { signer, transferable, .. } => {
			let outcome =
				match bounty::create_bounty(client, &consts, draft, signer, transferable).await {
					Ok(outcome) => outcome,
					Err(e) => {
						eprintln!("Error creating bounty: {}", e);
						process::exit(1);
					},
				};
			match bounty::describe(outcome) {
				Ok(summary) => println!("{}", summary),
				Err(e) => {
					eprintln!("{}", e);
					process::exit(1);
				},
			}
		},
	}
}

fn parse_params(params: &str) -> Result<Vec<Value>, String> {
	match serde_json::from_str(params) {
		Ok(Value::Array(params)) => Ok(params),
		Ok(param) => Ok(vec![param]),
		Err(e) => Err(format!("Invalid params: {}", e)),
	}
}

async fn call(
	client: ProxyClient,
	kind: ApiKind,
	path: ApiPath,
	params: Vec<Value>,
	subscribe: bool,
) -> Result<(), String> {
	if !subscribe {
		let result = client.call(kind, path, params).await.map_err(|e| e.to_string())?;
		println!("{}", result);
		return Ok(())
	}

	let mut updates = client.subscribe(kind, path, params).map_err(|e| e.to_string())?;
	while let Some(update) = updates.next().await {
		println!("{}", update.map_err(|e| e.to_string())?);
	}
	Ok(())
}
