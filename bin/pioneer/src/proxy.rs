use std::{
	sync::Arc,
	time::Duration,
};

use pioneer_proxy_api::{
	chain::JsonRpcChain,
	channel,
	client::ProxyClient,
	config::{
		ConnectionConfig,
		ProxyConfig,
	},
	messages::RuntimeConstants,
	worker::ProxyWorker,
};
use tracing::info;
use url::Url;

use crate::cli::CliProxyConfig;

/// Spawn the worker and the client dispatcher, then wait until the node is reachable.
pub async fn start(
	endpoint: &Url,
	config: &CliProxyConfig,
) -> Result<(ProxyClient, RuntimeConstants), String> {
	let (client_endpoint, worker_endpoint) = channel::channel();

	let chain = Arc::new(JsonRpcChain::new(ConnectionConfig {
		heartbeat_interval: Duration::from_secs(config.heartbeat_interval),
		gateway_namespace: config.gateway_namespace.clone(),
	}));
	let worker = ProxyWorker::new(chain, worker_endpoint);

	let (client, service) = ProxyClient::new(
		client_endpoint,
		ProxyConfig {
			pending_call_timeout: config.pending_call_timeout.map(Duration::from_secs),
			..ProxyConfig::default()
		},
	);

	tokio::spawn(worker.run());
	tokio::spawn(service.run());

	client.init(endpoint.as_str()).map_err(|e| format!("Could not start proxy: {}", e))?;
	let consts = client
		.wait_ready()
		.await
		.map_err(|e| format!("Could not connect to {}: {}", endpoint, e))?;

	info!(message = "Connected", endpoint = endpoint.as_str());
	Ok((client, consts))
}
