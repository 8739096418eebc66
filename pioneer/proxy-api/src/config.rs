use std::time::Duration;

/// Client facade configuration.
#[derive(Clone, Debug)]
pub struct ProxyConfig {
	/// Reject calls left unanswered for longer than this. `None` keeps them until the worker
	/// answers, the connection drops or the caller loses interest.
	pub pending_call_timeout: Option<Duration>,
	/// How often the pending call table is swept.
	pub sweep_interval: Duration,
}

impl Default for ProxyConfig {
	fn default() -> Self {
		Self { pending_call_timeout: None, sweep_interval: Duration::from_secs(1) }
	}
}

/// Chain connection configuration.
#[derive(Clone, Debug)]
pub struct ConnectionConfig {
	/// Interval between health checks, also the reconnect interval once disconnected.
	pub heartbeat_interval: Duration,
	/// JSON-RPC namespace of the gateway serving `query`, `derive` and `tx` calls.
	pub gateway_namespace: String,
}

impl Default for ConnectionConfig {
	fn default() -> Self {
		Self { heartbeat_interval: Duration::from_secs(5), gateway_namespace: "pioneer".to_owned() }
	}
}
