use std::path::PathBuf;

use pioneer_primitives::types::{
	ApiKind,
	ApiPath,
	TokenAmount,
};
use structopt::StructOpt;
use url::Url;

fn parse_amount(s: &str) -> Result<TokenAmount, String> {
	TokenAmount::from_dec_str(s).map_err(|e| format!("Invalid amount `{}`: {:?}", s, e))
}

#[derive(StructOpt, Debug)]
pub struct CliLogConfig {
	/// Log filter used when `RUST_LOG` is not set.
	#[structopt(long, default_value = "info")]
	pub log_level: String,

	/// Write logs to this file instead of stderr.
	#[structopt(long, parse(from_os_str))]
	pub log_file: Option<PathBuf>,

	/// Emit logs as JSON lines.
	#[structopt(long)]
	pub log_json: bool,
}

#[derive(StructOpt, Debug)]
pub struct CliProxyConfig {
	/// Reject calls left unanswered for this many seconds.
	#[structopt(long)]
	pub pending_call_timeout: Option<u64>,

	/// Seconds between connection health checks.
	#[structopt(long, default_value = "5")]
	pub heartbeat_interval: u64,

	/// JSON-RPC namespace serving the query, derive and tx surfaces.
	#[structopt(long, default_value = "pioneer")]
	pub gateway_namespace: String,
}

#[derive(StructOpt, Debug)]
#[structopt(name = "Pioneer command line client")]
pub struct Opt {
	/// Websocket endpoint of the chain node.
	#[structopt(short("e"), long, default_value = "ws://127.0.0.1:9944", takes_value = true)]
	pub endpoint: Url,

	#[structopt(flatten)]
	pub proxy_config: CliProxyConfig,

	#[structopt(flatten)]
	pub log_config: CliLogConfig,

	#[structopt(subcommand)]
	pub cmd: Command,
}

#[derive(StructOpt, Debug)]
pub enum Command {
	/// Print the runtime constants reported by the node.
	Consts,
	/// Run a single read call and print its result.
	Call {
		/// One of `query`, `derive` or `rpc`.
		kind: ApiKind,
		/// Dotted `section.method` path.
		path: ApiPath,
		/// JSON array of call parameters.
		params: Option<String>,
		/// Print updates until the node completes the subscription.
		#[structopt(long)]
		subscribe: bool,
	},
	/// Create a bounty from a file of wizard field values.
	CreateBounty {
		#[structopt(parse(from_os_str))]
		file: PathBuf,
		/// Account signing the call.
		#[structopt(short("s"), long)]
		signer: String,
		/// Transferable balance of the signer. Fetched from the node when missing.
		#[structopt(long, parse(try_from_str = parse_amount))]
		transferable: Option<TokenAmount>,
	},
}
