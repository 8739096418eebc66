use std::{
	io,
	path::Path,
};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::cli::CliLogConfig;

/// Install the global subscriber. The returned guard flushes buffered lines when dropped and has
/// to be held until exit.
pub fn init(config: &CliLogConfig) -> Result<WorkerGuard, String> {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

	let (writer, guard) = match &config.log_file {
		Some(path) => {
			let file_name = path
				.file_name()
				.ok_or_else(|| format!("Invalid log file: {}", path.display()))?;
			let directory = path.parent().unwrap_or_else(|| Path::new("."));
			tracing_appender::non_blocking(tracing_appender::rolling::never(directory, file_name))
		},
		None => tracing_appender::non_blocking(io::stderr()),
	};

	let builder = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(writer)
		.with_ansi(config.log_file.is_none());
	if config.log_json {
		builder.json().init();
	} else {
		builder.init();
	}

	Ok(guard)
}
