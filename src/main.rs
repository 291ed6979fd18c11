use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::error::Error;
use std::path::{Path, PathBuf};

use mirrorsync::config::{Config, ConfigOverrides};
use mirrorsync::engine::SyncEngine;
use mirrorsync::logging::{self, TracingLogger};
use mirrorsync::scheduler::Scheduler;
use mirrorsync::validation::Validator;

fn cli() -> Command {
	Command::new("mirrorsync")
		.version(env!("CARGO_PKG_VERSION"))
		.about("One-way periodic directory mirroring")
		.arg(Arg::new("source").value_name("SOURCE").help("Source directory"))
		.arg(Arg::new("replica").value_name("REPLICA").help("Replica directory"))
		.arg(
			Arg::new("interval")
				.value_name("INTERVAL")
				.help("Seconds between synchronization passes")
				.value_parser(value_parser!(u64)),
		)
		.arg(Arg::new("log_file").value_name("LOG_FILE").help("Log file (appended)"))
		.arg(
			Arg::new("config")
				.short('c')
				.long("config")
				.value_name("PATH")
				.help("Config file (.toml or JSON5)"),
		)
		.arg(
			Arg::new("once")
				.long("once")
				.action(ArgAction::SetTrue)
				.help("Run a single pass and exit"),
		)
		.arg(
			Arg::new("max_depth")
				.long("max-depth")
				.value_name("N")
				.help("Maximum directory nesting depth")
				.value_parser(value_parser!(usize)),
		)
		.arg(
			Arg::new("log_level")
				.long("log-level")
				.value_name("LEVEL")
				.help("trace, debug, info, warn or error"),
		)
}

fn overrides(matches: &ArgMatches) -> ConfigOverrides {
	ConfigOverrides {
		source: matches.get_one::<String>("source").map(PathBuf::from),
		replica: matches.get_one::<String>("replica").map(PathBuf::from),
		interval_secs: matches.get_one::<u64>("interval").copied(),
		log_file: matches.get_one::<String>("log_file").map(PathBuf::from),
		log_level: matches.get_one::<String>("log_level").cloned(),
		max_depth: matches.get_one::<usize>("max_depth").copied(),
		once: matches.get_flag("once"),
	}
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
	let matches = cli().get_matches();

	let base = match matches.get_one::<String>("config") {
		Some(path) => Config::load(Path::new(path))?,
		None => Config::default(),
	};
	let config = base.merge(overrides(&matches));
	config.validate()?;

	logging::init(&config.log_level, config.log_file.as_deref())?;
	logging::info!(
		"Mirroring {} -> {} every {}s",
		config.source.display(),
		config.replica.display(),
		config.interval_secs
	);

	let engine = SyncEngine::new(Box::new(TracingLogger)).with_max_depth(config.max_depth);
	let summary = Scheduler::new(engine, config.source.clone(), config.replica.clone(), config.interval())
		.max_passes(if config.once { Some(1) } else { None })
		.run()
		.await;

	logging::info!(
		"Stopped after {} passes ({} failed, {} actions)",
		summary.passes,
		summary.failed_passes,
		summary.actions
	);

	if config.once && summary.failed_passes > 0 {
		return Err("synchronization pass failed".into());
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_cli_positionals() {
		let matches = cli().get_matches_from(["mirrorsync", "src", "dst", "10", "sync.log"]);
		let o = overrides(&matches);
		assert_eq!(o.source, Some(PathBuf::from("src")));
		assert_eq!(o.replica, Some(PathBuf::from("dst")));
		assert_eq!(o.interval_secs, Some(10));
		assert_eq!(o.log_file, Some(PathBuf::from("sync.log")));
		assert!(!o.once);
	}

	#[test]
	fn test_cli_rejects_non_numeric_interval() {
		let result = cli().try_get_matches_from(["mirrorsync", "src", "dst", "often"]);
		assert!(result.is_err());
	}

	#[test]
	fn test_cli_flags() {
		let matches = cli().get_matches_from([
			"mirrorsync",
			"--once",
			"--max-depth",
			"8",
			"--log-level",
			"debug",
			"src",
			"dst",
		]);
		let o = overrides(&matches);
		assert!(o.once);
		assert_eq!(o.max_depth, Some(8));
		assert_eq!(o.log_level.as_deref(), Some("debug"));
		assert_eq!(o.interval_secs, None);
	}

	#[test]
	fn test_cli_verify() {
		cli().debug_assert();
	}
}

// vim: ts=4
