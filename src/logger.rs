use colored::Colorize;
use log::{Level, LevelFilter, Log, Metadata, Record};

struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
	fn enabled(&self, metadata: &Metadata) -> bool {
		metadata.level() <= log::max_level()
	}

	fn log(&self, record: &Record) {
		if !self.enabled(record.metadata()) {
			return;
		}

		let level = match record.level() {
			Level::Error => "ERROR".red(),
			Level::Warn => "WARN".yellow(),
			Level::Info => "INFO".green(),
			Level::Debug => "DEBUG".blue(),
			Level::Trace => "TRACE".dimmed(),
		};
		eprintln!("{level}: {}", record.args());
	}

	fn flush(&self) {}
}

pub(crate) fn init(debug: bool) {
	let level = if debug { LevelFilter::Debug } else { LevelFilter::Warn };

	// only fails if a logger was already installed
	if log::set_logger(&LOGGER).is_ok() {
		log::set_max_level(level);
	}
}
