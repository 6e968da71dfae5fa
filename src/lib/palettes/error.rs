use std::fmt::Write;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaletteError {
	#[error("The loaded palette is empty")]
	Empty,
	#[error("The palette contains more than 256 colors")]
	TooManyColors,
	#[error("Invalid data at byte {position:#X}: {msg}")]
	InvalidBinaryData { position: usize, msg: String },
	#[error("Invalid data in line {line}: {msg}")]
	InvalidTextLine { line: usize, msg: String },
	#[error("Invalid JSON array item at index {index}: {msg}")]
	InvalidJsonEntry { index: usize, msg: String },
	#[error("json error: {0}")]
	Json(#[from] serde_json::Error),
	#[error("io error: {0}")]
	IoErr(#[from] std::io::Error),
	#[error(transparent)]
	Load(#[from] PaletteLoadError),
}

/// One format's failed attempt at reading a file during fallback scanning.
#[derive(Clone, Debug, PartialEq)]
pub struct FormatFailure {
	pub format: String,
	pub detail: String,
}

/// Raised when a file matched no format by name and every readable format failed on it.
#[derive(Error, Debug)]
#[error("Could not load palette from {path}:\n{}", format_error_log(.failures))]
pub struct PaletteLoadError {
	pub path: String,
	pub failures: Vec<FormatFailure>,
}

impl PaletteLoadError {
	pub fn error_log(&self) -> String {
		format_error_log(&self.failures)
	}
}

fn format_error_log(failures: &[FormatFailure]) -> String {
	let mut log = String::new();
	for failure in failures {
		// writing into a String can't fail
		let _ = writeln!(log, "Failed to load palette as {}:", failure.format);
		let _ = writeln!(log, "{}", failure.detail);
	}
	log
}
