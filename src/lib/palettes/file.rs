use std::cell::RefCell;
use std::fs;
use std::io;
use std::io::Write;
use std::path::PathBuf;

use tempfile::Builder;

/// A file a palette can be read from or written to.
pub trait PaletteFile {
	/// The name used for format matching, usually the file name with its extension.
	fn display_name(&self) -> String;
	/// The full location of the file, used in error messages.
	fn parse_name(&self) -> String;
	fn read(&self) -> io::Result<Vec<u8>>;
	fn write(&self, data: &[u8]) -> io::Result<()>;
}

impl PaletteFile for PathBuf {
	fn display_name(&self) -> String {
		self.file_name()
			.map(|n| n.to_string_lossy().into_owned())
			.unwrap_or_default()
	}

	fn parse_name(&self) -> String {
		fs::canonicalize(self)
			.unwrap_or_else(|_| self.clone())
			.display()
			.to_string()
	}

	fn read(&self) -> io::Result<Vec<u8>> {
		fs::read(self)
	}

	fn write(&self, data: &[u8]) -> io::Result<()> {
		// a new file has nothing to protect, and creating it directly keeps the umask's permissions
		let Ok(metadata) = fs::metadata(self) else {
			return fs::write(self, data);
		};

		let dir = match self.parent() {
			Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
			_ => PathBuf::from("."),
		};

		// stage the data next to the target so a failed write never leaves a truncated palette behind
		let mut temp_file = Builder::new()
			.prefix(".palette")
			.suffix(".tmp")
			.tempfile_in(dir)?;
		temp_file.write_all(data)?;
		temp_file.flush()?;
		temp_file.as_file().set_permissions(metadata.permissions())?;
		temp_file.persist(self).map_err(|e| e.error)?;

		Ok(())
	}
}

/// An in-memory named buffer.
#[derive(Debug, Default)]
pub struct MemoryFile {
	name: String,
	data: RefCell<Vec<u8>>,
}

impl MemoryFile {
	pub fn new<S: Into<String>>(name: S, data: impl Into<Vec<u8>>) -> Self {
		Self {
			name: name.into(),
			data: RefCell::new(data.into()),
		}
	}

	pub fn empty<S: Into<String>>(name: S) -> Self {
		Self::new(name, Vec::new())
	}

	pub fn contents(&self) -> Vec<u8> {
		self.data.borrow().clone()
	}

	pub fn contents_string(&self) -> String {
		String::from_utf8_lossy(&self.data.borrow()).into_owned()
	}
}

impl PaletteFile for MemoryFile {
	fn display_name(&self) -> String {
		self.name.clone()
	}

	fn parse_name(&self) -> String {
		format!("memory://{}", self.name)
	}

	fn read(&self) -> io::Result<Vec<u8>> {
		Ok(self.data.borrow().clone())
	}

	fn write(&self, data: &[u8]) -> io::Result<()> {
		*self.data.borrow_mut() = data.to_vec();
		Ok(())
	}
}
