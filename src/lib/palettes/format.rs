use std::fmt::{Debug, Formatter};
use std::path::Path;

use crate::palettes::color::Color;
use crate::palettes::error::PaletteError;
use crate::palettes::file::PaletteFile;
use crate::palettes::{ActFormat, ColFormat, GplFormat, HexFormat, JsonFormat, PalFormat};

pub trait PaletteLoader {
	/// Reads the colors stored in `file`.
	///
	/// `Ok(None)` means the file was readable but held no colors.
	fn load(&self, file: &dyn PaletteFile) -> Result<Option<Vec<Color>>, PaletteError>;
}

pub trait PaletteSaver {
	fn save(&self, colors: &[Color], file: &dyn PaletteFile) -> Result<(), PaletteError>;
}

/// A named palette file format with optional read and write support.
pub struct PaletteFormat {
	name: String,
	extensions: Vec<String>,
	loader: Option<Box<dyn PaletteLoader>>,
	saver: Option<Box<dyn PaletteSaver>>,
}

impl PaletteFormat {
	pub fn new<S: Into<String>>(
		name: S,
		extensions: &[&str],
		loader: Option<Box<dyn PaletteLoader>>,
		saver: Option<Box<dyn PaletteSaver>>,
	) -> Self {
		Self {
			name: name.into(),
			extensions: extensions.iter().map(|e| e.to_lowercase()).collect(),
			loader,
			saver,
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn extensions(&self) -> &[String] {
		&self.extensions
	}

	pub fn loader(&self) -> Option<&dyn PaletteLoader> {
		self.loader.as_deref()
	}

	pub fn saver(&self) -> Option<&dyn PaletteSaver> {
		self.saver.as_deref()
	}

	pub fn is_write_only(&self) -> bool {
		self.loader.is_none()
	}

	pub fn is_read_only(&self) -> bool {
		self.saver.is_none()
	}

	pub fn matches_extension(&self, ext: &str) -> bool {
		let ext = ext.to_lowercase();
		self.extensions.iter().any(|e| *e == ext)
	}
}

impl Debug for PaletteFormat {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("PaletteFormat")
			.field("name", &self.name)
			.field("extensions", &self.extensions)
			.field("readable", &self.loader.is_some())
			.field("writable", &self.saver.is_some())
			.finish()
	}
}

/// Finds the formats a palette file can be read with.
pub trait FormatResolver {
	fn format_by_filename(&self, filename: &str) -> Option<&PaletteFormat>;
	/// All registered formats, in registration order.
	fn formats(&self) -> &[PaletteFormat];
}

#[derive(Debug)]
pub struct PaletteFormatManager {
	formats: Vec<PaletteFormat>,
}

impl PaletteFormatManager {
	/// Creates a manager with all built-in formats registered.
	pub fn new() -> Self {
		let mut manager = Self::empty();
		manager.register(PaletteFormat::new("GIMP Palette", &["gpl"], Some(Box::new(GplFormat)), Some(Box::new(GplFormat))));
		manager.register(PaletteFormat::new("JASC Palette", &["pal"], Some(Box::new(PalFormat)), Some(Box::new(PalFormat))));
		manager.register(PaletteFormat::new("Hex Palette", &["hex"], Some(Box::new(HexFormat)), Some(Box::new(HexFormat))));
		manager.register(PaletteFormat::new("JSON Palette", &["json"], Some(Box::new(JsonFormat)), Some(Box::new(JsonFormat))));
		manager.register(PaletteFormat::new("Adobe Color Table", &["act"], Some(Box::new(ActFormat)), Some(Box::new(ActFormat))));
		manager.register(PaletteFormat::new("Animator Pro Palette", &["col"], Some(Box::new(ColFormat)), None));
		manager
	}

	pub fn empty() -> Self {
		Self { formats: Vec::new() }
	}

	pub fn register(&mut self, format: PaletteFormat) {
		self.formats.push(format);
	}

	pub fn saver_by_filename(&self, filename: &str) -> Option<&dyn PaletteSaver> {
		self.format_by_filename(filename)?.saver()
	}
}

impl Default for PaletteFormatManager {
	fn default() -> Self {
		Self::new()
	}
}

impl FormatResolver for PaletteFormatManager {
	fn format_by_filename(&self, filename: &str) -> Option<&PaletteFormat> {
		let ext = Path::new(filename).extension()?.to_str()?;
		self.formats.iter().find(|f| f.matches_extension(ext))
	}

	fn formats(&self) -> &[PaletteFormat] {
		&self.formats
	}
}
