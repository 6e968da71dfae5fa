use std::fmt::{Debug, Formatter};

use log::{debug, info, warn};

use crate::palettes::color::Color;
use crate::palettes::error::{FormatFailure, PaletteError, PaletteLoadError};
use crate::palettes::file::PaletteFile;
use crate::palettes::format::{FormatResolver, PaletteSaver};

/// The built-in palette: white, black and four grays, then each hue followed by a lighter tint.
/// The order is the swatch layout.
pub const DEFAULT_COLORS: [[u8; 3]; 34] = [
	[255, 255, 255], [0, 0, 0],
	[160, 160, 160], [128, 128, 128],
	[64, 64, 64], [48, 48, 48],
	[255, 0, 0], [255, 127, 127],
	[255, 106, 0], [255, 178, 127],
	[255, 216, 0], [255, 233, 127],
	[182, 255, 0], [218, 255, 127],
	[76, 255, 0], [165, 255, 127],
	[0, 255, 33], [127, 255, 142],
	[0, 255, 144], [127, 255, 197],
	[0, 255, 255], [127, 255, 255],
	[0, 148, 255], [127, 201, 255],
	[0, 38, 255], [127, 146, 255],
	[72, 0, 255], [161, 127, 255],
	[178, 0, 255], [214, 127, 255],
	[255, 0, 220], [255, 127, 237],
	[255, 0, 110], [255, 127, 182],
];

/// Identifies a change callback registered with [`Palette::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

type ChangeCallback = Box<dyn FnMut(&[Color])>;

#[derive(Default)]
struct Observers {
	next_id: u64,
	callbacks: Vec<(Subscription, ChangeCallback)>,
}

impl Observers {
	fn add(&mut self, callback: ChangeCallback) -> Subscription {
		let subscription = Subscription(self.next_id);
		self.next_id += 1;
		self.callbacks.push((subscription, callback));
		subscription
	}

	fn remove(&mut self, subscription: Subscription) -> bool {
		let before = self.callbacks.len();
		self.callbacks.retain(|(s, _)| *s != subscription);
		self.callbacks.len() != before
	}

	fn notify(&mut self, colors: &[Color]) {
		for (_, callback) in self.callbacks.iter_mut() {
			callback(colors);
		}
	}
}

/// An ordered list of colors shown as swatches.
///
/// Every successful mutation notifies all subscribers exactly once, after the new
/// contents are in place. Saving never notifies.
#[derive(Default)]
pub struct Palette {
	colors: Vec<Color>,
	observers: Observers,
}

impl Palette {
	/// Creates an empty palette. Callers are expected to populate it right away.
	pub fn new() -> Self {
		Self::default()
	}

	pub fn get_default() -> Self {
		let mut pal = Self::new();
		pal.load_default();
		pal
	}

	pub fn colors(&self) -> &[Color] {
		&self.colors
	}

	pub fn len(&self) -> usize {
		self.colors.len()
	}

	pub fn is_empty(&self) -> bool {
		self.colors.is_empty()
	}

	pub fn get(&self, index: usize) -> Option<Color> {
		self.colors.get(index).copied()
	}

	pub fn iter(&self) -> impl Iterator<Item = &Color> {
		self.colors.iter()
	}

	/// Registers `callback` to be called with the new contents after every change.
	pub fn subscribe<F: FnMut(&[Color]) + 'static>(&mut self, callback: F) -> Subscription {
		self.observers.add(Box::new(callback))
	}

	pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
		self.observers.remove(subscription)
	}

	pub fn subscriber_count(&self) -> usize {
		self.observers.callbacks.len()
	}

	fn palette_changed(&mut self) {
		let Self { colors, observers } = self;
		observers.notify(colors);
	}

	/// Replaces the color at `index`.
	///
	/// # Panics
	/// If `index` is out of bounds.
	pub fn set_color(&mut self, index: usize, value: Color) {
		let len = self.colors.len();
		assert!(index < len, "palette index {index} out of range for {len} colors");

		self.colors[index] = value;
		self.palette_changed();
	}

	/// Grows the palette with white entries or cuts entries off the end.
	///
	/// # Panics
	/// If the palette can't hold `new_size` entries.
	pub fn resize(&mut self, new_size: usize) {
		let len = self.colors.len();

		if new_size > len {
			if let Err(e) = self.colors.try_reserve_exact(new_size - len) {
				panic!("can't resize palette from {len} to {new_size} colors: {e}");
			}
			self.colors.resize(new_size, Color::WHITE);
		} else {
			self.colors.truncate(new_size);
		}

		self.colors.shrink_to_fit();
		self.palette_changed();
	}

	pub fn load_default(&mut self) {
		self.colors.clear();
		self.colors.extend(DEFAULT_COLORS.iter().map(|&c| Color::from(c)));
		self.colors.shrink_to_fit();

		self.palette_changed();
	}

	/// Loads colors from `file`, picking the format by file name or, if no format claims
	/// the name, trying every readable format in order.
	///
	/// On failure the palette is left untouched.
	pub fn load<R: FormatResolver + ?Sized>(&mut self, formats: &R, file: &dyn PaletteFile) -> Result<(), PaletteError> {
		let loaded_colors = load_colors(formats, file)?;

		self.colors = loaded_colors;
		self.colors.shrink_to_fit();
		self.palette_changed();
		Ok(())
	}

	pub fn save(&self, file: &dyn PaletteFile, saver: &dyn PaletteSaver) -> Result<(), PaletteError> {
		saver.save(&self.colors, file)?;
		info!("saved {} colors to {}", self.colors.len(), file.display_name());
		Ok(())
	}
}

fn load_colors<R: FormatResolver + ?Sized>(formats: &R, file: &dyn PaletteFile) -> Result<Vec<Color>, PaletteError> {
	let display_name = file.display_name();

	if let Some(format) = formats.format_by_filename(&display_name) {
		if let Some(loader) = format.loader() {
			debug!("loading {display_name} as {}", format.name());
			return match loader.load(file)? {
				Some(colors) if !colors.is_empty() => Ok(colors),
				_ => Err(PaletteError::Empty),
			};
		}
	}

	let mut failures = Vec::new();

	// not a recognized extension, so attempt all formats
	for format in formats.formats().iter().filter(|f| !f.is_write_only()) {
		let Some(loader) = format.loader() else {
			continue;
		};

		debug!("trying to load {display_name} as {}", format.name());
		match loader.load(file) {
			Ok(Some(colors)) if !colors.is_empty() => {
				info!("loaded {display_name} as {}", format.name());
				return Ok(colors);
			}
			Ok(_) => debug!("{} found no colors in {display_name}", format.name()),
			Err(e) => {
				warn!("failed to load {display_name} as {}: {e}", format.name());
				failures.push(FormatFailure {
					format: format.name().to_string(),
					detail: e.to_string(),
				});
			}
		}
	}

	Err(PaletteError::Load(PaletteLoadError {
		path: file.parse_name(),
		failures,
	}))
}

impl Debug for Palette {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Palette")
			.field("colors", &self.colors)
			.field("subscribers", &self.observers.callbacks.len())
			.finish()
	}
}
