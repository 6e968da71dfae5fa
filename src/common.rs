use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use colored::Colorize;
use palettes_rs::palettes::color::Color;
use palettes_rs::palettes::file::PaletteFile;
use palettes_rs::palettes::format::PaletteFormatManager;
use palettes_rs::palettes::palette::Palette;
use palettes_rs::palettes::MAX_PALETTE_COLORS;

pub(crate) fn load_palette(formats: &PaletteFormatManager, path: &Path) -> Result<Palette> {
	let mut pal = Palette::new();
	pal.load(formats, &path.to_path_buf())
		.with_context(|| format!("Couldn't load {}", path.display()))?;
	Ok(pal)
}

pub(crate) fn save_palette(formats: &PaletteFormatManager, pal: &Palette, path: &Path) -> Result<()> {
	let file = path.to_path_buf();
	let saver = formats.saver_by_filename(&file.display_name())
		.ok_or_else(|| anyhow!("No writable palette format matches {}", path.display()))?;

	pal.save(&file, saver)
		.with_context(|| format!("Couldn't save {}", path.display()))
}

/// Rejects sizes none of the palette formats can store.
pub(crate) fn check_palette_size(size: usize) -> Result<()> {
	if size > MAX_PALETTE_COLORS {
		bail!("A palette can hold at most {MAX_PALETTE_COLORS} colors, {size} were requested");
	}
	Ok(())
}

/// Parses an `INDEX=COLOR` pair as given to `edit --set`.
pub(crate) fn parse_index_color(s: &str) -> Result<(usize, Color)> {
	let (index, color) = s.split_once('=')
		.ok_or_else(|| anyhow!("\"{s}\" is not in the INDEX=COLOR format"))?;

	let index = index.trim().parse::<usize>()
		.with_context(|| format!("\"{index}\" is not a valid palette index"))?;
	let color = color.parse::<Color>()?;

	Ok((index, color))
}

pub(crate) fn print_swatches(pal: &Palette) {
	for (i, c) in pal.iter().enumerate() {
		let [r, g, b, a] = c.to_rgba8();
		let swatch = "      ".on_truecolor(r, g, b);
		if a == 255 {
			println!("{i:>3} {swatch} {c}");
		} else {
			println!("{i:>3} {swatch} {c} (alpha {a})");
		}
	}
}

pub(crate) fn output_path(input: &Path, output: &Option<PathBuf>) -> PathBuf {
	output.clone().unwrap_or_else(|| input.to_path_buf())
}
