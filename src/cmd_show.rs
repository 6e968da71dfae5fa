use anyhow::Result;
use palettes_rs::palettes::format::PaletteFormatManager;
use serde::Serialize;

use crate::commands::ShowArgs;
use crate::common::{load_palette, print_swatches};

#[derive(Serialize)]
struct ColorEntry {
	index: usize,
	hex: String,
	r: u8,
	g: u8,
	b: u8,
	a: u8,
}

pub(crate) fn palette_show(args: &ShowArgs) -> Result<()> {
	let formats = PaletteFormatManager::new();
	let pal = load_palette(&formats, &args.input)?;

	if args.json {
		let entries = pal.iter().enumerate().map(|(index, c)| {
			let [r, g, b, a] = c.to_rgba8();
			ColorEntry { index, hex: c.to_string(), r, g, b, a }
		}).collect::<Vec<ColorEntry>>();

		println!("{}", serde_json::to_string_pretty(&entries)?);
		return Ok(());
	}

	println!("{} ({} colors)", args.input.display(), pal.len());
	print_swatches(&pal);
	Ok(())
}
