use anyhow::{bail, Result};
use log::debug;
use palettes_rs::palettes::format::PaletteFormatManager;

use crate::commands::EditArgs;
use crate::common::{check_palette_size, load_palette, output_path, parse_index_color, save_palette};

pub(crate) fn palette_edit(args: &EditArgs) -> Result<()> {
	if args.resize.is_none() && args.set.is_empty() {
		bail!("Nothing to do, specify --resize and/or --set");
	}

	if let Some(size) = args.resize {
		check_palette_size(size)?;
	}

	// parse everything up front so a typo doesn't leave a half-edited file behind
	let edits = args.set.iter()
		.map(|s| parse_index_color(s))
		.collect::<Result<Vec<_>>>()?;

	let formats = PaletteFormatManager::new();
	let mut pal = load_palette(&formats, &args.input)?;
	pal.subscribe(|colors| debug!("palette changed, now {} colors", colors.len()));

	if let Some(size) = args.resize {
		pal.resize(size);
	}

	for (index, color) in edits {
		if index >= pal.len() {
			bail!("Index {index} is out of range for a palette with {} colors", pal.len());
		}
		pal.set_color(index, color);
	}

	let output = output_path(&args.input, &args.output);
	save_palette(&formats, &pal, &output)?;

	println!("Saved {} colors.", pal.len());
	Ok(())
}
