use std::fs;
use std::path::PathBuf;

use palettes_rs::palettes::color::Color;
use palettes_rs::palettes::error::PaletteError;
use palettes_rs::palettes::file::MemoryFile;
use palettes_rs::palettes::format::{FormatResolver, PaletteFormatManager, PaletteLoader};
use palettes_rs::palettes::palette::Palette;
use palettes_rs::palettes::{ActFormat, ColFormat, GplFormat, HexFormat, JsonFormat, PalFormat};

const GPL_PALETTE: &str = "GIMP Palette
Name: Test
Columns: 4
# a comment
 30  61  84\tUntitled
226 237 245\tUntitled
0 0 0
";

const PAL_PALETTE: &str = "JASC-PAL\r\n0100\r\n3\r\n30 61 84\r\n226 237 245\r\n0 0 0\r\n";

const HEX_PALETTE: &str = "# exported palette
1E3D54
#E2EDF5

0x000000
";

const JSON_PALETTE: &str = r##"["#1E3D54", "e2edf5", "0x000000"]"##;

fn expected_hex() -> Vec<String> {
	vec!["#1E3D54".to_string(), "#E2EDF5".to_string(), "#000000".to_string()]
}

fn load(name: &str, data: impl Into<Vec<u8>>) -> Result<Palette, PaletteError> {
	let mut pal = Palette::new();
	pal.load(&PaletteFormatManager::new(), &MemoryFile::new(name, data))?;
	Ok(pal)
}

fn hex_strings(pal: &Palette) -> Vec<String> {
	pal.iter().map(|c| c.to_string()).collect()
}

#[test]
fn text_formats_parse() {
	let files = [
		("palette.gpl", GPL_PALETTE),
		("palette.pal", PAL_PALETTE),
		("palette.hex", HEX_PALETTE),
		("palette.json", JSON_PALETTE),
	];

	for (name, contents) in files {
		println!("Testing {name}…");
		let pal = load(name, contents).unwrap();
		assert_eq!(hex_strings(&pal), expected_hex());
	}
}

#[test]
fn unknown_extension_falls_back_to_content() {
	let pal = load("palette.txt", GPL_PALETTE).unwrap();
	assert_eq!(hex_strings(&pal), expected_hex());

	let pal = load("palette", JSON_PALETTE).unwrap();
	assert_eq!(hex_strings(&pal), expected_hex());
}

#[test]
fn garbage_reports_every_builtin_format() {
	let err = load("notes.txt", "hello world").unwrap_err();
	let PaletteError::Load(err) = err else {
		panic!("expected a load error");
	};

	let names = err.failures.iter().map(|f| f.format.as_str()).collect::<Vec<&str>>();
	assert_eq!(names, vec![
		"GIMP Palette",
		"JASC Palette",
		"Hex Palette",
		"JSON Palette",
		"Adobe Color Table",
		"Animator Pro Palette",
	]);
	assert_eq!(err.failures[0].detail, "Invalid data in line 1: Invalid magic sequence: \"hello world\"");
	assert_eq!(err.failures[2].detail, "Invalid data in line 1: Not a hexadecimal color value");
	assert!(err.error_log().contains("Failed to load palette as Animator Pro Palette:\nInvalid data at byte 0x4: Invalid magic sequence"));
}

#[test]
fn gpl_rgba_channels() {
	let contents = "GIMP Palette\nChannels: RGBA\n255 0 0 128 Half red\n0 0 255 255\n";
	let pal = load("alpha.gpl", contents).unwrap();

	assert_eq!(pal.colors()[0].to_rgba8(), [255, 0, 0, 128]);
	assert_eq!(pal.colors()[1].to_rgba8(), [0, 0, 255, 255]);
}

#[test]
fn gpl_broken() {
	let err = load("broken.gpl", "GIMP Palette\nName: x\n#\nbogus\n").unwrap_err();
	assert!(matches!(err, PaletteError::InvalidTextLine { line: 4, ref msg } if msg == "Malformed line"));

	let err = load("broken.gpl", "GIMP Palette\n300 0 0 Too red\n").unwrap_err();
	assert_eq!(err.to_string(), "Invalid data in line 2: Invalid red value");

	let err = load("broken.gpl", "JASC-PAL\n").unwrap_err();
	assert!(matches!(err, PaletteError::InvalidTextLine { line: 1, .. }));
}

#[test]
fn pal_broken() {
	let err = load("broken.pal", "JASC-PAL\n0100\n2\n1 2 3\nnope\n").unwrap_err();
	assert!(matches!(err, PaletteError::InvalidTextLine { line: 5, ref msg } if msg == "Malformed line"));

	let err = load("broken.pal", "JASC-PAL\n0200\n").unwrap_err();
	assert_eq!(err.to_string(), "Invalid data in line 2: Invalid version: \"0200\"");
}

#[test]
fn hex_broken() {
	let err = load("broken.hex", "FF0000\nxyz\n").unwrap_err();
	assert!(matches!(err, PaletteError::InvalidTextLine { line: 2, .. }));

	let too_many = "FFFFFF\n".repeat(257);
	assert!(matches!(load("big.hex", too_many).unwrap_err(), PaletteError::TooManyColors));
}

#[test]
fn hex_with_only_comments_is_empty() {
	let err = load("empty.hex", "# nothing here\n\n").unwrap_err();
	assert!(matches!(err, PaletteError::Empty));
}

#[test]
fn json_broken() {
	let err = load("broken.json", r##"["#1E3D54", "not a color"]"##).unwrap_err();
	assert_eq!(
		err.to_string(),
		"Invalid JSON array item at index 1: \"not a color\" is not a valid hexadecimal color value"
	);

	let err = load("broken.json", "{}").unwrap_err();
	assert!(matches!(err, PaletteError::Json(_)));
}

fn act_bytes(colors: &[[u8; 3]], footer: Option<u16>) -> Vec<u8> {
	let mut data = Vec::new();
	for i in 0..256 {
		data.extend_from_slice(&colors.get(i).copied().unwrap_or([0, 0, 0]));
	}
	if let Some(count) = footer {
		data.extend_from_slice(&count.to_be_bytes());
		data.extend_from_slice(&[0xFF, 0xFF]);
	}
	data
}

#[test]
fn act_parsing() {
	let pal = load("palette.act", act_bytes(&[[30, 61, 84], [226, 237, 245]], None)).unwrap();
	assert_eq!(pal.len(), 256);
	assert_eq!(pal.colors()[0].to_string(), "#1E3D54");
	assert_eq!(pal.colors()[1].to_string(), "#E2EDF5");

	let pal = load("palette.act", act_bytes(&[[30, 61, 84], [226, 237, 245]], Some(2))).unwrap();
	assert_eq!(hex_strings(&pal), vec!["#1E3D54".to_string(), "#E2EDF5".to_string()]);
}

#[test]
fn act_broken() {
	let err = load("broken.act", act_bytes(&[], Some(0xFFFF))).unwrap_err();
	assert_eq!(err.to_string(), "Invalid data at byte 0x300: Invalid footer value 0xFFFF");

	let err = load("short.act", vec![0_u8; 100]).unwrap_err();
	assert!(matches!(err, PaletteError::IoErr(_)));
}

#[test]
fn col_vga_and_pro() {
	let pal = load("vga.col", vec![63_u8; 768]).unwrap();
	assert_eq!(pal.len(), 256);
	assert!(pal.iter().all(|c| *c == Color::WHITE));

	let mut pro = Vec::new();
	pro.extend_from_slice(&14_u32.to_le_bytes());
	pro.extend_from_slice(&0xB123_u16.to_le_bytes());
	pro.extend_from_slice(&0_u16.to_le_bytes());
	pro.extend_from_slice(&[30, 61, 84, 226, 237, 245]);

	let pal = load("pro.col", pro).unwrap();
	assert_eq!(hex_strings(&pal), vec!["#1E3D54".to_string(), "#E2EDF5".to_string()]);
}

#[test]
fn col_broken() {
	let mut pro = Vec::new();
	pro.extend_from_slice(&11_u32.to_le_bytes());
	pro.extend_from_slice(&0xB124_u16.to_le_bytes());
	pro.extend_from_slice(&0_u16.to_le_bytes());
	pro.extend_from_slice(&[1, 2, 3]);

	let err = load("broken.col", pro).unwrap_err();
	assert_eq!(err.to_string(), "Invalid data at byte 0x4: Invalid magic sequence 0xB124");

	let err = ColFormat.load(&MemoryFile::new("tiny.col", vec![0_u8; 5])).unwrap_err();
	assert_eq!(err.to_string(), "Invalid data at byte 0x0: Not an Animator COL file");
}

#[test]
fn writers_are_read_back_by_their_format() {
	let manager = PaletteFormatManager::new();
	let mut original = Palette::get_default();
	original.set_color(3, Color::from_rgba8(10, 20, 30, 40));

	for name in ["out.gpl", "out.pal", "out.hex", "out.json", "out.act"] {
		println!("Testing {name}…");
		let file = MemoryFile::empty(name);
		original.save(&file, manager.saver_by_filename(name).unwrap()).unwrap();

		let mut pal = Palette::new();
		pal.load(&manager, &file).unwrap();

		let rgb = |p: &Palette| p.iter().map(|c| c.to_rgb8()).collect::<Vec<[u8; 3]>>();
		assert_eq!(rgb(&pal), rgb(&original));
	}
}

#[test]
fn alpha_survives_formats_that_store_it() {
	let manager = PaletteFormatManager::new();
	let mut original = Palette::get_default();
	original.set_color(0, Color::from_rgba8(1, 2, 3, 4));

	for name in ["out.gpl", "out.hex", "out.json"] {
		let file = MemoryFile::empty(name);
		original.save(&file, manager.saver_by_filename(name).unwrap()).unwrap();

		let mut pal = Palette::new();
		pal.load(&manager, &file).unwrap();
		assert_eq!(pal.colors()[0].to_rgba8(), [1, 2, 3, 4]);
	}
}

#[test]
fn gpl_writer_output() {
	let mut buf = Vec::new();
	GplFormat::write_colors(&[Color::WHITE, Color::BLACK], &mut buf).unwrap();
	assert_eq!(
		String::from_utf8(buf).unwrap(),
		"GIMP Palette\nName: Untitled\nColumns: 0\n#\n255 255 255\tUntitled\n  0   0   0\tUntitled\n"
	);
}

#[test]
fn simple_writer_output() {
	let colors = [Color::from(0x1E3D54), Color::from(0xE2EDF5)];

	let mut buf = Vec::new();
	HexFormat::write_colors(&colors, &mut buf).unwrap();
	assert_eq!(String::from_utf8(buf).unwrap(), "1E3D54\nE2EDF5\n");

	let mut buf = Vec::new();
	PalFormat::write_colors(&colors, &mut buf).unwrap();
	assert_eq!(String::from_utf8(buf).unwrap(), "JASC-PAL\r\n0100\r\n2\r\n30 61 84\r\n226 237 245\r\n");

	let json: Vec<String> = serde_json::from_slice(&JsonFormat::write_colors(&colors).unwrap()).unwrap();
	assert_eq!(json, vec!["#1E3D54".to_string(), "#E2EDF5".to_string()]);

	let mut buf = Vec::new();
	ActFormat::write_colors(&colors, &mut buf).unwrap();
	assert_eq!(buf.len(), 772);
	assert_eq!(&buf[768..], &[0, 2, 0xFF, 0xFF]);
}

#[test]
fn writers_reject_oversized_palettes() {
	let manager = PaletteFormatManager::new();
	let mut pal = Palette::get_default();
	pal.resize(300);

	for name in ["big.gpl", "big.pal", "big.hex", "big.json", "big.act"] {
		println!("Testing {name}…");
		let file = MemoryFile::empty(name);
		let err = pal.save(&file, manager.saver_by_filename(name).unwrap()).unwrap_err();

		assert!(matches!(err, PaletteError::TooManyColors));
		assert!(file.contents().is_empty());
	}

	// the largest palette a writer accepts is still readable
	pal.resize(256);
	for name in ["max.gpl", "max.pal", "max.hex", "max.json", "max.act"] {
		let file = MemoryFile::empty(name);
		pal.save(&file, manager.saver_by_filename(name).unwrap()).unwrap();

		let mut loaded = Palette::new();
		loaded.load(&manager, &file).unwrap();
		assert_eq!(loaded.len(), 256);
	}
}

#[test]
fn format_lookup() {
	let manager = PaletteFormatManager::new();

	assert_eq!(manager.format_by_filename("Palette.GPL").map(|f| f.name()), Some("GIMP Palette"));
	assert_eq!(manager.format_by_filename("colors.hex").map(|f| f.name()), Some("Hex Palette"));
	assert!(manager.format_by_filename("README").is_none());
	assert!(manager.format_by_filename("image.png").is_none());

	let col = manager.format_by_filename("x.col").unwrap();
	assert!(col.is_read_only());
	assert!(!col.is_write_only());
	assert!(manager.saver_by_filename("x.col").is_none());

	assert_eq!(manager.formats().len(), 6);
	assert_eq!(PaletteFormatManager::default().formats().len(), 6);
}

#[test]
fn path_round_trip() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("default.gpl");
	let manager = PaletteFormatManager::new();

	let original = Palette::get_default();
	original.save(&path, manager.saver_by_filename("default.gpl").unwrap()).unwrap();

	let mut pal = Palette::new();
	pal.load(&manager, &path).unwrap();
	assert_eq!(pal.colors(), original.colors());

	// the staging file is gone once the palette is in place
	assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn missing_path_is_io_error() {
	let dir = tempfile::tempdir().unwrap();
	let path: PathBuf = dir.path().join("missing.hex");

	let err = load_path(&path).unwrap_err();
	assert!(matches!(err, PaletteError::IoErr(ref e) if e.kind() == std::io::ErrorKind::NotFound));
}

fn load_path(path: &PathBuf) -> Result<Palette, PaletteError> {
	let mut pal = Palette::new();
	pal.load(&PaletteFormatManager::new(), path)?;
	Ok(pal)
}

#[cfg(unix)]
#[test]
fn saving_over_a_file_keeps_its_permissions() {
	use std::os::unix::fs::PermissionsExt;

	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("palette.hex");
	let manager = PaletteFormatManager::new();
	let saver = manager.saver_by_filename("palette.hex").unwrap();

	let mut pal = Palette::get_default();
	pal.save(&path, saver).unwrap();
	fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();

	pal.resize(3);
	pal.save(&path, saver).unwrap();

	let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
	assert_eq!(mode, 0o640);
	assert_eq!(load_path(&path).unwrap().len(), 3);
	assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}
