use clap::Parser;
use clap::Subcommand;
use const_format::formatcp;
use std::path::PathBuf;

const GIT_HASH: &str = env!("GIT_HASH");
const GIT_BRANCH: &str = env!("GIT_BRANCH");
const GIT_VERSION: &str = env!("GIT_VERSION");
const BUILD_DATE: &str = env!("BUILD_DATE");

const CLAP_VERSION: &str = formatcp!("{GIT_VERSION} [{GIT_BRANCH}, {GIT_HASH}, {BUILD_DATE}]");

#[derive(Parser, Debug, Clone)]
#[command(version = CLAP_VERSION, about = "Inspects, converts, and edits color palette files")]
pub(crate) struct Cli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	#[arg(long, global = true, help = "Prints debug information about format detection.")]
	pub debug: bool,
}

#[derive(Parser, Debug, Clone)]
pub(crate) struct ShowArgs {
	#[arg(help = "The palette file.")]
	pub input: PathBuf,

	#[arg(long, help = "Prints the palette as JSON instead of swatches.")]
	pub json: bool,
}

#[derive(Parser, Debug, Clone)]
pub(crate) struct ConvertArgs {
	#[arg(help = "The input palette file.")]
	pub input: PathBuf,
	#[arg(help = "The output palette file. The format is chosen by extension.")]
	pub output: PathBuf,
}

#[derive(Parser, Debug, Clone)]
pub(crate) struct EditArgs {
	#[arg(help = "The palette file.")]
	pub input: PathBuf,
	#[arg(short, long, help = "The output file. Overwrites the input file if omitted.")]
	pub output: Option<PathBuf>,

	#[arg(short, long, help = "Resizes the palette to at most 256 colors, padding with white. Applied before --set.")]
	pub resize: Option<usize>,
	#[arg(short, long = "set", value_name = "INDEX=COLOR", help = "Replaces a single entry, e.g. 3=#FF8000. Can be repeated.")]
	pub set: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
pub(crate) struct DefaultArgs {
	#[arg(help = "Writes the default palette to this file instead of printing it.")]
	pub output: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum Commands {
	#[command(about = "Prints the colors of a palette file")]
	Show(ShowArgs),

	#[command(about = "Converts a palette file to another format")]
	Convert(ConvertArgs),

	#[command(about = "Resizes a palette or replaces single colors")]
	Edit(EditArgs),

	#[command(about = "Prints or saves the built-in default palette")]
	Default(DefaultArgs),

	#[command(about = "Lists the supported palette formats")]
	Formats,
}
