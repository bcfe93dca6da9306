use crate::data::granularity::Granularity;
use clap::{Args, Parser, Subcommand};

/// Format of the verse dataset, shown at the end of `--help`
pub const DATASET_HELP: &str = "\
Verse dataset:
  The text is read from a JSON file, by default ~/.albayan/quran.json
  (override with --base-dir or --dataset). It must hold all 6236 ayat in
  order, each carrying its surah and its page, quarter, hizb and juz:

    {\"verses\": [
      {\"absolute_number\": 1, \"surah_id\": 1, \"surah_name\": \"الفاتحة\",
       \"number_in_surah\": 1, \"page\": 1, \"quarter\": 1, \"hizb\": 1,
       \"juz\": 1, \"text\": \"بِسْمِ ٱللَّهِ ٱلرَّحْمَٰنِ ٱلرَّحِيمِ\"},
      ...
    ]}

  Units must be contiguous: 604 pages, 114 surahs, 240 quarters, 60 hizbs
  and 30 juz. Run `albayan check` to validate a file.";

/// albayan - Quran reader with multi-granularity navigation and search
#[derive(Parser, Debug)]
#[command(name = "albayan")]
#[command(about = "Read and search the Quran by page, surah, quarter, hizb or juz", long_about = None)]
#[command(after_long_help = DATASET_HELP)]
#[command(version)]
#[command(subcommand_required = false)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to the verse dataset (default: <base-dir>/quran.json)
    #[arg(long, global = true)]
    pub dataset: Option<String>,

    /// Custom base directory (default: ~/.albayan)
    #[arg(long, global = true)]
    pub base_dir: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print one unit of the text
    Read {
        /// Partition to navigate by
        #[arg(short, long, default_value_t = Granularity::Surah)]
        by: Granularity,
        /// Unit number (defaults to 1)
        unit: Option<u32>,
        /// Open the unit containing this absolute ayah number instead
        #[arg(short, long, conflicts_with = "unit")]
        ayah: Option<u32>,
    },
    /// Search the text
    Search {
        /// Text to look for
        query: String,
        #[command(flatten)]
        options: SearchArgs,
        /// Maximum number of results to print
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// List the units of a partition
    Units {
        /// Partition to list
        #[arg(short, long, default_value_t = Granularity::Surah)]
        by: Granularity,
    },
    /// Show where an ayah sits in every partition
    Info {
        /// Absolute ayah number (1-6236)
        ayah: u32,
    },
    /// Validate the dataset (its format is described in --help)
    Check,
}

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Ignore vowel marks
    #[arg(short = 'd', long)]
    pub ignore_diacritics: bool,
    /// Treat all hamza forms as the same letter
    #[arg(short = 'z', long)]
    pub ignore_hamza: bool,
    /// Only match whole words
    #[arg(short, long)]
    pub whole_word: bool,
    /// Partition the range is given in
    #[arg(short, long, default_value_t = Granularity::Page)]
    pub by: Granularity,
    /// First unit to search (default: 1)
    #[arg(long)]
    pub from: Option<u32>,
    /// Last unit to search (default: last unit)
    #[arg(long)]
    pub to: Option<u32>,
}
