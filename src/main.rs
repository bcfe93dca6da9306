use albayan::ui::cli::{Cli, Commands, SearchArgs};
use albayan::{Config, Granularity, Navigator, Quran, ReaderTui, SearchConfig, SearchEngine};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(&cli)?;

    match cli.command {
        Some(Commands::Read { by, unit, ayah }) => handle_read(&config, by, unit, ayah),
        Some(Commands::Search { query, options, limit }) => {
            handle_search(&config, &query, &options, limit)
        }
        Some(Commands::Units { by }) => handle_units(&config, by),
        Some(Commands::Info { ayah }) => handle_info(&config, ayah),
        Some(Commands::Check) => handle_check(&config),
        None => handle_interactive(&config),
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let config = Config::new(cli.base_dir.as_ref().map(PathBuf::from))?;
    Ok(match &cli.dataset {
        Some(path) => config.with_dataset(PathBuf::from(path)),
        None => config,
    })
}

fn load_quran(config: &Config) -> Result<Arc<Quran>> {
    if !config.is_initialized() {
        anyhow::bail!(
            "No verse dataset found at {:?}. Pass --dataset or place quran.json in {:?} \
             (see `albayan --help` for the file format).",
            config.dataset_path,
            config.base_dir
        );
    }
    let quran = Quran::load(&config.dataset_path)
        .with_context(|| format!("Failed to load {:?}", config.dataset_path))?;
    Ok(Arc::new(quran))
}

fn handle_read(config: &Config, by: Granularity, unit: Option<u32>, ayah: Option<u32>) -> Result<()> {
    let quran = load_quran(config)?;
    let mut navigator = Navigator::new(quran, by)?;

    let rendered = match ayah {
        Some(ayah) => navigator.by_ayah_number(ayah)?,
        None => navigator.goto(by, unit.unwrap_or(1))?,
    };

    println!("{} ({} {})", rendered.label, by, rendered.unit_number);
    println!();
    println!("{}", rendered.text);
    Ok(())
}

fn handle_search(config: &Config, query: &str, options: &SearchArgs, limit: Option<usize>) -> Result<()> {
    let quran = load_quran(config)?;
    let unit_count = quran.index.unit_count(options.by);
    let engine = SearchEngine::new(quran);

    let search_config = SearchConfig {
        ignore_diacritics: options.ignore_diacritics,
        ignore_hamza_variants: options.ignore_hamza,
        whole_word: options.whole_word,
        granularity: options.by,
        range_from: options.from.unwrap_or(1),
        range_to: options.to.unwrap_or(unit_count),
    };

    println!("Searching for: \"{}\"", query);
    let results = engine.search(query, &search_config)?;
    if results.is_empty() {
        println!("\nNo results found.");
        return Ok(());
    }

    println!("\nFound {} results:", results.len());
    let shown = limit.unwrap_or(results.len());
    for result in results.iter().take(shown) {
        println!(
            "\n{} - {} (#{})",
            result.surah_name, result.number_in_surah, result.absolute_verse_number
        );
        println!("   {}", result.text);
    }
    if shown < results.len() {
        println!("\n... {} more", results.len() - shown);
    }
    Ok(())
}

fn handle_units(config: &Config, by: Granularity) -> Result<()> {
    let quran = load_quran(config)?;
    for unit in quran.index.units(by) {
        println!(
            "{:>4}  {:<20} ayat {}-{} ({} ayat)",
            unit.unit_number,
            unit.label,
            unit.first_absolute_verse,
            unit.last_absolute_verse,
            unit.verse_count()
        );
    }
    Ok(())
}

fn handle_info(config: &Config, ayah: u32) -> Result<()> {
    let quran = load_quran(config)?;
    let verse = quran.verses.get(ayah)?;

    println!("{} - ayah {} (#{})", verse.surah_name, verse.number_in_surah, verse.absolute_number);
    println!("{}", verse.text);
    println!();
    for granularity in Granularity::ALL {
        let unit_number = quran.index.unit_for_verse(granularity, ayah)?;
        let (first, last) = quran.index.range_of_unit(granularity, unit_number)?;
        println!(
            "  {:<8} {:>4}  {} (ayat {}-{})",
            granularity.to_string(),
            unit_number,
            quran.index.label_of_unit(granularity, unit_number)?,
            first,
            last
        );
    }
    Ok(())
}

fn handle_check(config: &Config) -> Result<()> {
    println!("Checking dataset: {:?}", config.dataset_path);
    let quran = load_quran(config)?;

    println!("✓ {} ayat", quran.verses.len());
    for granularity in Granularity::ALL {
        println!("✓ {} {} units", quran.index.unit_count(granularity), granularity);
    }
    println!("\nDataset is consistent.");
    Ok(())
}

fn handle_interactive(config: &Config) -> Result<()> {
    let quran = load_quran(config)?;
    let mut tui = ReaderTui::new(quran, None)?;
    tui.run()?;

    let position = tui.last_position()?;
    println!(
        "Stopped at ayah {} ({} {})",
        position.absolute_verse_number, position.granularity, position.unit_number
    );
    Ok(())
}
