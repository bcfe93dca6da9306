use crate::core::error::{Error, Result};
use crate::data::verses::{Verse, VerseStore, TOTAL_VERSES};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// The partitioning scheme used for cursor movement and search ranges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Page,
    Surah,
    Quarter,
    Hizb,
    Juz,
}

impl Granularity {
    pub const ALL: [Granularity; 5] = [
        Granularity::Page,
        Granularity::Surah,
        Granularity::Quarter,
        Granularity::Hizb,
        Granularity::Juz,
    ];

    /// Number of units a complete dataset has in this partition
    pub fn expected_units(self) -> u32 {
        match self {
            Granularity::Page => 604,
            Granularity::Surah => 114,
            Granularity::Quarter => 240,
            Granularity::Hizb => 60,
            Granularity::Juz => 30,
        }
    }

    /// Unit number of `verse` in this partition
    pub fn unit_of(self, verse: &Verse) -> u32 {
        match self {
            Granularity::Page => verse.page,
            Granularity::Surah => verse.surah_id,
            Granularity::Quarter => verse.quarter,
            Granularity::Hizb => verse.hizb,
            Granularity::Juz => verse.juz,
        }
    }

    /// Arabic noun used in unit labels
    pub fn arabic_name(self) -> &'static str {
        match self {
            Granularity::Page => "الصفحة",
            Granularity::Surah => "السورة",
            Granularity::Quarter => "الربع",
            Granularity::Hizb => "الحزب",
            Granularity::Juz => "الجزء",
        }
    }

    /// Numeric code used by the desktop shell's position records
    pub fn code(self) -> u8 {
        match self {
            Granularity::Page => 0,
            Granularity::Surah => 1,
            Granularity::Quarter => 2,
            Granularity::Hizb => 3,
            Granularity::Juz => 4,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.code() == code)
    }

    fn key(self) -> &'static str {
        match self {
            Granularity::Page => "page",
            Granularity::Surah => "surah",
            Granularity::Quarter => "quarter",
            Granularity::Hizb => "hizb",
            Granularity::Juz => "juz",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Granularity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|g| g.key() == lowered)
            .ok_or_else(|| {
                Error::Config(format!(
                    "Unknown granularity '{}' (expected page, surah, quarter, hizb or juz)",
                    s
                ))
            })
    }
}

/// One unit of a partition: an inclusive range of absolute verses
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GranularityUnit {
    pub granularity: Granularity,
    pub unit_number: u32,
    pub first_absolute_verse: u32,
    pub last_absolute_verse: u32,
    pub label: String,
}

impl GranularityUnit {
    pub fn contains(&self, absolute_number: u32) -> bool {
        (self.first_absolute_verse..=self.last_absolute_verse).contains(&absolute_number)
    }

    pub fn verse_count(&self) -> u32 {
        self.last_absolute_verse - self.first_absolute_verse + 1
    }
}

/// Units of one granularity, ordered by unit number
#[derive(Debug, Clone)]
struct Table {
    granularity: Granularity,
    units: Vec<GranularityUnit>,
}

impl Table {
    fn build(granularity: Granularity, store: &VerseStore) -> Result<Self> {
        let mut units: Vec<GranularityUnit> = Vec::with_capacity(granularity.expected_units() as usize);

        for verse in store.iter() {
            let unit_number = granularity.unit_of(verse);
            if let Some(current) = units.last_mut().filter(|u| u.unit_number == unit_number) {
                if granularity == Granularity::Surah {
                    check_surah_continuity(current, verse)?;
                }
                current.last_absolute_verse = verse.absolute_number;
                continue;
            }

            let expected = units.last().map_or(1, |unit| unit.unit_number + 1);
            if unit_number != expected {
                return Err(Error::DataCorruption(format!(
                    "Ayah {} belongs to {} {} but {} {} was expected",
                    verse.absolute_number, granularity, unit_number, granularity, expected
                )));
            }
            if granularity == Granularity::Surah && verse.number_in_surah != 1 {
                return Err(Error::DataCorruption(format!(
                    "Surah {} starts at ayah number {}",
                    unit_number, verse.number_in_surah
                )));
            }
            units.push(GranularityUnit {
                granularity,
                unit_number,
                first_absolute_verse: verse.absolute_number,
                last_absolute_verse: verse.absolute_number,
                label: label_for(granularity, unit_number, verse),
            });
        }

        if units.len() as u32 != granularity.expected_units() {
            return Err(Error::DataCorruption(format!(
                "Expected {} {} units, found {}",
                granularity.expected_units(),
                granularity,
                units.len()
            )));
        }

        debug!(%granularity, units = units.len(), "Built granularity table");
        Ok(Self { granularity, units })
    }

    fn unit(&self, unit_number: u32) -> Result<&GranularityUnit> {
        if unit_number == 0 || unit_number as usize > self.units.len() {
            return Err(Error::out_of_range(
                self.granularity.key(),
                unit_number,
                self.units.len() as u32,
            ));
        }
        Ok(&self.units[unit_number as usize - 1])
    }

    fn unit_for_verse(&self, absolute_number: u32) -> Result<u32> {
        if absolute_number == 0 || absolute_number > TOTAL_VERSES {
            return Err(Error::out_of_range("ayah", absolute_number, TOTAL_VERSES));
        }
        let idx = self
            .units
            .partition_point(|unit| unit.first_absolute_verse <= absolute_number);
        Ok(self.units[idx - 1].unit_number)
    }
}

fn check_surah_continuity(current: &GranularityUnit, verse: &Verse) -> Result<()> {
    let expected = verse.absolute_number - current.first_absolute_verse + 1;
    if verse.number_in_surah != expected {
        return Err(Error::DataCorruption(format!(
            "Ayah {} is numbered {} in surah {}, expected {}",
            verse.absolute_number, verse.number_in_surah, current.unit_number, expected
        )));
    }
    if verse.surah_name != current.label {
        return Err(Error::DataCorruption(format!(
            "Surah {} changes name at ayah {}",
            current.unit_number, verse.absolute_number
        )));
    }
    Ok(())
}

fn label_for(granularity: Granularity, unit_number: u32, first: &Verse) -> String {
    match granularity {
        Granularity::Surah => first.surah_name.clone(),
        _ => format!("{} {}", granularity.arabic_name(), unit_number),
    }
}

/// The five partitions of the verse sequence
#[derive(Debug, Clone)]
pub struct GranularityIndex {
    tables: [Table; 5],
}

impl GranularityIndex {
    /// Build every table, failing on any gap or overlap in the dataset
    pub fn build(store: &VerseStore) -> Result<Self> {
        Ok(Self {
            tables: [
                Table::build(Granularity::Page, store)?,
                Table::build(Granularity::Surah, store)?,
                Table::build(Granularity::Quarter, store)?,
                Table::build(Granularity::Hizb, store)?,
                Table::build(Granularity::Juz, store)?,
            ],
        })
    }

    fn table(&self, granularity: Granularity) -> &Table {
        &self.tables[granularity.code() as usize]
    }

    pub fn unit_count(&self, granularity: Granularity) -> u32 {
        self.table(granularity).units.len() as u32
    }

    /// The unit containing `absolute_number`, by binary search
    pub fn unit_for_verse(&self, granularity: Granularity, absolute_number: u32) -> Result<u32> {
        self.table(granularity).unit_for_verse(absolute_number)
    }

    /// Inclusive absolute-verse range of a unit
    pub fn range_of_unit(&self, granularity: Granularity, unit_number: u32) -> Result<(u32, u32)> {
        let unit = self.table(granularity).unit(unit_number)?;
        Ok((unit.first_absolute_verse, unit.last_absolute_verse))
    }

    pub fn label_of_unit(&self, granularity: Granularity, unit_number: u32) -> Result<&str> {
        Ok(&self.table(granularity).unit(unit_number)?.label)
    }

    pub fn unit(&self, granularity: Granularity, unit_number: u32) -> Result<&GranularityUnit> {
        self.table(granularity).unit(unit_number)
    }

    pub fn units(&self, granularity: Granularity) -> &[GranularityUnit] {
        &self.table(granularity).units
    }
}
