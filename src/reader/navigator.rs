use crate::core::error::{Edge, Error, Result};
use crate::data::granularity::Granularity;
use crate::data::quran::Quran;
use crate::reader::render::RenderedUnit;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Navigator state: which partition is active and where in it we are
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub granularity: Granularity,
    pub unit_number: u32,
}

/// Identifies the ayah under a text offset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AyahInfo {
    pub surah_id: u32,
    pub absolute_number: u32,
    pub surah_name: String,
    pub number_in_surah: u32,
}

/// Reading position exchanged with whoever persists user data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastPosition {
    pub absolute_verse_number: u32,
    pub granularity: Granularity,
    pub unit_number: u32,
}

/// Cursor over one granularity plus the render of the current unit.
///
/// One navigator per document view; operations take `&mut self`, so a
/// navigator shared between threads needs external locking.
#[derive(Debug, Clone)]
pub struct Navigator {
    quran: Arc<Quran>,
    cursor: Cursor,
    current: RenderedUnit,
}

impl Navigator {
    /// Open a navigator on the first unit of `granularity`
    pub fn new(quran: Arc<Quran>, granularity: Granularity) -> Result<Self> {
        let current = RenderedUnit::render(&quran, granularity, 1)?;
        Ok(Self {
            quran,
            cursor: Cursor {
                granularity,
                unit_number: 1,
            },
            current,
        })
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn granularity(&self) -> Granularity {
        self.cursor.granularity
    }

    pub fn current(&self) -> &RenderedUnit {
        &self.current
    }

    pub fn max_unit_number(&self) -> u32 {
        self.quran.index.unit_count(self.cursor.granularity)
    }

    pub fn has_next(&self) -> bool {
        self.cursor.unit_number < self.max_unit_number()
    }

    pub fn has_previous(&self) -> bool {
        self.cursor.unit_number > 1
    }

    /// Move to a unit; the cursor is left untouched on failure
    pub fn goto(&mut self, granularity: Granularity, unit_number: u32) -> Result<&RenderedUnit> {
        let rendered = RenderedUnit::render(&self.quran, granularity, unit_number)?;
        debug!(%granularity, unit_number, "Navigated");
        self.cursor = Cursor {
            granularity,
            unit_number,
        };
        self.current = rendered;
        Ok(&self.current)
    }

    pub fn next(&mut self) -> Result<&RenderedUnit> {
        if !self.has_next() {
            return Err(Error::Boundary(Edge::Last));
        }
        self.goto(self.cursor.granularity, self.cursor.unit_number + 1)
    }

    pub fn previous(&mut self) -> Result<&RenderedUnit> {
        if !self.has_previous() {
            return Err(Error::Boundary(Edge::First));
        }
        self.goto(self.cursor.granularity, self.cursor.unit_number - 1)
    }

    /// Char offset where an ayah starts in the current render
    pub fn position_of_ayah(&self, absolute_number: u32) -> Result<usize> {
        self.current
            .span_of(absolute_number)
            .map(|span| span.start)
            .ok_or(Error::NotInCurrentUnit(absolute_number))
    }

    /// Go to the unit of the active granularity that contains an ayah
    pub fn by_ayah_number(&mut self, absolute_number: u32) -> Result<&RenderedUnit> {
        let granularity = self.cursor.granularity;
        let unit_number = self.quran.index.unit_for_verse(granularity, absolute_number)?;
        self.goto(granularity, unit_number)
    }

    /// The ayah whose line contains `offset` in the current render
    pub fn ayah_info(&self, offset: usize) -> Result<AyahInfo> {
        let span = self
            .current
            .span_at(offset)
            .ok_or(Error::NoAyahAtOffset(offset))?;
        let verse = self.quran.verses.get(span.absolute_number)?;
        Ok(AyahInfo {
            surah_id: verse.surah_id,
            absolute_number: verse.absolute_number,
            surah_name: verse.surah_name.clone(),
            number_in_surah: verse.number_in_surah,
        })
    }

    /// Change the active granularity while staying on `anchor` (or on the
    /// first ayah of the current unit when no anchor is given)
    pub fn switch_granularity(
        &mut self,
        granularity: Granularity,
        anchor: Option<u32>,
    ) -> Result<&RenderedUnit> {
        let anchor = self.resolve_anchor(anchor)?;
        let unit_number = self.quran.index.unit_for_verse(granularity, anchor)?;
        self.goto(granularity, unit_number)
    }

    /// Position record for the ayah the reader is on
    pub fn last_position(&self, anchor: Option<u32>) -> Result<LastPosition> {
        Ok(LastPosition {
            absolute_verse_number: self.resolve_anchor(anchor)?,
            granularity: self.cursor.granularity,
            unit_number: self.cursor.unit_number,
        })
    }

    /// Reopen a saved position. A record whose ayah no longer lies in the
    /// recorded unit is repaired from the ayah.
    pub fn restore(&mut self, position: &LastPosition) -> Result<&RenderedUnit> {
        let granularity = position.granularity;
        let index = &self.quran.index;
        let unit_number = match index.unit(granularity, position.unit_number) {
            Ok(unit) if unit.contains(position.absolute_verse_number) => unit.unit_number,
            recorded => match index.unit_for_verse(granularity, position.absolute_verse_number) {
                Ok(unit_number) => {
                    warn!(
                        ?position,
                        unit_number, "Saved position is stale, using the unit of its ayah"
                    );
                    unit_number
                }
                Err(_) => recorded?.unit_number,
            },
        };
        self.goto(granularity, unit_number)
    }

    fn resolve_anchor(&self, anchor: Option<u32>) -> Result<u32> {
        match anchor {
            Some(ayah) if self.current.span_of(ayah).is_some() => Ok(ayah),
            Some(ayah) => Err(Error::NotInCurrentUnit(ayah)),
            None => self
                .current
                .first_ayah()
                .ok_or(Error::NotInCurrentUnit(0)),
        }
    }
}
