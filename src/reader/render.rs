use crate::core::error::Result;
use crate::data::granularity::Granularity;
use crate::data::quran::Quran;
use serde::Serialize;

/// Prefix of the decorative line shown before the first ayah of a surah
pub const SURAH_HEADING_PREFIX: &str = "سُورَةُ";

/// Where one ayah sits in a rendered unit, in char offsets.
/// `end` is the offset just past the ayah's last char (its line end).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AyahSpan {
    pub absolute_number: u32,
    pub start: usize,
    pub end: usize,
}

impl AyahSpan {
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset <= self.end
    }
}

/// Display text of one unit plus the ayah boundaries inside it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedUnit {
    pub granularity: Granularity,
    pub unit_number: u32,
    pub label: String,
    pub text: String,
    pub spans: Vec<AyahSpan>,
}

impl RenderedUnit {
    /// Render unit `unit_number` of `granularity`, one ayah per line
    pub fn render(quran: &Quran, granularity: Granularity, unit_number: u32) -> Result<Self> {
        let unit = quran.index.unit(granularity, unit_number)?;
        let verses = quran
            .verses
            .range(unit.first_absolute_verse, unit.last_absolute_verse)?;

        let mut builder = LineBuilder::default();
        let mut spans = Vec::with_capacity(verses.len());
        for verse in verses {
            if verse.number_in_surah == 1 {
                builder.push_line(&format!("{} {}", SURAH_HEADING_PREFIX, verse.surah_name));
            }
            let (start, end) = builder.push_line(&format!("{} ({})", verse.text, verse.number_in_surah));
            spans.push(AyahSpan {
                absolute_number: verse.absolute_number,
                start,
                end,
            });
        }

        Ok(Self {
            granularity,
            unit_number,
            label: unit.label.clone(),
            text: builder.text,
            spans,
        })
    }

    /// Span of an ayah, if it is part of this unit
    pub fn span_of(&self, absolute_number: u32) -> Option<&AyahSpan> {
        self.spans
            .binary_search_by_key(&absolute_number, |span| span.absolute_number)
            .ok()
            .map(|idx| &self.spans[idx])
    }

    /// Span containing a char offset; `None` on heading lines
    pub fn span_at(&self, offset: usize) -> Option<&AyahSpan> {
        let idx = self.spans.partition_point(|span| span.start <= offset);
        let span = self.spans.get(idx.checked_sub(1)?)?;
        span.contains(offset).then_some(span)
    }

    pub fn first_ayah(&self) -> Option<u32> {
        self.spans.first().map(|span| span.absolute_number)
    }

    pub fn last_ayah(&self) -> Option<u32> {
        self.spans.last().map(|span| span.absolute_number)
    }

    pub fn ayah_count(&self) -> usize {
        self.spans.len()
    }

    /// Length of the text in chars
    pub fn char_len(&self) -> usize {
        self.spans.last().map_or(0, |span| span.end)
    }
}

#[derive(Default)]
struct LineBuilder {
    text: String,
    chars: usize,
}

impl LineBuilder {
    /// Append a line and return its (start, end) char offsets
    fn push_line(&mut self, line: &str) -> (usize, usize) {
        if !self.text.is_empty() {
            self.text.push('\n');
            self.chars += 1;
        }
        let start = self.chars;
        self.text.push_str(line);
        self.chars += line.chars().count();
        (start, self.chars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixture;

    fn quran() -> Quran {
        Quran::from_json_str(&fixture::dataset_json()).unwrap()
    }

    #[test]
    fn test_render_fatiha() {
        let rendered = RenderedUnit::render(&quran(), Granularity::Surah, 1).unwrap();
        assert_eq!(rendered.label, "الفاتحة");
        assert_eq!(rendered.ayah_count(), 7);

        let lines: Vec<&str> = rendered.text.split('\n').collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "سُورَةُ الفاتحة");
        assert_eq!(lines[1], format!("{} (1)", fixture::FATIHA[0]));
        assert!(lines[7].ends_with("(7)"));
    }

    #[test]
    fn test_spans_cover_lines() {
        let rendered = RenderedUnit::render(&quran(), Granularity::Surah, 1).unwrap();
        let chars: Vec<char> = rendered.text.chars().collect();
        for span in &rendered.spans {
            let line: String = chars[span.start..span.end].iter().collect();
            let verse_number = span.absolute_number;
            assert!(line.ends_with(&format!("({})", verse_number)));
        }
        assert_eq!(rendered.char_len(), chars.len());
    }

    #[test]
    fn test_span_at_heading_is_none() {
        let rendered = RenderedUnit::render(&quran(), Granularity::Surah, 2).unwrap();
        assert!(rendered.span_at(0).is_none());
        let first = rendered.spans[0];
        assert_eq!(rendered.span_at(first.start).unwrap().absolute_number, 8);
        assert_eq!(rendered.span_at(first.end).unwrap().absolute_number, 8);
        assert!(rendered.span_at(rendered.char_len() + 1).is_none());
    }

    #[test]
    fn test_page_crossing_surahs_has_inner_heading() {
        // Page 1 of the fixture runs past the end of Al-Fatiha.
        let rendered = RenderedUnit::render(&quran(), Granularity::Page, 1).unwrap();
        assert_eq!(rendered.first_ayah(), Some(1));
        assert!(rendered.last_ayah().unwrap() > 7);
        let headings = rendered
            .text
            .lines()
            .filter(|line| line.starts_with(SURAH_HEADING_PREFIX))
            .count();
        assert_eq!(headings, 2);
    }
}
