use crate::data::granularity::{Granularity, GranularityIndex};

// Longest unit number is 3 digits (604 pages); one more lets the user
// overshoot and see the range error.
const MAX_INPUT_DIGITS: usize = 4;

// Rows skipped by PageUp/PageDown in the picker
pub(super) const PICKER_PAGE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum GoToMode {
    /// Type a unit number of one granularity
    Number,
    /// Pick a unit from the list of any granularity
    Picker,
}

/// State of the go-to screen
#[derive(Debug, Clone)]
pub(super) struct GoToPanel {
    pub mode: GoToMode,
    pub granularity: Granularity,
    pub input: String,
    /// Row selected in the picker (unit number - 1)
    pub selected: usize,
    pub message: Option<String>,
}

impl GoToPanel {
    pub fn number(granularity: Granularity) -> Self {
        Self {
            mode: GoToMode::Number,
            granularity,
            input: String::new(),
            selected: 0,
            message: None,
        }
    }

    /// Picker opened on `granularity` with `unit_number` preselected
    pub fn picker(granularity: Granularity, unit_number: u32) -> Self {
        Self {
            mode: GoToMode::Picker,
            selected: unit_number.saturating_sub(1) as usize,
            ..Self::number(granularity)
        }
    }

    /// Accept a digit (ASCII or Arabic-Indic). In the picker the typed
    /// number also moves the selection when it names a unit.
    pub fn push_char(&mut self, c: char, unit_count: u32) {
        let Some(digit) = to_ascii_digit(c) else {
            return;
        };
        if self.input.len() >= MAX_INPUT_DIGITS {
            return;
        }
        self.input.push(digit);
        self.message = None;

        if self.mode == GoToMode::Picker {
            match self.input.parse::<u32>() {
                Ok(n) if (1..=unit_count).contains(&n) => self.selected = n as usize - 1,
                _ => {}
            }
        }
    }

    pub fn pop_char(&mut self) {
        self.input.pop();
        self.message = None;
    }

    pub fn select_next(&mut self, unit_count: u32, step: usize) {
        if self.mode == GoToMode::Picker {
            let last = (unit_count as usize).saturating_sub(1);
            self.selected = (self.selected + step).min(last);
            self.input.clear();
        }
    }

    pub fn select_previous(&mut self, step: usize) {
        if self.mode == GoToMode::Picker {
            self.selected = self.selected.saturating_sub(step);
            self.input.clear();
        }
    }

    /// Show the next (or previous) granularity in the picker
    pub fn cycle_granularity(&mut self, forward: bool) {
        if self.mode != GoToMode::Picker {
            return;
        }
        let len = Granularity::ALL.len();
        let position = Granularity::ALL
            .iter()
            .position(|g| *g == self.granularity)
            .unwrap_or(0);
        let next = if forward {
            (position + 1) % len
        } else {
            (position + len - 1) % len
        };
        self.granularity = Granularity::ALL[next];
        self.selected = 0;
        self.input.clear();
        self.message = None;
    }

    /// Unit the user asked for, or `None` when no number was typed.
    /// Range checking is left to the navigator.
    pub fn target(&self) -> Option<(Granularity, u32)> {
        match self.mode {
            GoToMode::Number => self
                .input
                .parse()
                .ok()
                .map(|unit_number| (self.granularity, unit_number)),
            GoToMode::Picker => Some((self.granularity, self.selected as u32 + 1)),
        }
    }
}

/// Picker rows: "n. label" for every unit of `granularity`
pub(super) fn picker_lines(index: &GranularityIndex, granularity: Granularity) -> Vec<String> {
    index
        .units(granularity)
        .iter()
        .map(|unit| format!("{}. {}", unit.unit_number, unit.label))
        .collect()
}

fn to_ascii_digit(c: char) -> Option<char> {
    match c {
        '0'..='9' => Some(c),
        '٠'..='٩' => char::from_digit(c as u32 - '٠' as u32, 10),
        _ => None,
    }
}
