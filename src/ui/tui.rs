mod goto;
mod search;

use crate::core::error::{Edge, Error, Result};
use crate::data::granularity::Granularity;
use crate::data::quran::Quran;
use crate::reader::navigator::{LastPosition, Navigator};
use crate::reader::render::SURAH_HEADING_PREFIX;
use crate::search::engine::SearchEngine;
use ratatui::backend::CrosstermBackend;
use ratatui::crossterm::cursor;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;
use goto::{picker_lines, GoToMode, GoToPanel, PICKER_PAGE};
use search::{result_line, SearchPanel};
use std::io;
use std::sync::Arc;

/// Screen states for the TUI flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Reader,
    Search,
    GoTo,
}

/// Interactive reader: one unit on screen, an ayah caret, and a search panel
pub struct ReaderTui {
    current_screen: Screen,
    quran: Arc<Quran>,
    navigator: Navigator,
    engine: SearchEngine,

    // Index of the selected ayah in the current unit's spans
    selected: usize,

    // Set after the first attempt to move past the edge of a unit; the
    // second attempt turns the unit.
    turn_alert: bool,

    search: SearchPanel,
    goto: GoToPanel,

    // Short-lived message shown in the footer
    status_message: Option<String>,
}

impl ReaderTui {
    /// Open the reader, at `start` if a saved position is given
    pub fn new(quran: Arc<Quran>, start: Option<LastPosition>) -> Result<Self> {
        let granularity = start.map_or(Granularity::Page, |p| p.granularity);
        let mut navigator = Navigator::new(Arc::clone(&quran), granularity)?;
        if let Some(position) = &start {
            navigator.restore(position)?;
        }

        let mut tui = Self {
            current_screen: Screen::Reader,
            engine: SearchEngine::new(Arc::clone(&quran)),
            quran,
            navigator,
            selected: 0,
            turn_alert: false,
            search: SearchPanel::default(),
            goto: GoToPanel::number(granularity),
            status_message: None,
        };
        if let Some(position) = start {
            tui.select_ayah(position.absolute_verse_number);
        }
        Ok(tui)
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Absolute number of the ayah under the caret
    pub fn selected_ayah(&self) -> Option<u32> {
        self.navigator
            .current()
            .spans
            .get(self.selected)
            .map(|span| span.absolute_number)
    }

    /// Position record for the caller to persist on exit
    pub fn last_position(&self) -> Result<LastPosition> {
        self.navigator.last_position(self.selected_ayah())
    }

    pub fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;

        // Always restore terminal, even if we early-return with an error.
        struct TerminalRestore;
        impl Drop for TerminalRestore {
            fn drop(&mut self) {
                let _ = disable_raw_mode();
                let mut stdout = io::stdout();
                let _ = execute!(stdout, LeaveAlternateScreen, cursor::Show);
            }
        }
        let _restore = TerminalRestore;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = ratatui::Terminal::new(backend)?;

        loop {
            terminal.draw(|f| self.render_ui(f))?;

            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && self.handle_key(key)? {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Apply one key press; returns true when the user asked to quit
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        match self.current_screen {
            Screen::Reader => self.handle_reader_key(key),
            Screen::Search => {
                self.handle_search_key(key)?;
                Ok(false)
            }
            Screen::GoTo => {
                self.handle_goto_key(key)?;
                Ok(false)
            }
        }
    }

    fn handle_reader_key(&mut self, key: KeyEvent) -> Result<bool> {
        self.status_message = None;
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
            KeyCode::Down => self.move_down()?,
            KeyCode::Up => self.move_up()?,
            KeyCode::PageDown | KeyCode::Char('n') => {
                self.turn_alert = false;
                self.turn(true, false)?;
            }
            KeyCode::PageUp | KeyCode::Char('p') => {
                self.turn_alert = false;
                self.turn(false, false)?;
            }
            KeyCode::Char('g') => self.cycle_granularity()?,
            KeyCode::Char('i') => self.show_ayah_info(),
            KeyCode::Char('/') => {
                self.search.message = None;
                self.current_screen = Screen::Search;
            }
            KeyCode::Char('j') => {
                self.goto = GoToPanel::number(self.navigator.granularity());
                self.current_screen = Screen::GoTo;
            }
            KeyCode::Char('o') => self.open_picker()?,
            _ => {}
        }
        Ok(false)
    }

    fn handle_goto_key(&mut self, key: KeyEvent) -> Result<()> {
        let unit_count = self.quran.index.unit_count(self.goto.granularity);
        match key.code {
            KeyCode::Esc => self.current_screen = Screen::Reader,
            KeyCode::Enter => self.jump_to_goto_target()?,
            KeyCode::Down => self.goto.select_next(unit_count, 1),
            KeyCode::Up => self.goto.select_previous(1),
            KeyCode::PageDown => self.goto.select_next(unit_count, PICKER_PAGE),
            KeyCode::PageUp => self.goto.select_previous(PICKER_PAGE),
            KeyCode::Right | KeyCode::Tab => self.goto.cycle_granularity(true),
            KeyCode::Left | KeyCode::BackTab => self.goto.cycle_granularity(false),
            KeyCode::Backspace => self.goto.pop_char(),
            KeyCode::Char(c) => self.goto.push_char(c, unit_count),
            _ => {}
        }
        Ok(())
    }

    /// Open the unit picker on the surah list, at the surah being read
    fn open_picker(&mut self) -> Result<()> {
        let surah = match self.selected_ayah() {
            Some(ayah) => self.quran.index.unit_for_verse(Granularity::Surah, ayah)?,
            None => 1,
        };
        self.goto = GoToPanel::picker(Granularity::Surah, surah);
        self.current_screen = Screen::GoTo;
        Ok(())
    }

    /// Open the chosen unit. A bad unit number is reported on the go-to
    /// screen, which stays open for another try.
    fn jump_to_goto_target(&mut self) -> Result<()> {
        let Some((granularity, unit_number)) = self.goto.target() else {
            self.goto.message = Some("Type a unit number.".to_string());
            return Ok(());
        };
        match self.navigator.goto(granularity, unit_number) {
            Ok(_) => {
                self.selected = 0;
                self.turn_alert = false;
                self.current_screen = Screen::Reader;
                Ok(())
            }
            Err(e @ Error::OutOfRange { .. }) => {
                self.goto.message = Some(e.to_string());
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => self.current_screen = Screen::Reader,
            KeyCode::Enter => {
                let unit_count = self.navigator.max_unit_number();
                self.search
                    .run(&self.engine, self.navigator.cursor(), unit_count);
            }
            KeyCode::Tab => {
                if let Some(ayah) = self.search.selected_ayah() {
                    self.navigator.by_ayah_number(ayah)?;
                    self.select_ayah(ayah);
                    self.current_screen = Screen::Reader;
                }
            }
            KeyCode::Down => self.search.select_next(),
            KeyCode::Up => self.search.select_previous(),
            KeyCode::F(2) => self.search.ignore_diacritics = !self.search.ignore_diacritics,
            KeyCode::F(3) => self.search.ignore_hamza = !self.search.ignore_hamza,
            KeyCode::F(4) => self.search.whole_word = !self.search.whole_word,
            KeyCode::F(5) => self.search.current_unit_only = !self.search.current_unit_only,
            KeyCode::Backspace => {
                self.search.query.pop();
            }
            KeyCode::Char(c) => self.search.query.push(c),
            _ => {}
        }
        Ok(())
    }

    fn move_down(&mut self) -> Result<()> {
        if self.selected + 1 < self.navigator.current().ayah_count() {
            self.selected += 1;
            self.turn_alert = false;
            return Ok(());
        }
        self.turn(true, true)
    }

    fn move_up(&mut self) -> Result<()> {
        if self.selected > 0 {
            self.selected -= 1;
            self.turn_alert = false;
            return Ok(());
        }
        self.turn(false, true)
    }

    /// Go to the next/previous unit. Caret-driven turns warn once first.
    fn turn(&mut self, forward: bool, from_caret: bool) -> Result<()> {
        let available = if forward {
            self.navigator.has_next()
        } else {
            self.navigator.has_previous()
        };
        if !available {
            let edge = if forward { Edge::Last } else { Edge::First };
            self.status_message = Some(Error::Boundary(edge).to_string());
            return Ok(());
        }
        if from_caret && !self.turn_alert {
            self.turn_alert = true;
            self.status_message = Some("Press again to turn the unit".to_string());
            return Ok(());
        }

        self.turn_alert = false;
        if forward {
            self.navigator.next()?;
            self.selected = 0;
        } else {
            self.navigator.previous()?;
            // Coming back from the following unit lands on its last ayah.
            self.selected = if from_caret {
                self.navigator.current().ayah_count().saturating_sub(1)
            } else {
                0
            };
        }
        Ok(())
    }

    fn cycle_granularity(&mut self) -> Result<()> {
        let current = self.navigator.granularity();
        let position = Granularity::ALL
            .iter()
            .position(|g| *g == current)
            .unwrap_or(0);
        let next = Granularity::ALL[(position + 1) % Granularity::ALL.len()];

        let anchor = self.selected_ayah();
        self.navigator.switch_granularity(next, anchor)?;
        if let Some(ayah) = anchor {
            self.select_ayah(ayah);
        }
        self.turn_alert = false;
        Ok(())
    }

    fn show_ayah_info(&mut self) {
        let info = self
            .selected_ayah()
            .ok_or(Error::NoAyahAtOffset(0))
            .and_then(|ayah| self.navigator.position_of_ayah(ayah))
            .and_then(|offset| self.navigator.ayah_info(offset));
        self.status_message = Some(match info {
            Ok(info) => format!(
                "آية {} من {} (رقم {})",
                info.number_in_surah, info.surah_name, info.absolute_number
            ),
            Err(e) => e.to_string(),
        });
    }

    fn select_ayah(&mut self, absolute_number: u32) {
        self.selected = self
            .navigator
            .current()
            .spans
            .iter()
            .position(|span| span.absolute_number == absolute_number)
            .unwrap_or(0);
    }

    fn render_ui(&self, f: &mut Frame) {
        match self.current_screen {
            Screen::Reader => self.render_reader(f),
            Screen::Search => self.render_search(f),
            Screen::GoTo => self.render_goto(f),
        }
    }

    fn render_reader(&self, f: &mut Frame) {
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Min(0),    // Text
                Constraint::Length(2), // Footer (border + text)
            ])
            .split(size);

        let rendered = self.navigator.current();
        let cursor = self.navigator.cursor();

        // Title
        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                rendered.label.clone(),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  [{} {}/{}]", cursor.granularity, cursor.unit_number, self.navigator.max_unit_number()),
                Style::default().fg(Color::DarkGray),
            ),
        ]))
        .alignment(Alignment::Center);
        f.render_widget(title, chunks[0]);

        // Text, one line per ayah with the caret line highlighted
        let selected_start = rendered.spans.get(self.selected).map(|span| span.start);
        let mut offset = 0;
        let mut selected_line = 0;
        let mut lines = Vec::new();
        for (i, line) in rendered.text.split('\n').enumerate() {
            let style = if Some(offset) == selected_start {
                selected_line = i;
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else if line.starts_with(SURAH_HEADING_PREFIX) {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            lines.push(Line::from(Span::styled(line.to_string(), style)));
            offset += line.chars().count() + 1;
        }

        let visible = chunks[1].height.saturating_sub(2) as usize;
        let scroll = selected_line.saturating_sub(visible / 2) as u16;
        let text = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::White)),
            )
            .alignment(Alignment::Right)
            .scroll((scroll, 0));
        f.render_widget(text, chunks[1]);

        // Footer
        let mut footer_spans = vec![
            Span::styled("↑↓", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw(": Ayah | "),
            Span::styled("n/p", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(": Next/Previous | "),
            Span::styled("g", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(": Granularity | "),
            Span::styled("i", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(": Info | "),
            Span::styled("/", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(": Search | "),
            Span::styled("j/o", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(": Go to/Quick access | "),
            Span::styled("q", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::raw(": Quit"),
        ];

        if let Some(msg) = &self.status_message {
            footer_spans.push(Span::raw("  |  "));
            footer_spans.push(Span::styled(msg.clone(), Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)));
        }

        let footer = Paragraph::new(Line::from(footer_spans))
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::TOP).border_style(Style::default().fg(Color::DarkGray)));
        f.render_widget(footer, chunks[2]);
    }

    fn render_search(&self, f: &mut Frame) {
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search bar
                Constraint::Length(1), // Options
                Constraint::Min(0),    // Results
                Constraint::Length(2), // Footer
            ])
            .split(size);

        // Search bar
        let search_text = if self.search.query.is_empty() {
            Span::styled("Type your search query...", Style::default().fg(Color::DarkGray))
        } else {
            Span::styled(self.search.query.clone(), Style::default().fg(Color::White))
        };
        let search_bar = Paragraph::new(Line::from(search_text))
            .alignment(Alignment::Right)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow))
                    .title("Search"),
            );
        f.render_widget(search_bar, chunks[0]);

        // Options
        let flag = |on: bool, label: &'static str| {
            let style = if on {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Span::styled(format!("[{}] {}  ", if on { "x" } else { " " }, label), style)
        };
        let scope = if self.search.current_unit_only {
            format!("current {}", self.navigator.granularity())
        } else {
            "whole text".to_string()
        };
        let options = Paragraph::new(Line::from(vec![
            flag(self.search.ignore_diacritics, "F2 ignore diacritics"),
            flag(self.search.ignore_hamza, "F3 ignore hamza"),
            flag(self.search.whole_word, "F4 whole word"),
            flag(self.search.current_unit_only, "F5 scope"),
            Span::styled(scope, Style::default().fg(Color::Cyan)),
        ]));
        f.render_widget(options, chunks[1]);

        // Results
        let items: Vec<ListItem> = self
            .search
            .results
            .iter()
            .map(|result| ListItem::new(Line::from(result_line(result))))
            .collect();
        let title = match &self.search.message {
            Some(msg) => msg.clone(),
            None => format!("Results ({})", self.search.results.len()),
        };
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        let mut list_state = ListState::default();
        if !self.search.results.is_empty() {
            list_state.select(Some(self.search.selected));
        }
        f.render_stateful_widget(list, chunks[2], &mut list_state);

        // Footer
        let footer = Paragraph::new(Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(": Search | "),
            Span::styled("↑↓", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw(": Select | "),
            Span::styled("Tab", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(": Go to ayah | "),
            Span::styled("Esc", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::raw(": Back"),
        ]))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP).border_style(Style::default().fg(Color::DarkGray)));
        f.render_widget(footer, chunks[3]);
    }

    fn render_goto(&self, f: &mut Frame) {
        let size = f.size();
        let granularity = self.goto.granularity;
        let unit_count = self.quran.index.unit_count(granularity);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Number entry
                Constraint::Length(1), // Granularity tabs or message
                Constraint::Min(0),    // Picker list
                Constraint::Length(2), // Footer
            ])
            .split(size);

        // Number entry
        let title = format!("Go to {} (1-{})", granularity, unit_count);
        let input = if self.goto.input.is_empty() {
            Span::styled("Type a number...", Style::default().fg(Color::DarkGray))
        } else {
            Span::styled(self.goto.input.clone(), Style::default().fg(Color::White))
        };
        let entry = Paragraph::new(Line::from(input)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(title),
        );
        f.render_widget(entry, chunks[0]);

        // Message first, otherwise the granularities the picker can show
        let info = match (&self.goto.message, self.goto.mode) {
            (Some(msg), _) => Line::from(Span::styled(
                msg.clone(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            (None, GoToMode::Picker) => Line::from(
                Granularity::ALL
                    .iter()
                    .map(|g| {
                        let style = if *g == granularity {
                            Style::default().fg(Color::Black).bg(Color::Yellow)
                        } else {
                            Style::default().fg(Color::DarkGray)
                        };
                        Span::styled(format!(" {} ", g.arabic_name()), style)
                    })
                    .collect::<Vec<_>>(),
            ),
            (None, GoToMode::Number) => Line::from(Span::styled(
                format!("Current: {} {}", self.navigator.granularity(), self.navigator.cursor().unit_number),
                Style::default().fg(Color::DarkGray),
            )),
        };
        f.render_widget(Paragraph::new(info).alignment(Alignment::Center), chunks[1]);

        // Picker list
        if self.goto.mode == GoToMode::Picker {
            let items: Vec<ListItem> = picker_lines(&self.quran.index, granularity)
                .into_iter()
                .map(|line| ListItem::new(Line::from(line)))
                .collect();
            let list = List::new(items)
                .block(Block::default().borders(Borders::ALL).title("Quick access"))
                .highlight_style(
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                );
            let mut list_state = ListState::default();
            list_state.select(Some(self.goto.selected));
            f.render_stateful_widget(list, chunks[2], &mut list_state);
        }

        // Footer
        let mut footer_spans = vec![
            Span::styled("Enter", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(": Go | "),
        ];
        if self.goto.mode == GoToMode::Picker {
            footer_spans.extend([
                Span::styled("↑↓", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
                Span::raw(": Select | "),
                Span::styled("←→", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
                Span::raw(": Partition | "),
            ]);
        }
        footer_spans.extend([
            Span::styled("Esc", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::raw(": Back"),
        ]);
        let footer = Paragraph::new(Line::from(footer_spans))
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::TOP).border_style(Style::default().fg(Color::DarkGray)));
        f.render_widget(footer, chunks[3]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixture;
    use ratatui::crossterm::event::KeyModifiers;

    fn tui(start: Option<LastPosition>) -> ReaderTui {
        let quran = Arc::new(Quran::from_json_str(&fixture::dataset_json()).unwrap());
        ReaderTui::new(quran, start).unwrap()
    }

    fn press(tui: &mut ReaderTui, code: KeyCode) -> bool {
        tui.handle_key(KeyEvent::new(code, KeyModifiers::NONE)).unwrap()
    }

    #[test]
    fn test_starts_on_saved_position() {
        let tui = tui(Some(LastPosition {
            absolute_verse_number: 300,
            granularity: Granularity::Surah,
            unit_number: 3,
        }));
        assert_eq!(tui.navigator().cursor().unit_number, 3);
        assert_eq!(tui.selected_ayah(), Some(300));
        assert_eq!(tui.last_position().unwrap().absolute_verse_number, 300);
    }

    #[test]
    fn test_caret_turn_needs_second_press() {
        let mut tui = tui(None);
        let count = tui.navigator().current().ayah_count();
        for _ in 1..count {
            press(&mut tui, KeyCode::Down);
        }
        assert_eq!(tui.navigator().cursor().unit_number, 1);

        // First press past the last ayah only warns.
        press(&mut tui, KeyCode::Down);
        assert_eq!(tui.navigator().cursor().unit_number, 1);
        press(&mut tui, KeyCode::Down);
        assert_eq!(tui.navigator().cursor().unit_number, 2);
        assert_eq!(tui.selected, 0);

        // Going back up lands on the last ayah of the previous page.
        press(&mut tui, KeyCode::Up);
        press(&mut tui, KeyCode::Up);
        assert_eq!(tui.navigator().cursor().unit_number, 1);
        assert_eq!(tui.selected, count - 1);
    }

    #[test]
    fn test_edge_of_text_reports_boundary() {
        let mut tui = tui(None);
        press(&mut tui, KeyCode::Char('p'));
        assert_eq!(tui.navigator().cursor().unit_number, 1);
        assert_eq!(tui.status_message.as_deref(), Some("Already at the first unit"));
    }

    #[test]
    fn test_granularity_cycle_keeps_ayah() {
        let mut tui = tui(None);
        press(&mut tui, KeyCode::Char('n'));
        press(&mut tui, KeyCode::Down);
        let ayah = tui.selected_ayah().unwrap();

        press(&mut tui, KeyCode::Char('g'));
        assert_eq!(tui.navigator().granularity(), Granularity::Surah);
        assert_eq!(tui.selected_ayah(), Some(ayah));
    }

    #[test]
    fn test_search_and_jump() {
        let mut tui = tui(None);
        press(&mut tui, KeyCode::Char('/'));
        for c in "تكذبان".chars() {
            press(&mut tui, KeyCode::Char(c));
        }
        press(&mut tui, KeyCode::Enter);
        assert!(!tui.search.results.is_empty());
        press(&mut tui, KeyCode::Down);
        let target = tui.search.selected_ayah().unwrap();

        press(&mut tui, KeyCode::Tab);
        assert_eq!(tui.current_screen, Screen::Reader);
        assert_eq!(tui.selected_ayah(), Some(target));
    }

    #[test]
    fn test_goto_number_jumps() {
        let mut tui = tui(None);
        press(&mut tui, KeyCode::Down);
        press(&mut tui, KeyCode::Char('j'));
        assert_eq!(tui.current_screen, Screen::GoTo);
        for c in "25".chars() {
            press(&mut tui, KeyCode::Char(c));
        }
        press(&mut tui, KeyCode::Enter);

        assert_eq!(tui.current_screen, Screen::Reader);
        assert_eq!(tui.navigator().cursor().unit_number, 25);
        assert_eq!(tui.navigator().granularity(), Granularity::Page);
        assert_eq!(tui.selected, 0);
    }

    #[test]
    fn test_goto_out_of_range_is_reported() {
        let mut tui = tui(None);
        press(&mut tui, KeyCode::Char('j'));
        press(&mut tui, KeyCode::Enter);
        assert_eq!(tui.goto.message.as_deref(), Some("Type a unit number."));

        for c in "700".chars() {
            assert!(!press(&mut tui, KeyCode::Char(c)));
        }
        assert!(!press(&mut tui, KeyCode::Enter));
        assert_eq!(tui.current_screen, Screen::GoTo);
        assert_eq!(tui.navigator().cursor().unit_number, 1);
        let message = tui.goto.message.clone().unwrap();
        assert!(message.contains("700"), "{}", message);
        assert!(message.contains("604"), "{}", message);

        // Fix the number and try again.
        press(&mut tui, KeyCode::Backspace);
        press(&mut tui, KeyCode::Backspace);
        press(&mut tui, KeyCode::Enter);
        assert_eq!(tui.current_screen, Screen::Reader);
        assert_eq!(tui.navigator().cursor().unit_number, 7);
    }

    #[test]
    fn test_quick_access_surah() {
        let mut tui = tui(None);
        press(&mut tui, KeyCode::Char('o'));
        assert_eq!(tui.current_screen, Screen::GoTo);
        assert_eq!(tui.goto.granularity, Granularity::Surah);
        press(&mut tui, KeyCode::Down);
        press(&mut tui, KeyCode::Down);
        press(&mut tui, KeyCode::Enter);

        assert_eq!(tui.current_screen, Screen::Reader);
        assert_eq!(tui.navigator().granularity(), Granularity::Surah);
        assert_eq!(tui.navigator().cursor().unit_number, 3);
        assert_eq!(tui.navigator().current().label, "آل عمران");
    }

    #[test]
    fn test_quick_access_other_partition() {
        let mut tui = tui(None);
        press(&mut tui, KeyCode::Char('o'));
        press(&mut tui, KeyCode::Right);
        press(&mut tui, KeyCode::Right);
        assert_eq!(tui.goto.granularity, Granularity::Hizb);
        for c in "١٢".chars() {
            press(&mut tui, KeyCode::Char(c));
        }
        press(&mut tui, KeyCode::Enter);
        assert_eq!(tui.navigator().granularity(), Granularity::Hizb);
        assert_eq!(tui.navigator().cursor().unit_number, 12);
    }

    #[test]
    fn test_goto_escape_keeps_position() {
        let mut tui = tui(None);
        press(&mut tui, KeyCode::Char('n'));
        press(&mut tui, KeyCode::Char('o'));
        press(&mut tui, KeyCode::PageDown);
        assert!(!press(&mut tui, KeyCode::Esc));
        assert_eq!(tui.current_screen, Screen::Reader);
        assert_eq!(tui.navigator().cursor().unit_number, 2);
        assert_eq!(tui.navigator().granularity(), Granularity::Page);
    }

    #[test]
    fn test_quit_keys() {
        let mut tui = tui(None);
        assert!(!press(&mut tui, KeyCode::Char('/')));
        assert!(!press(&mut tui, KeyCode::Char('q')));
        press(&mut tui, KeyCode::Esc);
        assert!(press(&mut tui, KeyCode::Char('q')));
    }
}
