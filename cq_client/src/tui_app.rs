//! TUI application for the country quiz.
//!
//! The app owns a [`QuizController`] and turns key presses into
//! [`UiEvent`]s. Countdown ticks arrive on a tokio channel and quiz events
//! on a std channel subscribed to the controller; both are drained once per
//! frame, so every mutation happens on the UI loop.

use anyhow::Result;
use chrono::{DateTime, Utc};
use country_quiz::{
    Feedback, QuizController, UiEvent,
    events::QuizEvent,
    render::{ListEntry, MapRenderer, format_time},
    scores::KeyValueStore,
    session::SessionPhase,
    timer::Countdown,
};
use ratatui::{
    DefaultTerminal, Frame,
    crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    layout::{Alignment, Constraint, Flex, Layout, Margin, Position, Rect},
    style::{Style, Stylize},
    symbols::scrollbar,
    text::{Line, Span, Text},
    widgets::{
        Block, Cell, Clear, List, ListDirection, ListItem, Padding, Paragraph, Row, Scrollbar,
        ScrollbarOrientation, Table,
    },
};
use std::{sync::mpsc as std_mpsc, time::Duration};
use tokio::sync::mpsc;

mod widgets;

use crate::map::CanvasMap;
use widgets::{ScrollableList, UserInput};

const HELP: &str = "\
Type a country name and press Enter. Names are matched ignoring case,
accents and extra spaces; common English spellings work too.

Enter
        Submit the guess.
Ctrl+P
        Pause or resume. Guesses are disabled while paused.
Ctrl+R
        Start over with a full clock.
Ctrl+Up / Ctrl+Down
        Zoom the map in or out.
Shift+Arrows
        Pan the map.
Ctrl+Left / Ctrl+Right
        Hover the previous or next country, west to east.
Ctrl+Home
        Reset the map zoom.
Up / Down
        Scroll the history.
PageUp / PageDown
        Scroll the continent list.
F1
        Toggle this help.
Esc
        Quit.
";
const MAX_LOG_RECORDS: usize = 1024;
const POLL_TIMEOUT: Duration = Duration::from_millis(100);
const CONTINENT_SCROLL_STEP: u16 = 10;
/// Below this many seconds the clock turns red
const LOW_TIME_SECS: u32 = 60;

#[derive(Clone, Copy)]
enum RecordKind {
    Found,
    Game,
    Score,
}

/// A timestamped history entry.
#[derive(Clone)]
struct Record {
    datetime: DateTime<Utc>,
    kind: RecordKind,
    content: String,
}

impl Record {
    fn new(kind: RecordKind, content: String) -> Self {
        Self {
            datetime: Utc::now(),
            kind,
            content,
        }
    }
}

impl From<Record> for ListItem<'_> {
    fn from(val: Record) -> Self {
        let repr = match val.kind {
            RecordKind::Found => "FOUND".light_green(),
            RecordKind::Game => "GAME".light_blue(),
            RecordKind::Score => "SCORE".light_yellow(),
        };

        let msg = vec![
            format!("[{} ", val.datetime.format("%H:%M:%S")).into(),
            Span::styled(format!("{repr:5}"), repr.style),
            format!("]: {}", val.content).into(),
        ];

        ListItem::new(Line::from(msg))
    }
}

/// Map a quiz event to a history entry; ticks are not logged.
fn make_record(event: &QuizEvent) -> Option<Record> {
    let kind = match event {
        QuizEvent::Tick { .. } => return None,
        QuizEvent::Discovered { .. } => RecordKind::Found,
        QuizEvent::Ended { .. } | QuizEvent::ScoreRecorded { .. } => RecordKind::Score,
        QuizEvent::Started | QuizEvent::Paused | QuizEvent::Resumed | QuizEvent::Reset => {
            RecordKind::Game
        }
    };
    Some(Record::new(kind, event.to_string()))
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Max(height)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Max(width)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}

/// TUI App state
pub struct TuiApp<C: Countdown, S: KeyValueStore> {
    quiz: QuizController<C, S>,
    /// One `()` per elapsed countdown second
    ticks: mpsc::UnboundedReceiver<()>,
    events: std_mpsc::Receiver<QuizEvent>,
    map: CanvasMap,
    /// Message under the guess field
    feedback: Feedback,
    /// Whether to display the help menu window
    show_help_menu: bool,
    /// Helps scroll through the help menu window if the terminal is small
    help_handle: ScrollableList,
    /// History of quiz events
    log_handle: ScrollableList,
    /// Current value of the guess field
    user_input: UserInput,
    /// First visible line of the continent list
    continent_scroll: u16,
}

impl<C: Countdown, S: KeyValueStore> TuiApp<C, S> {
    pub fn new(mut quiz: QuizController<C, S>, ticks: mpsc::UnboundedReceiver<()>) -> Self {
        let (tx_events, events) = std_mpsc::channel();
        quiz.subscribe(tx_events);

        // Fill help menu with help text lines
        let mut help_handle = ScrollableList::new(MAX_LOG_RECORDS);
        help_handle.push("".into());
        for line in HELP.lines() {
            help_handle.push(line.into());
        }
        help_handle.push("".into());
        help_handle.jump_to_first();

        Self {
            quiz,
            ticks,
            events,
            map: CanvasMap::new(),
            feedback: Feedback::None,
            show_help_menu: false,
            help_handle,
            log_handle: ScrollableList::new(MAX_LOG_RECORDS),
            user_input: UserInput::new(),
            continent_scroll: 0,
        }
    }

    /// Apply a UI event and keep whatever feedback it produced.
    fn dispatch(&mut self, event: UiEvent) {
        let feedback = self.quiz.handle(event);
        match feedback {
            // Ignored guesses leave the field and the message alone.
            Feedback::None | Feedback::Blocked => {}
            feedback => {
                if feedback.clears_input() {
                    self.user_input.clear();
                }
                self.feedback = feedback;
            }
        }
    }

    fn submit(&mut self) {
        let guess = self.user_input.value.clone();
        self.dispatch(UiEvent::Submit(guess));
    }

    /// Typing counts as focusing the guess field.
    fn type_char(&mut self, c: char) {
        match self.quiz.phase() {
            SessionPhase::Idle(_) => {
                self.dispatch(UiEvent::Focus);
                self.user_input.input(c);
            }
            SessionPhase::Running(_) => self.user_input.input(c),
            SessionPhase::Paused(_) | SessionPhase::Ended(_) => {}
        }
    }

    fn toggle_pause(&mut self) {
        match self.quiz.phase() {
            SessionPhase::Paused(_) => self.dispatch(UiEvent::Resume),
            SessionPhase::Idle(_) | SessionPhase::Running(_) => self.dispatch(UiEvent::Pause),
            SessionPhase::Ended(_) => {}
        }
        self.discard_stale_ticks();
    }

    fn restart(&mut self) {
        self.dispatch(UiEvent::Restart);
        self.discard_stale_ticks();
        self.feedback = Feedback::None;
        self.user_input.clear();
        self.map.clear_hover();
    }

    /// Drop ticks sent by a countdown that has since been stopped.
    fn discard_stale_ticks(&mut self) {
        while self.ticks.try_recv().is_ok() {}
    }

    fn process_ticks(&mut self) {
        while self.ticks.try_recv().is_ok() {
            self.dispatch(UiEvent::Tick);
        }
    }

    fn process_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            if let Some(record) = make_record(&event) {
                self.log_handle.push(record.into());
            }
        }
    }

    /// Handle a key press. Returns `false` when the player quits.
    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        match (modifiers, code) {
            (_, KeyCode::Esc) | (KeyModifiers::CONTROL, KeyCode::Char('c')) => return false,
            (KeyModifiers::CONTROL, KeyCode::Char('p')) => self.toggle_pause(),
            (KeyModifiers::CONTROL, KeyCode::Char('r')) => self.restart(),
            (KeyModifiers::CONTROL, KeyCode::Up) => self.map.zoom_in(),
            (KeyModifiers::CONTROL, KeyCode::Down) => self.map.zoom_out(),
            (KeyModifiers::CONTROL, KeyCode::Left) => self.map.hover_prev(),
            (KeyModifiers::CONTROL, KeyCode::Right) => self.map.hover_next(),
            (KeyModifiers::CONTROL, KeyCode::Home) => self.map.reset_zoom(),
            (KeyModifiers::SHIFT, KeyCode::Up) => self.map.pan(0.0, 1.0),
            (KeyModifiers::SHIFT, KeyCode::Down) => self.map.pan(0.0, -1.0),
            (KeyModifiers::SHIFT, KeyCode::Left) => self.map.pan(-1.0, 0.0),
            (KeyModifiers::SHIFT, KeyCode::Right) => self.map.pan(1.0, 0.0),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => self.type_char(c),
            (KeyModifiers::NONE, KeyCode::Enter) => self.submit(),
            (KeyModifiers::NONE, KeyCode::Backspace) => self.user_input.backspace(),
            (KeyModifiers::NONE, KeyCode::Delete) => self.user_input.delete(),
            (KeyModifiers::NONE, KeyCode::Left) => self.user_input.move_left(),
            (KeyModifiers::NONE, KeyCode::Right) => self.user_input.move_right(),
            (KeyModifiers::NONE, KeyCode::Home) => self.user_input.jump_to_first(),
            (KeyModifiers::NONE, KeyCode::End) => self.user_input.jump_to_last(),
            (KeyModifiers::NONE, KeyCode::Up) => {
                if self.show_help_menu {
                    self.help_handle.move_up();
                } else {
                    self.log_handle.move_up();
                }
            }
            (KeyModifiers::NONE, KeyCode::Down) => {
                if self.show_help_menu {
                    self.help_handle.move_down();
                } else {
                    self.log_handle.move_down();
                }
            }
            (KeyModifiers::NONE, KeyCode::PageUp) => {
                self.continent_scroll = self
                    .continent_scroll
                    .saturating_sub(CONTINENT_SCROLL_STEP);
            }
            (KeyModifiers::NONE, KeyCode::PageDown) => {
                self.continent_scroll = self
                    .continent_scroll
                    .saturating_add(CONTINENT_SCROLL_STEP);
            }
            (KeyModifiers::NONE, KeyCode::F(1)) => self.show_help_menu = !self.show_help_menu,
            _ => {}
        }
        true
    }

    /// Render the clock, progress and phase line
    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let session = self.quiz.session();
        let clock = format!(" ⏱ {} ", format_time(session.remaining_secs()));
        let clock = if session.remaining_secs() < LOW_TIME_SECS {
            clock.bold().light_red()
        } else {
            clock.bold().white()
        };

        let (found, total) = self.quiz.progress();
        let header = vec![
            clock,
            " | ".into(),
            format!("{found}/{total} countries").light_green(),
            " | ".into(),
            self.quiz.phase().to_string().into(),
        ];
        frame.render_widget(Paragraph::new(Line::from(header)), area);
    }

    /// Render the per-continent list, undiscovered entries masked
    fn draw_continents(&mut self, frame: &mut Frame, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        for block in self.quiz.continent_blocks() {
            if !lines.is_empty() {
                lines.push(Line::default());
            }
            lines.push(
                format!(
                    "{} ({}/{})",
                    block.continent,
                    block.discovered_count(),
                    block.entries.len()
                )
                .bold()
                .into(),
            );
            for entry in &block.entries {
                let line = match entry {
                    ListEntry::Discovered(country) => format!("  {}", country.name).light_green(),
                    ListEntry::Hidden => format!("  {}", entry.label()).dark_gray(),
                };
                lines.push(line.into());
            }
        }

        let max_scroll = u16::try_from(lines.len().saturating_sub(1)).unwrap_or(u16::MAX);
        self.continent_scroll = self.continent_scroll.min(max_scroll);

        let continents = Paragraph::new(Text::from(lines))
            .scroll((self.continent_scroll, 0))
            .block(Block::bordered().title(" continents  "));
        frame.render_widget(continents, area);
    }

    /// Render the top scores, highlighting the latest session's entry
    fn draw_leaderboard(&self, frame: &mut Frame, area: Rect) {
        let last_rank = self.quiz.last_rank();
        let rows = self
            .quiz
            .leaderboard()
            .records()
            .iter()
            .enumerate()
            .map(|(rank, record)| {
                let row = Row::new(vec![
                    Cell::new(Text::from(format!("#{}", rank + 1)).alignment(Alignment::Left)),
                    Cell::new(Text::from(record.score.to_string()).alignment(Alignment::Right)),
                    Cell::new(
                        Text::from(record.date.format("%Y-%m-%d %H:%M").to_string())
                            .alignment(Alignment::Right),
                    ),
                ]);
                if last_rank == Some(rank) {
                    row.bold().light_green()
                } else {
                    row
                }
            });

        let table = Table::new(
            rows,
            [
                Constraint::Length(4),
                Constraint::Length(5),
                Constraint::Fill(1),
            ],
        )
        .block(
            Block::bordered()
                .padding(Padding::horizontal(1))
                .title(" leaderboard  "),
        );
        frame.render_widget(table, area);
    }

    /// Render the log/history window with scrollbar
    fn draw_log(&mut self, frame: &mut Frame, area: Rect) {
        let log_records = self.log_handle.list_items.clone();
        let log_records = List::new(log_records)
            .direction(ListDirection::BottomToTop)
            .block(Block::bordered().title(" history  "));
        frame.render_stateful_widget(log_records, area, &mut self.log_handle.list_state);

        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .symbols(scrollbar::VERTICAL)
                .begin_symbol(None)
                .end_symbol(None),
            area.inner(Margin {
                vertical: 1,
                horizontal: 1,
            }),
            &mut self.log_handle.scroll_state,
        );
    }

    /// Render the guess field with the latest feedback under it
    fn draw_user_input(&self, frame: &mut Frame, area: Rect) {
        let message = self.feedback.to_string();
        let message = match &self.feedback {
            feedback if feedback.is_error() => message.light_red(),
            Feedback::Correct(_) => message.light_green(),
            Feedback::GameOver { .. } => message.light_yellow(),
            _ => message.into(),
        };

        let accepts_input = self.quiz.session().accepts_input();
        let title = if accepts_input {
            " guess a country  ".light_green()
        } else {
            " input disabled  ".dark_gray()
        };

        let user_input = Paragraph::new(self.user_input.value.as_str())
            .style(Style::default())
            .block(Block::bordered().title(title).title_bottom(message));
        frame.render_widget(user_input, area);

        if accepts_input && !self.show_help_menu {
            let cursor = u16::try_from(self.user_input.char_idx).unwrap_or(u16::MAX);
            frame.set_cursor_position(Position::new(
                area.x.saturating_add(cursor).saturating_add(1),
                area.y + 1,
            ));
        }
    }

    /// Render the status/help bar at the bottom
    fn draw_help_bar(&self, frame: &mut Frame, area: Rect) {
        let status_indicator = match self.quiz.phase() {
            SessionPhase::Idle(_) => "● Ready".white(),
            SessionPhase::Running(_) => "● Running".green(),
            SessionPhase::Paused(_) => "● Paused".yellow(),
            SessionPhase::Ended(_) => "● Game over".red(),
        };

        let help_message = vec![
            status_indicator,
            " | press ".into(),
            "F1".bold().white(),
            " for help, ".into(),
            "Ctrl+P".bold().white(),
            " to pause, ".into(),
            "Ctrl+R".bold().white(),
            " to restart, or ".into(),
            "Esc".bold().white(),
            " to exit".into(),
        ];
        frame.render_widget(Paragraph::new(Line::from(help_message)), area);
    }

    /// Render a centered message box over everything else
    fn draw_overlay(frame: &mut Frame, title: &str, lines: Vec<Line>) {
        let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(4);
        let area = centered(frame.area(), 48, height);
        frame.render_widget(Clear, area);
        let overlay = Paragraph::new(Text::from(lines))
            .alignment(Alignment::Center)
            .block(
                Block::bordered()
                    .padding(Padding::uniform(1))
                    .title(format!(" {title}  ")),
            );
        frame.render_widget(overlay, area);
    }

    /// Render the help menu overlay
    fn draw_help_menu(&mut self, frame: &mut Frame) {
        let help_menu_area = centered(frame.area(), 80, 29);
        frame.render_widget(Clear, help_menu_area);

        let help_items = self.help_handle.list_items.clone();
        let help_items = List::new(help_items)
            .direction(ListDirection::BottomToTop)
            .block(Block::bordered().title(" keys  "));
        frame.render_stateful_widget(
            help_items,
            help_menu_area,
            &mut self.help_handle.list_state,
        );

        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .symbols(scrollbar::VERTICAL)
                .begin_symbol(None)
                .end_symbol(None),
            help_menu_area.inner(Margin {
                vertical: 1,
                horizontal: 1,
            }),
            &mut self.help_handle.scroll_state,
        );
    }

    /// Main draw function - orchestrates rendering of all UI components
    fn draw(&mut self, frame: &mut Frame) {
        self.map
            .render(self.quiz.catalog(), self.quiz.session().discovered());

        let leaderboard_height = u16::try_from(self.quiz.leaderboard().capacity())
            .unwrap_or(u16::MAX)
            .saturating_add(2);

        let window = Layout::vertical([
            Constraint::Length(1),  // Clock and progress
            Constraint::Min(10),    // Map and lists
            Constraint::Length(8),  // History
            Constraint::Length(3),  // Guess field
            Constraint::Length(1),  // Help bar
        ]);
        let [header_area, body_area, log_area, user_input_area, help_area] =
            window.areas(frame.area());

        let [map_area, side_area] =
            Layout::horizontal([Constraint::Percentage(65), Constraint::Percentage(35)])
                .areas(body_area);
        let [continent_area, leaderboard_area] =
            Layout::vertical([Constraint::Min(6), Constraint::Length(leaderboard_height)])
                .areas(side_area);

        self.draw_header(frame, header_area);
        self.map.draw(frame, map_area);
        self.draw_continents(frame, continent_area);
        self.draw_leaderboard(frame, leaderboard_area);
        self.draw_log(frame, log_area);
        self.draw_user_input(frame, user_input_area);
        self.draw_help_bar(frame, help_area);

        match self.quiz.phase() {
            SessionPhase::Paused(_) => Self::draw_overlay(
                frame,
                "paused",
                vec![
                    format!("{} left", format_time(self.quiz.session().remaining_secs())).into(),
                    "Press Ctrl+P to resume".into(),
                ],
            ),
            SessionPhase::Ended(ended) => {
                let rank = match self.quiz.last_rank() {
                    Some(rank) => format!("#{} on the leaderboard", rank + 1),
                    None => "Not on the leaderboard".to_string(),
                };
                Self::draw_overlay(
                    frame,
                    "game over",
                    vec![
                        format!("{} countries found", ended.score).bold().into(),
                        rank.into(),
                        "Press Ctrl+R to play again".into(),
                    ],
                );
            }
            SessionPhase::Idle(_) | SessionPhase::Running(_) => {}
        }

        if self.show_help_menu {
            self.draw_help_menu(frame);
        }
    }

    /// Run the TUI application
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        loop {
            self.process_ticks();
            self.process_events();
            terminal.draw(|frame| self.draw(frame))?;

            if event::poll(POLL_TIMEOUT)?
                && let Event::Key(KeyEvent {
                    code,
                    modifiers,
                    kind,
                    ..
                }) = event::read()?
                && kind == KeyEventKind::Press
                && !self.handle_key(code, modifiers)
            {
                self.quiz.shutdown();
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use country_quiz::{
        Catalog, QuizConfig, scores::MemoryStore, timer::ManualCountdown,
    };
    use ratatui::{Terminal, backend::TestBackend};
    use std::sync::Arc;

    type TestApp = TuiApp<ManualCountdown, MemoryStore>;

    fn app(total_secs: u32) -> (TestApp, mpsc::UnboundedSender<()>) {
        let config = QuizConfig {
            total_secs,
            ..Default::default()
        };
        let quiz = QuizController::new(
            Arc::new(Catalog::builtin().unwrap()),
            &config,
            ManualCountdown::new(),
            MemoryStore::new(),
        );
        let (tx, rx) = mpsc::unbounded_channel();
        (TuiApp::new(quiz, rx), tx)
    }

    fn type_text(app: &mut TestApp, text: &str) {
        for c in text.chars() {
            app.handle_key(KeyCode::Char(c), KeyModifiers::NONE);
        }
    }

    fn screen(app: &mut TestApp) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 45)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_typing_starts_the_clock() {
        let (mut app, _tx) = app(900);
        assert!(matches!(app.quiz.phase(), SessionPhase::Idle(_)));

        type_text(&mut app, "P");
        assert!(matches!(app.quiz.phase(), SessionPhase::Running(_)));
        assert!(app.quiz.countdown().is_active());
    }

    #[test]
    fn test_correct_guess_clears_input_and_logs() {
        let (mut app, _tx) = app(900);
        type_text(&mut app, "peru");
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        app.process_events();

        assert_eq!(app.feedback, Feedback::Correct("Peru".to_string()));
        assert!(app.user_input.value.is_empty());
        // Started and Discovered
        assert_eq!(app.log_handle.len(), 2);
    }

    #[test]
    fn test_wrong_guess_keeps_input() {
        let (mut app, _tx) = app(900);
        type_text(&mut app, "atlantis");
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);

        assert_eq!(app.feedback, Feedback::NotFound);
        assert_eq!(app.user_input.value, "atlantis");
    }

    #[test]
    fn test_pause_blocks_typing_and_shows_overlay() {
        let (mut app, _tx) = app(900);
        type_text(&mut app, "c");
        app.handle_key(KeyCode::Char('p'), KeyModifiers::CONTROL);
        assert!(matches!(app.quiz.phase(), SessionPhase::Paused(_)));
        assert!(!app.quiz.countdown().is_active());

        type_text(&mut app, "hile");
        assert_eq!(app.user_input.value, "c");
        assert!(screen(&mut app).contains("Press Ctrl+P to resume"));

        app.handle_key(KeyCode::Char('p'), KeyModifiers::CONTROL);
        assert!(matches!(app.quiz.phase(), SessionPhase::Running(_)));
    }

    #[test]
    fn test_ticks_end_the_game() {
        let (mut app, tx) = app(2);
        type_text(&mut app, "chile");
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);

        tx.send(()).unwrap();
        tx.send(()).unwrap();
        app.process_ticks();

        assert!(matches!(app.quiz.phase(), SessionPhase::Ended(_)));
        assert_eq!(
            app.feedback,
            Feedback::GameOver {
                score: 1,
                rank: Some(0)
            }
        );
        let screen = screen(&mut app);
        assert!(screen.contains("1 countries found"));
        assert!(screen.contains("#1 on the leaderboard"));
    }

    #[test]
    fn test_stale_ticks_are_dropped_on_pause() {
        let (mut app, tx) = app(900);
        type_text(&mut app, "x");
        tx.send(()).unwrap();
        app.handle_key(KeyCode::Char('p'), KeyModifiers::CONTROL);
        app.handle_key(KeyCode::Char('p'), KeyModifiers::CONTROL);
        app.process_ticks();

        assert_eq!(app.quiz.session().remaining_secs(), 900);
    }

    #[test]
    fn test_restart_clears_everything() {
        let (mut app, _tx) = app(900);
        type_text(&mut app, "peru");
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        type_text(&mut app, "xx");
        app.handle_key(KeyCode::Char('r'), KeyModifiers::CONTROL);

        assert!(matches!(app.quiz.phase(), SessionPhase::Idle(_)));
        assert_eq!(app.quiz.progress().0, 0);
        assert_eq!(app.feedback, Feedback::None);
        assert!(app.user_input.value.is_empty());
    }

    #[test]
    fn test_continent_list_masks_undiscovered() {
        let (mut app, _tx) = app(900);
        type_text(&mut app, "argentina");
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);

        let screen = screen(&mut app);
        assert!(screen.contains("África (0/55)"));
        assert!(screen.contains("1/200 countries"));
    }

    #[test]
    fn test_escape_quits() {
        let (mut app, _tx) = app(900);
        assert!(app.handle_key(KeyCode::F(1), KeyModifiers::NONE));
        assert!(app.show_help_menu);
        assert!(!app.handle_key(KeyCode::Esc, KeyModifiers::NONE));
    }
}
