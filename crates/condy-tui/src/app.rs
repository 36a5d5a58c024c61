//! Top-level application state and the main event loop.
//!
//! The screen is the access request form: a driver selector followed by the
//! plate, validity date, and note fields. [`App::run`] sets up the terminal,
//! drives the crossterm event loop, and tears everything down cleanly on exit
//! or panic.

use crate::{
    event::{self, AppEvent},
    theme::Theme,
    widgets::{
        help::HelpPopup,
        selector::{Dropdown, SelectorField, SelectorFieldState},
        status_bar::{Status, StatusBar},
        text_field::{FieldMode, TextField, TextFieldState},
    },
};
use chrono::NaiveDate;
use condy_core::{
    config::Config, AccessRequest, AccessRequestDraft, Candidate, Field, Selector, SelectorEvent,
    SelectorState,
};
use crossterm::{
    event::{self as ct_event, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    Frame, Terminal,
};
use std::{io, time::Duration};

// ---------------------------------------------------------------------------
// Focus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Driver,
    Plate,
    ValidUntil,
    Note,
}

impl Focus {
    const ORDER: [Focus; 4] = [Focus::Driver, Focus::Plate, Focus::ValidUntil, Focus::Note];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    fn field(self) -> Field {
        match self {
            Focus::Driver => Field::DriverName,
            Focus::Plate => Field::Plate,
            Focus::ValidUntil => Field::ValidUntil,
            Focus::Note => Field::Note,
        }
    }
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub driver: SelectorFieldState,
    pub plate: TextFieldState,
    pub valid_until: TextFieldState,
    pub note: TextFieldState,
    /// The caller's copy of the form, fed by selector events.
    pub draft: AccessRequestDraft,
    pub focus: Focus,
    /// A field is being edited (keys produce characters).
    pub insert: bool,
    pub theme: Theme,
    pub config: Config,
    pub show_help: bool,
    pub status: Option<Status>,
    /// The last request that passed validation.
    pub submitted: Option<AccessRequest>,
    pub quit: bool,
}

impl AppState {
    fn text_field_mut(&mut self, focus: Focus) -> Option<&mut TextFieldState> {
        match focus {
            Focus::Driver => None,
            Focus::Plate => Some(&mut self.plate),
            Focus::ValidUntil => Some(&mut self.valid_until),
            Focus::Note => Some(&mut self.note),
        }
    }

    fn set_field_error(&mut self, field: Field, error: Option<String>) {
        match field {
            Field::DriverName => self.driver.selector.set_error(error),
            Field::Plate => self.plate.error = error,
            Field::ValidUntil => self.valid_until.error = error,
            Field::Note => self.note.error = error,
        }
    }

    /// Field used to fill the plate when a driver is picked.
    fn plate_field(&self) -> &str {
        match self.config.selector.secondary_field.trim() {
            "" => "plate",
            field => field,
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
}

impl App {
    pub fn new(candidates: Vec<Candidate>, config: Config, theme: Theme) -> Self {
        let selector = Selector::new(config.selector.to_options(), candidates);
        let state = AppState {
            driver: SelectorFieldState::new(selector),
            plate: TextFieldState::default(),
            valid_until: TextFieldState::default(),
            note: TextFieldState::default(),
            draft: AccessRequestDraft::default(),
            focus: Focus::Driver,
            insert: false,
            theme,
            config,
            show_help: false,
            status: None,
            submitted: None,
            quit: false,
        };
        App { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        if let Some(request) = &self.state.submitted {
            println!("{}", serde_json::to_string_pretty(request)?);
        }
        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(16))? {
                match ct_event::read()? {
                    Event::Key(key) if key.kind == crossterm::event::KeyEventKind::Press => {
                        let raw = Event::Key(key);
                        let app_event = if self.state.insert {
                            event::to_app_event_insert(raw)
                        } else {
                            event::to_app_event(raw)
                        };
                        if let Some(ev) = app_event {
                            tracing::debug!(
                                focus = ?self.state.focus,
                                insert = self.state.insert,
                                event = ?ev,
                                "key event"
                            );
                            self.handle(ev);
                        }
                    }
                    other => {
                        if let Some(ev) = event::to_app_event(other) {
                            self.handle(ev);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn handle(&mut self, event: AppEvent) {
        let today = chrono::Local::now().date_naive();
        self.handle_at(event, today);
    }

    /// Handle one event, validating submissions against `today`.
    fn handle_at(&mut self, event: AppEvent, today: NaiveDate) {
        let s = &mut self.state;

        // Help popup intercepts all events; only close keys pass through.
        if s.show_help {
            match event {
                AppEvent::Help | AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit => {
                    tracing::debug!("help popup closed");
                    s.show_help = false;
                }
                _ => {}
            }
            return;
        }

        if s.insert {
            handle_insert(s, event, today);
        } else {
            handle_normal(s, event, today);
        }
    }
}

fn handle_normal(s: &mut AppState, event: AppEvent, today: NaiveDate) {
    match event {
        AppEvent::Quit => {
            tracing::debug!("quit");
            s.quit = true;
        }
        AppEvent::Help => {
            tracing::debug!("help popup opened");
            s.show_help = true;
        }
        AppEvent::Insert | AppEvent::Enter => start_editing(s),
        AppEvent::Submit => submit(s, today),
        AppEvent::FocusNext => move_focus(s, s.focus.next()),
        AppEvent::FocusPrev => move_focus(s, s.focus.prev()),
        AppEvent::Clear => clear_focused(s),
        AppEvent::Escape => s.status = None,
        // Terminal resize is handled automatically by ratatui
        _ => {}
    }
}

fn handle_insert(s: &mut AppState, event: AppEvent, today: NaiveDate) {
    match event {
        AppEvent::Quit => s.quit = true,
        AppEvent::Escape => {
            tracing::debug!(focus = ?s.focus, "editing stopped");
            s.insert = false;
        }
        AppEvent::FocusNext => move_focus(s, s.focus.next()),
        AppEvent::FocusPrev => move_focus(s, s.focus.prev()),
        AppEvent::Clear => clear_focused(s),
        AppEvent::Enter => {
            // An empty dropdown has nothing to pick, so Enter falls through to submit
            let consumed =
                s.focus == Focus::Driver && s.driver.selector.state() == SelectorState::Open;
            if consumed {
                let events = s.driver.handle(&AppEvent::Enter);
                apply_selector_events(s, events);
            } else {
                s.insert = false;
                submit(s, today);
            }
        }
        AppEvent::Resize(_, _) => {}
        other => dispatch_to_focused(s, other),
    }
}

fn start_editing(s: &mut AppState) {
    if s.focus == Focus::Driver && s.driver.selector.is_disabled() {
        s.status = Some(Status::Info("driver field is disabled".to_string()));
        return;
    }
    tracing::debug!(focus = ?s.focus, "editing started");
    s.insert = true;
    if s.focus == Focus::Driver {
        s.driver.selector.focus();
    }
}

fn move_focus(s: &mut AppState, to: Focus) {
    tracing::debug!(from = ?s.focus, to = ?to, "focus cycle");
    s.focus = to;
    if s.insert && to == Focus::Driver {
        s.driver.selector.focus();
    }
}

fn clear_focused(s: &mut AppState) {
    let focus = s.focus;
    match s.text_field_mut(focus) {
        Some(field) => {
            field.handle(&AppEvent::Clear);
        }
        None => {
            let events = s.driver.handle(&AppEvent::Clear);
            apply_selector_events(s, events);
        }
    }
    s.set_field_error(focus.field(), None);
}

/// Route an editing event to the field that owns the current focus.
fn dispatch_to_focused(s: &mut AppState, event: AppEvent) {
    let focus = s.focus;
    match s.text_field_mut(focus) {
        Some(field) => {
            if field.handle(&event) {
                field.error = None;
            }
        }
        None => {
            let events = s.driver.handle(&event);
            apply_selector_events(s, events);
        }
    }
}

/// React to the selector's notifications: keep the draft in sync, fill the
/// plate on selection, and leave insert mode when asked to.
fn apply_selector_events(s: &mut AppState, events: Vec<SelectorEvent>) {
    for ev in events {
        match ev {
            SelectorEvent::QueryChanged(query) => {
                s.draft.driver_id = None;
                s.draft.driver_name = query;
                s.driver.selector.set_error(None);
            }
            SelectorEvent::Selected(candidate) => {
                let name_field = s.config.selector.primary_field.clone();
                let plate_field = s.plate_field().to_string();
                s.draft.apply_selection(&candidate, &name_field, &plate_field);

                let name = s.draft.driver_name.clone();
                s.driver.sync_query(&name);
                let plate = s.draft.plate.clone();
                s.plate.set_value(plate);
                s.plate.error = None;
                s.status = Some(Status::Info(format!("selected {name}")));
            }
            SelectorEvent::DismissInput => {
                s.insert = false;
            }
        }
    }
}

/// Copy the typed text into the draft and validate it.
fn submit(s: &mut AppState, today: NaiveDate) {
    s.draft.driver_name = s.driver.selector.query().to_string();
    s.draft.plate = s.plate.value.clone();
    s.draft.valid_until = s.valid_until.value.clone();
    s.draft.note = s.note.value.clone();

    for field in Field::ALL {
        s.set_field_error(field, None);
    }

    match s.draft.validate(today) {
        Ok(request) => {
            tracing::info!(
                driver = %request.driver_name,
                plate = %request.plate,
                valid_until = %request.valid_until,
                "access request submitted"
            );
            s.status = Some(Status::Success(format!(
                "request for {} ({}) valid until {}",
                request.driver_name, request.plate, request.valid_until
            )));
            s.submitted = Some(request);
        }
        Err(report) => {
            for (field, err) in &report.errors {
                s.set_field_error(*field, Some(err.to_string()));
            }
            if let Some((field, _)) = report.errors.first() {
                s.focus = Focus::ORDER
                    .into_iter()
                    .find(|f| f.field() == *field)
                    .unwrap_or(s.focus);
            }
            s.status = Some(Status::Error(report.to_string()));
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Vertical: four 3-line fields | filler | 1-line status bar
    let vert = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .split(area);

    let mode = |focus: Focus| FieldMode::new(state.focus == focus, state.insert);
    let theme = &state.theme;

    frame.render_widget(
        SelectorField::new(&state.driver, "Driver", mode(Focus::Driver), theme),
        vert[0],
    );
    frame.render_widget(
        TextField::new(&state.plate, "Plate", mode(Focus::Plate), theme).hint("ABC1234 or ABC1D23"),
        vert[1],
    );
    frame.render_widget(
        TextField::new(&state.valid_until, "Valid until", mode(Focus::ValidUntil), theme)
            .hint("YYYY-MM-DD"),
        vert[2],
    );
    frame.render_widget(
        TextField::new(&state.note, "Note", mode(Focus::Note), theme).hint("optional"),
        vert[3],
    );
    frame.render_widget(
        StatusBar::new(state.insert, state.status.as_ref(), theme),
        vert[5],
    );

    // Dropdown overlays the fields below the driver selector while editing it
    if state.insert && state.focus == Focus::Driver {
        let dropdown = Dropdown::new(&state.driver.selector, theme);
        let screen = Rect { height: vert[5].y - area.y, ..area };
        let dd_area = dropdown.area(vert[0], screen);
        frame.render_widget(dropdown, dd_area);
    }

    if state.show_help {
        frame.render_widget(HelpPopup::new(theme), area);
        return;
    }

    if state.insert {
        let field_area = vert[state.focus.index()];
        let (cx, cy) = match state.focus {
            Focus::Driver => SelectorField::new(&state.driver, "", FieldMode::Editing, theme)
                .cursor_position(field_area),
            Focus::Plate => TextField::new(&state.plate, "", FieldMode::Editing, theme)
                .cursor_position(field_area),
            Focus::ValidUntil => TextField::new(&state.valid_until, "", FieldMode::Editing, theme)
                .cursor_position(field_area),
            Focus::Note => TextField::new(&state.note, "", FieldMode::Editing, theme)
                .cursor_position(field_area),
        };
        frame.set_cursor_position((cx, cy));
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
