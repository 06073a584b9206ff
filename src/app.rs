//! Main application logic and TUI event loop.

use std::io;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::cli::{AppConfig, ExportFormat};
use crate::data::{analytics, Period, RankBy, SetDraft, Storage, WorkoutSet};
use crate::export;
use crate::ui::{
    chart::{ProgressChart, RankingChart, ViewSelector},
    form::{AddExercisePopup, AddExerciseState, FormState, LogForm},
    widgets::{CategoryList, DayLog, ExerciseHistory, ExerciseList, StatusBar},
    HelpOverlay, Theme,
};

/// Which screen is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Log,
    History,
    Progress,
}

impl Screen {
    fn next(self) -> Self {
        match self {
            Screen::Log => Screen::History,
            Screen::History => Screen::Progress,
            Screen::Progress => Screen::Log,
        }
    }

    fn title(self) -> &'static str {
        match self {
            Screen::Log => "Log",
            Screen::History => "History",
            Screen::Progress => "Progress",
        }
    }
}

/// Which panel of the Log screen is focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPanel {
    Categories,
    Exercises,
    Form,
}

impl FocusedPanel {
    fn prev(self) -> Self {
        match self {
            FocusedPanel::Categories => FocusedPanel::Categories,
            FocusedPanel::Exercises => FocusedPanel::Categories,
            FocusedPanel::Form => FocusedPanel::Exercises,
        }
    }
}

/// Chart shown on the Progress screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressView {
    Exercise,
    Consistency,
    Categories,
    TopExercises,
}

impl ProgressView {
    const ALL: [ProgressView; 4] = [
        ProgressView::Exercise,
        ProgressView::Consistency,
        ProgressView::Categories,
        ProgressView::TopExercises,
    ];

    fn next(self) -> Self {
        match self {
            ProgressView::Exercise => ProgressView::Consistency,
            ProgressView::Consistency => ProgressView::Categories,
            ProgressView::Categories => ProgressView::TopExercises,
            ProgressView::TopExercises => ProgressView::Exercise,
        }
    }

    fn title(self) -> &'static str {
        match self {
            ProgressView::Exercise => "Progress",
            ProgressView::Consistency => "Consistency",
            ProgressView::Categories => "Categories",
            ProgressView::TopExercises => "Top Exercises",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|v| *v == self).unwrap_or(0)
    }
}

/// Where typed characters are routed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    Normal,
    Search,
    AddExercise,
}

/// Application state
pub struct App {
    theme: Theme,

    // Data
    storage: Storage,
    sets: Vec<WorkoutSet>,
    categories: Vec<String>,
    exercises: Vec<String>,
    history: Vec<WorkoutSet>,
    day_sets: Vec<WorkoutSet>,
    exercise_names: Vec<String>,

    // Log screen state
    log_date: NaiveDate,
    focused: FocusedPanel,
    selected_category: usize,
    selected_exercise: usize,
    search: String,
    form: FormState,
    add_exercise: AddExerciseState,

    // History screen state
    view_date: NaiveDate,

    // Progress screen state
    progress_view: ProgressView,
    period: Period,
    rank_by: RankBy,
    top_n: usize,
    progress_exercise: usize,

    screen: Screen,
    mode: InputMode,
    show_help: bool,
    should_quit: bool,

    // Transient status-bar feedback
    notice: Option<String>,
    error_message: Option<String>,
}

impl App {
    /// Create a new App instance backed by the database in `config`
    pub fn new(config: &AppConfig) -> Result<Self> {
        let storage = Storage::open(&config.db_path)?;
        Self::with_storage(storage, config.start_date)
    }

    fn with_storage(storage: Storage, start_date: NaiveDate) -> Result<Self> {
        let mut app = App {
            theme: Theme::default(),
            storage,
            sets: Vec::new(),
            categories: Vec::new(),
            exercises: Vec::new(),
            history: Vec::new(),
            day_sets: Vec::new(),
            exercise_names: Vec::new(),
            log_date: start_date,
            focused: FocusedPanel::Categories,
            selected_category: 0,
            selected_exercise: 0,
            search: String::new(),
            form: FormState::default(),
            add_exercise: AddExerciseState::default(),
            view_date: start_date,
            progress_view: ProgressView::Exercise,
            period: Period::Week,
            rank_by: RankBy::Volume,
            top_n: 5,
            progress_exercise: 0,
            screen: Screen::Log,
            mode: InputMode::Normal,
            show_help: false,
            should_quit: false,
            notice: None,
            error_message: None,
        };
        app.reload_all()?;
        Ok(app)
    }

    /// Reload every data snapshot from storage
    fn reload_all(&mut self) -> Result<()> {
        self.sets = self.storage.all_sets()?;
        self.categories = self.storage.categories()?;
        if self.selected_category >= self.categories.len() {
            self.selected_category = self.categories.len().saturating_sub(1);
        }
        self.exercise_names = analytics::exercise_names(&self.sets);
        if self.progress_exercise >= self.exercise_names.len() {
            self.progress_exercise = self.exercise_names.len().saturating_sub(1);
        }
        self.reload_exercises()?;
        self.load_history()?;
        self.load_day()?;
        Ok(())
    }

    /// Load exercises for the currently selected category
    fn reload_exercises(&mut self) -> Result<()> {
        self.exercises = match self.current_category() {
            Some(category) => self.storage.exercises_in(&category)?,
            None => Vec::new(),
        };
        self.clamp_exercise_selection();
        Ok(())
    }

    /// Load past sets for the currently selected exercise
    fn load_history(&mut self) -> Result<()> {
        self.history = match self.current_exercise() {
            Some(exercise) => self.storage.sets_for_exercise(&exercise)?,
            None => Vec::new(),
        };
        Ok(())
    }

    /// Load the day view for the current history date
    fn load_day(&mut self) -> Result<()> {
        self.day_sets = self.storage.sets_on(self.view_date)?;
        Ok(())
    }

    fn current_category(&self) -> Option<String> {
        self.categories.get(self.selected_category).cloned()
    }

    /// Exercises of the selected category matching the search query
    fn filtered_exercises(&self) -> Vec<&str> {
        let query = self.search.to_lowercase();
        self.exercises
            .iter()
            .filter(|e| e.to_lowercase().contains(&query))
            .map(String::as_str)
            .collect()
    }

    fn current_exercise(&self) -> Option<String> {
        self.filtered_exercises()
            .get(self.selected_exercise)
            .map(|e| (*e).to_string())
    }

    fn clamp_exercise_selection(&mut self) {
        let len = self.filtered_exercises().len();
        if self.selected_exercise >= len {
            self.selected_exercise = len.saturating_sub(1);
        }
    }

    /// Validate the form and append a performed set
    fn submit_set(&mut self) -> Result<()> {
        let draft = SetDraft {
            category: self.current_category().unwrap_or_default(),
            exercise: self.current_exercise().unwrap_or_default(),
            weight: self.form.weight.clone(),
            reps: self.form.reps.clone(),
        };
        match draft.validate(self.log_date) {
            Ok(set) => {
                self.storage.append(&set)?;
                self.notice = Some(format!(
                    "Saved: {} reps @ {}kg for {} on {}",
                    set.reps, set.weight, set.exercise, set.date
                ));
                self.reload_all()?;
            }
            Err(e) => self.error_message = Some(e.to_string()),
        }
        Ok(())
    }

    /// Append a catalog row from the add-exercise popup
    fn submit_new_exercise(&mut self) -> Result<()> {
        match WorkoutSet::catalog_row(
            self.log_date,
            &self.add_exercise.category,
            &self.add_exercise.name,
        ) {
            Ok(row) => {
                self.storage.append(&row)?;
                self.notice = Some(format!(
                    "Added exercise '{}' to category '{}'",
                    row.exercise, row.category
                ));
                self.mode = InputMode::Normal;
                let category = row.category.clone();
                self.add_exercise = AddExerciseState::default();
                self.reload_all()?;
                // Jump to the new category so the exercise is visible
                if let Some(idx) = self.categories.iter().position(|c| *c == category) {
                    self.selected_category = idx;
                    self.reload_exercises()?;
                    self.load_history()?;
                }
            }
            Err(e) => self.error_message = Some(e.to_string()),
        }
        Ok(())
    }

    /// Export the whole log into the current working directory
    fn export_log(&mut self, format: ExportFormat) -> Result<()> {
        let path = Path::new(format.default_filename());
        let result = match format {
            ExportFormat::Csv => export::export_csv(&self.sets, path),
            ExportFormat::Xlsx => export::export_xlsx(&self.sets, path),
        };
        match result {
            Ok(()) => {
                self.notice = Some(format!(
                    "Exported {} rows to {}",
                    self.sets.len(),
                    path.display()
                ));
            }
            Err(e) => self.error_message = Some(format!("{e:#}")),
        }
        Ok(())
    }

    /// Refresh all data from storage
    fn refresh(&mut self) -> Result<()> {
        self.reload_all()?;
        self.notice = Some("Reloaded".to_string());
        Ok(())
    }

    /// Handle keyboard input
    fn handle_input(&mut self, key: KeyCode) -> Result<()> {
        // Feedback from the previous action is transient
        self.notice = None;
        self.error_message = None;

        match self.mode {
            InputMode::Search => return self.handle_search_input(key),
            InputMode::AddExercise => return self.handle_add_exercise_input(key),
            InputMode::Normal => {}
        }

        if self.show_help {
            if matches!(key, KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Esc) {
                self.show_help = false;
            }
            return Ok(());
        }

        // Digits edit the form before anything else claims them
        if self.screen == Screen::Log && self.focused == FocusedPanel::Form {
            if let KeyCode::Char(c) = key {
                if c.is_ascii_digit() || c == '.' {
                    self.form.push_char(c);
                    return Ok(());
                }
            }
            if key == KeyCode::Backspace {
                self.form.pop_char();
                return Ok(());
            }
        }

        // Global shortcuts
        match key {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return Ok(());
            }
            KeyCode::Char('?') => {
                self.show_help = true;
                return Ok(());
            }
            KeyCode::Char('r') => {
                self.refresh()?;
                return Ok(());
            }
            KeyCode::Tab => {
                self.screen = self.screen.next();
                return Ok(());
            }
            KeyCode::Char('1') => {
                self.screen = Screen::Log;
                return Ok(());
            }
            KeyCode::Char('2') => {
                self.screen = Screen::History;
                return Ok(());
            }
            KeyCode::Char('3') => {
                self.screen = Screen::Progress;
                return Ok(());
            }
            KeyCode::Char('e') => {
                self.export_log(ExportFormat::Csv)?;
                return Ok(());
            }
            KeyCode::Char('x') => {
                self.export_log(ExportFormat::Xlsx)?;
                return Ok(());
            }
            _ => {}
        }

        match self.screen {
            Screen::Log => self.handle_log_input(key),
            Screen::History => self.handle_history_input(key),
            Screen::Progress => self.handle_progress_input(key),
        }
    }

    fn handle_log_input(&mut self, key: KeyCode) -> Result<()> {
        match key {
            KeyCode::Char('[') => {
                if let Some(prev) = self.log_date.pred_opt() {
                    self.log_date = prev;
                }
                return Ok(());
            }
            KeyCode::Char(']') => {
                if let Some(next) = self.log_date.succ_opt() {
                    self.log_date = next;
                }
                return Ok(());
            }
            KeyCode::Char('t') => {
                self.log_date = Local::now().date_naive();
                return Ok(());
            }
            KeyCode::Char('a') => {
                self.add_exercise = AddExerciseState {
                    category: self.current_category().unwrap_or_default(),
                    name: String::new(),
                    active_name: true,
                };
                self.mode = InputMode::AddExercise;
                return Ok(());
            }
            KeyCode::Esc | KeyCode::Char('h') | KeyCode::Left => {
                self.focused = self.focused.prev();
                return Ok(());
            }
            _ => {}
        }

        match self.focused {
            FocusedPanel::Categories => self.handle_category_navigation(key)?,
            FocusedPanel::Exercises => self.handle_exercise_navigation(key)?,
            FocusedPanel::Form => self.handle_form_navigation(key)?,
        }
        Ok(())
    }

    fn handle_category_navigation(&mut self, key: KeyCode) -> Result<()> {
        match key {
            KeyCode::Down | KeyCode::Char('j') => {
                if !self.categories.is_empty() {
                    self.selected_category = (self.selected_category + 1) % self.categories.len();
                    self.reload_exercises()?;
                    self.load_history()?;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if !self.categories.is_empty() {
                    self.selected_category = self
                        .selected_category
                        .checked_sub(1)
                        .unwrap_or(self.categories.len() - 1);
                    self.reload_exercises()?;
                    self.load_history()?;
                }
            }
            KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => {
                self.focused = FocusedPanel::Exercises;
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_exercise_navigation(&mut self, key: KeyCode) -> Result<()> {
        let len = self.filtered_exercises().len();
        match key {
            KeyCode::Down | KeyCode::Char('j') => {
                if len > 0 {
                    self.selected_exercise = (self.selected_exercise + 1) % len;
                    self.load_history()?;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if len > 0 {
                    self.selected_exercise =
                        self.selected_exercise.checked_sub(1).unwrap_or(len - 1);
                    self.load_history()?;
                }
            }
            KeyCode::Char('/') => {
                self.mode = InputMode::Search;
            }
            KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => {
                self.focused = FocusedPanel::Form;
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_form_navigation(&mut self, key: KeyCode) -> Result<()> {
        match key {
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Up | KeyCode::Char('k') => {
                self.form.field = self.form.field.next();
            }
            KeyCode::Enter => {
                self.submit_set()?;
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_history_input(&mut self, key: KeyCode) -> Result<()> {
        match key {
            KeyCode::Char('[') | KeyCode::Char('j') | KeyCode::Down => {
                if let Some(prev) = self.view_date.pred_opt() {
                    self.view_date = prev;
                    self.load_day()?;
                }
            }
            KeyCode::Char(']') | KeyCode::Char('k') | KeyCode::Up => {
                if let Some(next) = self.view_date.succ_opt() {
                    self.view_date = next;
                    self.load_day()?;
                }
            }
            KeyCode::Char('t') => {
                self.view_date = Local::now().date_naive();
                self.load_day()?;
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_progress_input(&mut self, key: KeyCode) -> Result<()> {
        match key {
            KeyCode::Char('v') => {
                self.progress_view = self.progress_view.next();
            }
            KeyCode::Char('p') => {
                self.period = self.period.toggled();
            }
            KeyCode::Char('m') => {
                self.rank_by = self.rank_by.toggled();
            }
            KeyCode::Char('+') => {
                self.top_n = (self.top_n + 1).min(10);
            }
            KeyCode::Char('-') => {
                self.top_n = self.top_n.saturating_sub(1).max(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if !self.exercise_names.is_empty() {
                    self.progress_exercise =
                        (self.progress_exercise + 1) % self.exercise_names.len();
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if !self.exercise_names.is_empty() {
                    self.progress_exercise = self
                        .progress_exercise
                        .checked_sub(1)
                        .unwrap_or(self.exercise_names.len() - 1);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_search_input(&mut self, key: KeyCode) -> Result<()> {
        match key {
            KeyCode::Esc => {
                self.search.clear();
                self.mode = InputMode::Normal;
                self.clamp_exercise_selection();
                self.load_history()?;
            }
            KeyCode::Enter => {
                self.mode = InputMode::Normal;
            }
            KeyCode::Backspace => {
                self.search.pop();
                self.clamp_exercise_selection();
                self.load_history()?;
            }
            KeyCode::Char(c) => {
                self.search.push(c);
                self.clamp_exercise_selection();
                self.load_history()?;
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_add_exercise_input(&mut self, key: KeyCode) -> Result<()> {
        match key {
            KeyCode::Esc => {
                self.add_exercise = AddExerciseState::default();
                self.mode = InputMode::Normal;
            }
            KeyCode::Tab | KeyCode::Up | KeyCode::Down => {
                self.add_exercise.toggle_field();
            }
            KeyCode::Enter => {
                self.submit_new_exercise()?;
            }
            KeyCode::Backspace => {
                self.add_exercise.pop_char();
            }
            KeyCode::Char(c) => {
                self.add_exercise.push_char(c);
            }
            _ => {}
        }
        Ok(())
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // Body
                Constraint::Length(2), // Status bar
            ])
            .split(size);

        match self.screen {
            Screen::Log => self.render_log(frame, main_chunks[0]),
            Screen::History => self.render_history(frame, main_chunks[0]),
            Screen::Progress => self.render_progress(frame, main_chunks[0]),
        }

        let detail = match self.screen {
            Screen::Log => self.log_date.to_string(),
            Screen::History => self.view_date.to_string(),
            Screen::Progress => self.progress_view.title().to_string(),
        };
        let context = format!("irontrack: {} {}", self.screen.title(), detail);
        let status_bar = StatusBar::new(
            context,
            self.notice.as_deref(),
            self.error_message.as_deref(),
            &self.theme,
        );
        status_bar.render(frame, main_chunks[1]);

        if self.mode == InputMode::AddExercise {
            let popup = AddExercisePopup::new(&self.add_exercise, &self.theme);
            popup.render(frame, size);
        }

        if self.show_help {
            let help = HelpOverlay::new(&self.theme);
            help.render(frame, size);
        }
    }

    fn render_log(&self, frame: &mut ratatui::Frame, area: ratatui::layout::Rect) {
        let body_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(30), // Sidebar
                Constraint::Min(40),    // Form and history
            ])
            .split(area);

        let sidebar_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(40), // Categories
                Constraint::Percentage(60), // Exercises
            ])
            .split(body_chunks[0]);

        let content_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(9), // Entry form
                Constraint::Min(5),    // Past sets
            ])
            .split(body_chunks[1]);

        let category_list =
            CategoryList::new(&self.categories, self.selected_category, &self.theme);
        category_list.render(
            frame,
            sidebar_chunks[0],
            self.focused == FocusedPanel::Categories,
        );

        let filtered = self.filtered_exercises();
        let exercise_list = ExerciseList::new(
            &filtered,
            self.selected_exercise,
            &self.search,
            self.mode == InputMode::Search,
            &self.theme,
        );
        exercise_list.render(
            frame,
            sidebar_chunks[1],
            self.focused == FocusedPanel::Exercises,
        );

        let category = self.current_category();
        let exercise = self.current_exercise();
        let form = LogForm::new(
            self.log_date,
            category.as_deref(),
            exercise.as_deref(),
            &self.form,
            &self.theme,
        );
        form.render(frame, content_chunks[0], self.focused == FocusedPanel::Form);

        let history = ExerciseHistory::new(exercise.as_deref(), &self.history, &self.theme);
        history.render(frame, content_chunks[1]);
    }

    fn render_history(&self, frame: &mut ratatui::Frame, area: ratatui::layout::Rect) {
        let day_log = DayLog::new(self.view_date, &self.day_sets, &self.theme);
        day_log.render(frame, area, true);
    }

    fn render_progress(&self, frame: &mut ratatui::Frame, area: ratatui::layout::Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(10),   // Chart
                Constraint::Length(1), // View selector
            ])
            .split(area);

        match self.progress_view {
            ProgressView::Exercise => {
                let exercise = self
                    .exercise_names
                    .get(self.progress_exercise)
                    .map(String::as_str)
                    .unwrap_or("-");
                let points = analytics::exercise_progress(&self.sets, exercise);
                let chart = ProgressChart::new(&points, exercise, &self.theme);
                chart.render(frame, chunks[0], true);
            }
            ProgressView::Consistency => {
                let bars = analytics::consistency(&self.sets, self.period);
                let title = format!("Workout days per {}", self.period.label());
                let chart = RankingChart::new(&title, bars, &self.theme);
                chart.render(frame, chunks[0], true);
            }
            ProgressView::Categories => {
                let totals = analytics::category_distribution(&self.sets, self.rank_by);
                let title = format!("Categories by {}", self.rank_by.label());
                let chart = RankingChart::from_totals(&title, &totals, &self.theme);
                chart.render(frame, chunks[0], true);
            }
            ProgressView::TopExercises => {
                let totals = analytics::top_exercises(&self.sets, self.top_n, self.rank_by);
                let title = format!("Top {} exercises by {}", self.top_n, self.rank_by.label());
                let chart = RankingChart::from_totals(&title, &totals, &self.theme);
                chart.render(frame, chunks[0], true);
            }
        }

        let titles: Vec<&str> = ProgressView::ALL.iter().map(|v| v.title()).collect();
        let hint = match self.progress_view {
            ProgressView::Exercise => "(j/k exercise)",
            ProgressView::Consistency => "(p period)",
            ProgressView::Categories => "(m measure)",
            ProgressView::TopExercises => "(m measure, +/- count)",
        };
        let selector = ViewSelector::new(
            &titles,
            self.progress_view.index(),
            hint,
            &self.theme,
        );
        selector.render(frame, chunks[1]);
    }
}

/// Restore terminal to normal state
fn restore_terminal() {
    // Best effort cleanup; we may already be unwinding
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
}

/// Run the TUI application
pub fn run(config: AppConfig) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture) {
        restore_terminal();
        return Err(e).context("Failed to setup terminal");
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = match Terminal::new(backend) {
        Ok(t) => t,
        Err(e) => {
            restore_terminal();
            return Err(e).context("Failed to create terminal");
        }
    };

    // Create app - if this fails, restore terminal first
    let mut app = match App::new(&config) {
        Ok(a) => a,
        Err(e) => {
            restore_terminal();
            return Err(e).context("Failed to initialize application");
        }
    };

    let result = run_main_loop(&mut terminal, &mut app);

    // Always restore terminal, regardless of result
    restore_terminal();
    terminal.show_cursor().ok();

    result
}

/// Main application loop
fn run_main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;

        if event::poll(Duration::from_millis(200))? {
            if let Event::Key(key) = event::read()? {
                if let Err(e) = app.handle_input(key.code) {
                    // Log error but don't crash
                    app.error_message = Some(format!("{e:#}"));
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
