//! List and panel widgets for the dashboard.

use chrono::NaiveDate;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use super::theme::Theme;
use crate::data::WorkoutSet;

fn panel_block<'a>(title: String, focused: bool, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(if focused {
            BorderType::Double
        } else {
            BorderType::Plain
        })
        .border_style(theme.panel_border(focused))
        .title_style(theme.title_style())
}

/// Category list panel
pub struct CategoryList<'a> {
    categories: &'a [String],
    selected: usize,
    theme: &'a Theme,
}

impl<'a> CategoryList<'a> {
    pub fn new(categories: &'a [String], selected: usize, theme: &'a Theme) -> Self {
        CategoryList {
            categories,
            selected,
            theme,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let items: Vec<ListItem> = self
            .categories
            .iter()
            .map(|c| ListItem::new(c.as_str()))
            .collect();

        let list = List::new(items)
            .block(panel_block(" Categories ".to_string(), focused, self.theme))
            .highlight_style(self.theme.highlight_style())
            .highlight_symbol("> ");

        let mut state = ListState::default();
        state.select(Some(self.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }
}

/// Exercise list panel, filtered by the active search query
pub struct ExerciseList<'a> {
    exercises: &'a [&'a str],
    selected: usize,
    query: &'a str,
    searching: bool,
    theme: &'a Theme,
}

impl<'a> ExerciseList<'a> {
    pub fn new(
        exercises: &'a [&'a str],
        selected: usize,
        query: &'a str,
        searching: bool,
        theme: &'a Theme,
    ) -> Self {
        ExerciseList {
            exercises,
            selected,
            query,
            searching,
            theme,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let title = if self.searching || !self.query.is_empty() {
            format!(" Exercises /{}{} ", self.query, if self.searching { "_" } else { "" })
        } else {
            format!(" Exercises ({}) ", self.exercises.len())
        };

        let items: Vec<ListItem> = self
            .exercises
            .iter()
            .map(|e| ListItem::new(*e))
            .collect();

        let list = List::new(items)
            .block(panel_block(title, focused, self.theme))
            .highlight_style(self.theme.highlight_style())
            .highlight_symbol("> ");

        let mut state = ListState::default();
        state.select(if self.exercises.is_empty() {
            None
        } else {
            Some(self.selected)
        });
        frame.render_stateful_widget(list, area, &mut state);
    }
}

/// Render reps/weight the way the log view shows them; a zero means the
/// value was never recorded.
fn set_line(set: &WorkoutSet) -> String {
    let reps = if set.reps > 0 {
        format!("{} reps", set.reps)
    } else {
        "N/A reps".to_string()
    };
    let weight = if set.weight > 0.0 {
        format!("{}kg", set.weight)
    } else {
        "N/A weight".to_string()
    };
    format!("{reps} @ {weight}")
}

/// One day's sets grouped by category, then exercise
pub struct DayLog<'a> {
    date: NaiveDate,
    sets: &'a [WorkoutSet],
    theme: &'a Theme,
}

impl<'a> DayLog<'a> {
    pub fn new(date: NaiveDate, sets: &'a [WorkoutSet], theme: &'a Theme) -> Self {
        DayLog { date, sets, theme }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let block = panel_block(format!(" Workouts on {} ", self.date), focused, self.theme);

        if self.sets.is_empty() {
            let message = Paragraph::new("No workouts found for this date.")
                .style(self.theme.dim_style())
                .block(block);
            frame.render_widget(message, area);
            return;
        }

        // Group by category, then exercise, in first-appearance order
        let mut categories: Vec<&str> = Vec::new();
        for set in self.sets {
            if !categories.contains(&set.category.as_str()) {
                categories.push(&set.category);
            }
        }

        let mut lines: Vec<Line> = Vec::new();
        for (i, category) in categories.iter().enumerate() {
            if i > 0 {
                lines.push(Line::from(""));
            }
            lines.push(Line::from(Span::styled(
                (*category).to_string(),
                self.theme.title_style(),
            )));

            let in_category: Vec<&WorkoutSet> = self
                .sets
                .iter()
                .filter(|s| s.category == *category)
                .collect();
            let mut exercises: Vec<&str> = Vec::new();
            for set in &in_category {
                if !exercises.contains(&set.exercise.as_str()) {
                    exercises.push(&set.exercise);
                }
            }

            for exercise in exercises {
                lines.push(Line::from(Span::styled(
                    format!("  {exercise}"),
                    self.theme.normal_style(),
                )));
                for set in in_category.iter().filter(|s| s.exercise == exercise) {
                    lines.push(Line::from(Span::styled(
                        format!("    {}", set_line(set)),
                        self.theme.dim_style(),
                    )));
                }
            }
        }

        let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}

/// Past performed sets for one exercise, newest first
pub struct ExerciseHistory<'a> {
    exercise: Option<&'a str>,
    sets: &'a [WorkoutSet],
    theme: &'a Theme,
}

impl<'a> ExerciseHistory<'a> {
    pub fn new(exercise: Option<&'a str>, sets: &'a [WorkoutSet], theme: &'a Theme) -> Self {
        ExerciseHistory {
            exercise,
            sets,
            theme,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let title = match self.exercise {
            Some(name) => format!(" Past Sets: {name} "),
            None => " Past Sets ".to_string(),
        };
        let block = panel_block(title, false, self.theme);

        if self.sets.is_empty() {
            let message = Paragraph::new("No past workouts found for this exercise.")
                .style(self.theme.dim_style())
                .block(block);
            frame.render_widget(message, area);
            return;
        }

        let mut lines: Vec<Line> = Vec::new();
        let mut last_date: Option<NaiveDate> = None;
        for set in self.sets {
            if last_date != Some(set.date) {
                lines.push(Line::from(Span::styled(
                    set.date.to_string(),
                    self.theme.title_style(),
                )));
                last_date = Some(set.date);
            }
            lines.push(Line::from(Span::styled(
                format!("  {}", set_line(set)),
                self.theme.normal_style(),
            )));
        }

        let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}

/// Status bar widget
pub struct StatusBar<'a> {
    context: String,
    notice: Option<&'a str>,
    error: Option<&'a str>,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(
        context: String,
        notice: Option<&'a str>,
        error: Option<&'a str>,
        theme: &'a Theme,
    ) -> Self {
        StatusBar {
            context,
            notice,
            error,
            theme,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let line = if let Some(error) = self.error {
            Line::from(Span::styled(
                format!("Error: {error}"),
                ratatui::style::Style::default().fg(ratatui::style::Color::Red),
            ))
        } else if let Some(notice) = self.notice {
            Line::from(Span::styled(notice.to_string(), self.theme.notice_style()))
        } else {
            Line::from(vec![
                Span::raw(self.context.clone()),
                Span::styled(" | [?] Help [q] Quit", self.theme.dim_style()),
            ])
        };

        let paragraph = Paragraph::new(line).block(Block::default().borders(Borders::TOP));
        frame.render_widget(paragraph, area);
    }
}
