//! Set-entry form for the Log screen, plus the add-exercise popup.

use chrono::NaiveDate;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use super::theme::Theme;

/// Editable fields of the entry form, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Weight,
    Reps,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Weight => FormField::Reps,
            FormField::Reps => FormField::Weight,
        }
    }
}

/// Buffers behind the entry form. Weight and reps are kept as typed and
/// validated on submit.
#[derive(Debug, Clone)]
pub struct FormState {
    pub field: FormField,
    pub weight: String,
    pub reps: String,
}

impl Default for FormState {
    fn default() -> Self {
        FormState {
            field: FormField::Weight,
            weight: "0".to_string(),
            reps: String::new(),
        }
    }
}

impl FormState {
    /// Append a character to the focused field. Only digits and a decimal
    /// point make sense here; anything else is dropped.
    pub fn push_char(&mut self, c: char) {
        match self.field {
            FormField::Weight if c.is_ascii_digit() || c == '.' => self.weight.push(c),
            FormField::Reps if c.is_ascii_digit() => self.reps.push(c),
            _ => {}
        }
    }

    /// Delete the last character of the focused field.
    pub fn pop_char(&mut self) {
        match self.field {
            FormField::Weight => self.weight.pop(),
            FormField::Reps => self.reps.pop(),
        };
    }
}

fn field_line<'a>(
    label: &'a str,
    value: String,
    active: bool,
    editable: bool,
    theme: &Theme,
) -> Line<'a> {
    let value_style = if active {
        theme.highlight_style()
    } else {
        theme.normal_style()
    };
    let cursor = if active && editable { "_" } else { "" };
    Line::from(vec![
        Span::styled(format!("{label:<10}"), theme.dim_style()),
        Span::styled(format!("{value}{cursor}"), value_style),
    ])
}

/// The "track set" form: date and picked category/exercise above the two
/// editable numeric fields.
pub struct LogForm<'a> {
    date: NaiveDate,
    category: Option<&'a str>,
    exercise: Option<&'a str>,
    state: &'a FormState,
    theme: &'a Theme,
}

impl<'a> LogForm<'a> {
    pub fn new(
        date: NaiveDate,
        category: Option<&'a str>,
        exercise: Option<&'a str>,
        state: &'a FormState,
        theme: &'a Theme,
    ) -> Self {
        LogForm {
            date,
            category,
            exercise,
            state,
            theme,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let block = Block::default()
            .title(" Track Set ")
            .borders(Borders::ALL)
            .border_type(if focused {
                BorderType::Double
            } else {
                BorderType::Plain
            })
            .border_style(self.theme.panel_border(focused))
            .title_style(self.theme.title_style());

        let lines = vec![
            field_line(
                "Date",
                format!("{}  ([ prev, ] next, t today)", self.date),
                false,
                false,
                self.theme,
            ),
            field_line(
                "Category",
                self.category.unwrap_or("-").to_string(),
                false,
                false,
                self.theme,
            ),
            field_line(
                "Exercise",
                self.exercise.unwrap_or("-").to_string(),
                false,
                false,
                self.theme,
            ),
            field_line(
                "Weight kg",
                self.state.weight.clone(),
                focused && self.state.field == FormField::Weight,
                focused,
                self.theme,
            ),
            field_line(
                "Reps",
                self.state.reps.clone(),
                focused && self.state.field == FormField::Reps,
                focused,
                self.theme,
            ),
            Line::from(""),
            Line::from(Span::styled(
                "Enter saves the set",
                self.theme.dim_style(),
            )),
        ];

        let paragraph = Paragraph::new(lines).block(block);
        frame.render_widget(paragraph, area);
    }
}

/// Which field of the add-exercise popup is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddExerciseField {
    Category,
    Name,
}

/// Buffers behind the add-exercise popup.
#[derive(Debug, Clone, Default)]
pub struct AddExerciseState {
    pub category: String,
    pub name: String,
    pub active_name: bool,
}

impl AddExerciseState {
    pub fn field(&self) -> AddExerciseField {
        if self.active_name {
            AddExerciseField::Name
        } else {
            AddExerciseField::Category
        }
    }

    pub fn toggle_field(&mut self) {
        self.active_name = !self.active_name;
    }

    pub fn push_char(&mut self, c: char) {
        match self.field() {
            AddExerciseField::Category => self.category.push(c),
            AddExerciseField::Name => self.name.push(c),
        }
    }

    pub fn pop_char(&mut self) {
        match self.field() {
            AddExerciseField::Category => self.category.pop(),
            AddExerciseField::Name => self.name.pop(),
        };
    }
}

/// Centered popup for registering a custom exercise
pub struct AddExercisePopup<'a> {
    state: &'a AddExerciseState,
    theme: &'a Theme,
}

impl<'a> AddExercisePopup<'a> {
    pub fn new(state: &'a AddExerciseState, theme: &'a Theme) -> Self {
        AddExercisePopup { state, theme }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let popup_area = super::centered_rect(50, 30, area);
        frame.render_widget(Clear, popup_area);

        let lines = vec![
            Line::from(""),
            field_line(
                "Category",
                self.state.category.clone(),
                self.state.field() == AddExerciseField::Category,
                true,
                self.theme,
            ),
            field_line(
                "Exercise",
                self.state.name.clone(),
                self.state.field() == AddExerciseField::Name,
                true,
                self.theme,
            ),
            Line::from(""),
            Line::from(Span::styled(
                "Tab switches field, Enter saves, Esc cancels",
                self.theme.dim_style(),
            )),
        ];

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .title(" Add Custom Exercise ")
                .borders(Borders::ALL)
                .border_style(self.theme.focused_border_style())
                .title_style(self.theme.title_style()),
        );
        frame.render_widget(paragraph, popup_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_fields_cycle() {
        assert_eq!(FormField::Weight.next(), FormField::Reps);
        assert_eq!(FormField::Reps.next(), FormField::Weight);
    }

    #[test]
    fn test_weight_accepts_decimal_point() {
        let mut state = FormState {
            weight: String::new(),
            ..FormState::default()
        };
        for c in "62.5".chars() {
            state.push_char(c);
        }
        assert_eq!(state.weight, "62.5");
    }

    #[test]
    fn test_reps_rejects_non_digits() {
        let mut state = FormState {
            field: FormField::Reps,
            ..FormState::default()
        };
        for c in "1a.2".chars() {
            state.push_char(c);
        }
        assert_eq!(state.reps, "12");
    }

    #[test]
    fn test_pop_char_edits_focused_field() {
        let mut state = FormState {
            field: FormField::Reps,
            reps: "12".to_string(),
            ..FormState::default()
        };
        state.pop_char();
        assert_eq!(state.reps, "1");
        assert_eq!(state.weight, "0");
    }

    #[test]
    fn test_add_exercise_state_routes_input() {
        let mut state = AddExerciseState::default();
        state.push_char('A');
        state.toggle_field();
        state.push_char('B');
        assert_eq!(state.category, "A");
        assert_eq!(state.name, "B");

        state.pop_char();
        assert_eq!(state.name, "");
        assert_eq!(state.category, "A");
    }
}
