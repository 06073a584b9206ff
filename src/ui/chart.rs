//! Chart widgets for the Progress screen.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use super::theme::Theme;
use crate::data::analytics::ProgressPoint;

/// Per-exercise progress: reps, weight, and volume per day as three stacked
/// line charts sharing the date axis.
pub struct ProgressChart<'a> {
    points: &'a [ProgressPoint],
    exercise: &'a str,
    theme: &'a Theme,
}

impl<'a> ProgressChart<'a> {
    pub fn new(points: &'a [ProgressPoint], exercise: &'a str, theme: &'a Theme) -> Self {
        ProgressChart {
            points,
            exercise,
            theme,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        if self.points.is_empty() {
            render_empty(
                frame,
                area,
                &format!(" Progress: {} ", self.exercise),
                "No data to plot for this exercise.",
                self.theme,
                focused,
            );
            return;
        }

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(area);

        let origin = self.points[0].date;
        let day_of = |p: &ProgressPoint| (p.date - origin).num_days() as f64;

        let series: [(&str, Vec<(f64, f64)>); 3] = [
            (
                "Reps",
                self.points
                    .iter()
                    .map(|p| (day_of(p), f64::from(p.reps)))
                    .collect(),
            ),
            (
                "Weight (kg)",
                self.points.iter().map(|p| (day_of(p), p.weight)).collect(),
            ),
            (
                "Volume (kg)",
                self.points.iter().map(|p| (day_of(p), p.volume)).collect(),
            ),
        ];

        let first = self.points[0].date;
        let last = self.points[self.points.len() - 1].date;

        for (i, (label, data)) in series.iter().enumerate() {
            let title = if i == 0 {
                format!(" Progress: {} / {} ", self.exercise, label)
            } else {
                format!(" {label} ")
            };
            self.render_series(frame, rows[i], &title, data, i, first, last, focused);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn render_series(
        &self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        data: &[(f64, f64)],
        color_index: usize,
        first: chrono::NaiveDate,
        last: chrono::NaiveDate,
        focused: bool,
    ) {
        let x_min = 0.0;
        let mut x_max = data.last().map(|(x, _)| *x).unwrap_or(0.0);
        if x_max <= x_min {
            x_max = x_min + 1.0;
        }

        let mut y_min = f64::MAX;
        let mut y_max = f64::MIN;
        for (_, y) in data {
            y_min = y_min.min(*y);
            y_max = y_max.max(*y);
        }
        if y_min >= y_max {
            y_max = y_min + 1.0;
        }
        let padding = (y_max - y_min) * 0.05;
        y_min -= padding;
        y_max += padding;

        let dataset = Dataset::default()
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(self.theme.chart_color(color_index)))
            .data(data);

        let x_labels = vec![
            Span::raw(first.to_string()),
            Span::raw(last.to_string()),
        ];
        let y_labels = vec![
            Span::raw(format_value(y_min)),
            Span::raw(format_value((y_min + y_max) / 2.0)),
            Span::raw(format_value(y_max)),
        ];

        let chart = Chart::new(vec![dataset])
            .block(
                Block::default()
                    .title(title.to_string())
                    .borders(Borders::ALL)
                    .border_style(self.theme.panel_border(focused))
                    .title_style(self.theme.title_style()),
            )
            .x_axis(
                Axis::default()
                    .style(self.theme.normal_style())
                    .bounds([x_min, x_max])
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .style(self.theme.normal_style())
                    .bounds([y_min, y_max])
                    .labels(y_labels),
            );

        frame.render_widget(chart, area);
    }
}

/// Bar chart for the labeled aggregates (consistency, category distribution,
/// top exercises).
pub struct RankingChart<'a> {
    title: &'a str,
    bars: Vec<(String, u64)>,
    theme: &'a Theme,
}

impl<'a> RankingChart<'a> {
    pub fn new(title: &'a str, bars: Vec<(String, u64)>, theme: &'a Theme) -> Self {
        RankingChart { title, bars, theme }
    }

    /// Round float totals for display; bar heights don't need fractions.
    pub fn from_totals(title: &'a str, totals: &[(String, f64)], theme: &'a Theme) -> Self {
        let bars = totals
            .iter()
            .map(|(label, value)| (label.clone(), value.round() as u64))
            .collect();
        RankingChart::new(title, bars, theme)
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        if self.bars.is_empty() {
            render_empty(
                frame,
                area,
                &format!(" {} ", self.title),
                "No data available.",
                self.theme,
                focused,
            );
            return;
        }

        let count = self.bars.len() as u16;
        let inner_width = area.width.saturating_sub(2);
        let bar_width = (inner_width / count.max(1)).saturating_sub(1).clamp(3, 14);

        let bars: Vec<Bar> = self
            .bars
            .iter()
            .enumerate()
            .map(|(i, (label, value))| {
                Bar::default()
                    .value(*value)
                    .label(Line::from(label.as_str()))
                    .style(Style::default().fg(self.theme.chart_color(i)))
            })
            .collect();

        let chart = BarChart::default()
            .block(
                Block::default()
                    .title(format!(" {} ", self.title))
                    .borders(Borders::ALL)
                    .border_style(self.theme.panel_border(focused))
                    .title_style(self.theme.title_style()),
            )
            .bar_width(bar_width)
            .bar_gap(1)
            .data(BarGroup::default().bars(&bars));

        frame.render_widget(chart, area);
    }
}

/// One-line selector showing the available progress views
pub struct ViewSelector<'a> {
    views: &'a [&'a str],
    selected: usize,
    hint: &'a str,
    theme: &'a Theme,
}

impl<'a> ViewSelector<'a> {
    pub fn new(views: &'a [&'a str], selected: usize, hint: &'a str, theme: &'a Theme) -> Self {
        ViewSelector {
            views,
            selected,
            hint,
            theme,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let mut spans: Vec<Span> = vec![Span::styled("[v] ", self.theme.dim_style())];
        for (i, name) in self.views.iter().enumerate() {
            let style = if i == self.selected {
                self.theme.highlight_style()
            } else {
                self.theme.normal_style()
            };
            spans.push(Span::styled(format!("{name}  "), style));
        }
        spans.push(Span::styled(self.hint.to_string(), self.theme.dim_style()));

        let paragraph = Paragraph::new(Line::from(spans)).style(self.theme.normal_style());
        frame.render_widget(paragraph, area);
    }
}

fn render_empty(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    message: &str,
    theme: &Theme,
    focused: bool,
) {
    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(theme.panel_border(focused))
        .title_style(theme.title_style());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let paragraph = Paragraph::new(message.to_string())
        .style(theme.dim_style())
        .alignment(ratatui::layout::Alignment::Center);
    frame.render_widget(paragraph, inner);
}

/// Format a value for display on axis labels
pub fn format_value(value: f64) -> String {
    if value.abs() < 0.001 && value != 0.0 {
        format!("{value:.2e}")
    } else if value.abs() >= 1000.0 {
        format!("{value:.2e}")
    } else if value.abs() >= 1.0 {
        format!("{value:.2}")
    } else {
        format!("{value:.4}")
    }
}
