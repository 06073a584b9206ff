//! Help overlay widget showing keyboard shortcuts.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::theme::Theme;

/// Help overlay showing all keyboard shortcuts
pub struct HelpOverlay<'a> {
    theme: &'a Theme,
}

impl<'a> HelpOverlay<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        HelpOverlay { theme }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        // Center the help popup
        let popup_area = super::centered_rect(65, 85, area);

        // Clear the background
        frame.render_widget(Clear, popup_area);

        const DESCRIPTION: &str = "A terminal workout logger. Record sets on the Log screen, browse past days on the History screen, and chart your training on the Progress screen.";

        let shortcuts = [
            (
                "Screens",
                vec![
                    ("Tab", "Next screen (Log, History, Progress)"),
                    ("1 / 2 / 3", "Jump to a screen"),
                ],
            ),
            (
                "Log",
                vec![
                    ("j / k", "Move in list or between form fields"),
                    ("Enter / l", "Move right / save the set from the form"),
                    ("Esc / h", "Move focus left"),
                    ("/", "Search exercises"),
                    ("a", "Add a custom exercise"),
                    ("[ / ] / t", "Previous day / next day / today"),
                ],
            ),
            (
                "Progress",
                vec![
                    ("v", "Cycle chart (progress, consistency, categories, top)"),
                    ("j / k", "Change charted exercise"),
                    ("p", "Toggle week/month grouping"),
                    ("m", "Toggle sets/volume measure"),
                    ("+ / -", "More / fewer top exercises"),
                ],
            ),
            (
                "General",
                vec![
                    ("e / x", "Export the log to CSV / XLSX"),
                    ("r", "Reload data"),
                    ("?", "Toggle this help"),
                    ("q", "Quit"),
                ],
            ),
        ];

        let mut lines: Vec<Line> = Vec::new();

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {DESCRIPTION}"),
            Style::default().add_modifier(Modifier::ITALIC),
        )));
        lines.push(Line::from(""));

        for (section, items) in shortcuts {
            lines.push(Line::from(Span::styled(
                format!("  {section} "),
                Style::default()
                    .add_modifier(Modifier::BOLD)
                    .add_modifier(Modifier::UNDERLINED),
            )));
            lines.push(Line::from(""));

            for (key, desc) in items {
                lines.push(Line::from(vec![
                    Span::raw("    "),
                    Span::styled(format!("{key:<14}"), Style::default().fg(self.theme.title)),
                    Span::raw(desc),
                ]));
            }
            lines.push(Line::from(""));
        }

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .title(" irontrack Help ")
                    .title_alignment(Alignment::Center)
                    .borders(Borders::ALL)
                    .border_style(self.theme.border_style())
                    .title_style(self.theme.title_style()),
            )
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: false });

        frame.render_widget(paragraph, popup_area);
    }
}
