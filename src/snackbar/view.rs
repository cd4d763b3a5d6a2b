//! View rendering for the snackbar component.

use super::model::Model;
use super::types::State;
use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const GAP: &str = "  ";
const ELLIPSIS: char = '…';

/// Styles for the parts of a snackbar.
#[derive(Debug, Clone)]
pub struct Styles {
    /// The bar while fully open.
    pub surface: Style,
    /// The bar while waiting for its opening frame.
    pub opening: Style,
    /// The message text.
    pub label: Style,
    /// The action control.
    pub action: Style,
    /// The dismiss control.
    pub dismiss: Style,
}

impl Default for Styles {
    /// An inverted surface that reads well on light and dark terminals, with
    /// the action control highlighted.
    fn default() -> Self {
        use lipgloss::AdaptiveColor;

        let surface = Style::new()
            .foreground(AdaptiveColor {
                Light: "#F2F2F2",
                Dark: "#1E1E1E",
            })
            .background(AdaptiveColor {
                Light: "#333333",
                Dark: "#DDDDDD",
            });

        Self {
            opening: surface.clone().faint(true),
            surface,
            label: Style::new(),
            action: Style::new().bold(true).foreground(AdaptiveColor {
                Light: "#BB86FC",
                Dark: "#6200EE",
            }),
            dismiss: Style::new().faint(true),
        }
    }
}

impl Styles {
    /// Styles that add no escape sequences.
    pub fn plain() -> Self {
        Self {
            surface: Style::new(),
            opening: Style::new(),
            label: Style::new(),
            action: Style::new(),
            dismiss: Style::new(),
        }
    }
}

// A rendered run of text and its width in terminal columns.
struct Row {
    text: String,
    width: usize,
}

impl Row {
    fn styled(style: &Style, plain: &str) -> Self {
        Self {
            text: style.render(plain),
            width: plain.width(),
        }
    }

    fn join(mut self, other: Row) -> Self {
        self.text.push_str(GAP);
        self.text.push_str(&other.text);
        self.width += GAP.len() + other.width;
        self
    }
}

impl Model {
    /// Renders the snackbar.
    ///
    /// Closed snackbars render as an empty string. When `width` is set each
    /// line is padded to `width` columns, and the label is truncated with an
    /// ellipsis when it does not fit.
    pub fn view(&self) -> String {
        let surface = match self.state() {
            State::Opening => &self.styles.opening,
            State::Open => &self.styles.surface,
            State::Closed | State::Closing => return String::new(),
        };

        let controls = self.controls_row();
        let controls_width = controls.as_ref().map_or(0, |row| row.width);

        let label_room = if self.width == 0 {
            usize::MAX
        } else if self.stacked() || controls.is_none() {
            self.width.saturating_sub(2)
        } else {
            self.width.saturating_sub(2 + controls_width + GAP.len())
        };
        let label = Row::styled(&self.styles.label, &truncate(self.label_text(), label_room));

        let rows = match controls {
            None => vec![label],
            Some(controls) if self.stacked() => vec![label, controls],
            Some(controls) => vec![label.join(controls)],
        };

        let inner = rows.iter().map(|row| row.width).max().unwrap_or(0);
        let bar_width = inner + 2;
        let margin = if self.leading() || self.width <= bar_width {
            0
        } else {
            (self.width - bar_width) / 2
        };

        // Pad to the full width so every line covers the same columns.
        let trailing = self.width.saturating_sub(margin + bar_width);

        let stacked = self.stacked();
        rows.into_iter()
            .enumerate()
            .map(|(i, row)| {
                let fill = " ".repeat(inner - row.width);
                // Stacked controls sit at the trailing edge.
                let line = if stacked && i > 0 {
                    format!(" {}{} ", fill, row.text)
                } else {
                    format!(" {}{} ", row.text, fill)
                };
                format!(
                    "{}{}{}",
                    " ".repeat(margin),
                    surface.render(&line),
                    " ".repeat(trailing)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn controls_row(&self) -> Option<Row> {
        let action = self
            .action_label()
            .map(|label| Row::styled(&self.styles.action, label));
        let dismiss = self
            .dismiss_label()
            .map(|label| Row::styled(&self.styles.dismiss, label));

        match (action, dismiss) {
            (Some(action), Some(dismiss)) => Some(action.join(dismiss)),
            (action, dismiss) => action.or(dismiss),
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push(ELLIPSIS);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello", 5), "hello");
        assert_eq!(truncate("hello", 4), "hel…");
        assert_eq!(truncate("hello", 1), "…");
        assert_eq!(truncate("hello", 0), "");
    }

    #[test]
    fn test_truncate_wide_characters() {
        // Each of these takes two columns.
        assert_eq!(truncate("日本語", 5), "日本…");
        assert_eq!(truncate("日本語", 4), "日…");
    }
}
