use scenario_core::ViewWindow;
use scenario_core::view::format_fraction;

pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const TIME_WIDTH: usize = 19;
const VALUE_MIN_WIDTH: usize = 8;
const VALUE_MAX_WIDTH: usize = 16;

pub struct TableFormatter {
    time_width: usize,
    value_widths: Vec<usize>,
}

impl TableFormatter {
    pub fn new(window: &ViewWindow) -> Self {
        let value_widths = window
            .columns
            .iter()
            .map(|c| c.chars().count().clamp(VALUE_MIN_WIDTH, VALUE_MAX_WIDTH)) // Fits "-100.25%"
            .collect();

        Self {
            time_width: TIME_WIDTH,
            value_widths,
        }
    }

    pub fn print_table(&self, window: &ViewWindow) {
        for line in self.render(window) {
            println!("{}", line);
        }
    }

    pub fn render(&self, window: &ViewWindow) -> Vec<String> {
        let mut lines = Vec::with_capacity(window.records.len() + 4);

        lines.push(self.border('┌', '┬', '┐'));
        let mut header = vec!["Time".to_string()];
        header.extend(window.columns.iter().cloned());
        lines.push(self.row(&header));
        lines.push(self.border('├', '┼', '┤'));

        for record in &window.records {
            let mut cells = vec![record.timestamp.format(TIME_FORMAT).to_string()];
            cells.extend(
                window
                    .columns
                    .iter()
                    .map(|c| record.value(c).map(format_fraction).unwrap_or_default()),
            );
            lines.push(self.row(&cells));
        }

        lines.push(self.border('└', '┴', '┘'));
        lines
    }

    fn widths(&self) -> impl Iterator<Item = usize> + '_ {
        std::iter::once(self.time_width).chain(self.value_widths.iter().copied())
    }

    fn border(&self, left: char, mid: char, right: char) -> String {
        let segments: Vec<String> = self.widths().map(|w| "─".repeat(w + 2)).collect();
        format!("{}{}{}", left, segments.join(mid.to_string().as_str()), right)
    }

    fn row(&self, cells: &[String]) -> String {
        let cells: Vec<String> = self
            .widths()
            .zip(cells)
            .map(|(width, cell)| truncate(cell, width))
            .collect();
        format!("│ {} │", cells.join(" │ "))
    }
}

/// Truncate a string to a maximum display width, adding "..." if truncated.
///
/// Uses character count (not byte count) to safely handle UTF-8 strings.
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        format!("{:<width$}", s, width = max_len)
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{:<width$}", format!("{}...", truncated), width = max_len)
    }
}
