use crate::types::TechRow;
use std::fmt::Write as _;

pub const EMPTY_MESSAGE: &str = "No technology files found in the repository.";

const RULE_WIDTH: usize = 60;
const LABEL_W: usize = 25;
const LINES_W: usize = 12;
const PERCENT_W: usize = 10;
// One bar cell per two percentage points: 100% renders 50 cells.
const PERCENT_PER_CELL: f64 = 2.0;
const BAR_CELL: char = '█';

/// Renders the usage table. Rows are printed in the order given.
pub fn render(rows: &[TechRow]) -> String {
    if rows.is_empty() {
        return EMPTY_MESSAGE.to_string();
    }
    let total: u64 = rows.iter().map(|r| r.lines).sum();
    let heavy = "=".repeat(RULE_WIDTH);

    let mut lines = Vec::with_capacity(rows.len() + 9);
    lines.push(heavy.clone());
    lines.push("Technology Usage Analysis".to_string());
    lines.push(heavy.clone());
    lines.push(String::new());
    lines.push(format!("Total lines of code: {}", format_num(total)));
    lines.push(String::new());
    lines.push(format!(
        "{:<LABEL_W$} {:<LINES_W$} {:<PERCENT_W$}",
        "Technology", "Lines", "Percentage"
    ));
    lines.push("-".repeat(RULE_WIDTH));
    for row in rows {
        lines.push(format_row(row));
    }
    lines.push(heavy);

    lines.join("\n")
}

fn format_row(row: &TechRow) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "{:<LABEL_W$.LABEL_W$} {:<LINES_W$} {:>6.2}%  {}",
        row.label,
        format_num(row.lines),
        row.percent,
        bar(row.percent)
    );
    out
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn bar(percent: f64) -> String {
    let cells = (percent / PERCENT_PER_CELL).floor().max(0.0) as usize;
    std::iter::repeat_n(BAR_CELL, cells).collect()
}

/// Formats `n` with comma thousands separators.
pub fn format_num(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
