//! Aligned text-table layout for report data.

use std::collections::HashSet;

/// Layout options for [`format_table`].
#[derive(Debug, Clone, Default)]
pub struct TableOptions {
    /// Spaces between adjacent columns
    pub spacing: usize,
    /// Indexes of columns to right-align
    pub right_align: HashSet<usize>,
    /// Cap on the number of rendered lines; the last kept line becomes a
    /// "[k more]" marker when rows exceed it
    pub max_lines: Option<usize>,
}

impl TableOptions {
    pub fn new(spacing: usize) -> Self {
        Self {
            spacing,
            ..Default::default()
        }
    }

    /// Right-align the column at `col`.
    pub fn right_align(mut self, col: usize) -> Self {
        self.right_align.insert(col);
        self
    }

    /// Cap output at `max` lines.
    pub fn max_lines(mut self, max: usize) -> Self {
        self.max_lines = Some(max);
        self
    }
}

/// Lays out `rows` as aligned text lines, one line per row.
///
/// Column widths are the maximum cell width (in code points) across all
/// rows. Rows may have differing column counts; absent cells contribute
/// nothing to a column's width or that row's rendering. Columns whose every
/// cell is empty are omitted entirely. Lines never carry trailing spaces.
pub fn format_table(rows: &[Vec<String>], opts: &TableOptions) -> Vec<String> {
    if rows.is_empty() {
        return Vec::new();
    }

    // Find the maximum width of each column.
    let cols = rows.iter().map(|row| row.len()).max().unwrap_or(0);
    let mut widths = vec![0usize; cols];
    for row in rows {
        for (j, val) in row.iter().enumerate() {
            widths[j] = widths[j].max(val.chars().count());
        }
    }

    let mut lines = Vec::with_capacity(rows.len());
    for row in rows {
        // Last column of this row that is rendered at all; left-aligned
        // cells in it stay unpadded so lines don't end in spaces.
        let last = row
            .iter()
            .enumerate()
            .rev()
            .find(|(j, _)| widths[*j] > 0)
            .map(|(j, _)| j);

        let mut line = String::new();
        for (j, val) in row.iter().enumerate() {
            let width = widths[j];
            if width == 0 {
                continue; // skip completely-empty columns
            }
            if opts.right_align.contains(&j) {
                line.push_str(&format!("{val:>width$}"));
            } else if Some(j) != last {
                line.push_str(&format!("{val:<width$}"));
            } else {
                line.push_str(val);
            }
            if Some(j) != last {
                line.push_str(&" ".repeat(opts.spacing));
            }
        }
        // Padding before an empty trailing cell (or whitespace inside one)
        // would otherwise survive here.
        line.truncate(line.trim_end_matches(' ').len());
        lines.push(line);
    }

    if let Some(max) = opts.max_lines
        && max > 0
        && lines.len() > max
    {
        let dropped = lines.len() - max + 1;
        lines.truncate(max);
        lines[max - 1] = format!("[{dropped} more]");
    }

    lines
}
