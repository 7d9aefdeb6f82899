//! Colored terminal output

use anyhow::Result;
use termcolor::{Color, ColorSpec, WriteColor};

use crate::model::{Cell, Table};

use super::OutputFormatter;

/// Box-drawn table with a row-number column. Short rows leave trailing
/// columns blank, nulls print as a highlighted `NULL`, empty text as `""`.
pub struct TerminalOutput {
    null_color: ColorSpec,
    empty_color: ColorSpec,
}

impl TerminalOutput {
    pub fn new() -> Self {
        let mut null_color = ColorSpec::new();
        null_color.set_fg(Some(Color::Magenta)).set_italic(true);
        let mut empty_color = ColorSpec::new();
        empty_color.set_dimmed(true);
        Self {
            null_color,
            empty_color,
        }
    }

    fn write_border(
        &self,
        writer: &mut dyn WriteColor,
        widths: &[usize],
        (left, mid, right): (char, char, char),
    ) -> Result<()> {
        let mut line = String::new();
        line.push(left);
        for (i, width) in widths.iter().enumerate() {
            line.push_str(&"─".repeat(width + 2));
            if i < widths.len() - 1 {
                line.push(mid);
            }
        }
        line.push(right);
        writeln!(writer, "{}", line)?;
        Ok(())
    }

    fn write_line(
        &self,
        writer: &mut dyn WriteColor,
        widths: &[usize],
        texts: &[(String, Option<&ColorSpec>)],
    ) -> Result<()> {
        write!(writer, "│")?;
        for (i, width) in widths.iter().enumerate() {
            let (text, color) = texts
                .get(i)
                .map(|(t, c)| (t.as_str(), *c))
                .unwrap_or(("", None));
            write!(writer, " ")?;
            if let Some(spec) = color {
                writer.set_color(spec)?;
            }
            write!(writer, "{}", text)?;
            if color.is_some() {
                writer.reset()?;
            }
            let pad = width.saturating_sub(text.chars().count());
            write!(writer, "{} │", " ".repeat(pad))?;
        }
        writeln!(writer)?;
        Ok(())
    }

    fn cell_text(&self, cell: &Cell) -> (String, Option<&ColorSpec>) {
        match cell {
            Cell::Null => ("NULL".to_string(), Some(&self.null_color)),
            Cell::Text(s) if s.is_empty() => ("\"\"".to_string(), Some(&self.empty_color)),
            Cell::Text(s) => (escape_controls(s), None),
        }
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TerminalOutput {
    fn render(&self, table: &Table, writer: &mut dyn WriteColor) -> Result<()> {
        if table.is_empty() {
            writeln!(writer, "(no rows)")?;
            return Ok(());
        }

        // Build display data: row number column first
        let mut lines: Vec<Vec<(String, Option<&ColorSpec>)>> = Vec::with_capacity(table.row_count() + 1);
        let mut header = vec![("#".to_string(), None)];
        header.extend((1..=table.max_width()).map(|i| (i.to_string(), None)));
        lines.push(header);
        for (n, row) in table.iter().enumerate() {
            let mut line = vec![((n + 1).to_string(), None)];
            line.extend(row.iter().map(|c| self.cell_text(c)));
            lines.push(line);
        }

        let mut widths = vec![0; table.max_width() + 1];
        for line in &lines {
            for (i, (text, _)) in line.iter().enumerate() {
                widths[i] = widths[i].max(text.chars().count());
            }
        }

        self.write_border(writer, &widths, ('┌', '┬', '┐'))?;
        self.write_line(writer, &widths, &lines[0])?;
        self.write_border(writer, &widths, ('├', '┼', '┤'))?;
        for line in &lines[1..] {
            self.write_line(writer, &widths, line)?;
        }
        self.write_border(writer, &widths, ('└', '┴', '┘'))?;

        writeln!(
            writer,
            "{} rows, {} cells",
            table.row_count(),
            table.cell_count()
        )?;
        Ok(())
    }
}

/// Replace control characters with their escapes so they cannot break the layout
fn escape_controls(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_control() {
                c.escape_default().to_string()
            } else {
                c.to_string()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::render_plain;

    #[test]
    fn test_escape_controls() {
        assert_eq!(escape_controls("A\u{0}B\nC"), "A\\u{0}B\\nC");
        assert_eq!(escape_controls("🌎"), "🌎");
    }

    #[test]
    fn test_render_jagged() {
        let table = Table::from(vec![
            vec![Cell::text("Hello"), Cell::Null, Cell::text("")],
            vec![],
            vec![Cell::text("x")],
        ]);
        let out = render_plain(&TerminalOutput::new(), &table);
        let expected = "\
┌───┬───────┬──────┬────┐
│ # │ 1     │ 2    │ 3  │
├───┼───────┼──────┼────┤
│ 1 │ Hello │ NULL │ \"\" │
│ 2 │       │      │    │
│ 3 │ x     │      │    │
└───┴───────┴──────┴────┘
3 rows, 4 cells
";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_render_empty_table() {
        assert_eq!(render_plain(&TerminalOutput::new(), &Table::new()), "(no rows)\n");
    }
}
