use colored::Colorize;

use crate::cli::{io, output};

/// Declarative description of a table column.
#[derive(Debug, Clone)]
pub struct TableColumn {
    pub header: &'static str,
    pub align: Align,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

impl TableColumn {
    pub const fn left(header: &'static str) -> Self {
        Self {
            header,
            align: Align::Left,
        }
    }

    pub const fn right(header: &'static str) -> Self {
        Self {
            header,
            align: Align::Right,
        }
    }
}

/// Read-only table; column widths are derived from the content.
#[derive(Debug, Clone)]
pub struct Table {
    pub title: Option<String>,
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(title: Option<String>, columns: Vec<TableColumn>) -> Self {
        Self {
            title,
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(idx))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(column.header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    /// Renders the header and rows as padded lines, without styling.
    pub fn lines(&self) -> Vec<String> {
        let widths = self.widths();
        let total = widths.iter().sum::<usize>() + widths.len().saturating_sub(1) * 2;
        let mut lines = Vec::with_capacity(self.rows.len() + 3);

        let headers: Vec<String> = self.columns.iter().map(|col| col.header.to_string()).collect();
        lines.push(self.render_row(&headers, &widths));
        lines.push("-".repeat(total.max(1)));
        for row in &self.rows {
            lines.push(self.render_row(row, &widths));
        }
        lines
    }

    fn render_row(&self, cells: &[String], widths: &[usize]) -> String {
        let mut line = String::new();
        for (idx, column) in self.columns.iter().enumerate() {
            if idx > 0 {
                line.push_str("  ");
            }
            let cell = cells.get(idx).map(String::as_str).unwrap_or("");
            let width = widths[idx];
            match column.align {
                Align::Left => line.push_str(&format!("{cell:<width$}")),
                Align::Right => line.push_str(&format!("{cell:>width$}")),
            }
        }
        line.trim_end().to_string()
    }

    pub fn print(&self) {
        if let Some(title) = &self.title {
            output::section(title);
        }
        let color = output::preferences().color_enabled;
        for (idx, line) in self.lines().into_iter().enumerate() {
            if idx == 0 && color {
                io::println_text(line.bold());
            } else {
                io::println_text(line);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_grow_to_fit_content() {
        let mut table = Table::new(
            None,
            vec![TableColumn::left("Name"), TableColumn::right("Total")],
        );
        table.add_row(vec!["Housing".into(), "$1200.00".into()]);
        table.add_row(vec!["Food".into(), "$8.50".into()]);

        let lines = table.lines();
        assert_eq!(lines[0], "Name        Total");
        assert_eq!(lines[1], "-----------------");
        assert_eq!(lines[2], "Housing  $1200.00");
        assert_eq!(lines[3], "Food        $8.50");
    }
}
