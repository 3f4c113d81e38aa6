use clap::ValueEnum;

/// Output style for rendered tables.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum Style {
    #[default]
    Grid,
    Plain,
    Markdown,
}

/// Renders `headers` and `rows` as a text table in the given style.
///
/// Column widths are sized to the longest cell in each column. Rows shorter
/// than the header are padded with empty cells.
#[must_use]
pub fn render(style: Style, headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let mut out = String::new();
    match style {
        Style::Grid => {
            let rule = grid_rule(&widths);
            out.push_str(&rule);
            out.push_str(&grid_row(headers.iter().map(|h| h.to_string()), &widths));
            out.push_str(&rule);
            for row in rows {
                out.push_str(&grid_row(row.iter().cloned(), &widths));
            }
            out.push_str(&rule);
        }
        Style::Plain => {
            out.push_str(&plain_row(headers.iter().map(|h| h.to_string()), &widths));
            for row in rows {
                out.push_str(&plain_row(row.iter().cloned(), &widths));
            }
        }
        Style::Markdown => {
            out.push_str(&grid_row(headers.iter().map(|h| h.to_string()), &widths));
            let dashes: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
            out.push_str(&grid_row(dashes.into_iter(), &widths));
            for row in rows {
                out.push_str(&grid_row(row.iter().cloned(), &widths));
            }
        }
    }
    out
}

fn grid_rule(widths: &[usize]) -> String {
    let mut line = String::from("+");
    for &w in widths {
        line.push_str(&"-".repeat(w + 2));
        line.push('+');
    }
    line.push('\n');
    line
}

fn grid_row(cells: impl Iterator<Item = String>, widths: &[usize]) -> String {
    let mut line = String::from("|");
    let mut cells = cells.chain(std::iter::repeat(String::new()));
    for &w in widths {
        let cell = cells.next().unwrap_or_default();
        line.push_str(&format!(" {cell:w$} |"));
    }
    line.push('\n');
    line
}

fn plain_row(cells: impl Iterator<Item = String>, widths: &[usize]) -> String {
    let mut cells = cells.chain(std::iter::repeat(String::new()));
    let mut parts = Vec::with_capacity(widths.len());
    for &w in widths {
        let cell = cells.next().unwrap_or_default();
        parts.push(format!("{cell:w$}"));
    }
    let mut line = parts.join("  ").trim_end().to_string();
    line.push('\n');
    line
}
