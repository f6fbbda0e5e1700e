//! reStructuredText grid-table rendering.
//!
//! ```text
//! +------+---------+
//! | Test | bi μ    |
//! +======+=========+
//! | a    | 1.50 ns |
//! +------+---------+
//! ```
//!
//! Column widths are measured in characters, so `μ` and `±` occupy one cell.

fn width(cell: &str) -> usize {
    cell.chars().count()
}

fn border(widths: &[usize], fill: char) -> String {
    let mut line = String::from("+");
    for w in widths {
        line.extend(std::iter::repeat(fill).take(w + 2));
        line.push('+');
    }
    line
}

fn row_line(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::from("|");
    for (i, &w) in widths.iter().enumerate() {
        let cell = cells.get(i).map(String::as_str).unwrap_or("");
        // `{:<w$}` pads by char count, matching `width`.
        line.push_str(&format!(" {cell:<w$} |"));
    }
    line
}

/// Render the first row as the header and the rest as body rows.
///
/// Rows shorter than the widest row are padded with empty cells.
pub fn render_grid(rows: &[Vec<String>]) -> String {
    let Some((header, body)) = rows.split_first() else {
        return String::new();
    };

    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0usize; columns];
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(width(cell));
        }
    }

    let rule = border(&widths, '-');
    let mut out = String::new();
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&row_line(header, &widths));
    out.push('\n');
    out.push_str(&border(&widths, '='));
    out.push('\n');
    for row in body {
        out.push_str(&row_line(row, &widths));
        out.push('\n');
        out.push_str(&rule);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn renders_grid_with_header_rule() {
        let out = render_grid(&rows(&[&["Test", "bi μ"], &["small", "1.50 ns"]]));
        let expected = "\
+-------+---------+
| Test  | bi μ    |
+=======+=========+
| small | 1.50 ns |
+-------+---------+
";
        assert_eq!(out, expected);
    }

    #[test]
    fn every_line_has_equal_char_width() {
        let out = render_grid(&rows(&[
            &["Test", "bi μ", "95% ±", "mu-x64"],
            &["long-test-name", "1,500.00 ns", "0.02 ns", "-2.00 x"],
            &["t", "1.00 s"],
        ]));
        let widths: Vec<usize> = out.lines().map(|l| l.chars().count()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "{out}");
        assert_eq!(out.lines().count(), 7);
    }

    #[test]
    fn empty_input_renders_nothing() {
        assert_eq!(render_grid(&[]), "");
    }
}
