use unicode_width::UnicodeWidthStr;

/// Plain-text table drawn with light box characters
///
/// Headers are upper-cased and every row is separated by a rule.
#[derive(Clone, Debug, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            headers: headers
                .into_iter()
                .map(|h| h.as_ref().to_uppercase())
                .collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row; missing cells render empty, extra cells are dropped
    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row: Vec<String> = cells
            .into_iter()
            .take(self.headers.len())
            .map(Into::into)
            .collect();
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    pub fn render(&self) -> String {
        let widths = self.column_widths();
        let mut out = String::new();

        push_rule(&mut out, &widths, '┌', '┬', '┐');
        push_cells(&mut out, &widths, &self.headers);
        push_rule(&mut out, &widths, '├', '┼', '┤');

        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                push_rule(&mut out, &widths, '├', '┼', '┤');
            }
            push_cells(&mut out, &widths, row);
        }

        push_rule(&mut out, &widths, '└', '┴', '┘');
        out
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.width()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.width());
            }
        }
        widths
    }
}

fn push_rule(out: &mut String, widths: &[usize], left: char, mid: char, right: char) {
    out.push(left);
    for (i, width) in widths.iter().enumerate() {
        if i > 0 {
            out.push(mid);
        }
        out.extend(std::iter::repeat_n('─', width + 2));
    }
    out.push(right);
    out.push('\n');
}

fn push_cells(out: &mut String, widths: &[usize], cells: &[String]) {
    out.push('│');
    for (width, cell) in widths.iter().zip(cells) {
        out.push(' ');
        out.push_str(cell);
        out.extend(std::iter::repeat_n(' ', width - cell.width() + 1));
        out.push('│');
    }
    out.push('\n');
}
