//! Terminal and JSON output.
//!
//! Terminal output is laid out in display columns (East Asian wide
//! characters count twice) and styled with `console`; styling is dropped
//! automatically when stdout is not a terminal.

use std::io::{self, Write};

use console::Style;
use gridscope_host::{ExplorerSession, RecordSnapshot};
use gridscope_seeker::{highlight, normalize_with, operators_for, Field, FilterCondition, Locale, Record};
use serde::Serialize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Widest a table column grows before its cells are truncated.
pub const MAX_COLUMN_WIDTH: usize = 32;

const GAP: &str = "  ";
const EMPTY_CELL: &str = "-";

/// Styles applied to terminal output.
#[derive(Debug, Clone)]
pub struct Styles {
    pub header: Style,
    pub matched: Style,
    pub muted: Style,
}

impl Styles {
    /// Default styles; `highlight` controls marking of search matches.
    pub fn new(highlight: bool) -> Self {
        Styles {
            header: Style::new().bold(),
            matched: if highlight {
                Style::new().black().on_yellow()
            } else {
                Style::new()
            },
            muted: Style::new().dim(),
        }
    }
}

/// Truncates a string to fit within a display width, adding "…" if cut.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

/// Right-pads a string with spaces to a display width.
pub fn pad_to_width(s: &str, width: usize) -> String {
    let mut padded = s.to_string();
    padded.push_str(&" ".repeat(width.saturating_sub(s.width())));
    padded
}

/// Single-line display text of one cell.
pub fn cell_text(record: &Record, field: &Field, locale: &Locale) -> String {
    let text = normalize_with(record.value(&field.id), field.field_type, locale);
    text.split(['\n', '\r']).collect::<Vec<_>>().join(" ")
}

/// Writes rows as aligned columns under a bold header.
///
/// Cells are marked where they contain `query`. Trailing padding is
/// omitted from the last column.
pub fn write_grid<W: Write>(
    out: &mut W,
    headers: &[String],
    rows: &[Vec<String>],
    query: &str,
    styles: &Styles,
) -> io::Result<()> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }
    for width in &mut widths {
        *width = (*width).min(MAX_COLUMN_WIDTH);
    }
    let last = widths.len().saturating_sub(1);

    let mut line = String::new();
    for (i, (header, width)) in headers.iter().zip(&widths).enumerate() {
        let text = truncate_to_width(header, *width);
        let text = if i == last { text } else { pad_to_width(&text, *width) };
        line.push_str(&styles.header.apply_to(text).to_string());
        if i != last {
            line.push_str(GAP);
        }
    }
    writeln!(out, "{}", line)?;

    for row in rows {
        let mut line = String::new();
        for (i, (cell, width)) in row.iter().zip(&widths).enumerate() {
            let text = truncate_to_width(cell, *width);
            for segment in highlight(&text, query) {
                if segment.highlighted {
                    line.push_str(&styles.matched.apply_to(segment.text).to_string());
                } else {
                    line.push_str(segment.text);
                }
            }
            if i != last {
                line.push_str(&" ".repeat(width.saturating_sub(text.width())));
                line.push_str(GAP);
            }
        }
        writeln!(out, "{}", line.trim_end())?;
    }
    Ok(())
}

/// Writes the current page of a session: rows, then summary and pager.
pub fn write_table<W: Write>(out: &mut W, session: &ExplorerSession, styles: &Styles) -> io::Result<()> {
    let locale = session.seeker().locale();
    let fields = session.fields();
    let page = session.page();

    if page.is_empty() {
        writeln!(out, "{}", styles.muted.apply_to("No records to show."))?;
    } else {
        let headers: Vec<String> = fields.iter().map(|f| f.name.clone()).collect();
        let rows: Vec<Vec<String>> = page
            .iter()
            .map(|record| fields.iter().map(|f| cell_text(record, f, locale)).collect())
            .collect();
        write_grid(out, &headers, &rows, session.query(), styles)?;
    }

    writeln!(out)?;
    if let Some(summary) = session.summary() {
        writeln!(out, "{}", summary)?;
    }
    let pagination = session.pagination();
    writeln!(
        out,
        "{}",
        styles.muted.apply_to(format!(
            "Page {} of {} ({} per page, {} total)",
            pagination.current,
            session.page_count().max(1),
            pagination.page_size,
            session.snapshot().total
        ))
    )?;
    Ok(())
}

/// Writes every field of one record, one per line.
pub fn write_record<W: Write>(
    out: &mut W,
    snapshot: &RecordSnapshot,
    locale: &Locale,
    styles: &Styles,
) -> io::Result<()> {
    writeln!(out, "{}", styles.header.apply_to(format!("Record {}", snapshot.record.id)))?;

    let label_width = snapshot
        .fields
        .iter()
        .map(|f| f.name.width())
        .max()
        .unwrap_or(0);
    for field in &snapshot.fields {
        let text = cell_text(&snapshot.record, field, locale);
        let value = if text.is_empty() {
            styles.muted.apply_to(EMPTY_CELL.to_string()).to_string()
        } else {
            text
        };
        writeln!(
            out,
            "{}{}{}",
            styles.muted.apply_to(pad_to_width(&field.name, label_width)),
            GAP,
            value
        )?;
    }
    Ok(())
}

/// Writes the field list with type and filter operators.
pub fn write_fields<W: Write>(out: &mut W, fields: &[Field], styles: &Styles) -> io::Result<()> {
    let headers = ["ID", "NAME", "TYPE", "OPERATORS"].map(String::from);
    let rows: Vec<Vec<String>> = fields
        .iter()
        .map(|field| {
            let operators: Vec<&str> = operators_for(field.field_type)
                .iter()
                .map(|op| op.as_str())
                .collect();
            vec![
                field.id.clone(),
                field.name.clone(),
                field.field_type.to_string(),
                operators.join(", "),
            ]
        })
        .collect();
    write_grid(out, &headers, &rows, "", styles)
}

/// JSON form of a table page.
#[derive(Debug, Serialize)]
pub struct TablePage<'a> {
    pub table_id: &'a str,
    pub view_id: &'a str,
    pub query: &'a str,
    pub filters: &'a [FilterCondition],
    pub count: usize,
    pub page: usize,
    pub page_size: usize,
    pub page_count: usize,
    pub records: Vec<&'a Record>,
}

impl<'a> TablePage<'a> {
    pub fn new(session: &'a ExplorerSession) -> Self {
        let pagination = session.pagination();
        TablePage {
            table_id: &session.snapshot().table_id,
            view_id: &session.snapshot().view_id,
            query: session.query(),
            filters: session.filters(),
            count: session.results().count,
            page: pagination.current,
            page_size: pagination.page_size,
            page_count: session.page_count(),
            records: session.page(),
        }
    }
}

/// Writes any serializable value as pretty JSON plus a newline.
pub fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridscope_seeker::FieldType;

    #[test]
    fn truncates_by_display_width() {
        assert_eq!(truncate_to_width("hello", 10), "hello");
        assert_eq!(truncate_to_width("hello world", 8), "hello w…");
        assert_eq!(truncate_to_width("東京タワー", 6), "東京…");
        assert_eq!(truncate_to_width("abc", 0), "…");
    }

    #[test]
    fn pads_by_display_width() {
        assert_eq!(pad_to_width("ab", 4), "ab  ");
        assert_eq!(pad_to_width("東京", 6), "東京  ");
        assert_eq!(pad_to_width("toolong", 3), "toolong");
    }

    #[test]
    fn cells_render_on_one_line() {
        let field = Field::new("notes", "Notes", FieldType::Text);
        let record = Record::new("r1").with("notes", "line one\nline two");
        assert_eq!(cell_text(&record, &field, &Locale::default()), "line one line two");
    }

    #[test]
    fn grid_aligns_columns() {
        let headers = vec!["Title".to_string(), "Score".to_string()];
        let rows = vec![
            vec!["Fix".to_string(), "3".to_string()],
            vec!["Release 東京".to_string(), "".to_string()],
        ];
        let mut out = Vec::new();
        write_grid(&mut out, &headers, &rows, "", &Styles::new(false)).unwrap();

        let text = String::from_utf8(out).unwrap();
        let text = console::strip_ansi_codes(&text);
        let expected = format!(
            "Title{}Score\nFix{}3\nRelease 東京\n",
            " ".repeat(9),
            " ".repeat(11)
        );
        assert_eq!(text, expected);
    }
}
