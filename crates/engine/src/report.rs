// crates/engine/src/report.rs
//! Report serialization
//!
//! Rows are written to any [`Write`] sink. The delimited formats frame every
//! row with a three-part [`Delimiter`]: a leading string, a separator between
//! fields and a terminator after the last field. The column sets carry the
//! captions, display widths (in pixels, as used by list views) and alignment
//! for each report kind.

use crate::descriptor::CompileUnitRecord;
use crate::error::Result;
use crate::options::OutputFormat;
use crate::stats::{DirectoryStats, FileEntry};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub caption: &'static str,
    /// Display width in pixels.
    pub width: u32,
    pub alignment: Alignment,
}

const fn col(caption: &'static str, width: u32, alignment: Alignment) -> ColumnSpec {
    ColumnSpec {
        caption,
        width,
        alignment,
    }
}

/// Columns of the `Parse` project listing.
pub const PROJECT_COLUMNS: &[ColumnSpec] = &[
    col("project", 360, Alignment::Left),
    col("path", 650, Alignment::Left),
    col("type", 150, Alignment::Left),
    col("order", 110, Alignment::Right),
    col("cpp- file", 350, Alignment::Left),
    col("rows", 110, Alignment::Right),
    col("h- file", 280, Alignment::Left),
    col("rows", 110, Alignment::Right),
    col("form file", 350, Alignment::Left),
    col("form name", 340, Alignment::Left),
    col("rows", 110, Alignment::Right),
    col("formType", 150, Alignment::Left),
    col("designclass", 250, Alignment::Left),
];

/// Columns of the `Count` summary.
pub const COUNT_COLUMNS: &[ColumnSpec] = &[
    col("files", 450, Alignment::Right),
    col("directories", 450, Alignment::Right),
    col("size", 600, Alignment::Right),
];

/// Columns of the `Show` file listing.
pub const FILE_COLUMNS: &[ColumnSpec] = &[
    col("file", 1310, Alignment::Left),
    col("time", 265, Alignment::Left),
    col("size", 150, Alignment::Right),
];

/// Approximate pixels per character when rendering a text table.
const PIXELS_PER_CHAR: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiter {
    pub leading: &'static str,
    pub separator: &'static str,
    pub terminator: &'static str,
}

pub const TAB_DELIMITER: Delimiter = Delimiter {
    leading: "",
    separator: "\t",
    terminator: "\n",
};

pub const CSV_DELIMITER: Delimiter = Delimiter {
    leading: "",
    separator: ",",
    terminator: "\n",
};

/// A value that can be written as one report row.
pub trait ReportRow: Serialize {
    /// Field values in column order.
    fn fields(&self) -> Vec<String>;
}

fn opt(value: Option<&String>) -> String {
    value.cloned().unwrap_or_default()
}

impl ReportRow for CompileUnitRecord {
    fn fields(&self) -> Vec<String> {
        vec![
            self.project.clone(),
            self.project_path.clone(),
            self.node_type.clone(),
            self.build_order.to_string(),
            self.source_file.clone(),
            self.source_lines.to_string(),
            opt(self.header_file.as_ref()),
            self.header_lines.to_string(),
            opt(self.form_file.as_ref()),
            opt(self.form_name.as_ref()),
            self.form_lines.to_string(),
            opt(self.form_type.as_ref()),
            opt(self.design_class.as_ref()),
        ]
    }
}

/// `Count` output row; the size is already scaled to kilobytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CountSummary {
    pub files: u64,
    pub directories: u64,
    pub size_kb: u64,
}

impl From<&DirectoryStats> for CountSummary {
    fn from(stats: &DirectoryStats) -> Self {
        Self {
            files: stats.file_count,
            directories: stats.dir_count,
            size_kb: stats.total_kilobytes(),
        }
    }
}

impl ReportRow for CountSummary {
    fn fields(&self) -> Vec<String> {
        vec![
            self.files.to_string(),
            self.directories.to_string(),
            self.size_kb.to_string(),
        ]
    }
}

impl ReportRow for FileEntry {
    fn fields(&self) -> Vec<String> {
        vec![
            self.path.display().to_string(),
            self.modified
                .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_default(),
            self.size.to_string(),
        ]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportOptions {
    pub format: OutputFormat,
    /// Emit a caption row before delimited output.
    pub header: bool,
}

/// Write `rows` to `out` in the configured format.
///
/// # Errors
/// Returns an error if writing or serialization fails.
pub fn emit<W: Write, R: ReportRow>(
    out: &mut W,
    columns: &[ColumnSpec],
    rows: &[R],
    options: &ReportOptions,
) -> Result<()> {
    match options.format {
        OutputFormat::Tsv => emit_delimited(out, columns, rows, TAB_DELIMITER, options.header)?,
        OutputFormat::Csv => emit_delimited(out, columns, rows, CSV_DELIMITER, options.header)?,
        OutputFormat::Table => emit_table(out, columns, rows)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, rows)?;
            writeln!(out)?;
        }
        OutputFormat::Yaml => serde_yaml::to_writer(&mut *out, rows)?,
    }
    out.flush()?;
    Ok(())
}

/// Write a single row framed by `delimiter`.
///
/// # Errors
/// Returns an error if writing fails.
pub fn write_row<W: Write, S: AsRef<str>>(
    out: &mut W,
    delimiter: Delimiter,
    fields: &[S],
) -> std::io::Result<()> {
    out.write_all(delimiter.leading.as_bytes())?;
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.write_all(delimiter.separator.as_bytes())?;
        }
        out.write_all(field.as_ref().as_bytes())?;
    }
    out.write_all(delimiter.terminator.as_bytes())
}

fn emit_delimited<W: Write, R: ReportRow>(
    out: &mut W,
    columns: &[ColumnSpec],
    rows: &[R],
    delimiter: Delimiter,
    header: bool,
) -> std::io::Result<()> {
    let escape = |field: String| {
        if delimiter == CSV_DELIMITER {
            csv_escape(field)
        } else {
            field
        }
    };

    if header {
        let captions: Vec<String> = columns.iter().map(|c| escape(c.caption.to_string())).collect();
        write_row(out, delimiter, &captions)?;
    }
    for row in rows {
        let fields: Vec<String> = row.fields().into_iter().map(&escape).collect();
        write_row(out, delimiter, &fields)?;
    }
    Ok(())
}

fn csv_escape(field: String) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field
    }
}

fn emit_table<W: Write, R: ReportRow>(
    out: &mut W,
    columns: &[ColumnSpec],
    rows: &[R],
) -> std::io::Result<()> {
    let cells: Vec<Vec<String>> = rows.iter().map(ReportRow::fields).collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let widest = cells
                .iter()
                .filter_map(|r| r.get(i))
                .map(|v| v.chars().count())
                .max()
                .unwrap_or(0);
            widest
                .max(c.caption.chars().count())
                .max((c.width / PIXELS_PER_CHAR) as usize)
        })
        .collect();

    let captions: Vec<String> = columns.iter().map(|c| c.caption.to_string()).collect();
    write_table_line(out, columns, &widths, &captions)?;
    let rule_len = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    writeln!(out, "{}", "-".repeat(rule_len))?;

    for row in &cells {
        write_table_line(out, columns, &widths, row)?;
    }
    Ok(())
}

fn write_table_line<W: Write>(
    out: &mut W,
    columns: &[ColumnSpec],
    widths: &[usize],
    values: &[String],
) -> std::io::Result<()> {
    let mut line = String::new();
    for (i, (column, &width)) in columns.iter().zip(widths).enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        let value = values.get(i).map_or("", String::as_str);
        match column.alignment {
            Alignment::Left => line.push_str(&format!("{value:<width$}")),
            Alignment::Right => line.push_str(&format!("{value:>width$}")),
        }
    }
    writeln!(out, "{}", line.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn render<R: ReportRow>(columns: &[ColumnSpec], rows: &[R], format: OutputFormat, header: bool) -> String {
        let mut buf = Vec::new();
        emit(&mut buf, columns, rows, &ReportOptions { format, header }).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn sample_record() -> CompileUnitRecord {
        CompileUnitRecord {
            project: "a.cbproj".into(),
            project_path: "proj".into(),
            node_type: "Cpp Node".into(),
            build_order: 1,
            source_file: "src/a.cpp".into(),
            source_lines: 10,
            header_file: Some("src/a.h".into()),
            header_lines: 3,
            ..CompileUnitRecord::default()
        }
    }

    #[test]
    fn test_record_tsv_row() {
        let out = render(PROJECT_COLUMNS, &[sample_record()], OutputFormat::Tsv, false);
        assert_eq!(
            out,
            "a.cbproj\tproj\tCpp Node\t1\tsrc/a.cpp\t10\tsrc/a.h\t3\t\t\t0\t\t\n"
        );
    }

    #[test]
    fn test_every_report_row_matches_its_columns() {
        assert_eq!(sample_record().fields().len(), PROJECT_COLUMNS.len());
        let summary = CountSummary::from(&DirectoryStats::default());
        assert_eq!(summary.fields().len(), COUNT_COLUMNS.len());
        let entry = FileEntry {
            path: PathBuf::from("x.cpp"),
            modified: None,
            size: 1,
        };
        assert_eq!(entry.fields().len(), FILE_COLUMNS.len());
    }

    #[test]
    fn test_count_summary_in_kilobytes() {
        let stats = DirectoryStats {
            file_count: 3,
            dir_count: 2,
            total_bytes: 4097,
        };
        let out = render(COUNT_COLUMNS, &[CountSummary::from(&stats)], OutputFormat::Tsv, true);
        assert_eq!(out, "files\tdirectories\tsize\n3\t2\t5\n");
    }

    #[test]
    fn test_csv_quoting() {
        let entry = FileEntry {
            path: PathBuf::from("dir,with\"comma/a.cpp"),
            modified: None,
            size: 12,
        };
        let out = render(FILE_COLUMNS, &[entry], OutputFormat::Csv, false);
        assert_eq!(out, "\"dir,with\"\"comma/a.cpp\",,12\n");
    }

    #[test]
    fn test_table_alignment() {
        let stats = DirectoryStats {
            file_count: 7,
            dir_count: 1,
            total_bytes: 0,
        };
        let out = render(COUNT_COLUMNS, &[CountSummary::from(&stats)], OutputFormat::Table, false);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("size"));
        assert!(lines[1].chars().all(|c| c == '-'));
        // right aligned: values end where captions end
        assert_eq!(lines[2].len(), lines[0].len());
        assert!(lines[2].ends_with(" 0"));
    }

    #[test]
    fn test_json_output() {
        let out = render(PROJECT_COLUMNS, &[sample_record()], OutputFormat::Json, false);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["source_lines"], 10);
        assert_eq!(value[0]["form_file"], serde_json::Value::Null);
    }

    #[test]
    fn test_yaml_output() {
        let out = render(PROJECT_COLUMNS, &[sample_record()], OutputFormat::Yaml, false);
        assert!(out.contains("project: a.cbproj"));
        assert!(out.contains("header_lines: 3"));
    }

    #[test]
    fn test_write_row_custom_delimiter() {
        let mut buf = Vec::new();
        let delimiter = Delimiter {
            leading: "| ",
            separator: " | ",
            terminator: " |\n",
        };
        write_row(&mut buf, delimiter, &["a", "b"]).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "| a | b |\n");
    }
}
