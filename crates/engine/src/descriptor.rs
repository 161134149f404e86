// crates/engine/src/descriptor.rs
//! Project descriptor parsing
//!
//! A descriptor (`*.cbproj`) is an MSBuild XML document. Its first
//! `ItemGroup` lists one `CppCompile` element per compiled unit:
//!
//! ```xml
//! <Project xmlns="http://schemas.microsoft.com/developer/msbuild/2003">
//!   <ItemGroup>
//!     <CppCompile Include="MainForm.cpp">
//!       <Form>frmMain</Form>
//!       <FormType>dfm</FormType>
//!       <DependentOn>MainForm.h</DependentOn>
//!       <BuildOrder>2</BuildOrder>
//!     </CppCompile>
//!   </ItemGroup>
//! </Project>
//! ```
//!
//! Each element becomes a [`CompileUnitRecord`]. The unit's form file is not
//! listed in the descriptor; it shares the source file's base name and uses
//! the form type as extension. Referenced files are resolved against the
//! descriptor's directory and their lines are counted.

use crate::error::{EngineError, Result};
use crate::line_counter::count_lines;
use crate::paths::{descriptor_path, relative_to, weakly_canonical};
use roxmltree::{Document, Node, ParsingOptions};
use serde::Serialize;
use std::path::{Path, PathBuf};

const ITEM_GROUP: &str = "ItemGroup";
const COMPILE_ITEM: &str = "CppCompile";

/// Classification written into every record.
pub const NODE_TYPE: &str = "Cpp Node";

/// Form extension used when a unit has a form but no `FormType`.
pub const DEFAULT_FORM_EXTENSION: &str = ".dfm";

/// Which of a record's files to address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Source,
    Header,
    Form,
}

impl FileKind {
    pub const ALL: [Self; 3] = [Self::Source, Self::Header, Self::Form];
}

/// One compiled unit of a project descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompileUnitRecord {
    /// File name of the descriptor.
    pub project: String,
    /// Directory of the descriptor relative to the scan root.
    pub project_path: String,
    pub node_type: String,
    /// `BuildOrder`; 0 when absent or not numeric.
    pub build_order: i32,
    /// `Include` attribute, verbatim. May be empty.
    pub source_file: String,
    pub source_lines: usize,
    /// `DependentOn`.
    pub header_file: Option<String>,
    pub header_lines: usize,
    /// Derived from the source file name when the unit has a form.
    pub form_file: Option<String>,
    pub form_name: Option<String>,
    pub form_lines: usize,
    pub form_type: Option<String>,
    pub design_class: Option<String>,
}

impl CompileUnitRecord {
    /// Relative path of the requested file, if the record has one.
    #[must_use]
    pub fn file(&self, kind: FileKind) -> Option<&str> {
        match kind {
            FileKind::Source => Some(self.source_file.as_str()).filter(|s| !s.is_empty()),
            FileKind::Header => self.header_file.as_deref(),
            FileKind::Form => self.form_file.as_deref(),
        }
    }

    #[must_use]
    pub const fn lines(&self, kind: FileKind) -> usize {
        match kind {
            FileKind::Source => self.source_lines,
            FileKind::Header => self.header_lines,
            FileKind::Form => self.form_lines,
        }
    }

    fn lines_mut(&mut self, kind: FileKind) -> &mut usize {
        match kind {
            FileKind::Source => &mut self.source_lines,
            FileKind::Header => &mut self.header_lines,
            FileKind::Form => &mut self.form_lines,
        }
    }
}

/// Absolute location of one of `record`'s files below `base`.
///
/// Returns `None` when the record has no such file.
#[must_use]
pub fn resolve_path(kind: FileKind, base: &Path, record: &CompileUnitRecord) -> Option<PathBuf> {
    let relative = record.file(kind)?;
    let full = base
        .join(Path::new(&record.project_path))
        .join(descriptor_path(relative));
    Some(weakly_canonical(&full))
}

/// Parse `descriptor`, logging and swallowing any load failure.
#[must_use]
pub fn parse(scan_root: &Path, descriptor: &Path) -> Vec<CompileUnitRecord> {
    try_parse(scan_root, descriptor).unwrap_or_else(|e| {
        log::warn!("{e}");
        Vec::new()
    })
}

/// Parse `descriptor` and append its records to `out`.
///
/// Returns the number of records appended. Nothing is appended on error.
///
/// # Errors
/// See [`try_parse`].
pub fn parse_into(
    scan_root: &Path,
    descriptor: &Path,
    out: &mut Vec<CompileUnitRecord>,
) -> Result<usize> {
    let records = try_parse(scan_root, descriptor)?;
    let appended = records.len();
    out.extend(records);
    Ok(appended)
}

/// Parse one descriptor into its compile unit records.
///
/// A document without `ItemGroup` yields no records.
///
/// # Errors
/// Returns [`EngineError::DescriptorRead`] if the file cannot be read and
/// [`EngineError::DescriptorParse`] if it is not well-formed XML.
pub fn try_parse(scan_root: &Path, descriptor: &Path) -> Result<Vec<CompileUnitRecord>> {
    let bytes = std::fs::read(descriptor).map_err(|source| EngineError::DescriptorRead {
        path: descriptor.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8_lossy(&bytes);
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);

    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(text, options).map_err(|source| {
        EngineError::DescriptorParse {
            path: descriptor.to_path_buf(),
            source,
        }
    })?;

    let Some(group) = child_element(doc.root_element(), ITEM_GROUP) else {
        log::debug!("{}: no {ITEM_GROUP}", descriptor.display());
        return Ok(Vec::new());
    };

    let project = descriptor
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let project_dir = descriptor.parent().unwrap_or_else(|| Path::new(""));
    let project_path = relative_to(project_dir, scan_root)
        .to_string_lossy()
        .into_owned();

    let records: Vec<_> = group
        .children()
        .filter(|n| is_element_named(*n, COMPILE_ITEM))
        .map(|item| {
            let mut record = read_compile_item(item, &project, &project_path);
            count_record_lines(scan_root, &mut record);
            record
        })
        .collect();

    log::debug!("{}: {} compile units", descriptor.display(), records.len());
    Ok(records)
}

fn read_compile_item(item: Node<'_, '_>, project: &str, project_path: &str) -> CompileUnitRecord {
    let source_file = item.attribute("Include").unwrap_or_default().to_string();
    let form_name = child_text(item, "Form");
    let form_type = child_text(item, "FormType");

    let form_file = match &form_name {
        Some(_) if !source_file.is_empty() => {
            Some(derive_form_file(&source_file, form_type.as_deref()))
        }
        _ => None,
    };

    CompileUnitRecord {
        project: project.to_string(),
        project_path: project_path.to_string(),
        node_type: NODE_TYPE.to_string(),
        build_order: child_text(item, "BuildOrder").map_or(0, |s| parse_build_order(&s)),
        source_file,
        header_file: child_text(item, "DependentOn"),
        form_file,
        form_name,
        form_type,
        design_class: child_text(item, "DesignClass"),
        ..CompileUnitRecord::default()
    }
}

fn count_record_lines(scan_root: &Path, record: &mut CompileUnitRecord) {
    for kind in FileKind::ALL {
        if let Some(path) = resolve_path(kind, scan_root, record) {
            *record.lines_mut(kind) = count_lines(&path);
        }
    }
}

/// Form file of a unit: the source path with its extension replaced.
///
/// The directory prefix and its separator style are kept as written.
#[must_use]
pub fn derive_form_file(source_file: &str, form_type: Option<&str>) -> String {
    let extension = form_type.map_or_else(|| DEFAULT_FORM_EXTENSION.to_string(), |t| format!(".{t}"));
    let split = source_file.rfind(['\\', '/']).map_or(0, |i| i + 1);
    let (dir, file_name) = source_file.split_at(split);
    let stem = match file_name.rfind('.') {
        Some(0) | None => file_name,
        Some(i) => &file_name[..i],
    };
    format!("{dir}{stem}{extension}")
}

/// `atoi`-style integer: optional whitespace and sign, then leading digits.
///
/// Anything unparsable yields 0; out of range values saturate.
#[must_use]
pub fn parse_build_order(text: &str) -> i32 {
    let trimmed = text.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let limit = i64::from(i32::MAX) + 1;
    let magnitude = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0_i64, |acc, b| (acc * 10 + i64::from(b - b'0')).min(limit));
    let value = if negative { -magnitude } else { magnitude };

    i32::try_from(value.clamp(i64::from(i32::MIN), i64::from(i32::MAX))).unwrap_or(0)
}

fn is_element_named(node: Node<'_, '_>, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name
}

fn child_element<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| is_element_named(*n, name))
}

/// Text of the first child element called `name`; `None` if missing or empty.
fn child_text(node: Node<'_, '_>, name: &str) -> Option<String> {
    child_element(node, name)
        .and_then(|child| child.text())
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}
