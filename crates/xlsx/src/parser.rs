//! XLSX file parser implementation.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use regex::Regex;
use roster_core::{CellValue, Error, Result, Sheet};
use std::collections::HashMap;
use std::io::{Read, Seek};
use std::sync::LazyLock;
use zip::result::ZipError;
use zip::ZipArchive;

/// Cell reference such as `B7` or `$AA$12`.
static CELL_REF_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\$?([A-Za-z]{1,3})\$?([0-9]+)$").unwrap());

const WORKBOOK_PATH: &str = "xl/workbook.xml";
const WORKBOOK_RELS_PATH: &str = "xl/_rels/workbook.xml.rels";
const SHARED_STRINGS_PATH: &str = "xl/sharedStrings.xml";

/// Parser for XLSX (Office Open XML) workbooks.
pub struct XlsxParser;

impl XlsxParser {
    /// Create a new XLSX parser.
    pub fn new() -> Self {
        Self
    }

    /// Parse every worksheet of an XLSX workbook, in tab order.
    pub fn parse<R: Read + Seek>(&self, reader: R) -> Result<Vec<Sheet>> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::Load(format!("Failed to open ZIP: {}", e)))?;

        let entries = self.get_sheet_entries(&mut archive)?;
        let shared = self.read_shared_strings(&mut archive)?;
        log::debug!(
            "Workbook has {} sheet(s), {} shared string(s)",
            entries.len(),
            shared.len()
        );

        let mut sheets = Vec::with_capacity(entries.len());
        for entry in entries {
            let content = self.read_file_from_archive(&mut archive, &entry.path)?;
            let sheet = self.parse_worksheet(&content, &shared, &entry.name)?;
            log::debug!(
                "Sheet '{}': {} column(s), {} row(s)",
                sheet.name,
                sheet.columns.len(),
                sheet.rows.len()
            );
            sheets.push(sheet);
        }

        Ok(sheets)
    }

    /// Sheet names and part paths from workbook.xml and its relationships.
    fn get_sheet_entries<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
    ) -> Result<Vec<SheetEntry>> {
        let targets = self.get_relationship_targets(archive)?;
        let content = self.read_file_from_archive(archive, WORKBOOK_PATH)?;

        let mut reader = Reader::from_str(&content);
        reader.trim_text(true);
        let mut entries = Vec::new();

        loop {
            match reader.read_event() {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                    if local_name(e.name().as_ref()) == b"sheet" =>
                {
                    let name = attribute(e, b"name").unwrap_or_default();
                    let rel_id = attribute(e, b"id").ok_or_else(|| {
                        Error::Load(format!("Sheet '{}' has no relationship id", name))
                    })?;
                    let path = targets.get(&rel_id).cloned().ok_or_else(|| {
                        Error::Load(format!(
                            "Sheet '{}' refers to missing relationship '{}'",
                            name, rel_id
                        ))
                    })?;
                    entries.push(SheetEntry { name, path });
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::Load(format!("Error parsing workbook: {}", e)));
                }
                _ => {}
            }
        }

        Ok(entries)
    }

    /// Map of relationship id to part path inside the archive.
    fn get_relationship_targets<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
    ) -> Result<HashMap<String, String>> {
        let content = self.read_file_from_archive(archive, WORKBOOK_RELS_PATH)?;
        let mut reader = Reader::from_str(&content);
        reader.trim_text(true);
        let mut targets = HashMap::new();

        loop {
            match reader.read_event() {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                    if local_name(e.name().as_ref()) == b"Relationship" =>
                {
                    if let (Some(id), Some(target)) = (attribute(e, b"Id"), attribute(e, b"Target")) {
                        targets.insert(id, resolve_target(&target));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::Load(format!(
                        "Error parsing relationships: {}",
                        e
                    )));
                }
                _ => {}
            }
        }

        Ok(targets)
    }

    /// Shared string table; workbooks without strings have no such part.
    fn read_shared_strings<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
    ) -> Result<Vec<String>> {
        let Some(content) = self.read_optional_file(archive, SHARED_STRINGS_PATH)? else {
            return Ok(Vec::new());
        };
        parse_shared_strings(&content)
    }

    /// Parse one worksheet part into a sheet.
    fn parse_worksheet(&self, xml_content: &str, shared: &[String], name: &str) -> Result<Sheet> {
        let mut reader = Reader::from_str(xml_content);
        reader.trim_text(false);

        let mut rows: Vec<Vec<CellValue>> = Vec::new();
        let mut current_row: Option<Vec<CellValue>> = None;
        let mut current_cell: Option<CellInfo> = None;
        let mut next_col = 0usize;
        let mut in_value = false;
        let mut in_inline_text = false;
        let mut in_phonetic = false;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => match local_name(e.name().as_ref()) {
                    b"row" => {
                        current_row = Some(Vec::new());
                        next_col = 0;
                    }
                    b"c" => {
                        current_cell = Some(CellInfo::from_element(e, next_col));
                    }
                    b"v" if current_cell.is_some() => in_value = true,
                    b"t" if current_cell.is_some() => in_inline_text = true,
                    b"rPh" => in_phonetic = true,
                    _ => {}
                },
                Ok(Event::Empty(ref e)) => {
                    if local_name(e.name().as_ref()) == b"c" {
                        next_col = CellInfo::from_element(e, next_col).col + 1;
                    }
                }
                Ok(Event::Text(ref e)) => {
                    if let Some(ref mut cell) = current_cell {
                        let text = e
                            .unescape()
                            .map_err(|err| Error::Load(format!("Bad text in sheet '{}': {}", name, err)))?;
                        cell.push_text(&text, in_value, in_inline_text && !in_phonetic);
                    }
                }
                Ok(Event::CData(ref e)) => {
                    if let Some(ref mut cell) = current_cell {
                        let text = reader
                            .decoder()
                            .decode(e)
                            .map_err(|err| Error::Load(format!("Bad CDATA in sheet '{}': {}", name, err)))?;
                        cell.push_text(&text, in_value, in_inline_text && !in_phonetic);
                    }
                }
                Ok(Event::End(ref e)) => match local_name(e.name().as_ref()) {
                    b"v" => in_value = false,
                    b"t" => in_inline_text = false,
                    b"rPh" => in_phonetic = false,
                    b"c" => {
                        if let Some(cell) = current_cell.take() {
                            let col = cell.col;
                            let value = cell.into_value(shared)?;
                            if let Some(ref mut row) = current_row {
                                if row.len() <= col {
                                    row.resize(col + 1, CellValue::Empty);
                                }
                                row[col] = value;
                            }
                            next_col = col + 1;
                        }
                    }
                    b"row" => {
                        if let Some(row) = current_row.take() {
                            rows.push(row);
                        }
                    }
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::Load(format!(
                        "XML parsing error in sheet '{}': {}",
                        name, e
                    )));
                }
                _ => {}
            }
        }

        Ok(build_sheet(name, rows))
    }

    /// Read a file from the ZIP archive.
    fn read_file_from_archive<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        path: &str,
    ) -> Result<String> {
        self.read_optional_file(archive, path)?
            .ok_or_else(|| Error::Load(format!("File not found in archive '{}'", path)))
    }

    /// Read a file from the ZIP archive, or `None` if it does not exist.
    fn read_optional_file<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        path: &str,
    ) -> Result<Option<String>> {
        let mut file = match archive.by_name(path) {
            Ok(file) => file,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(e) => {
                return Err(Error::Load(format!("Failed to open '{}': {}", path, e)));
            }
        };

        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| Error::Load(format!("Failed to read '{}': {}", path, e)))?;

        Ok(Some(content))
    }
}

impl Default for XlsxParser {
    fn default() -> Self {
        Self::new()
    }
}

/// A worksheet listed in workbook.xml.
#[derive(Debug)]
struct SheetEntry {
    name: String,
    path: String,
}

/// A cell being read: its position, declared type and raw text.
#[derive(Debug, Default)]
struct CellInfo {
    col: usize,
    kind: Option<String>,
    value: String,
    inline: String,
}

impl CellInfo {
    fn from_element(e: &BytesStart<'_>, next_col: usize) -> Self {
        let col = attribute(e, b"r")
            .and_then(|r| parse_cell_ref(&r))
            .map(|(col, _)| col)
            .unwrap_or(next_col);

        Self {
            col,
            kind: attribute(e, b"t"),
            ..Default::default()
        }
    }

    /// Append character data to the `<v>` value or the inline string.
    fn push_text(&mut self, text: &str, in_value: bool, in_inline_text: bool) {
        if in_value {
            self.value.push_str(text);
        } else if in_inline_text {
            self.inline.push_str(text);
        }
    }

    /// Resolve the raw text according to the cell type.
    fn into_value(self, shared: &[String]) -> Result<CellValue> {
        let value = match self.kind.as_deref() {
            Some("s") => {
                let idx: usize = self.value.trim().parse().map_err(|_| {
                    Error::Load(format!("Invalid shared string index '{}'", self.value))
                })?;
                let text = shared.get(idx).ok_or_else(|| {
                    Error::Load(format!("Shared string index {} out of range", idx))
                })?;
                CellValue::from(text.as_str())
            }
            Some("inlineStr") => CellValue::from(self.inline.as_str()),
            Some("str") | Some("d") => CellValue::from(self.value.as_str()),
            Some("b") => CellValue::Bool(self.value.trim() == "1"),
            Some("e") => CellValue::Error(self.value),
            _ => match self.value.trim() {
                "" => CellValue::Empty,
                raw => raw
                    .parse::<f64>()
                    .map(CellValue::Number)
                    .unwrap_or_else(|_| CellValue::Text(self.value.clone())),
            },
        };
        Ok(value)
    }
}

/// Parse sharedStrings.xml into its string table.
///
/// Rich-text runs are concatenated; phonetic guides (`rPh`) are dropped.
fn parse_shared_strings(xml_content: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml_content);
    reader.trim_text(false);

    let mut strings = Vec::new();
    let mut current: Option<String> = None;
    let mut in_text = false;
    let mut in_phonetic = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match local_name(e.name().as_ref()) {
                b"si" => current = Some(String::new()),
                b"t" => in_text = true,
                b"rPh" => in_phonetic = true,
                _ => {}
            },
            Ok(Event::Empty(ref e)) => {
                if local_name(e.name().as_ref()) == b"si" {
                    strings.push(String::new());
                }
            }
            Ok(Event::Text(ref e)) => {
                if in_text && !in_phonetic {
                    if let Some(ref mut s) = current {
                        let text = e
                            .unescape()
                            .map_err(|err| Error::Load(format!("Bad shared string: {}", err)))?;
                        s.push_str(&text);
                    }
                }
            }
            Ok(Event::CData(ref e)) => {
                if in_text && !in_phonetic {
                    if let Some(ref mut s) = current {
                        let text = reader
                            .decoder()
                            .decode(e)
                            .map_err(|err| Error::Load(format!("Bad shared string: {}", err)))?;
                        s.push_str(&text);
                    }
                }
            }
            Ok(Event::End(ref e)) => match local_name(e.name().as_ref()) {
                b"si" => {
                    if let Some(s) = current.take() {
                        strings.push(s);
                    }
                }
                b"t" => in_text = false,
                b"rPh" => in_phonetic = false,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::Load(format!(
                    "Error parsing shared strings: {}",
                    e
                )));
            }
            _ => {}
        }
    }

    Ok(strings)
}

/// Turn raw worksheet rows into a sheet with a header.
///
/// The first non-blank row is the header; blank rows are dropped and every
/// data row is padded to the widest used column.
fn build_sheet(name: &str, rows: Vec<Vec<CellValue>>) -> Sheet {
    let mut rows = rows
        .into_iter()
        .filter(|row| row.iter().any(|c| !c.is_blank()));

    let Some(header) = rows.next() else {
        return Sheet::new(name, Vec::new());
    };
    let data: Vec<Vec<CellValue>> = rows.collect();

    let width = std::iter::once(&header)
        .chain(data.iter())
        .map(|row| used_width(row))
        .max()
        .unwrap_or(0);

    let columns = (0..width)
        .map(|idx| match header.get(idx) {
            Some(cell) if !cell.is_blank() => cell.to_text(),
            _ => format!("Unnamed: {}", idx),
        })
        .collect();

    let mut sheet = Sheet::new(name, columns);
    for row in data {
        sheet.push_row(row);
    }
    sheet
}

/// Index after the last non-blank cell.
fn used_width(row: &[CellValue]) -> usize {
    row.iter()
        .rposition(|c| !c.is_blank())
        .map(|idx| idx + 1)
        .unwrap_or(0)
}

/// Resolve a relationship target relative to the `xl/` folder.
fn resolve_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("xl/{}", target),
    }
}

/// Parse `B7` into a 0-based (column, row) pair.
fn parse_cell_ref(reference: &str) -> Option<(usize, usize)> {
    let caps = CELL_REF_REGEX.captures(reference)?;
    let col = caps[1]
        .chars()
        .fold(0usize, |acc, c| acc * 26 + (c.to_ascii_uppercase() as usize - 'A' as usize + 1));
    let row: usize = caps[2].parse().ok()?;
    if row == 0 {
        return None;
    }
    Some((col - 1, row - 1))
}

/// Unescaped value of the attribute whose local name is `key`.
fn attribute(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| local_name(attr.key.as_ref()) == key)
        .map(|attr| {
            attr.unescape_value()
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| String::from_utf8_lossy(&attr.value).into_owned())
        })
}

/// Extract the local name from a potentially namespaced XML name.
fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::{Workbook, XlsxError};
    use std::io::{Cursor, Write};
    use zip::write::FileOptions;
    use zip::ZipWriter;

    fn parse_bytes(bytes: Vec<u8>) -> Result<Vec<Sheet>> {
        XlsxParser::new().parse(Cursor::new(bytes))
    }

    fn zip_parts(parts: &[(&str, &str)]) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (path, content) in parts {
            zip.start_file(*path, FileOptions::default()).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    const WORKBOOK: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"
          xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <sheets>
    <sheet name="Term &amp; One" sheetId="7" r:id="rId9"/>
    <sheet name="Second" sheetId="2" r:id="rId1"/>
  </sheets>
</workbook>"#;

    const RELS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet2.xml"/>
  <Relationship Id="rId9" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="/xl/worksheets/sheet1.xml"/>
</Relationships>"#;

    const SHARED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="4" uniqueCount="4">
  <si><t>Class</t></si>
  <si><r><t>First</t></r><r><t xml:space="preserve"> Name</t></r></si>
  <si><t>Lee</t><rPh sb="0" eb="1"><t>LEE</t></rPh></si>
  <si/>
</sst>"#;

    const SHEET1: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <sheetData>
    <row r="2"><c r="A2" t="s"><v>0</v></c><c r="C2" t="s"><v>1</v></c></row>
    <row r="3"><c r="A3"><v>5</v></c><c r="C3" t="inlineStr"><is><t>Ann</t></is></c><c r="D3" t="b"><v>1</v></c></row>
    <row r="4"><c r="A4" t="s"><v>3</v></c></row>
    <row r="5"><c r="A5" t="str"><f>A3&amp;"B"</f><v>5B</v></c><c r="B5" t="e"><v>#N/A</v></c><c r="C5" t="s"><v>2</v></c></row>
  </sheetData>
</worksheet>"#;

    const SHEET2: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <sheetData/>
</worksheet>"#;

    #[test]
    fn test_hand_built_workbook() {
        let bytes = zip_parts(&[
            ("xl/workbook.xml", WORKBOOK),
            ("xl/_rels/workbook.xml.rels", RELS),
            ("xl/sharedStrings.xml", SHARED),
            ("xl/worksheets/sheet1.xml", SHEET1),
            ("xl/worksheets/sheet2.xml", SHEET2),
        ]);
        let sheets = parse_bytes(bytes).unwrap();

        assert_eq!(sheets.len(), 2);
        let first = &sheets[0];
        assert_eq!(first.name, "Term & One");
        assert_eq!(first.columns, vec!["Class", "Unnamed: 1", "First Name", "Unnamed: 3"]);
        // The blank row 4 is dropped
        assert_eq!(first.rows.len(), 2);
        assert_eq!(
            first.rows[0],
            vec![
                CellValue::Number(5.0),
                CellValue::Empty,
                CellValue::Text("Ann".into()),
                CellValue::Bool(true),
            ]
        );
        assert_eq!(first.rows[1][0], CellValue::Text("5B".into()));
        assert_eq!(first.rows[1][1], CellValue::Error("#N/A".into()));
        assert_eq!(first.rows[1][2], CellValue::Text("Lee".into()));

        assert_eq!(sheets[1].name, "Second");
        assert!(sheets[1].columns.is_empty());
        assert!(sheets[1].rows.is_empty());
    }

    #[test]
    fn test_missing_shared_strings_part_is_fine() {
        let sheet = r#"<worksheet><sheetData>
            <row><c t="inlineStr"><is><t>Stream</t></is></c><c t="inlineStr"><is><t>Name</t></is></c></row>
            <row><c t="inlineStr"><is><t>A</t></is></c><c t="inlineStr"><is><t>Lee, Ann</t></is></c></row>
        </sheetData></worksheet>"#;
        let bytes = zip_parts(&[
            ("xl/workbook.xml", WORKBOOK),
            ("xl/_rels/workbook.xml.rels", RELS),
            ("xl/worksheets/sheet1.xml", sheet),
            ("xl/worksheets/sheet2.xml", SHEET2),
        ]);
        let sheets = parse_bytes(bytes).unwrap();

        // Cells without references fill consecutive columns
        assert_eq!(sheets[0].columns, vec!["Stream", "Name"]);
        assert_eq!(sheets[0].rows[0][1], CellValue::Text("Lee, Ann".into()));
    }

    #[test]
    fn test_workbook_written_by_xlsxwriter() -> std::result::Result<(), XlsxError> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name("2024")?;
        sheet.write_string(0, 0, "Class")?;
        sheet.write_string(0, 1, " first name ")?;
        sheet.write_string(0, 2, "Last Name")?;
        sheet.write_string(1, 0, "5A")?;
        sheet.write_string(1, 1, "John")?;
        sheet.write_string(1, 2, "Smith")?;
        sheet.write_number(2, 0, 6)?;
        sheet.write_string(2, 2, "Doe")?;

        let other = workbook.add_worksheet();
        other.set_name("Extra")?;
        other.write_string(0, 0, "Only")?;

        let sheets = parse_bytes(workbook.save_to_buffer()?).unwrap();

        assert_eq!(sheets.len(), 2);
        assert_eq!(sheets[0].name, "2024");
        assert_eq!(sheets[0].columns, vec!["Class", " first name ", "Last Name"]);
        assert_eq!(sheets[0].rows.len(), 2);
        assert_eq!(sheets[0].rows[1][0], CellValue::Number(6.0));
        assert_eq!(sheets[0].rows[1][1], CellValue::Empty);
        assert_eq!(sheets[1].columns, vec!["Only"]);
        Ok(())
    }

    #[test]
    fn test_not_a_zip() {
        let err = parse_bytes(b"definitely not a workbook".to_vec()).unwrap_err();
        assert!(matches!(err, Error::Load(_)));
    }

    #[test]
    fn test_missing_workbook_part() {
        let bytes = zip_parts(&[("xl/_rels/workbook.xml.rels", RELS)]);
        let err = parse_bytes(bytes).unwrap_err();
        assert!(err.to_string().contains("xl/workbook.xml"));
    }

    #[test]
    fn test_cdata_text_is_kept() {
        let shared = r#"<sst><si><t><![CDATA[Smith & Sons, Jo]]></t></si></sst>"#;
        let sheet = r#"<worksheet><sheetData>
            <row><c r="A1" t="inlineStr"><is><t><![CDATA[Stream]]></t></is></c><c r="B1" t="inlineStr"><is><t>Name</t></is></c></row>
            <row><c r="A2" t="str"><v><![CDATA[<Blue>]]></v></c><c r="B2" t="s"><v>0</v></c></row>
        </sheetData></worksheet>"#;
        let bytes = zip_parts(&[
            ("xl/workbook.xml", WORKBOOK),
            ("xl/_rels/workbook.xml.rels", RELS),
            ("xl/sharedStrings.xml", shared),
            ("xl/worksheets/sheet1.xml", sheet),
            ("xl/worksheets/sheet2.xml", SHEET2),
        ]);
        let sheets = parse_bytes(bytes).unwrap();

        assert_eq!(sheets[0].columns, vec!["Stream", "Name"]);
        assert_eq!(sheets[0].rows[0][0], CellValue::Text("<Blue>".into()));
        assert_eq!(sheets[0].rows[0][1], CellValue::Text("Smith & Sons, Jo".into()));
    }

    #[test]
    fn test_shared_string_out_of_range() {
        let sheet = r#"<worksheet><sheetData><row><c r="A1" t="s"><v>42</v></c></row></sheetData></worksheet>"#;
        let bytes = zip_parts(&[
            ("xl/workbook.xml", WORKBOOK),
            ("xl/_rels/workbook.xml.rels", RELS),
            ("xl/sharedStrings.xml", SHARED),
            ("xl/worksheets/sheet1.xml", sheet),
            ("xl/worksheets/sheet2.xml", SHEET2),
        ]);
        let err = parse_bytes(bytes).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_parse_cell_ref() {
        assert_eq!(parse_cell_ref("A1"), Some((0, 0)));
        assert_eq!(parse_cell_ref("B7"), Some((1, 6)));
        assert_eq!(parse_cell_ref("Z1"), Some((25, 0)));
        assert_eq!(parse_cell_ref("AA12"), Some((26, 11)));
        assert_eq!(parse_cell_ref("$C$3"), Some((2, 2)));
        assert_eq!(parse_cell_ref("A0"), None);
        assert_eq!(parse_cell_ref("12"), None);
    }

    #[test]
    fn test_resolve_target() {
        assert_eq!(resolve_target("worksheets/sheet1.xml"), "xl/worksheets/sheet1.xml");
        assert_eq!(resolve_target("/xl/worksheets/sheet1.xml"), "xl/worksheets/sheet1.xml");
    }

    #[test]
    fn test_local_name() {
        assert_eq!(local_name(b"r:id"), b"id");
        assert_eq!(local_name(b"x:sheet"), b"sheet");
        assert_eq!(local_name(b"sheet"), b"sheet");
    }
}
