use crate::calc::{Grade, NormalizedRecord, PeriodSummary, PeriodType};
use anyhow::Context;
use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

pub const FILE_NAME: &str = "gpa_report.xlsx";
pub const CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const DETAIL_SHEET: &str = "Ulgerim";
const SUMMARY_SHEET: &str = "Period GPA";

enum Cell {
    Text(String),
    Number(f64),
}

fn xml_escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

fn column_ref(index: usize) -> String {
    // Two letters cover every column this workbook emits.
    let a = b'A';
    if index < 26 {
        ((a + index as u8) as char).to_string()
    } else {
        let first = (a + (index / 26 - 1) as u8) as char;
        let second = (a + (index % 26) as u8) as char;
        format!("{}{}", first, second)
    }
}

/// SpreadsheetML worksheet body with inline strings. The workbook is
/// write-once per the export contract, so nothing here needs to parse back.
fn sheet_xml(rows: &[Vec<Cell>]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
         <worksheet xmlns=\"http://schemas.openxmlformats.org/spreadsheetml/2006/main\">\
         <sheetData>",
    );
    for (row_idx, row) in rows.iter().enumerate() {
        xml.push_str(&format!("<row r=\"{}\">", row_idx + 1));
        for (col_idx, cell) in row.iter().enumerate() {
            let cell_ref = format!("{}{}", column_ref(col_idx), row_idx + 1);
            match cell {
                Cell::Text(v) => xml.push_str(&format!(
                    "<c r=\"{}\" t=\"inlineStr\"><is><t>{}</t></is></c>",
                    cell_ref,
                    xml_escape(v)
                )),
                Cell::Number(v) => {
                    xml.push_str(&format!("<c r=\"{}\"><v>{}</v></c>", cell_ref, v))
                }
            }
        }
        xml.push_str("</row>");
    }
    xml.push_str("</sheetData></worksheet>");
    xml
}

fn period_type_label(t: PeriodType) -> &'static str {
    match t {
        PeriodType::Quarter => "Quarter",
        PeriodType::Semester => "Semester",
        PeriodType::Other => "Other",
    }
}

fn detail_rows(rows: &[NormalizedRecord]) -> Vec<Vec<Cell>> {
    let mut out = vec![vec![
        Cell::Text("subject".into()),
        Cell::Text("subjectDisplay".into()),
        Cell::Text("credits".into()),
        Cell::Text("scoreType".into()),
        Cell::Text("grade".into()),
        Cell::Text("period".into()),
        Cell::Text("periodType".into()),
        Cell::Text("periodName".into()),
        Cell::Text("gpaPoints".into()),
        Cell::Text("weightedPoints".into()),
    ]];
    for r in rows {
        let score_type = match r.grade {
            Grade::Letter(_) => "letter",
            Grade::Numeric(_) => "numeric",
        };
        out.push(vec![
            Cell::Text(r.subject.clone()),
            Cell::Text(r.subject_display.clone()),
            Cell::Number(r.credits),
            Cell::Text(score_type.into()),
            Cell::Text(r.grade.display()),
            Cell::Text(r.period.clone()),
            Cell::Text(period_type_label(r.period_type).into()),
            Cell::Text(r.period_name.clone()),
            Cell::Number(r.gpa_points),
            Cell::Number(r.weighted_points),
        ]);
    }
    out
}

fn summary_rows(summaries: &[PeriodSummary]) -> Vec<Vec<Cell>> {
    let mut out = vec![vec![
        Cell::Text("periodType".into()),
        Cell::Text("periodName".into()),
        Cell::Text("totalCredits".into()),
        Cell::Text("totalWeightedPoints".into()),
        Cell::Text("gpa".into()),
    ]];
    for s in summaries {
        out.push(vec![
            Cell::Text(period_type_label(s.period_type).into()),
            Cell::Text(s.period_name.clone()),
            Cell::Number(s.total_credits),
            Cell::Number(s.total_weighted_points),
            Cell::Number(s.gpa),
        ]);
    }
    out
}

const CONTENT_TYPES_XML: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\
<Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>\
<Default Extension=\"xml\" ContentType=\"application/xml\"/>\
<Override PartName=\"/xl/workbook.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml\"/>\
<Override PartName=\"/xl/worksheets/sheet1.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml\"/>\
<Override PartName=\"/xl/worksheets/sheet2.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml\"/>\
</Types>";

const ROOT_RELS_XML: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument\" Target=\"xl/workbook.xml\"/>\
</Relationships>";

const WORKBOOK_RELS_XML: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet\" Target=\"worksheets/sheet1.xml\"/>\
<Relationship Id=\"rId2\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet\" Target=\"worksheets/sheet2.xml\"/>\
</Relationships>";

fn workbook_xml() -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
         <workbook xmlns=\"http://schemas.openxmlformats.org/spreadsheetml/2006/main\" \
         xmlns:r=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships\">\
         <sheets>\
         <sheet name=\"{}\" sheetId=\"1\" r:id=\"rId1\"/>\
         <sheet name=\"{}\" sheetId=\"2\" r:id=\"rId2\"/>\
         </sheets></workbook>",
        xml_escape(DETAIL_SHEET),
        xml_escape(SUMMARY_SHEET)
    )
}

/// Build the full workbook in memory: one sheet of per-record detail and one
/// of per-period GPA. An empty record set still yields a header-only book.
pub fn build_workbook(
    rows: &[NormalizedRecord],
    summaries: &[PeriodSummary],
) -> anyhow::Result<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let opts = FileOptions::default().compression_method(CompressionMethod::Deflated);

    let entries: [(&str, String); 6] = [
        ("[Content_Types].xml", CONTENT_TYPES_XML.to_string()),
        ("_rels/.rels", ROOT_RELS_XML.to_string()),
        ("xl/workbook.xml", workbook_xml()),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS_XML.to_string()),
        ("xl/worksheets/sheet1.xml", sheet_xml(&detail_rows(rows))),
        ("xl/worksheets/sheet2.xml", sheet_xml(&summary_rows(summaries))),
    ];
    for (name, body) in entries {
        zip.start_file(name, opts)
            .with_context(|| format!("failed to start workbook entry {}", name))?;
        zip.write_all(body.as_bytes())
            .with_context(|| format!("failed to write workbook entry {}", name))?;
    }

    let cursor = zip.finish().context("failed to finalize workbook archive")?;
    Ok(cursor.into_inner())
}
