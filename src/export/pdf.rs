use crate::calc::NormalizedRecord;
use crate::store::StudentInfo;
use anyhow::{anyhow, Context};
use printpdf::{Mm, PdfDocument};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub const FILE_NAME: &str = "gpa_report.pdf";
pub const CONTENT_TYPE: &str = "application/pdf";

const DOC_TITLE: &str = "GPA және үлгерім есебі";
const FONT_SIZE: f32 = 12.0;
const LEFT_MARGIN_MM: f32 = 14.0;
const TOP_START_MM: f32 = 283.0;
const BOTTOM_MARGIN_MM: f32 = 14.0;
const LINE_STEP_MM: f32 = 6.35; // 18pt leading

/// Render the paginated report: a header block with student metadata, then
/// one line per record. The caller resolves `font_path` through `FontConfig`
/// so Kazakh Cyrillic text is guaranteed to have glyphs; the builtin PDF
/// fonts are never used because they would corrupt non-Latin characters.
pub fn build_report(
    rows: &[NormalizedRecord],
    student: &StudentInfo,
    font_path: &Path,
) -> anyhow::Result<Vec<u8>> {
    let (doc, first_page, first_layer) =
        PdfDocument::new(DOC_TITLE, Mm(210.0), Mm(297.0), "report");

    let font_file = File::open(font_path)
        .with_context(|| format!("failed to open report font {}", font_path.display()))?;
    let font = doc
        .add_external_font(BufReader::new(font_file))
        .map_err(|e| anyhow!("failed to embed report font: {}", e))?;

    let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    let mut lines: Vec<String> = vec![
        DOC_TITLE.to_string(),
        format!("Құрастырылған уақыты: {}", generated_at),
        String::new(),
        format!("Оқушы: {}", student.name),
        format!("Сынып: {}", student.class_name),
        format!("ID: {}", student.student_id),
        format!("Мектеп: {}", student.school),
        format!("Оқу жылы: {}", student.academic_year),
        String::new(),
        "Пәндер:".to_string(),
    ];
    for r in rows {
        lines.push(format!(
            "- {} | Период: {} | Кредит: {} | Баға: {}",
            r.subject,
            r.period,
            r.credits,
            r.grade.display()
        ));
    }

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    let mut y = TOP_START_MM;
    for line in &lines {
        if y < BOTTOM_MARGIN_MM {
            let (page, layer_idx) = doc.add_page(Mm(210.0), Mm(297.0), "report");
            layer = doc.get_page(page).get_layer(layer_idx);
            y = TOP_START_MM;
        }
        if !line.is_empty() {
            layer.use_text(line.clone(), FONT_SIZE, Mm(LEFT_MARGIN_MM), Mm(y), &font);
        }
        y -= LINE_STEP_MM;
    }

    doc.save_to_bytes()
        .map_err(|e| anyhow!("failed to serialize pdf: {}", e))
}
