//! Resolution guide export — renders one ticket's recommendation as a
//! minimal single-page PDF for download.
//!
//! Pure function over its inputs; the only transformation applied to
//! the recommendation text is stripping markdown emphasis markers and
//! escaping PDF string delimiters.

const PAGE_WIDTH: f32 = 595.0; // A4 portrait, points
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN: f32 = 50.0;
const LINE_HEIGHT: f32 = 14.0;
const WRAP_COLUMNS: usize = 92;

/// Build the downloadable resolution guide for one processed ticket.
pub fn resolution_document(
    ticket_id: &str,
    description: &str,
    recommendation: &str,
    manufacturer: &str,
) -> Vec<u8> {
    let mut lines = vec![
        format!("Incident Resolution Guide: {ticket_id}"),
        String::new(),
        format!("Description: {description}"),
        String::new(),
        "Recommended Resolution Steps:".to_string(),
    ];
    for raw in recommendation.replace("**", "").replace('*', "").lines() {
        for wrapped in wrap(raw.trim(), WRAP_COLUMNS) {
            lines.push(wrapped);
        }
    }
    lines.push(String::new());
    lines.push(format!("Generated by the Ops Commander desk for {manufacturer} systems"));

    render_pdf(&lines)
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    if text.is_empty() {
        return vec![String::new()];
    }
    let mut out = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.len() + word.len() + 1 > width {
            out.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        out.push(line);
    }
    out
}

fn escape_pdf_text(text: &str) -> String {
    text.chars()
        .flat_map(|c| match c {
            '(' => vec!['\\', '('],
            ')' => vec!['\\', ')'],
            '\\' => vec!['\\', '\\'],
            c if c.is_ascii() => vec![c],
            _ => vec!['?'], // WinAnsi subset only
        })
        .collect()
}

/// Assemble a one-page PDF with the given text lines in Helvetica.
fn render_pdf(lines: &[String]) -> Vec<u8> {
    let mut content = String::new();
    content.push_str("BT\n/F1 11 Tf\n");
    content.push_str(&format!("{MARGIN} {} Td\n{LINE_HEIGHT} TL\n", PAGE_HEIGHT - MARGIN));
    for line in lines {
        content.push_str(&format!("({}) Tj\nT*\n", escape_pdf_text(line)));
    }
    content.push_str("ET\n");

    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {PAGE_WIDTH} {PAGE_HEIGHT}] \
             /Contents 4 0 R /Resources << /Font << /F1 5 0 R >> >> >>"
        ),
        format!("<< /Length {} >>\nstream\n{content}endstream", content.len()),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
    ];

    let mut out: Vec<u8> = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
    }

    let xref_offset = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in &offsets {
        out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
            objects.len() + 1
        )
        .as_bytes(),
    );
    out
}
