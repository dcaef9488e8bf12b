mod common;

use resume_pages::{
    Catalog, EXPORT_FILE_NAME, Error, ExportOptions, FontChoice, Language, export_pdf,
    render_preview, write_pdf,
};
use uuid::Uuid;

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

/// Number of `/Type /Page` objects, not counting the `/Type /Pages` tree.
fn page_objects(pdf: &[u8]) -> usize {
    let needle = b"/Type /Page";
    pdf.windows(needle.len() + 1)
        .filter(|w| w.starts_with(needle) && w[needle.len()] != b's')
        .count()
}

/// Inflated bytes of every Flate-compressed stream in the file.
fn content_streams(pdf: &[u8]) -> Vec<Vec<u8>> {
    const START: &[u8] = b">>\nstream\n";
    const END: &[u8] = b"\nendstream";
    let mut out = Vec::new();
    let mut rest = pdf;
    while let Some(start) = find(rest, START) {
        let body = &rest[start + START.len()..];
        let Some(end) = find(body, END) else {
            break;
        };
        if let Ok(inflated) = miniz_oxide::inflate::decompress_to_vec_zlib(&body[..end]) {
            out.push(inflated);
        }
        rest = &body[end + END.len()..];
    }
    out
}

fn occurrences(haystack: &[u8], needle: &[u8]) -> usize {
    haystack.windows(needle.len()).filter(|w| *w == needle).count()
}

/// Total occurrences of `needle` across all content streams.
fn drawn_count(pdf: &[u8], needle: &[u8]) -> usize {
    content_streams(pdf).iter().map(|s| occurrences(s, needle)).sum()
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn any_stream_contains(pdf: &[u8], needle: &[u8]) -> bool {
    content_streams(pdf).iter().any(|s| contains(s, needle))
}

#[test]
fn produces_a_pdf_with_one_page_per_paginator_page() {
    common::init_logging();
    let sections = common::sample_resume();
    let pdf = export_pdf(&sections, &ExportOptions::default()).unwrap();

    assert!(pdf.starts_with(b"%PDF-"));
    let preview = render_preview(&sections, &Catalog::new(Language::En));
    assert!(preview.page_count() >= 2);
    assert_eq!(page_objects(&pdf), preview.page_count());
    assert!(contains(
        &pdf,
        format!("/Count {}", preview.page_count()).as_bytes()
    ));
}

#[test]
fn pages_are_a4() {
    let pdf = export_pdf(&[common::personal("Jane")], &ExportOptions::default()).unwrap();
    assert_eq!(page_objects(&pdf), 1);
    assert!(contains(&pdf, b"/MediaBox [0 0 595."));
    assert!(contains(&pdf, b" 841."));
}

#[test]
fn empty_resume_exports_one_blank_page() {
    let pdf = export_pdf(&[], &ExportOptions::default()).unwrap();
    assert_eq!(page_objects(&pdf), 1);
    assert!(contains(&pdf, b"/Count 1"));
}

#[test]
fn uses_builtin_helvetica_by_default() {
    let pdf = export_pdf(&common::sample_resume(), &ExportOptions::default()).unwrap();
    assert!(contains(&pdf, b"/BaseFont /Helvetica"));
    assert!(contains(&pdf, b"/BaseFont /Helvetica-Bold"));
    assert!(contains(&pdf, b"/WinAnsiEncoding"));
}

#[test]
fn headings_are_drawn_uppercase_in_the_chosen_language() {
    let sections = common::sample_resume();

    let pdf = export_pdf(&sections, &ExportOptions::default()).unwrap();
    assert!(any_stream_contains(&pdf, b"(EDUCATION)"));
    assert!(any_stream_contains(&pdf, b"(WORK)"));

    let options = ExportOptions {
        language: Language::Es,
        ..Default::default()
    };
    let pdf = export_pdf(&sections, &options).unwrap();
    assert!(any_stream_contains(&pdf, b"(EXPERIENCIA)"));
    assert!(!any_stream_contains(&pdf, b"(WORK)"));
}

#[test]
fn links_become_uri_annotations() {
    let pdf = export_pdf(&common::sample_resume(), &ExportOptions::default()).unwrap();
    assert!(contains(&pdf, b"/Subtype /Link"));
    assert!(contains(&pdf, b"/URI (https://github.com/jane)"));
    assert!(contains(&pdf, b"/URI (https://example.com/p0)"));
}

#[test]
fn title_defaults_to_the_full_name() {
    let pdf = export_pdf(&common::sample_resume(), &ExportOptions::default()).unwrap();
    assert!(contains(&pdf, b"/Title (Jane Doe)"));
    assert!(contains(&pdf, b"/Producer (resume-pages"));

    let options = ExportOptions {
        title: Some("CV 2026".into()),
        ..Default::default()
    };
    let pdf = export_pdf(&common::sample_resume(), &options).unwrap();
    assert!(contains(&pdf, b"/Title (CV 2026)"));
}

#[test]
fn page_numbers_are_optional() {
    let sections = common::sample_resume();

    let pdf = export_pdf(&sections, &ExportOptions::default()).unwrap();
    assert!(!any_stream_contains(&pdf, b"(Page)"));

    let options = ExportOptions {
        page_numbers: true,
        ..Default::default()
    };
    let pdf = export_pdf(&sections, &options).unwrap();
    let streams = content_streams(&pdf);
    let numbered = streams
        .iter()
        .filter(|s| contains(s, b"(Page)") && contains(s, b"(of)"))
        .count();
    assert_eq!(numbered, page_objects(&pdf));
}

#[test]
fn content_streams_cover_every_page() {
    let pdf = export_pdf(&common::sample_resume(), &ExportOptions::default()).unwrap();
    assert_eq!(content_streams(&pdf).len(), page_objects(&pdf));
}

#[test]
fn oversize_section_continues_on_an_extra_page() {
    common::init_logging();
    let sections = vec![
        common::personal("Jane"),
        common::experience(&[45]),
        common::skills(2),
    ];
    let preview = render_preview(&sections, &Catalog::new(Language::En));
    assert_eq!(preview.page_count(), 3);

    let pdf = export_pdf(&sections, &ExportOptions::default()).unwrap();
    assert_eq!(page_objects(&pdf), 4);
    assert_eq!(drawn_count(&pdf, b"(Delivered)"), 45);
    assert_eq!(drawn_count(&pdf, b"(Category)"), 2);
}

#[test]
fn underestimated_sections_are_never_truncated() {
    common::init_logging();
    let sections = vec![
        common::personal("Jane"),
        common::experience(&[2, 2]),
        common::references(12),
    ];
    let preview = render_preview(&sections, &Catalog::new(Language::En));
    assert_eq!(preview.page_count(), 1);

    let options = ExportOptions {
        page_numbers: true,
        ..Default::default()
    };
    let pdf = export_pdf(&sections, &options).unwrap();
    let pages = page_objects(&pdf);
    assert!(pages > preview.page_count());

    assert_eq!(drawn_count(&pdf, b"(Referee)"), 12);
    assert_eq!(drawn_count(&pdf, b"(Former)"), 12);
    for i in 0..12 {
        let number = format!("({i})");
        assert!(
            drawn_count(&pdf, number.as_bytes()) >= 1,
            "referee {i} missing"
        );
    }

    let streams = content_streams(&pdf);
    assert_eq!(streams.len(), pages);
    let last = format!("({pages})");
    assert!(streams.iter().all(|s| contains(s, b"(Page)") && contains(s, last.as_bytes())));
}

#[test]
fn invalid_font_data_is_an_error() {
    let options = ExportOptions {
        font: FontChoice::TrueType {
            regular: vec![0; 16],
            bold: None,
        },
        ..Default::default()
    };
    let err = export_pdf(&common::sample_resume(), &options).unwrap_err();
    assert!(matches!(err, Error::Font(_)), "{err}");
}

#[test]
fn write_pdf_names_the_file_inside_a_directory() {
    let dir = std::env::temp_dir().join(format!("resume-pages-{}", Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();

    let path = write_pdf(&common::sample_resume(), &dir, &ExportOptions::default()).unwrap();
    assert_eq!(path, dir.join(EXPORT_FILE_NAME));
    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));

    let explicit = dir.join("jane.pdf");
    let path = write_pdf(&common::sample_resume(), &explicit, &ExportOptions::default()).unwrap();
    assert_eq!(path, explicit);
    assert!(explicit.is_file());

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn write_pdf_reports_io_errors() {
    let missing = std::env::temp_dir()
        .join(format!("resume-pages-missing-{}", Uuid::new_v4()))
        .join("out.pdf");
    let err = write_pdf(&common::sample_resume(), &missing, &ExportOptions::default()).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

fn embedded_font_options() -> ExportOptions {
    ExportOptions {
        font: FontChoice::TrueType {
            regular: common::fixture_font("DejaVuSans.ttf"),
            bold: Some(common::fixture_font("DejaVuSans-Bold.ttf")),
        },
        ..Default::default()
    }
}

/// Value of every `/Length1` entry, i.e. the size of each embedded font file.
fn embedded_font_sizes(pdf: &[u8]) -> Vec<usize> {
    let key = b"/Length1 ";
    let mut sizes = Vec::new();
    let mut rest = pdf;
    while let Some(at) = find(rest, key) {
        rest = &rest[at + key.len()..];
        let digits: String = rest
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .map(|&b| b as char)
            .collect();
        sizes.push(digits.parse().unwrap());
    }
    sizes
}

#[test]
fn truetype_fonts_are_embedded_as_subsets() {
    common::init_logging();
    let mut sections = common::sample_resume();
    sections.push(common::about("Zażółć gęślą jaźń"));

    let pdf = export_pdf(&sections, &embedded_font_options()).unwrap();

    assert!(contains(&pdf, b"/Subtype /Type0"));
    assert!(contains(&pdf, b"/Encoding /Identity-H"));
    assert!(contains(&pdf, b"/FontFile2"));
    assert!(contains(&pdf, b"/ToUnicode"));
    assert!(!contains(&pdf, b"/BaseFont /Helvetica"));

    // ToUnicode maps the glyph used for each character back to it
    assert!(contains(&pdf, b"<0142>"), "no glyph for U+0142");
    assert!(contains(&pdf, b"<017C>"), "no glyph for U+017C");

    let original = common::fixture_font("DejaVuSans.ttf").len();
    let sizes = embedded_font_sizes(&pdf);
    assert_eq!(sizes.len(), 2);
    assert!(sizes.iter().all(|&size| size > 0 && size < original));

    let preview = render_preview(&sections, &Catalog::new(Language::En));
    assert_eq!(page_objects(&pdf), preview.page_count());
}

#[test]
fn helvetica_drops_characters_outside_winansi() {
    let sections = vec![common::about("Zażółć")];
    let pdf = export_pdf(&sections, &ExportOptions::default()).unwrap();
    // ó is 0xF3 in Windows-1252; ż ł ć have no code and are left out
    assert!(any_stream_contains(&pdf, b"<5A61F3>"));
}

#[test]
fn missing_bold_face_reuses_the_regular_face() {
    let options = ExportOptions {
        font: FontChoice::TrueType {
            regular: common::fixture_font("DejaVuSans.ttf"),
            bold: None,
        },
        ..Default::default()
    };
    let pdf = export_pdf(&common::sample_resume(), &options).unwrap();
    assert_eq!(occurrences(&pdf, b"/FontFile2"), 2);
    assert!(any_stream_contains(&pdf, b"/F2 "));
}
