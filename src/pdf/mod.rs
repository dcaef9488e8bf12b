mod layout;

use std::collections::HashSet;

use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::content::{BODY_SIZE, Block, HEADING_SIZE, Span, section_blocks};
use crate::error::Error;
use crate::fonts::{FontChoice, FontSet, register_fonts};
use crate::i18n::{Language, Translator};
use crate::layout::{PageGeometry, mm_to_pt, page_label, paginate};
use crate::model::{Section, SectionContent, SectionId};

use layout::{LinkAnnotation, build_lines, render_line};

/// Millimetres per point: a line of `n`pt text advances `n * LINE_FACTOR` mm.
const LINE_FACTOR: f32 = 0.3527;
const TEXT_GAP_MM: f32 = 2.0;
const BULLET_GAP_MM: f32 = 3.0;
const BULLET_X_MM: f32 = 5.0;
const BULLET_TEXT_X_MM: f32 = 10.0;
const HEADING_SPACE_BEFORE_MM: f32 = 5.0;
const HEADING_SPACE_AFTER_MM: f32 = 3.0;
const HEADING_RULE_OFFSET_MM: f32 = 2.0;
const HEADING_RULE_WIDTH_MM: f32 = 0.5;
const FOOTER_SIZE: f32 = 9.0;
const BULLET: &str = "\u{2022}";

#[derive(Clone, Debug, Default)]
pub struct ExportOptions {
    pub language: Language,
    pub font: FontChoice,
    /// Draw "Page i of N" centred in the bottom margin of every page.
    pub page_numbers: bool,
    /// Document title; defaults to the full name of the first personal section.
    pub title: Option<String>,
}

/// Content stream and link rectangles of one finished PDF page.
struct PdfPage {
    content: Content,
    links: Vec<LinkAnnotation>,
}

/// Writes paginator pages into PDF pages, top to bottom.
///
/// `cursor` is the distance from the top edge of the current page in
/// millimetres. Each paginator page starts a new PDF page; when its real
/// content runs past the bottom margin the rest continues on an extra page.
struct PageWriter<'a> {
    pages: Vec<PdfPage>,
    content: Content,
    links: Vec<LinkAnnotation>,
    cursor: f32,
    continuations: usize,
    geometry: PageGeometry,
    fonts: &'a FontSet,
}

impl<'a> PageWriter<'a> {
    fn new(geometry: PageGeometry, fonts: &'a FontSet) -> Self {
        Self {
            pages: Vec::new(),
            content: Content::new(),
            links: Vec::new(),
            cursor: geometry.margin_mm,
            continuations: 0,
            geometry,
            fonts,
        }
    }

    fn y_pt(&self, from_top_mm: f32) -> f32 {
        self.geometry.height_pt() - mm_to_pt(from_top_mm)
    }

    fn bottom(&self) -> f32 {
        self.geometry.height_mm - self.geometry.margin_mm
    }

    fn at_top(&self) -> bool {
        self.cursor <= self.geometry.margin_mm
    }

    /// Close the current PDF page and start drawing on a fresh one.
    fn start_page(&mut self) {
        let content = std::mem::replace(&mut self.content, Content::new());
        let links = std::mem::take(&mut self.links);
        self.pages.push(PdfPage { content, links });
        self.cursor = self.geometry.margin_mm;
    }

    /// Continue on an extra page unless `height_mm` still fits above the
    /// bottom margin. A fresh page always accepts content.
    fn ensure_room(&mut self, height_mm: f32) {
        if self.cursor + height_mm > self.bottom() && !self.at_top() {
            log::debug!(
                "pdf page {} full at {:.1}mm, continuing on the next page",
                self.pages.len() + 1,
                self.cursor
            );
            self.continuations += 1;
            self.start_page();
        }
    }

    /// Wrap and draw `spans` starting `indent_mm` right of the left margin,
    /// then advance by `gap_mm`. `marker` is drawn at the bullet position on
    /// the first line's baseline.
    fn text(
        &mut self,
        spans: &[Span],
        size: f32,
        bold: bool,
        indent_mm: f32,
        gap_mm: f32,
        marker: Option<&str>,
    ) {
        let fonts = self.fonts;
        let font = fonts.get(bold);
        let max_width = mm_to_pt(self.geometry.content_width() - indent_mm);
        let lines = build_lines(spans, font, size, max_width);
        let pitch = size * LINE_FACTOR;
        let x = mm_to_pt(self.geometry.margin_mm + indent_mm);

        for (i, line) in lines.iter().enumerate() {
            self.ensure_room(pitch);
            let baseline = self.y_pt(self.cursor + pitch * font.ascender_ratio);
            render_line(&mut self.content, line, font, size, x, baseline, &mut self.links);
            if let (0, Some(marker)) = (i, marker) {
                let regular = fonts.get(false);
                let marker = build_lines(&[Span::plain(marker)], regular, size, f32::MAX);
                let marker_x = mm_to_pt(self.geometry.margin_mm + BULLET_X_MM);
                let mut no_links = Vec::new();
                render_line(&mut self.content, &marker[0], regular, size, marker_x, baseline, &mut no_links);
            }
            self.cursor += pitch;
        }
        self.cursor += gap_mm;
    }

    fn heading(&mut self, title: &str) {
        let pitch = HEADING_SIZE * LINE_FACTOR;
        // Keep the heading on the same page as the first line below it.
        self.ensure_room(
            HEADING_SPACE_BEFORE_MM
                + pitch
                + TEXT_GAP_MM
                + HEADING_SPACE_AFTER_MM
                + BODY_SIZE * LINE_FACTOR,
        );
        if !self.at_top() {
            self.cursor += HEADING_SPACE_BEFORE_MM;
        }
        let title = [Span::plain(title.to_uppercase())];
        self.text(&title, HEADING_SIZE, true, 0.0, TEXT_GAP_MM, None);

        let y = self.y_pt(self.cursor - HEADING_RULE_OFFSET_MM);
        self.content.set_stroke_gray(0.0);
        self.content.set_line_width(mm_to_pt(HEADING_RULE_WIDTH_MM));
        self.content.move_to(mm_to_pt(self.geometry.margin_mm), y);
        self.content
            .line_to(mm_to_pt(self.geometry.width_mm - self.geometry.margin_mm), y);
        self.content.stroke();
        self.cursor += HEADING_SPACE_AFTER_MM;
    }

    fn block(&mut self, block: &Block) {
        match block {
            Block::Heading(title) => self.heading(title),
            Block::Text { spans, size, bold } => {
                self.text(spans, *size, *bold, 0.0, TEXT_GAP_MM, None);
            }
            Block::Bullet(text) => self.text(
                &[Span::plain(text.as_str())],
                BODY_SIZE,
                false,
                BULLET_TEXT_X_MM,
                BULLET_GAP_MM,
                Some(BULLET),
            ),
            Block::Gap(mm) => self.cursor += mm,
        }
    }

    /// Close the last page and return every page written. Always returns at
    /// least one page. With `page_numbers`, each page gets "Page i of N" in
    /// its bottom margin, counting continuation pages.
    fn finish(mut self, page_numbers: bool) -> Vec<PdfPage> {
        self.start_page();
        let mut pages = std::mem::take(&mut self.pages);
        if page_numbers {
            let total = pages.len();
            for (i, page) in pages.iter_mut().enumerate() {
                self.footer(&mut page.content, i + 1, total);
            }
        }
        pages
    }

    fn footer(&self, content: &mut Content, number: usize, total: usize) {
        let font = self.fonts.get(false);
        let text = page_label(number, total);
        let lines = build_lines(&[Span::plain(text)], font, FOOTER_SIZE, f32::MAX);
        let line = &lines[0];
        let x = (self.geometry.width_pt() - line.total_width) / 2.0;
        let baseline = self.y_pt(self.geometry.height_mm - self.geometry.margin_mm / 2.0);
        content.set_fill_gray(0.4);
        render_line(content, line, font, FOOTER_SIZE, x, baseline, &mut Vec::new());
        content.set_fill_gray(0.0);
    }
}

fn default_title(sections: &[Section]) -> Option<String> {
    sections.iter().find_map(|s| match &s.content {
        SectionContent::Personal(p) if !p.full_name.trim().is_empty() => Some(p.full_name.clone()),
        _ => None,
    })
}

/// Render `sections` to PDF bytes, one A4 page per paginator page.
///
/// Sections start a new page only where [`paginate`] says so. When a
/// paginator page holds more real content than fits above the bottom margin,
/// the rest flows onto a continuation page so nothing is lost.
pub fn render(
    sections: &[Section],
    options: &ExportOptions,
    translator: &dyn Translator,
) -> Result<Vec<u8>, Error> {
    let t0 = std::time::Instant::now();
    let geometry = PageGeometry::A4;
    let mut pdf = Pdf::new();
    let mut next_id = 1i32;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();

    // Phase 1: paginate and derive per-section blocks
    let pages = paginate(sections, geometry.content_height());
    let page_blocks: Vec<Vec<(SectionId, Vec<Block>)>> = pages
        .iter()
        .map(|page| {
            page.sections()
                .map(|s| (s.id, section_blocks(s, translator)))
                .collect()
        })
        .collect();

    let t_paginate = t0.elapsed();

    // Phase 2: collect used characters per weight and register fonts
    let mut used_chars: [HashSet<char>; 2] = [HashSet::new(), HashSet::new()];
    for (_, blocks) in page_blocks.iter().flatten() {
        for block in blocks {
            match block {
                Block::Heading(t) => used_chars[1].extend(t.to_uppercase().chars()),
                Block::Text { spans, bold, .. } => {
                    let idx = usize::from(*bold);
                    for span in spans {
                        used_chars[idx].extend(span.text.chars());
                    }
                }
                Block::Bullet(t) => used_chars[0].extend(t.chars()),
                Block::Gap(_) => {}
            }
        }
    }
    used_chars[0].extend(BULLET.chars());
    if options.page_numbers {
        used_chars[0].extend(page_label(0, 0).chars());
        used_chars[0].extend('0'..='9');
    }
    for chars in used_chars.iter_mut() {
        chars.insert(' ');
    }

    let fonts = register_fonts(&mut pdf, &options.font, &used_chars, &mut alloc)?;

    let t_fonts = t0.elapsed();

    // Phase 3: lay out the content streams, one or more PDF pages per paginator page
    let mut writer = PageWriter::new(geometry, &fonts);
    for (page_idx, blocks) in page_blocks.iter().enumerate() {
        if page_idx > 0 {
            writer.start_page();
        }
        for (section_id, section) in blocks {
            let continued_before = writer.continuations;
            for block in section {
                writer.block(block);
            }
            if writer.continuations > continued_before {
                log::warn!(
                    "page {}: section {section_id} is taller than estimated and continues on {} extra page(s)",
                    page_idx + 1,
                    writer.continuations - continued_before,
                );
            }
        }
    }
    let continuations = writer.continuations;
    let written = writer.finish(options.page_numbers);

    let t_layout = t0.elapsed();

    // Phase 4: allocate page and content IDs now that page count is known
    let n = written.len();
    let page_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();
    let content_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();

    let page_annot_refs: Vec<Vec<Ref>> = written
        .iter()
        .map(|page| {
            page.links
                .iter()
                .map(|link| {
                    let annot_ref = alloc();
                    let mut annot = pdf.annotation(annot_ref);
                    annot
                        .subtype(pdf_writer::types::AnnotationType::Link)
                        .rect(link.rect)
                        .border(0.0, 0.0, 0.0, None);
                    annot
                        .action()
                        .action_type(pdf_writer::types::ActionType::Uri)
                        .uri(Str(link.url.as_bytes()));
                    annot_ref
                })
                .collect()
        })
        .collect();

    for (i, page) in written.into_iter().enumerate() {
        let raw = page.content.finish();
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
        pdf.stream(content_ids[i], &compressed).filter(Filter::FlateDecode);
    }

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(n as i32);

    let media_box = Rect::new(0.0, 0.0, geometry.width_pt(), geometry.height_pt());
    for i in 0..n {
        let mut page = pdf.page(page_ids[i]);
        page.media_box(media_box)
            .parent(pages_id)
            .contents(content_ids[i]);
        if !page_annot_refs[i].is_empty() {
            page.annotations(page_annot_refs[i].iter().copied());
        }
        let mut resources = page.resources();
        let mut font_dict = resources.fonts();
        for entry in fonts.entries() {
            font_dict.pair(Name(entry.pdf_name.as_bytes()), entry.font_ref);
        }
    }

    let title = options.title.clone().or_else(|| default_title(sections));
    let info_id = alloc();
    let mut info = pdf.document_info(info_id);
    if let Some(ref title) = title {
        info.title(TextStr(title));
    }
    info.producer(TextStr(concat!("resume-pages ", env!("CARGO_PKG_VERSION"))));
    drop(info);

    let t_assembly = t0.elapsed();

    log::info!(
        "Render phases: paginate={:.1}ms, fonts={:.1}ms, layout={:.1}ms, assembly={:.1}ms ({} pages, {} continued)",
        t_paginate.as_secs_f64() * 1000.0,
        (t_fonts - t_paginate).as_secs_f64() * 1000.0,
        (t_layout - t_fonts).as_secs_f64() * 1000.0,
        (t_assembly - t_layout).as_secs_f64() * 1000.0,
        n,
        continuations,
    );

    Ok(pdf.finish())
}
