use pdf_writer::{Content, Name, Rect, Str};

use crate::content::Span;
use crate::fonts::FontEntry;

pub(super) struct WordChunk {
    pub(super) text: String,
    pub(super) x_offset: f32, // x relative to line start
    pub(super) width: f32,
    pub(super) link: Option<String>,
}

pub(super) struct LinkAnnotation {
    pub(super) rect: Rect,
    pub(super) url: String,
}

pub(super) struct TextLine {
    pub(super) chunks: Vec<WordChunk>,
    pub(super) total_width: f32,
}

fn finish_line(chunks: &mut Vec<WordChunk>) -> TextLine {
    let total_width = chunks.last().map(|c| c.x_offset + c.width).unwrap_or(0.0);
    TextLine {
        chunks: std::mem::take(chunks),
        total_width,
    }
}

/// Wrap spans into lines no wider than `max_width` points.
/// No space is inserted between spans unless the preceding text ended with
/// whitespace or the next span starts with it ("Link: " + url → "Link: url").
/// A word wider than a whole line is kept on its own line.
pub(super) fn build_lines(
    spans: &[Span],
    font: &FontEntry,
    font_size: f32,
    max_width: f32,
) -> Vec<TextLine> {
    let mut lines: Vec<TextLine> = Vec::new();
    let mut current_chunks: Vec<WordChunk> = Vec::new();
    let mut current_x: f32 = 0.0;
    let mut prev_ended_with_ws = false;
    let space_w = font.space_width(font_size);

    for span in spans {
        let starts_with_ws = span.text.starts_with(char::is_whitespace);

        for (i, word) in span.text.split_whitespace().enumerate() {
            let ww = font.word_width(word, font_size);
            let need_space =
                !current_chunks.is_empty() && (i > 0 || starts_with_ws || prev_ended_with_ws);
            let proposed_x = if need_space {
                current_x + space_w
            } else {
                current_x
            };

            if !current_chunks.is_empty() && proposed_x + ww > max_width {
                lines.push(finish_line(&mut current_chunks));
                current_x = 0.0;
            } else {
                current_x = proposed_x;
            }

            current_chunks.push(WordChunk {
                text: word.to_string(),
                x_offset: current_x,
                width: ww,
                link: span.link.clone(),
            });
            current_x += ww;
        }

        if !span.text.is_empty() {
            prev_ended_with_ws = span.text.ends_with(char::is_whitespace);
        }
    }

    if !current_chunks.is_empty() {
        lines.push(finish_line(&mut current_chunks));
    }

    if lines.is_empty() {
        lines.push(TextLine {
            chunks: vec![],
            total_width: 0.0,
        });
    }
    lines
}

/// Draw one wrapped line with its baseline at `baseline_y`, collecting link
/// rectangles. Adjacent chunks with the same URL merge into one annotation.
pub(super) fn render_line(
    content: &mut Content,
    line: &TextLine,
    font: &FontEntry,
    font_size: f32,
    x: f32,
    baseline_y: f32,
    links: &mut Vec<LinkAnnotation>,
) {
    if line.chunks.is_empty() {
        return;
    }

    content.begin_text();
    content.set_font(Name(font.pdf_name.as_bytes()), font_size);
    let mut td_x = 0.0_f32;
    let mut td_y = 0.0_f32;
    let mut current_link: Option<&str> = None;

    for chunk in &line.chunks {
        let cx = x + chunk.x_offset;

        if chunk.link.as_deref() != current_link {
            match chunk.link {
                Some(_) => content.set_fill_rgb(0.15, 0.39, 0.92),
                None => content.set_fill_gray(0.0),
            };
            current_link = chunk.link.as_deref();
        }

        content.next_line(cx - td_x, baseline_y - td_y);
        td_x = cx;
        td_y = baseline_y;
        content.show(Str(&font.encode(&chunk.text)));

        if let Some(ref url) = chunk.link {
            let bottom = baseline_y - font_size * 0.2;
            let top = baseline_y + font_size * 0.8;
            let merged = links
                .last_mut()
                .filter(|prev| prev.url == *url && (prev.rect.y1 - bottom).abs() < 1.0);
            if let Some(prev) = merged {
                prev.rect.x2 = cx + chunk.width;
            } else {
                links.push(LinkAnnotation {
                    rect: Rect::new(cx, bottom, cx + chunk.width, top),
                    url: url.clone(),
                });
            }
        }
    }
    content.end_text();

    if current_link.is_some() {
        content.set_fill_gray(0.0);
    }
}
