use std::collections::{HashMap, HashSet};

use pdf_writer::types::{CidFontType, FontFlags, SystemInfo, UnicodeCmap};
use pdf_writer::{Name, Pdf, Rect, Ref, Str};
use subsetter::GlyphRemapper;
use ttf_parser::Face;

use crate::error::Error;

/// Font used for exported text.
#[derive(Clone, Debug, Default)]
pub enum FontChoice {
    /// Builtin Helvetica / Helvetica-Bold with WinAnsi encoding. Characters
    /// outside Windows-1252 are dropped.
    #[default]
    Helvetica,
    /// Embedded TrueType/OpenType data, subsetted to the characters used.
    /// `bold` falls back to `regular` when absent.
    TrueType {
        regular: Vec<u8>,
        bold: Option<Vec<u8>>,
    },
}

pub(crate) struct FontEntry {
    pub(crate) pdf_name: String,
    pub(crate) font_ref: Ref,
    pub(crate) widths_1000: Vec<f32>,
    pub(crate) ascender_ratio: f32,
    pub(crate) char_to_gid: Option<HashMap<char, u16>>,
    pub(crate) char_widths_1000: Option<HashMap<char, f32>>,
}

impl FontEntry {
    /// Width of a single character in 1000-units. Uses the per-char cache of an
    /// embedded font, falls back to the WinAnsi table.
    pub(crate) fn char_width_1000(&self, ch: char) -> f32 {
        if let Some(&w) = self.char_widths_1000.as_ref().and_then(|m| m.get(&ch)) {
            return w;
        }
        let byte = char_to_winansi(ch);
        if byte >= 32 {
            self.widths_1000[(byte - 32) as usize]
        } else {
            0.0
        }
    }

    pub(crate) fn word_width(&self, word: &str, font_size: f32) -> f32 {
        word.chars()
            .map(|ch| self.char_width_1000(ch) * font_size / 1000.0)
            .sum()
    }

    pub(crate) fn space_width(&self, font_size: f32) -> f32 {
        self.char_width_1000(' ') * font_size / 1000.0
    }

    /// Bytes for a `Tj` string in this font's encoding.
    pub(crate) fn encode(&self, text: &str) -> Vec<u8> {
        match &self.char_to_gid {
            Some(map) => encode_as_gids(text, map),
            None => to_winansi_bytes(text),
        }
    }
}

/// Regular and bold faces registered for one document.
pub(crate) struct FontSet {
    pub(crate) regular: FontEntry,
    pub(crate) bold: FontEntry,
}

impl FontSet {
    pub(crate) fn get(&self, bold: bool) -> &FontEntry {
        if bold { &self.bold } else { &self.regular }
    }

    pub(crate) fn entries(&self) -> [&FontEntry; 2] {
        [&self.regular, &self.bold]
    }
}

/// Windows-1252 (WinAnsi) byte to Unicode char mapping.
/// Bytes 0x80-0x9F are remapped; all others map directly to their Unicode codepoint.
fn winansi_to_char(byte: u8) -> char {
    match byte {
        0x80 => '\u{20AC}',
        0x82 => '\u{201A}',
        0x83 => '\u{0192}',
        0x84 => '\u{201E}',
        0x85 => '\u{2026}',
        0x86 => '\u{2020}',
        0x87 => '\u{2021}',
        0x88 => '\u{02C6}',
        0x89 => '\u{2030}',
        0x8A => '\u{0160}',
        0x8B => '\u{2039}',
        0x8C => '\u{0152}',
        0x8E => '\u{017D}',
        0x91 => '\u{2018}',
        0x92 => '\u{2019}',
        0x93 => '\u{201C}',
        0x94 => '\u{201D}',
        0x95 => '\u{2022}', // bullet
        0x96 => '\u{2013}',
        0x97 => '\u{2014}',
        0x98 => '\u{02DC}',
        0x99 => '\u{2122}',
        0x9A => '\u{0161}',
        0x9B => '\u{203A}',
        0x9C => '\u{0153}',
        0x9E => '\u{017E}',
        0x9F => '\u{0178}',
        _ => byte as char,
    }
}

/// Map a single Unicode char to its WinAnsi byte, or 0 if unmappable.
fn char_to_winansi(c: char) -> u8 {
    match c as u32 {
        0x0020..=0x007F => c as u8,
        0x00A0..=0x00FF => c as u8,
        0x20AC => 0x80,
        0x201A => 0x82,
        0x0192 => 0x83,
        0x201E => 0x84,
        0x2026 => 0x85,
        0x2020 => 0x86,
        0x2021 => 0x87,
        0x02C6 => 0x88,
        0x2030 => 0x89,
        0x0160 => 0x8A,
        0x2039 => 0x8B,
        0x0152 => 0x8C,
        0x017D => 0x8E,
        0x2018 => 0x91,
        0x2019 => 0x92,
        0x201C => 0x93,
        0x201D => 0x94,
        0x2022 => 0x95,
        0x2013 => 0x96,
        0x2014 => 0x97,
        0x02DC => 0x98,
        0x2122 => 0x99,
        0x0161 => 0x9A,
        0x203A => 0x9B,
        0x0153 => 0x9C,
        0x017E => 0x9E,
        0x0178 => 0x9F,
        _ => 0,
    }
}

/// Convert a UTF-8 string to WinAnsi bytes, dropping unmappable characters.
pub(crate) fn to_winansi_bytes(s: &str) -> Vec<u8> {
    s.chars()
        .map(char_to_winansi)
        .filter(|&b| b != 0)
        .collect()
}

/// Encode UTF-8 text as big-endian 2-byte glyph IDs for CIDFont content streams.
pub(crate) fn encode_as_gids(text: &str, char_to_gid: &HashMap<char, u16>) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() * 2);
    for ch in text.chars() {
        let gid = char_to_gid.get(&ch).copied().unwrap_or(0);
        out.push((gid >> 8) as u8);
        out.push((gid & 0xFF) as u8);
    }
    out
}

/// Approximate Helvetica widths at 1000 units/em for WinAnsi chars 32..=255.
fn helvetica_widths(bold: bool) -> Vec<f32> {
    (32u8..=255u8)
        .map(|b| match (b, bold) {
            (32, _) => 278.0,                               // space
            (33..=47, _) => 333.0,                          // punctuation
            (48..=57, _) => 556.0,                          // digits
            (58..=64, _) => 333.0,                          // more punctuation
            (73, _) => 278.0,                               // I
            (74, false) => 500.0,                           // J
            (74, true) => 556.0,
            (77, _) => 833.0,                               // M (wide)
            (65..=90, false) => 667.0,                      // uppercase A-Z (average)
            (65..=90, true) => 722.0,
            (91..=96, _) => 333.0,                          // brackets etc.
            (102 | 105 | 106 | 108 | 116, false) => 278.0,  // narrow lowercase: f i j l t
            (102 | 105 | 106 | 108 | 116, true) => 333.0,
            (109 | 119, false) => 833.0,                    // m w (wide)
            (109 | 119, true) => 889.0,
            (97..=122, false) => 556.0,                     // lowercase a-z (average)
            (97..=122, true) => 611.0,
            (0x95, _) => 350.0,                             // bullet
            _ => 556.0,
        })
        .collect()
}

fn register_helvetica(
    pdf: &mut Pdf,
    bold: bool,
    pdf_name: String,
    alloc: &mut impl FnMut() -> Ref,
) -> FontEntry {
    let font_ref = alloc();
    let base: &[u8] = if bold { b"Helvetica-Bold" } else { b"Helvetica" };
    pdf.type1_font(font_ref)
        .base_font(Name(base))
        .encoding_predefined(Name(b"WinAnsiEncoding"));
    FontEntry {
        pdf_name,
        font_ref,
        widths_1000: helvetica_widths(bold),
        ascender_ratio: 0.718,
        char_to_gid: None,
        char_widths_1000: None,
    }
}

/// Characters of one face that a document draws, with their subset glyph ids.
struct GlyphSubset {
    remapper: GlyphRemapper,
    /// `(char, glyph id in the subset, advance in 1000-units)`, ordered by char.
    glyphs: Vec<(char, u16, f32)>,
}

impl GlyphSubset {
    fn collect(
        face: &Face,
        ps_name: &str,
        used_chars: &HashSet<char>,
        advance: impl Fn(char) -> Option<f32>,
    ) -> Self {
        let mut chars: Vec<char> = used_chars.iter().copied().collect();
        chars.sort_unstable();

        let mut remapper = GlyphRemapper::new();
        let mut glyphs = Vec::with_capacity(chars.len());
        for ch in chars {
            match face.glyph_index(ch) {
                Some(gid) => {
                    let width = advance(ch).unwrap_or(0.0);
                    glyphs.push((ch, remapper.remap(gid.0), width));
                }
                None => log::warn!("{ps_name} has no glyph for {ch:?}"),
            }
        }
        Self { remapper, glyphs }
    }

    /// `(glyph id, width)` in glyph order, one entry per glyph.
    fn widths_by_gid(&self) -> Vec<(u16, f32)> {
        let mut widths: Vec<(u16, f32)> = self.glyphs.iter().map(|&(_, gid, w)| (gid, w)).collect();
        widths.sort_by_key(|&(gid, _)| gid);
        widths.dedup_by_key(|&mut (gid, _)| gid);
        widths
    }
}

fn identity_system_info() -> SystemInfo<'static> {
    SystemInfo {
        registry: Str(b"Adobe"),
        ordering: Str(b"Identity"),
        supplement: 0,
    }
}

/// Embed `font_data` as a Type0 font over a CID-keyed TrueType subset holding
/// only the glyphs for `used_chars`. Text in this font is written as 2-byte
/// glyph ids (Identity-H) and mapped back to Unicode through `/ToUnicode`.
fn embed_truetype(
    pdf: &mut Pdf,
    ps_name: &str,
    font_data: &[u8],
    pdf_name: String,
    used_chars: &HashSet<char>,
    alloc: &mut impl FnMut() -> Ref,
) -> Result<FontEntry, Error> {
    let face = Face::parse(font_data, 0)
        .map_err(|e| Error::Font(format!("cannot parse {ps_name}: {e}")))?;
    let scale = 1000.0 / face.units_per_em() as f32;
    let advance = |ch: char| {
        face.glyph_index(ch)
            .and_then(|gid| face.glyph_hor_advance(gid))
            .map(|adv| adv as f32 * scale)
    };

    let subset = GlyphSubset::collect(&face, ps_name, used_chars, advance);
    let data = subsetter::subset(font_data, 0, &subset.remapper).unwrap_or_else(|e| {
        log::warn!("subsetting {ps_name} failed ({e}), embedding the whole font");
        font_data.to_vec()
    });
    let data_len = i32::try_from(data.len())
        .map_err(|_| Error::Font(format!("{ps_name} is too large to embed")))?;

    let font_ref = alloc();
    let cid_font_ref = alloc();
    let descriptor_ref = alloc();
    let data_ref = alloc();
    let to_unicode_ref = alloc();

    pdf.stream(data_ref, &data).pair(Name(b"Length1"), data_len);

    let bb = face.global_bounding_box();
    pdf.font_descriptor(descriptor_ref)
        .name(Name(ps_name.as_bytes()))
        .flags(FontFlags::NON_SYMBOLIC)
        .bbox(Rect::new(
            bb.x_min as f32 * scale,
            bb.y_min as f32 * scale,
            bb.x_max as f32 * scale,
            bb.y_max as f32 * scale,
        ))
        .italic_angle(0.0)
        .ascent(face.ascender() as f32 * scale)
        .descent(face.descender() as f32 * scale)
        .cap_height(face.capital_height().map_or(700.0, |h| h as f32 * scale))
        .stem_v(80.0)
        .font_file2(data_ref);

    let mut cid = pdf.cid_font(cid_font_ref);
    cid.subtype(CidFontType::Type2)
        .base_font(Name(ps_name.as_bytes()))
        .system_info(identity_system_info())
        .font_descriptor(descriptor_ref)
        .default_width(0.0)
        .cid_to_gid_map_predefined(Name(b"Identity"));
    let widths = subset.widths_by_gid();
    if !widths.is_empty() {
        let mut w = cid.widths();
        for (gid, width) in widths {
            w.consecutive(gid, [width]);
        }
    }
    drop(cid);

    let cmap_name = format!("{ps_name}-UTF16");
    let mut cmap = UnicodeCmap::new(Name(cmap_name.as_bytes()), identity_system_info());
    for &(ch, gid, _) in &subset.glyphs {
        cmap.pair(gid, ch);
    }
    pdf.stream(to_unicode_ref, cmap.finish().as_slice());

    pdf.type0_font(font_ref)
        .base_font(Name(ps_name.as_bytes()))
        .encoding_predefined(Name(b"Identity-H"))
        .descendant_font(cid_font_ref)
        .to_unicode(to_unicode_ref);

    Ok(FontEntry {
        pdf_name,
        font_ref,
        widths_1000: (32u8..=255u8)
            .map(|byte| advance(winansi_to_char(byte)).unwrap_or(0.0))
            .collect(),
        ascender_ratio: face.ascender() as f32 / face.units_per_em() as f32,
        char_to_gid: Some(subset.glyphs.iter().map(|&(ch, gid, _)| (ch, gid)).collect()),
        char_widths_1000: Some(subset.glyphs.iter().map(|&(ch, _, w)| (ch, w)).collect()),
    })
}

/// Register the regular and bold faces for `choice` under `/F1` and `/F2`.
pub(crate) fn register_fonts(
    pdf: &mut Pdf,
    choice: &FontChoice,
    used_chars: &[HashSet<char>; 2],
    alloc: &mut impl FnMut() -> Ref,
) -> Result<FontSet, Error> {
    let t0 = std::time::Instant::now();
    let [regular_chars, bold_chars] = used_chars;
    let set = match choice {
        FontChoice::Helvetica => FontSet {
            regular: register_helvetica(pdf, false, "F1".into(), alloc),
            bold: register_helvetica(pdf, true, "F2".into(), alloc),
        },
        FontChoice::TrueType { regular, bold } => {
            let bold_data = bold.as_deref().unwrap_or_else(|| {
                log::warn!("no bold face supplied, using the regular face for bold text");
                regular.as_slice()
            });
            let regular = embed_truetype(
                pdf,
                "ResumeRegular",
                regular,
                "F1".into(),
                regular_chars,
                alloc,
            )?;
            let bold = embed_truetype(pdf, "ResumeBold", bold_data, "F2".into(), bold_chars, alloc)?;
            FontSet { regular, bold }
        }
    };
    log::debug!(
        "register_fonts: {} → {:.1}ms",
        match choice {
            FontChoice::Helvetica => "helvetica",
            FontChoice::TrueType { .. } => "truetype",
        },
        t0.elapsed().as_secs_f64() * 1000.0,
    );
    Ok(set)
}
