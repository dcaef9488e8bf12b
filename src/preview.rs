//! On-screen preview: the paginator's pages as sized, numbered page boxes.

use crate::content::{Block, section_blocks};
use crate::i18n::Translator;
use crate::layout::{PageGeometry, page_label, paginate};
use crate::model::{Section, SectionId, SectionKind};

#[derive(Clone, Debug, PartialEq)]
pub struct PreviewSection {
    pub id: SectionId,
    pub kind: SectionKind,
    pub estimated_height_mm: f32,
    pub blocks: Vec<Block>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PreviewPage {
    /// 1-based.
    pub number: usize,
    pub total: usize,
    pub width_mm: f32,
    /// Pages grow past this when a single section overflows.
    pub min_height_mm: f32,
    pub padding_mm: f32,
    pub sections: Vec<PreviewSection>,
    /// "Page i of N" boundary marker, present on every page but the last.
    pub footer: Option<String>,
    pub overflows: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Preview {
    pub pages: Vec<PreviewPage>,
}

impl Preview {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Section ids per page, in order.
    pub fn page_ids(&self) -> Vec<Vec<SectionId>> {
        self.pages
            .iter()
            .map(|p| p.sections.iter().map(|s| s.id).collect())
            .collect()
    }
}

pub fn render_preview(sections: &[Section], translator: &dyn Translator) -> Preview {
    let geometry = PageGeometry::A4;
    let budget = geometry.content_height();
    let pages = paginate(sections, budget);
    let total = pages.len();

    let pages = pages
        .iter()
        .enumerate()
        .map(|(i, page)| PreviewPage {
            number: i + 1,
            total,
            width_mm: geometry.width_mm,
            min_height_mm: geometry.height_mm,
            padding_mm: geometry.margin_mm,
            sections: page
                .entries()
                .iter()
                .map(|&(section, height)| PreviewSection {
                    id: section.id,
                    kind: section.kind(),
                    estimated_height_mm: height,
                    blocks: section_blocks(section, translator),
                })
                .collect(),
            footer: (i + 1 < total).then(|| page_label(i + 1, total)),
            overflows: page.overflows(budget),
        })
        .collect();

    Preview { pages }
}
