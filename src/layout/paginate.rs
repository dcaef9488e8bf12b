use crate::model::Section;

use super::estimate::estimate_height;

/// One physical page worth of whole sections, borrowed from the input list.
#[derive(Clone, Debug, PartialEq)]
pub struct Page<'a> {
    sections: Vec<(&'a Section, f32)>,
    height: f32,
}

impl<'a> Page<'a> {
    fn new() -> Self {
        Self {
            sections: Vec::new(),
            height: 0.0,
        }
    }

    fn push(&mut self, section: &'a Section, height: f32) {
        self.sections.push((section, height));
        self.height += height;
    }

    pub fn sections(&self) -> impl ExactSizeIterator<Item = &'a Section> + '_ {
        self.sections.iter().map(|&(s, _)| s)
    }

    /// Sections paired with their estimated heights.
    pub fn entries(&self) -> &[(&'a Section, f32)] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Sum of the estimated heights on this page.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// True when the estimates exceed `budget`. Only possible for a page
    /// holding a single section that is taller than a page on its own.
    pub fn overflows(&self, budget: f32) -> bool {
        self.height > budget
    }
}

/// Greedy single-pass partition of `sections` into pages of at most
/// `page_content_height` estimated millimetres.
///
/// Order is preserved and each section lands on exactly one page. A section
/// that does not fit starts a new page unless the current page is still
/// empty, in which case it is placed anyway and the page overflows; sections
/// are never split. Never returns an empty page.
pub fn paginate(sections: &[Section], page_content_height: f32) -> Vec<Page<'_>> {
    let mut pages: Vec<Page<'_>> = Vec::new();
    let mut current = Page::new();

    for section in sections {
        let h = estimate_height(section);
        if current.height + h > page_content_height && !current.is_empty() {
            log::debug!(
                "page {} closed at {:.1}mm, section {} ({:.1}mm) starts a new page",
                pages.len() + 1,
                current.height,
                section.id,
                h
            );
            pages.push(std::mem::replace(&mut current, Page::new()));
        }
        current.push(section, h);
        if current.len() == 1 && h > page_content_height {
            log::warn!(
                "section {} ({}) estimated at {:.1}mm exceeds the page budget of {:.1}mm",
                section.id,
                section.type_key(),
                h,
                page_content_height
            );
        }
    }

    if !current.is_empty() {
        pages.push(current);
    }
    pages
}
