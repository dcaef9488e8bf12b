mod estimate;
mod paginate;

pub use estimate::{HEIGHT_BUFFER_MM, estimate_height};
pub use paginate::{Page, paginate};

const MM_PER_PT: f32 = 25.4 / 72.0;

/// Physical page geometry in millimetres. Only A4 with fixed margins is used.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageGeometry {
    pub width_mm: f32,
    pub height_mm: f32,
    pub margin_mm: f32,
}

impl PageGeometry {
    pub const A4: PageGeometry = PageGeometry {
        width_mm: 210.0,
        height_mm: 297.0,
        margin_mm: 20.0,
    };

    /// Vertical packing budget per page: height minus top and bottom margins.
    pub fn content_height(&self) -> f32 {
        self.height_mm - 2.0 * self.margin_mm
    }

    pub fn content_width(&self) -> f32 {
        self.width_mm - 2.0 * self.margin_mm
    }

    pub fn width_pt(&self) -> f32 {
        mm_to_pt(self.width_mm)
    }

    pub fn height_pt(&self) -> f32 {
        mm_to_pt(self.height_mm)
    }
}

pub fn mm_to_pt(mm: f32) -> f32 {
    mm / MM_PER_PT
}

/// Page boundary label shared by both renderers.
pub fn page_label(number: usize, total: usize) -> String {
    format!("Page {number} of {total}")
}
