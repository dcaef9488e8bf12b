use crate::model::{Section, SectionContent};

/// Added to every estimate so sections never pack edge to edge.
pub const HEIGHT_BUFFER_MM: f32 = 10.0;

const HEADER_MM: f32 = 20.0;
const PERSONAL_MM: f32 = 25.0;
const DEFAULT_MM: f32 = 30.0;

const ABOUT_CHARS_PER_BLOCK: usize = 200;
const ABOUT_BLOCK_MM: f32 = 15.0;
const ENTRY_MM: f32 = 20.0;
const POINT_MM: f32 = 8.0;
const SKILL_MM: f32 = 10.0;
const PROJECT_MM: f32 = 25.0;
const CERTIFICATE_MM: f32 = 15.0;
const LANGUAGE_MM: f32 = 10.0;

/// Heuristic vertical extent of a section, in millimetres of page content.
///
/// Depends only on the section's own content, so the paginator can decide
/// each break in a single left-to-right pass. Never zero or negative; types
/// this version does not know get the default height.
pub fn estimate_height(section: &Section) -> f32 {
    let base = match &section.content {
        SectionContent::Personal(_) => PERSONAL_MM,
        SectionContent::About(about) => {
            let chars = about.description.chars().count();
            HEADER_MM + chars.div_ceil(ABOUT_CHARS_PER_BLOCK) as f32 * ABOUT_BLOCK_MM
        }
        SectionContent::Education(entries) => {
            HEADER_MM + entries.iter().map(|e| entry_height(e.points.len())).sum::<f32>()
        }
        SectionContent::Experience(entries) => {
            HEADER_MM + entries.iter().map(|e| entry_height(e.points.len())).sum::<f32>()
        }
        SectionContent::Skills(entries) => HEADER_MM + entries.len() as f32 * SKILL_MM,
        SectionContent::Projects(entries) => HEADER_MM + entries.len() as f32 * PROJECT_MM,
        SectionContent::Certificates(entries) => {
            HEADER_MM + entries.len() as f32 * CERTIFICATE_MM
        }
        SectionContent::Languages(entries) => HEADER_MM + entries.len() as f32 * LANGUAGE_MM,
        SectionContent::References(_) | SectionContent::Unknown(_) => DEFAULT_MM,
    };
    base + HEIGHT_BUFFER_MM
}

fn entry_height(points: usize) -> f32 {
    ENTRY_MM + points as f32 * POINT_MM
}
