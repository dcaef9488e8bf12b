mod error;
mod fonts;
mod pdf;

pub mod content;
pub mod i18n;
pub mod layout;
pub mod model;
pub mod preview;
pub mod store;

pub use error::Error;
pub use fonts::FontChoice;
pub use i18n::{Catalog, Language, Translator};
pub use layout::{Page, PageGeometry, estimate_height, paginate};
pub use model::{Section, SectionContent, SectionId, SectionKind};
pub use pdf::ExportOptions;
pub use preview::{Preview, render_preview};
pub use store::{ListenerId, SectionStore, Snapshot, move_item};

use std::path::{Path, PathBuf};
use std::time::Instant;

/// File name used when exporting into a directory.
pub const EXPORT_FILE_NAME: &str = "resume.pdf";

/// Render `sections` to PDF bytes using the builtin translations for
/// `options.language`.
pub fn export_pdf(sections: &[Section], options: &ExportOptions) -> Result<Vec<u8>, Error> {
    export_pdf_with(sections, options, &Catalog::new(options.language))
}

/// Same as [`export_pdf`] with a caller-supplied translator.
pub fn export_pdf_with(
    sections: &[Section],
    options: &ExportOptions,
    translator: &dyn Translator,
) -> Result<Vec<u8>, Error> {
    pdf::render(sections, options, translator)
}

/// Export to `output`. When `output` is a directory the document is written
/// to `output/resume.pdf`. Returns the path written.
pub fn write_pdf(
    sections: &[Section],
    output: &Path,
    options: &ExportOptions,
) -> Result<PathBuf, Error> {
    let t0 = Instant::now();

    let bytes = export_pdf(sections, options)?;
    let t_render = t0.elapsed();

    let path = if output.is_dir() {
        output.join(EXPORT_FILE_NAME)
    } else {
        output.to_path_buf()
    };
    std::fs::write(&path, &bytes).map_err(|e| {
        Error::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {}", e, path.display()),
        ))
    })?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: render={:.1}ms, write={:.1}ms, total={:.1}ms (output {} bytes, {} sections)",
        t_render.as_secs_f64() * 1000.0,
        (t_total - t_render).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        bytes.len(),
        sections.len(),
    );

    Ok(path)
}
