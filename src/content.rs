//! Conceptual content of each section, shared by the preview and the PDF
//! renderer. Renderers decide how blocks look; they never decide where a page
//! ends (see [`crate::layout::paginate`]).

use crate::i18n::Translator;
use crate::model::{
    AboutMe, Certificate, Education, Experience, LanguageProficiency, PersonalInfo, Project,
    Reference, Section, SectionContent, Skill,
};

pub const NAME_SIZE: f32 = 16.0;
pub const HEADING_SIZE: f32 = 12.0;
pub const BODY_SIZE: f32 = 10.0;

/// Gap after each entry of a list section, in mm.
const ENTRY_GAP_MM: f32 = 3.0;
/// Gap between an entry's text and its bullet points, in mm.
const POINTS_GAP_MM: f32 = 2.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Span {
    pub text: String,
    pub link: Option<String>,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: None,
        }
    }

    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: Some(url.into()),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    /// Localized section heading; drawn uppercase above a rule.
    Heading(String),
    Text {
        spans: Vec<Span>,
        size: f32,
        bold: bool,
    },
    Bullet(String),
    /// Vertical space in millimetres.
    Gap(f32),
}

impl Block {
    fn body(text: impl Into<String>) -> Self {
        Block::Text {
            spans: vec![Span::plain(text)],
            size: BODY_SIZE,
            bold: false,
        }
    }

    fn strong(text: impl Into<String>) -> Self {
        Block::Text {
            spans: vec![Span::plain(text)],
            size: BODY_SIZE,
            bold: true,
        }
    }

    /// Plain text of a block, links included, without styling.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Heading(t) | Block::Bullet(t) => t.clone(),
            Block::Text { spans, .. } => spans.iter().map(|s| s.text.as_str()).collect(),
            Block::Gap(_) => String::new(),
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            Block::Text { spans, .. } => spans.iter().all(|s| s.text.trim().is_empty()),
            Block::Bullet(t) => t.trim().is_empty(),
            Block::Heading(_) | Block::Gap(_) => false,
        }
    }
}

/// Blocks for one section. Lines made only of empty fields are left out.
pub fn section_blocks(section: &Section, t: &dyn Translator) -> Vec<Block> {
    let mut out = Vec::new();
    let heading = |out: &mut Vec<Block>| {
        out.push(Block::Heading(t.translate("sections", section.type_key())));
    };

    match &section.content {
        SectionContent::Personal(p) => personal(&mut out, p),
        SectionContent::About(a) => {
            heading(&mut out);
            about(&mut out, a);
        }
        SectionContent::Education(entries) => {
            heading(&mut out);
            entries.iter().for_each(|e| education(&mut out, e));
        }
        SectionContent::Experience(entries) => {
            heading(&mut out);
            entries.iter().for_each(|e| experience(&mut out, e));
        }
        SectionContent::Skills(entries) => {
            heading(&mut out);
            entries.iter().for_each(|e| skill(&mut out, e));
        }
        SectionContent::Projects(entries) => {
            heading(&mut out);
            let label = t.translate("labels", "technologies");
            entries.iter().for_each(|e| project(&mut out, e, &label));
        }
        SectionContent::Certificates(entries) => {
            heading(&mut out);
            entries.iter().for_each(|e| certificate(&mut out, e));
        }
        SectionContent::Languages(entries) => {
            heading(&mut out);
            entries.iter().for_each(|e| language(&mut out, e));
        }
        SectionContent::References(entries) => {
            heading(&mut out);
            entries.iter().for_each(|e| reference(&mut out, e));
        }
        SectionContent::Unknown(_) => heading(&mut out),
    }

    out.retain(|b| !b.is_blank());
    out
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

fn join_present<'a>(parts: impl IntoIterator<Item = &'a str>, sep: &str) -> String {
    parts
        .into_iter()
        .filter(|p| !p.trim().is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

fn personal(out: &mut Vec<Block>, p: &PersonalInfo) {
    out.push(Block::Text {
        spans: vec![Span::plain(&p.full_name)],
        size: NAME_SIZE,
        bold: true,
    });

    let phone = (!p.phone.trim().is_empty()).then(|| format!("Mobile: {}", p.phone));
    let contact = join_present(
        [p.email.as_str(), phone.as_deref().unwrap_or(""), p.location.as_str()],
        " | ",
    );
    out.push(Block::body(contact));

    let mut spans = Vec::new();
    for link in p.links.iter().filter(|l| !l.url.trim().is_empty()) {
        if !spans.is_empty() {
            spans.push(Span::plain(" | "));
        }
        let text = if link.label.trim().is_empty() {
            link.url.clone()
        } else {
            format!("{}: {}", link.label, link.url)
        };
        spans.push(Span::link(text, &link.url));
    }
    if !spans.is_empty() {
        out.push(Block::Text {
            spans,
            size: BODY_SIZE,
            bold: false,
        });
    }
}

fn about(out: &mut Vec<Block>, a: &AboutMe) {
    out.push(Block::body(&a.description));
}

fn points(out: &mut Vec<Block>, points: &[String]) {
    if points.iter().any(|p| !p.trim().is_empty()) {
        out.push(Block::Gap(POINTS_GAP_MM));
        out.extend(points.iter().map(|p| Block::Bullet(p.clone())));
    }
}

fn education(out: &mut Vec<Block>, e: &Education) {
    out.push(Block::strong(&e.school));
    let gpa = present(&e.gpa).map(|gpa| format!("GPA: {gpa}"));
    out.push(Block::body(join_present(
        [e.degree.as_str(), gpa.as_deref().unwrap_or("")],
        " - ",
    )));
    out.push(Block::body(join_present([e.location.as_str(), e.date.as_str()], " | ")));
    points(out, &e.points);
    out.push(Block::Gap(ENTRY_GAP_MM));
}

fn experience(out: &mut Vec<Block>, e: &Experience) {
    out.push(Block::strong(join_present([e.title.as_str(), e.company.as_str()], " - ")));
    out.push(Block::body(join_present([e.location.as_str(), e.date.as_str()], " | ")));
    points(out, &e.points);
    out.push(Block::Gap(ENTRY_GAP_MM));
}

fn skill(out: &mut Vec<Block>, s: &Skill) {
    let items = join_present(s.items.iter().map(String::as_str), ", ");
    out.push(Block::Text {
        spans: vec![Span::plain(join_present([s.category.as_str(), items.as_str()], ": "))],
        size: BODY_SIZE,
        bold: false,
    });
}

fn project(out: &mut Vec<Block>, p: &Project, technologies_label: &str) {
    out.push(Block::strong(join_present([p.name.as_str(), p.date.as_str()], " | ")));
    out.push(Block::body(&p.description));
    let technologies = join_present(p.technologies.iter().map(String::as_str), ", ");
    if !technologies.is_empty() {
        out.push(Block::body(format!("{technologies_label}: {technologies}")));
    }
    if let Some(link) = present(&p.link) {
        out.push(link_line(link));
    }
    out.push(Block::Gap(ENTRY_GAP_MM));
}

fn certificate(out: &mut Vec<Block>, c: &Certificate) {
    out.push(Block::strong(join_present([c.name.as_str(), c.issuer.as_str()], " - ")));
    out.push(Block::body(&c.date));
    if let Some(link) = present(&c.link) {
        out.push(link_line(link));
    }
    out.push(Block::Gap(ENTRY_GAP_MM));
}

fn link_line(url: &str) -> Block {
    Block::Text {
        spans: vec![Span::plain("Link: "), Span::link(url, url)],
        size: BODY_SIZE,
        bold: false,
    }
}

fn language(out: &mut Vec<Block>, l: &LanguageProficiency) {
    let description = present(&l.description).unwrap_or("");
    out.push(Block::body(join_present(
        [l.name.as_str(), l.level.as_str(), description],
        " - ",
    )));
}

fn reference(out: &mut Vec<Block>, r: &Reference) {
    out.push(Block::strong(&r.name));
    let position = match (r.title.trim().is_empty(), r.company.trim().is_empty()) {
        (false, false) => format!("{} at {}", r.title, r.company),
        (false, true) => r.title.clone(),
        (true, _) => r.company.clone(),
    };
    out.push(Block::body(position));
    let phone = present(&r.phone).unwrap_or("");
    out.push(Block::body(join_present([r.email.as_str(), phone], " • ")));
    out.push(Block::body(&r.relationship));
    out.push(Block::Gap(ENTRY_GAP_MM));
}
