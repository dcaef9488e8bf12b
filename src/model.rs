use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

use crate::error::Error;

pub type SectionId = Uuid;
pub type EntryId = Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Personal,
    About,
    Education,
    Experience,
    Skills,
    Projects,
    Certificates,
    Languages,
    References,
    Unknown,
}

impl SectionKind {
    /// Every kind a user can add, in menu order.
    pub const ADDABLE: [SectionKind; 9] = [
        SectionKind::Personal,
        SectionKind::About,
        SectionKind::Education,
        SectionKind::Experience,
        SectionKind::Skills,
        SectionKind::Projects,
        SectionKind::Certificates,
        SectionKind::Languages,
        SectionKind::References,
    ];

    /// Wire name, also used as the translation key under `sections`.
    pub fn key(self) -> &'static str {
        match self {
            SectionKind::Personal => "personal",
            SectionKind::About => "about",
            SectionKind::Education => "education",
            SectionKind::Experience => "experience",
            SectionKind::Skills => "skills",
            SectionKind::Projects => "projects",
            SectionKind::Certificates => "certificates",
            SectionKind::Languages => "languages",
            SectionKind::References => "references",
            SectionKind::Unknown => "unknown",
        }
    }

    pub fn is_list(self) -> bool {
        !matches!(
            self,
            SectionKind::Personal | SectionKind::About | SectionKind::Unknown
        )
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub id: Uuid,
    pub label: String,
    pub url: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    #[serde(default)]
    pub links: Vec<Link>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AboutMe {
    pub description: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub id: EntryId,
    pub school: String,
    pub degree: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
    pub location: String,
    #[serde(default)]
    pub points: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: EntryId,
    pub title: String,
    pub company: String,
    pub date: String,
    pub location: String,
    #[serde(default)]
    pub points: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: EntryId,
    pub category: String,
    #[serde(default)]
    pub items: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: EntryId,
    pub name: String,
    pub date: String,
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub id: EntryId,
    pub name: String,
    pub issuer: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageProficiency {
    pub id: EntryId,
    pub name: String,
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    pub id: EntryId,
    pub name: String,
    pub title: String,
    pub company: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub relationship: String,
}

/// Section payload. The variant is the section's type, so content shape and
/// type can never disagree. `Unknown` keeps the raw type name of sections
/// written by a newer producer.
#[derive(Clone, Debug, PartialEq)]
pub enum SectionContent {
    Personal(PersonalInfo),
    About(AboutMe),
    Education(Vec<Education>),
    Experience(Vec<Experience>),
    Skills(Vec<Skill>),
    Projects(Vec<Project>),
    Certificates(Vec<Certificate>),
    Languages(Vec<LanguageProficiency>),
    References(Vec<Reference>),
    Unknown(String),
}

impl SectionContent {
    /// Initial content of a freshly added section.
    pub fn blank(kind: SectionKind) -> Self {
        match kind {
            SectionKind::Personal => SectionContent::Personal(PersonalInfo::default()),
            SectionKind::About => SectionContent::About(AboutMe::default()),
            SectionKind::Education => SectionContent::Education(Vec::new()),
            SectionKind::Experience => SectionContent::Experience(Vec::new()),
            SectionKind::Skills => SectionContent::Skills(Vec::new()),
            SectionKind::Projects => SectionContent::Projects(Vec::new()),
            SectionKind::Certificates => SectionContent::Certificates(Vec::new()),
            SectionKind::Languages => SectionContent::Languages(Vec::new()),
            SectionKind::References => SectionContent::References(Vec::new()),
            SectionKind::Unknown => SectionContent::Unknown(String::new()),
        }
    }

    pub fn kind(&self) -> SectionKind {
        match self {
            SectionContent::Personal(_) => SectionKind::Personal,
            SectionContent::About(_) => SectionKind::About,
            SectionContent::Education(_) => SectionKind::Education,
            SectionContent::Experience(_) => SectionKind::Experience,
            SectionContent::Skills(_) => SectionKind::Skills,
            SectionContent::Projects(_) => SectionKind::Projects,
            SectionContent::Certificates(_) => SectionKind::Certificates,
            SectionContent::Languages(_) => SectionKind::Languages,
            SectionContent::References(_) => SectionKind::References,
            SectionContent::Unknown(_) => SectionKind::Unknown,
        }
    }

    /// Number of entries, or `None` for sections that are not lists.
    pub fn entry_count(&self) -> Option<usize> {
        match self {
            SectionContent::Education(v) => Some(v.len()),
            SectionContent::Experience(v) => Some(v.len()),
            SectionContent::Skills(v) => Some(v.len()),
            SectionContent::Projects(v) => Some(v.len()),
            SectionContent::Certificates(v) => Some(v.len()),
            SectionContent::Languages(v) => Some(v.len()),
            SectionContent::References(v) => Some(v.len()),
            SectionContent::Personal(_) | SectionContent::About(_) | SectionContent::Unknown(_) => {
                None
            }
        }
    }

    /// Copy of this content with one empty entry appended.
    pub fn with_blank_entry(&self) -> Result<(SectionContent, EntryId), Error> {
        let id = Uuid::new_v4();
        let mut next = self.clone();
        match &mut next {
            SectionContent::Education(v) => v.push(Education { id, ..Default::default() }),
            SectionContent::Experience(v) => v.push(Experience { id, ..Default::default() }),
            SectionContent::Skills(v) => v.push(Skill { id, ..Default::default() }),
            SectionContent::Projects(v) => v.push(Project { id, ..Default::default() }),
            SectionContent::Certificates(v) => v.push(Certificate { id, ..Default::default() }),
            SectionContent::Languages(v) => v.push(LanguageProficiency {
                id,
                description: Some(String::new()),
                ..Default::default()
            }),
            SectionContent::References(v) => v.push(Reference {
                id,
                phone: Some(String::new()),
                ..Default::default()
            }),
            other => return Err(Error::NotAList(other.kind())),
        }
        Ok((next, id))
    }

    /// Copy of this content with the entry at `index` removed.
    pub fn without_entry(&self, index: usize) -> Result<SectionContent, Error> {
        Ok(match self {
            SectionContent::Education(v) => SectionContent::Education(remove_at(v, index)?),
            SectionContent::Experience(v) => SectionContent::Experience(remove_at(v, index)?),
            SectionContent::Skills(v) => SectionContent::Skills(remove_at(v, index)?),
            SectionContent::Projects(v) => SectionContent::Projects(remove_at(v, index)?),
            SectionContent::Certificates(v) => SectionContent::Certificates(remove_at(v, index)?),
            SectionContent::Languages(v) => SectionContent::Languages(remove_at(v, index)?),
            SectionContent::References(v) => SectionContent::References(remove_at(v, index)?),
            other => return Err(Error::NotAList(other.kind())),
        })
    }
}

fn remove_at<T: Clone>(items: &[T], index: usize) -> Result<Vec<T>, Error> {
    if index >= items.len() {
        return Err(Error::IndexOutOfRange {
            index,
            len: items.len(),
        });
    }
    let mut out = items.to_vec();
    out.remove(index);
    Ok(out)
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "SectionRepr")]
pub struct Section {
    pub id: SectionId,
    pub content: SectionContent,
}

impl Section {
    pub fn new(content: SectionContent) -> Self {
        Self {
            id: Uuid::new_v4(),
            content,
        }
    }

    pub fn kind(&self) -> SectionKind {
        self.content.kind()
    }

    /// Raw type name as it appears on the wire.
    pub fn type_key(&self) -> &str {
        match &self.content {
            SectionContent::Unknown(raw) => raw,
            other => other.kind().key(),
        }
    }
}

impl Serialize for Section {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Section", 3)?;
        s.serialize_field("id", &self.id)?;
        s.serialize_field("type", self.type_key())?;
        match &self.content {
            SectionContent::Personal(c) => s.serialize_field("content", c)?,
            SectionContent::About(c) => s.serialize_field("content", c)?,
            SectionContent::Education(c) => s.serialize_field("content", c)?,
            SectionContent::Experience(c) => s.serialize_field("content", c)?,
            SectionContent::Skills(c) => s.serialize_field("content", c)?,
            SectionContent::Projects(c) => s.serialize_field("content", c)?,
            SectionContent::Certificates(c) => s.serialize_field("content", c)?,
            SectionContent::Languages(c) => s.serialize_field("content", c)?,
            SectionContent::References(c) => s.serialize_field("content", c)?,
            SectionContent::Unknown(_) => s.serialize_field("content", &())?,
        }
        s.end()
    }
}

// Wire shapes. Known types are tried first; anything else (an unrecognised
// type, or content that does not match its type) lands in `Other`.
#[derive(Deserialize)]
#[serde(untagged)]
enum SectionRepr {
    Known(KnownSection),
    Other(OtherSection),
}

#[derive(Deserialize)]
struct KnownSection {
    id: SectionId,
    #[serde(flatten)]
    content: KnownContent,
}

#[derive(Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "lowercase")]
enum KnownContent {
    Personal(PersonalInfo),
    About(AboutMe),
    Education(Vec<Education>),
    Experience(Vec<Experience>),
    Skills(Vec<Skill>),
    Projects(Vec<Project>),
    Certificates(Vec<Certificate>),
    Languages(Vec<LanguageProficiency>),
    References(Vec<Reference>),
}

#[derive(Deserialize)]
struct OtherSection {
    id: SectionId,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    #[allow(dead_code)]
    content: serde::de::IgnoredAny,
}

impl From<SectionRepr> for Section {
    fn from(repr: SectionRepr) -> Self {
        match repr {
            SectionRepr::Known(known) => Section {
                id: known.id,
                content: match known.content {
                    KnownContent::Personal(c) => SectionContent::Personal(c),
                    KnownContent::About(c) => SectionContent::About(c),
                    KnownContent::Education(c) => SectionContent::Education(c),
                    KnownContent::Experience(c) => SectionContent::Experience(c),
                    KnownContent::Skills(c) => SectionContent::Skills(c),
                    KnownContent::Projects(c) => SectionContent::Projects(c),
                    KnownContent::Certificates(c) => SectionContent::Certificates(c),
                    KnownContent::Languages(c) => SectionContent::Languages(c),
                    KnownContent::References(c) => SectionContent::References(c),
                },
            },
            SectionRepr::Other(other) => {
                log::warn!(
                    "section {} has unrecognised type '{}', keeping it as unknown",
                    other.id,
                    other.kind
                );
                Section {
                    id: other.id,
                    content: SectionContent::Unknown(other.kind),
                }
            }
        }
    }
}
