//! Label lookup for section headings and inline labels.
//!
//! Only headings and a handful of inline labels ("Technologies") go through
//! translation; layout never depends on the returned text.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Language {
    #[default]
    En,
    Es,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
        }
    }
}

pub trait Translator {
    /// Label for `key` within `section` (e.g. `("sections", "education")`).
    /// Returns the key itself when there is no entry.
    fn translate(&self, section: &str, key: &str) -> String;
}

/// Builtin translation tables.
#[derive(Clone, Copy, Debug, Default)]
pub struct Catalog {
    pub language: Language,
}

impl Catalog {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    fn lookup(&self, section: &str, key: &str) -> Option<&'static str> {
        let table: &[(&str, &str)] = match (self.language, section) {
            (Language::En, "sections") => EN_SECTIONS,
            (Language::En, "labels") => EN_LABELS,
            (Language::Es, "sections") => ES_SECTIONS,
            (Language::Es, "labels") => ES_LABELS,
            _ => return None,
        };
        table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }
}

impl Translator for Catalog {
    fn translate(&self, section: &str, key: &str) -> String {
        match self.lookup(section, key) {
            Some(label) => label.to_string(),
            None => {
                log::debug!(
                    "missing translation {}.{section}.{key}",
                    self.language.code()
                );
                key.to_string()
            }
        }
    }
}

const EN_SECTIONS: &[(&str, &str)] = &[
    ("personal", "Personal Information"),
    ("about", "About Me"),
    ("education", "Education"),
    ("experience", "Work Experience"),
    ("skills", "Skills Summary"),
    ("projects", "Projects"),
    ("certificates", "Certificates"),
    ("languages", "Languages"),
    ("references", "References"),
];

const EN_LABELS: &[(&str, &str)] = &[
    ("fullName", "Full Name"),
    ("email", "Email"),
    ("phone", "Phone"),
    ("location", "Location"),
    ("links", "Links"),
    ("school", "School"),
    ("degree", "Degree"),
    ("date", "Date"),
    ("gpa", "GPA"),
    ("description", "Description"),
    ("title", "Title"),
    ("company", "Company"),
    ("points", "Points"),
    ("category", "Category"),
    ("skills", "Skills"),
    ("projectName", "Project Name"),
    ("technologies", "Technologies"),
    ("link", "Link"),
    ("certificateName", "Certificate Name"),
    ("issuer", "Issuer"),
    ("language", "Language"),
    ("proficiencyLevel", "Proficiency Level"),
    ("additionalDetails", "Additional Details"),
    ("refName", "Reference Name"),
    ("refTitle", "Title/Position"),
    ("relationship", "Relationship"),
];

const ES_SECTIONS: &[(&str, &str)] = &[
    ("personal", "Información Personal"),
    ("about", "Sobre Mí"),
    ("education", "Educación"),
    ("experience", "Experiencia Laboral"),
    ("skills", "Resumen de Habilidades"),
    ("projects", "Proyectos"),
    ("certificates", "Certificados"),
    ("languages", "Idiomas"),
    ("references", "Referencias"),
];

const ES_LABELS: &[(&str, &str)] = &[
    ("fullName", "Nombre Completo"),
    ("email", "Correo Electrónico"),
    ("phone", "Teléfono"),
    ("location", "Ubicación"),
    ("links", "Enlaces"),
    ("school", "Escuela"),
    ("degree", "Título"),
    ("date", "Fecha"),
    ("gpa", "Promedio"),
    ("description", "Descripción"),
    ("title", "Cargo"),
    ("company", "Empresa"),
    ("points", "Puntos"),
    ("category", "Categoría"),
    ("skills", "Habilidades"),
    ("projectName", "Nombre del Proyecto"),
    ("technologies", "Tecnologías"),
    ("link", "Enlace"),
    ("certificateName", "Nombre del Certificado"),
    ("issuer", "Emisor"),
    ("language", "Idioma"),
    ("proficiencyLevel", "Nivel de Competencia"),
    ("additionalDetails", "Detalles Adicionales"),
    ("refName", "Nombre de la Referencia"),
    ("refTitle", "Cargo/Posición"),
    ("relationship", "Relación"),
];
