#![allow(dead_code)]

use resume_pages::model::{
    AboutMe, Certificate, Education, Experience, LanguageProficiency, Link, PersonalInfo, Project,
    Reference, Skill,
};
use resume_pages::{Section, SectionContent};
use uuid::Uuid;

/// Bytes of a font under `tests/fixtures/fonts`.
pub fn fixture_font(name: &str) -> Vec<u8> {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/fonts")
        .join(name);
    std::fs::read(&path).unwrap_or_else(|e| panic!("{}: {e}", path.display()))
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn personal(name: &str) -> Section {
    Section::new(SectionContent::Personal(PersonalInfo {
        full_name: name.to_string(),
        email: "jane@example.com".into(),
        phone: "+1 555 0100".into(),
        location: "Lisbon".into(),
        links: vec![Link {
            id: Uuid::new_v4(),
            label: "GitHub".into(),
            url: "https://github.com/jane".into(),
        }],
    }))
}

pub fn about(description: &str) -> Section {
    Section::new(SectionContent::About(AboutMe {
        description: description.to_string(),
    }))
}

fn bullet_points(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("Delivered improvement number {i}")).collect()
}

/// One experience entry per element of `points`, each with that many bullets.
pub fn experience(points: &[usize]) -> Section {
    Section::new(SectionContent::Experience(
        points
            .iter()
            .enumerate()
            .map(|(i, &n)| Experience {
                id: Uuid::new_v4(),
                title: format!("Engineer {i}"),
                company: "Acme".into(),
                date: "2020 - 2024".into(),
                location: "Remote".into(),
                points: bullet_points(n),
            })
            .collect(),
    ))
}

pub fn education(points: &[usize]) -> Section {
    Section::new(SectionContent::Education(
        points
            .iter()
            .map(|&n| Education {
                id: Uuid::new_v4(),
                school: "University of Porto".into(),
                degree: "BSc Computer Science".into(),
                date: "2016 - 2020".into(),
                gpa: Some("3.8".into()),
                location: "Porto".into(),
                points: bullet_points(n),
            })
            .collect(),
    ))
}

pub fn skills(n: usize) -> Section {
    Section::new(SectionContent::Skills(
        (0..n)
            .map(|i| Skill {
                id: Uuid::new_v4(),
                category: format!("Category {i}"),
                items: vec!["Rust".into(), "SQL".into()],
            })
            .collect(),
    ))
}

pub fn projects(n: usize) -> Section {
    Section::new(SectionContent::Projects(
        (0..n)
            .map(|i| Project {
                id: Uuid::new_v4(),
                name: format!("Project {i}"),
                date: "2023".into(),
                description: "A tool that does one thing well".into(),
                technologies: vec!["Rust".into()],
                link: Some(format!("https://example.com/p{i}")),
            })
            .collect(),
    ))
}

pub fn certificates(n: usize) -> Section {
    Section::new(SectionContent::Certificates(
        (0..n)
            .map(|i| Certificate {
                id: Uuid::new_v4(),
                name: format!("Certificate {i}"),
                issuer: "Issuer".into(),
                date: "2022".into(),
                link: None,
            })
            .collect(),
    ))
}

pub fn languages(n: usize) -> Section {
    Section::new(SectionContent::Languages(
        (0..n)
            .map(|i| LanguageProficiency {
                id: Uuid::new_v4(),
                name: format!("Language {i}"),
                level: "Fluent".into(),
                description: None,
            })
            .collect(),
    ))
}

pub fn references(n: usize) -> Section {
    Section::new(SectionContent::References(
        (0..n)
            .map(|i| Reference {
                id: Uuid::new_v4(),
                name: format!("Referee {i}"),
                title: "CTO".into(),
                company: "Acme".into(),
                email: "ref@example.com".into(),
                phone: None,
                relationship: "Former manager".into(),
            })
            .collect(),
    ))
}

/// A realistic résumé spanning a few pages.
pub fn sample_resume() -> Vec<Section> {
    vec![
        personal("Jane Doe"),
        about("Backend engineer focused on reliable systems."),
        experience(&[5, 4, 3]),
        education(&[2]),
        skills(4),
        projects(3),
        certificates(2),
        languages(3),
        references(2),
    ]
}

/// Small deterministic xorshift generator for property-style loops.
pub struct Rng(u64);

impl Rng {
    pub fn new(seed: u64) -> Self {
        Self(seed.max(1))
    }

    pub fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    pub fn below(&mut self, n: u64) -> u64 {
        self.next() % n
    }
}

/// A random section of any known type with small random content.
pub fn random_section(rng: &mut Rng) -> Section {
    let n = rng.below(6) as usize;
    match rng.below(9) {
        0 => personal("Random Name"),
        1 => about(&"x".repeat(rng.below(900) as usize)),
        2 => experience(&(0..n).map(|_| rng.below(8) as usize).collect::<Vec<_>>()),
        3 => education(&(0..n).map(|_| rng.below(4) as usize).collect::<Vec<_>>()),
        4 => skills(n),
        5 => projects(n),
        6 => certificates(n),
        7 => languages(n),
        _ => references(n),
    }
}

pub fn random_resume(rng: &mut Rng, max_len: u64) -> Vec<Section> {
    let len = rng.below(max_len + 1) as usize;
    (0..len).map(|_| random_section(rng)).collect()
}
