mod common;

use rand::rngs::StdRng;
use rand::seq::SliceRandom as _;
use rand::{Rng, SeedableRng as _};

use resume_pdf::document::{document_lines, resume_to_pdf};
use resume_pdf::document_configuration::DocumentConfiguration;
use resume_pdf::layouting::layout_pages;
use resume_pdf::locale::Locale;
use resume_pdf::resume::{
    Basics, Education, Experience, Link, Project, ResumeRecord, SkillGroup,
};
use resume_pdf::text::{collapse_whitespace, wrap_text};

struct FuzzConfiguration {
    resumes_to_generate: u64,
    maximum_entries: usize,
    maximum_string_length: usize,
}

const CONFIGURATION: FuzzConfiguration = FuzzConfiguration {
    resumes_to_generate: 40,
    maximum_entries: 12,
    maximum_string_length: 160,
};

const ALPHABET: &[char] = &[
    'a', 'b', 'c', 'x', 'y', 'z', 'A', 'Q', '0', '7', '.', ',', '%', '(', ')', '–', '张', '三', '产',
    '品', '经', '理', '增', '长', '，', '。', 'é', ' ', ' ', ' ', '\t', '\n',
];

fn random_string(rng: &mut StdRng) -> String {
    let length = rng.gen_range(0..CONFIGURATION.maximum_string_length);
    (0..length)
        .map(|_| *ALPHABET.choose(rng).unwrap())
        .collect()
}

/// A value which is, in turn, absent, blank, a placeholder or actual text.
fn random_value(rng: &mut StdRng) -> Option<String> {
    match rng.gen_range(0..=9) {
        0 => None,
        1 => Some("   ".into()),
        2 => Some(format!("TODO{}", random_string(rng))),
        3 => Some(format!("  TODO: {}", random_string(rng))),
        _ => Some(random_string(rng)),
    }
}

fn random_values(rng: &mut StdRng) -> Vec<Option<String>> {
    let count = rng.gen_range(0..CONFIGURATION.maximum_entries);
    (0..count).map(|_| random_value(rng)).collect()
}

fn random_links(rng: &mut StdRng) -> Vec<Link> {
    let count = rng.gen_range(0..4);
    (0..count)
        .map(|_| Link {
            label: random_value(rng),
            url: random_value(rng),
        })
        .collect()
}

fn random_resume(rng: &mut StdRng) -> ResumeRecord {
    let experience_count = rng.gen_range(0..6);
    let project_count = rng.gen_range(0..4);
    let skill_count = rng.gen_range(0..5);
    let education_count = rng.gen_range(0..3);
    ResumeRecord {
        basics: Basics {
            name: random_value(rng),
            headline: random_value(rng),
            location: random_value(rng),
            email: random_value(rng),
            phone: random_value(rng),
            links: random_links(rng),
        },
        highlights: random_values(rng),
        experience: (0..experience_count)
            .map(|_| Experience {
                title: random_value(rng),
                org: random_value(rng),
                role: random_value(rng),
                start: random_value(rng),
                end: random_value(rng),
                location: random_value(rng),
                summary: random_values(rng),
                achievements: random_values(rng),
            })
            .collect(),
        projects: (0..project_count)
            .map(|_| Project {
                name: random_value(rng),
                context: random_value(rng),
                actions: random_values(rng),
                result: random_value(rng),
                evidence: random_links(rng),
                reflection: random_value(rng),
            })
            .collect(),
        skills: (0..skill_count)
            .map(|_| SkillGroup {
                group: random_value(rng),
                items: random_values(rng),
            })
            .collect(),
        education: (0..education_count)
            .map(|_| Education {
                school: random_value(rng),
                degree: random_value(rng),
                major: random_value(rng),
                start: random_value(rng),
                end: random_value(rng),
            })
            .collect(),
        certifications: random_values(rng),
    }
}

#[test]
fn random_resumes_stay_within_the_printable_area() {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..CONFIGURATION.resumes_to_generate {
        let record = random_resume(&mut rng);
        let locale = if rng.gen_bool(0.5) {
            Locale::Chinese
        } else {
            Locale::English
        };
        let configuration = DocumentConfiguration {
            locale,
            ..DocumentConfiguration::default()
        };
        let geometry = configuration.page_geometry;

        let lines = document_lines(&record, locale);
        assert!(lines.iter().all(|line| !line.text.contains("TODO")));

        let pages = layout_pages(&lines, &configuration).unwrap();
        assert!(!pages.is_empty());
        for page in &pages {
            assert!(!page.lines.is_empty());
            for line in &page.lines {
                assert!(
                    line.y >= geometry.bottom() && line.y <= geometry.top(),
                    "the line {:?} is placed outside of the printable area",
                    line
                );
            }
        }

        let bytes = resume_to_pdf(&record, &configuration).unwrap();
        assert_eq!(
            common::assert_structurally_valid(&bytes),
            5 + 2 * pages.len()
        );
    }
}

#[test]
fn wrapping_random_text_loses_no_characters() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..500 {
        let text = random_string(&mut rng);
        let maximum_characters = rng.gen_range(1..60);
        let fragments = wrap_text(&text, maximum_characters);
        assert!(fragments
            .iter()
            .all(|fragment| fragment.chars().count() <= maximum_characters));
        assert_eq!(fragments.concat(), collapse_whitespace(&text));
    }
}

#[test]
fn wrapped_bullets_rejoin_into_their_text() {
    let mut rng = StdRng::seed_from_u64(7);
    let configuration = DocumentConfiguration::default();
    for _ in 0..100 {
        let text = format!("{}{}", "经".repeat(rng.gen_range(1..5)), random_string(&mut rng));
        let lines = vec![resume_pdf::line::Line::new(
            resume_pdf::line::LineKind::Bullet,
            text.clone(),
        )];
        let pages = layout_pages(&lines, &configuration).unwrap();
        let rejoined: String = pages[0]
            .lines
            .iter()
            .map(|line| {
                line.text
                    .strip_prefix("• ")
                    .or_else(|| line.text.strip_prefix("  "))
                    .unwrap()
            })
            .collect();
        assert_eq!(rejoined, collapse_whitespace(&text));
    }
}
