//! Synthetic people and prose for seeding

use rand::seq::SliceRandom;
use rand::Rng;

const FIRST_NAMES: &[&str] = &[
    "Olena", "Taras", "Iryna", "Andrii", "Maria", "Bohdan", "Sofia", "Dmytro", "Anna", "Yurii",
    "James", "Linda", "Robert", "Patricia", "Michael", "Jennifer", "David", "Elizabeth", "Daniel",
    "Susan", "Thomas", "Karen", "Joseph", "Nancy", "Charles", "Lisa", "Mark", "Sandra", "Paul",
    "Ashley", "Steven", "Emily", "Kevin", "Donna", "Brian", "Michelle", "George", "Carol",
];

const LAST_NAMES: &[&str] = &[
    "Shevchenko", "Kovalenko", "Bondarenko", "Tkachenko", "Kravchenko", "Melnyk", "Boyko",
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Wilson", "Anderson", "Taylor", "Moore", "Jackson",
    "Martin", "Lee", "Thompson", "White", "Harris", "Clark", "Lewis", "Walker", "Young",
];

const EMAIL_DOMAINS: &[&str] = &["example.com", "example.org", "example.net"];

const WORDS: &[&str] = &[
    "account", "agent", "analysis", "answer", "board", "budget", "build", "campaign", "change",
    "check", "client", "close", "data", "deadline", "design", "draft", "feature", "feedback",
    "figure", "follow", "form", "goal", "impact", "issue", "key", "launch", "list", "market",
    "meeting", "message", "method", "model", "note", "office", "order", "plan", "policy",
    "prepare", "process", "product", "project", "quality", "record", "release", "report",
    "research", "review", "risk", "schedule", "section", "service", "share", "source", "staff",
    "step", "summary", "support", "system", "team", "test", "update", "value", "week", "work",
];

/// Generates random names, emails, titles and paragraphs.
pub struct Faker<'a, R: Rng + ?Sized> {
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> Faker<'a, R> {
    pub fn new(rng: &'a mut R) -> Self {
        Self { rng }
    }

    fn pick(&mut self, list: &'static [&'static str]) -> &'static str {
        // Lists are non-empty constants.
        list.choose(&mut *self.rng).copied().unwrap_or_default()
    }

    pub fn name(&mut self) -> String {
        format!("{} {}", self.pick(FIRST_NAMES), self.pick(LAST_NAMES))
    }

    /// A lowercase `first.last<nn>@domain` address.
    pub fn email(&mut self) -> String {
        let first = self.pick(FIRST_NAMES).to_lowercase();
        let last = self.pick(LAST_NAMES).to_lowercase();
        let suffix: u16 = self.rng.gen_range(0..1000);
        format!("{}.{}{}@{}", first, last, suffix, self.pick(EMAIL_DOMAINS))
    }

    /// A capitalised sentence of roughly `nb_words` words ending in a period.
    pub fn sentence(&mut self, nb_words: usize) -> String {
        let spread = (nb_words * 2 / 5).max(1);
        let low = nb_words.saturating_sub(spread).max(1);
        let count = self.rng.gen_range(low..=nb_words + spread);

        let words: Vec<&str> = (0..count).map(|_| self.pick(WORDS)).collect();
        let mut sentence = capitalize(&words.join(" "));
        sentence.push('.');
        sentence
    }

    /// Whole sentences joined by spaces, no longer than `max_chars`.
    pub fn text(&mut self, max_chars: usize) -> String {
        let mut text = String::new();
        loop {
            let sentence = self.sentence(8);
            let extra = if text.is_empty() { sentence.len() } else { sentence.len() + 1 };
            if text.len() + extra > max_chars {
                break;
            }
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(&sentence);
        }
        if text.is_empty() {
            let mut short = self.pick(WORDS).to_string();
            short.truncate(max_chars.saturating_sub(1));
            text = capitalize(&short);
            text.push('.');
        }
        text
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
