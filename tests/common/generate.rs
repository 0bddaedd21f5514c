//! Random record generation for round-trip tests

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use pass::{Contact, DocumentRecord, Message, User};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

const NAME_CHARS: &[char] = &[
    'a', 'b', 'c', 'x', 'y', 'z', 'A', 'Q', '0', '7', '-', '_', '.', ' ', 'é', 'ß',
];

/// Characters that need escaping or quoting somewhere on the way to Turtle
const TEXT_CHARS: &[char] = &[
    'a', 'e', 'Z', '1', ' ', '"', '\'', '\\', '\n', '\t', '#', '<', '>', ';', ',', '.', '@', 'ü',
    '中', '%',
];

fn pick(rng: &mut StdRng, pool: &[char], min: usize, max: usize) -> String {
    let len = rng.gen_range(min..=max);
    (0..len)
        .map(|_| *pool.choose(rng).unwrap_or(&'a'))
        .collect()
}

pub fn username(rng: &mut StdRng) -> String {
    // leading letter keeps names distinct from the header Thing
    format!("u{}", pick(rng, NAME_CHARS, 1, 12))
}

pub fn text(rng: &mut StdRng) -> String {
    pick(rng, TEXT_CHARS, 0, 40)
}

pub fn web_id(rng: &mut StdRng) -> String {
    format!("https://{}.example/profile/card#me", rng.gen_range(1000..9999))
}

/// A timestamp with millisecond precision, as stored in pods
pub fn timestamp(rng: &mut StdRng) -> DateTime<Utc> {
    let millis = rng.gen_range(946_684_800_000i64..4_102_444_800_000i64);
    Utc.timestamp_millis_opt(millis).single().unwrap_or_else(Utc::now)
}

pub fn date(rng: &mut StdRng) -> NaiveDate {
    NaiveDate::from_ymd_opt(rng.gen_range(1930..2030), rng.gen_range(1..=12), rng.gen_range(1..=28))
        .unwrap_or_default()
}

pub fn contact(rng: &mut StdRng) -> Contact {
    Contact::new(username(rng), text(rng), text(rng), web_id(rng))
}

pub fn user(rng: &mut StdRng) -> User {
    let mut user = User::new(username(rng), text(rng), text(rng), web_id(rng));
    if rng.gen_bool(0.5) {
        user.email = Some(format!("{}@example.org", rng.gen_range(1..1000)));
    }
    if rng.gen_bool(0.5) {
        user.date_of_birth = Some(date(rng));
    }
    user
}

pub fn message(rng: &mut StdRng) -> Message {
    let mut message = Message::compose(text(rng), text(rng), text(rng), web_id(rng), text(rng));
    message.upload_date = timestamp(rng);
    message.read_status = rng.gen_bool(0.5);
    message
}

pub fn document(rng: &mut StdRng) -> DocumentRecord {
    DocumentRecord {
        name: username(rng),
        doc_type: text(rng),
        description: text(rng),
        file_url: format!("https://alice.example/PASS/Documents/{}.pdf", rng.gen_range(1..1000)),
        upload_date: timestamp(rng),
        end_date: rng.gen_bool(0.5).then(|| date(rng)),
    }
}
