//! Intent classification for free-form text.
//!
//! Inbound text is mapped to an enumerated intent in one step, then the
//! handlers dispatch over it exhaustively. Menu labels of both locales are
//! accepted regardless of the user's stored preference, so a user whose
//! client kept an old-language keyboard still lands on the right handler.

use crate::messages::{Locale, Messages};

/// What a plain-text message asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Show the FAQ question keyboard.
    Faq,
    /// Answer one exact FAQ question.
    FaqQuestion(String),
    /// Show static court information.
    CourtInfo,
    /// Show the hearing schedule.
    Schedule,
    /// Show contacts of other institutions.
    Contacts,
    /// Enter the appointment booking dialog.
    Book,
    /// Nothing recognized; routed to the fallback.
    Unknown(String),
}

const MENU_INTENTS: &[(&str, fn() -> Intent)] = &[
    ("menu_faq", || Intent::Faq),
    ("menu_booking", || Intent::Book),
    ("menu_court_info", || Intent::CourtInfo),
    ("menu_schedule", || Intent::Schedule),
    ("menu_contacts", || Intent::Contacts),
];

/// Classify one text message. `faq_questions` holds the exact question
/// strings of the user's locale.
pub fn classify(text: &str, messages: &Messages, faq_questions: &[String]) -> Intent {
    let text = text.trim();
    for locale in [Locale::Uk, Locale::En] {
        for (key, make) in MENU_INTENTS {
            if text == messages.get(locale, key) {
                return make();
            }
        }
    }
    if faq_questions.iter().any(|q| q.as_str() == text) {
        return Intent::FaqQuestion(text.to_string());
    }
    Intent::Unknown(text.to_string())
}
