//! Transport-agnostic keyboard model and builders.
//!
//! Button identity for inline keyboards is the option string itself: the
//! payload a button press sends back equals the label it was built from.

use serde::{Deserialize, Serialize};

use crate::messages::{Locale, Messages};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineButton {
    pub text: String,
    pub payload: String,
}

/// Keyboard attached to an outbound message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Keyboard {
    /// Persistent reply keyboard, rows of plain labels.
    Reply(Vec<Vec<String>>),
    /// Inline keyboard, rows of buttons carrying a callback payload.
    Inline(Vec<Vec<InlineButton>>),
}

/// Fixed two-button language picker.
pub fn language_keyboard() -> Keyboard {
    Keyboard::Inline(vec![vec![
        InlineButton {
            text: "Українська".to_string(),
            payload: "uk".to_string(),
        },
        InlineButton {
            text: "English".to_string(),
            payload: "en".to_string(),
        },
    ]])
}

/// Localized main menu.
pub fn main_menu(locale: Locale, messages: &Messages) -> Keyboard {
    Keyboard::Reply(vec![
        vec![
            messages.get(locale, "menu_faq"),
            messages.get(locale, "menu_booking"),
        ],
        vec![
            messages.get(locale, "menu_court_info"),
            messages.get(locale, "menu_schedule"),
        ],
        vec![messages.get(locale, "menu_contacts")],
    ])
}

/// One question per row.
pub fn faq_keyboard(questions: &[String]) -> Keyboard {
    Keyboard::Reply(questions.iter().map(|q| vec![q.clone()]).collect())
}

/// Inline keyboard over a dynamic option list, one option per row.
pub fn inline_options(options: &[String]) -> Keyboard {
    Keyboard::Inline(
        options
            .iter()
            .map(|opt| {
                vec![InlineButton {
                    text: opt.clone(),
                    payload: opt.clone(),
                }]
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_keyboard_payloads() {
        let Keyboard::Inline(rows) = language_keyboard() else {
            panic!("expected inline keyboard");
        };
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0].payload, "uk");
        assert_eq!(rows[0][1].payload, "en");
    }

    #[test]
    fn test_main_menu_is_localized() {
        let messages = Messages::builtin();
        let Keyboard::Reply(uk_rows) = main_menu(Locale::Uk, &messages) else {
            panic!("expected reply keyboard");
        };
        let Keyboard::Reply(en_rows) = main_menu(Locale::En, &messages) else {
            panic!("expected reply keyboard");
        };
        assert_eq!(uk_rows.len(), 3);
        assert_eq!(en_rows[0][0], "❓ FAQ");
        assert_ne!(uk_rows[0][0], en_rows[0][0]);
    }

    #[test]
    fn test_inline_options_button_identity() {
        let options = vec!["2026-09-01".to_string(), "2026-09-02".to_string()];
        let Keyboard::Inline(rows) = inline_options(&options) else {
            panic!("expected inline keyboard");
        };
        assert_eq!(rows.len(), 2);
        for (row, opt) in rows.iter().zip(&options) {
            assert_eq!(&row[0].text, opt);
            assert_eq!(&row[0].payload, opt);
        }
    }
}
