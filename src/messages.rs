//! Localization table for user-facing replies.
//!
//! The table is an explicitly constructed object passed to the handlers, not
//! module-level state. It loads `messages.json` (`locale -> key -> text`) and
//! falls back to a built-in table covering every key the bot uses, so the
//! service stays functional with no messages file on disk.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::RwLock;
use tracing::{error, warn};

/// Supported interface locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Locale {
    #[serde(rename = "uk")]
    #[default]
    Uk,
    #[serde(rename = "en")]
    En,
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uk => write!(f, "uk"),
            Self::En => write!(f, "en"),
        }
    }
}

impl FromStr for Locale {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uk" => Ok(Self::Uk),
            "en" => Ok(Self::En),
            _ => Err(()),
        }
    }
}

type Table = HashMap<Locale, HashMap<String, String>>;

/// Localized message table with an explicit reload operation.
pub struct Messages {
    path: Option<PathBuf>,
    table: RwLock<Table>,
}

impl Messages {
    /// Build a table backed only by the built-in defaults.
    pub fn builtin() -> Self {
        Self {
            path: None,
            table: RwLock::new(builtin_table()),
        }
    }

    /// Build a table backed by a messages file, loading it immediately.
    /// A failed load keeps the built-in defaults in place.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let messages = Self {
            path: Some(path.into()),
            table: RwLock::new(builtin_table()),
        };
        if let Err(e) = messages.reload() {
            error!(error = %e, "failed to load messages file, serving built-in defaults");
        }
        messages
    }

    /// Re-read the messages file and swap the table in place.
    /// On failure the current table keeps serving.
    pub fn reload(&self) -> std::io::Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let raw = std::fs::read_to_string(path)?;
        let loaded: Table = serde_json::from_str(&raw)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        *self.table.write().unwrap() = loaded;
        Ok(())
    }

    /// Look up a message for a locale. Unknown locales fall back to English,
    /// unknown keys to the generic error message.
    pub fn get(&self, locale: Locale, key: &str) -> String {
        let table = self.table.read().unwrap();
        let per_locale = match table.get(&locale) {
            Some(m) => m,
            None => {
                warn!(locale = %locale, "locale missing from messages table, falling back to en");
                match table.get(&Locale::En) {
                    Some(m) => m,
                    None => return "Error: message not found.".to_string(),
                }
            }
        };
        match per_locale.get(key) {
            Some(text) => text.clone(),
            None => {
                error!(locale = %locale, key, "message key not found");
                per_locale
                    .get("generic_user_error")
                    .cloned()
                    .unwrap_or_else(|| "Error: message not found.".to_string())
            }
        }
    }
}

const UK_MESSAGES: &[(&str, &str)] = &[
    ("choose_language", "🌐 Оберіть мову / Choose language:"),
    ("language_set_success", "✅ Мову встановлено!"),
    ("choose_faq_question", "❓ Оберіть питання:"),
    (
        "faq_answer_not_found",
        "⚠️ Вибачте, відповіді на це питання не знайдено. Спробуйте інше питання або зверніться до адміністратора.",
    ),
    (
        "data_load_error",
        "⚠️ Вибачте, сталася помилка при завантаженні даних. Будь ласка, спробуйте пізніше.",
    ),
    ("no_schedule_available", "Наразі розклад засідань відсутній."),
    ("court_schedule_title", "📅 Розклад засідань:"),
    ("case", "Справа"),
    ("judge", "Суддя"),
    ("no_contacts_available", "Наразі контакти інших установ відсутні."),
    ("other_contacts_title", "📞 Контакти інших установ:"),
    ("enter_full_name", "📝 Введіть ПІБ для запису:"),
    ("choose_date", "📅 Оберіть дату:"),
    ("no_dates_available", "На жаль, доступних дат для запису немає."),
    ("choose_time", "⏰ Оберіть час:"),
    (
        "no_times_available",
        "На жаль, доступного часу для запису на цю дату немає.",
    ),
    ("appointment_booked_success", "✅ Ви успішно записані!"),
    (
        "appointment_save_failed",
        "⚠️ Вибачте, не вдалося зберегти запис. Будь ласка, спробуйте пізніше.",
    ),
    ("no_name_provided", "Без імені"),
    (
        "unrecognized_command",
        "🤷 Вибачте, я не зрозумів вашу команду. Будь ласка, оберіть опцію з меню або використайте /start.",
    ),
    ("unauthorized_access", "🚫 Вибачте, у вас немає доступу до цієї команди."),
    ("admin_panel_greeting", "Привіт, адміністраторе! Це адмін-панель."),
    ("no_appointments_admin", "Немає записів."),
    ("no_appointments_user", "Записів поки немає."),
    ("slot_taken", "❌ Зайнято"),
    ("address", "Адреса"),
    ("schedule", "Графік"),
    ("phone", "Телефон"),
    ("email", "Email"),
    ("info_not_available", "інформація недоступна"),
    (
        "generic_user_error",
        "Вибачте, сталася неочікувана помилка. Будь ласка, спробуйте пізніше.",
    ),
    (
        "generic_user_error_with_contact",
        "Вибачте, сталася неочікувана помилка. Будь ласка, спробуйте пізніше або зверніться до адміністратора.",
    ),
    ("admin_critical_error_notification", "Критична помилка в роботі бота!"),
    ("menu_faq", "❓ Поширені питання"),
    ("menu_booking", "📅 Запис на консультацію"),
    ("menu_court_info", "ℹ️ Інформація про суд"),
    ("menu_schedule", "🗓 Календар засідань"),
    ("menu_contacts", "📞 Контакти інших установ"),
];

const EN_MESSAGES: &[(&str, &str)] = &[
    ("choose_language", "🌐 Оберіть мову / Choose language:"),
    ("language_set_success", "✅ Language set!"),
    ("choose_faq_question", "❓ Choose a question:"),
    (
        "faq_answer_not_found",
        "⚠️ Sorry, no answer was found for this question. Try another question or contact the administrator.",
    ),
    (
        "data_load_error",
        "⚠️ Sorry, an error occurred while loading the data. Please try again later.",
    ),
    ("no_schedule_available", "No hearing schedule is available right now."),
    ("court_schedule_title", "📅 Hearing schedule:"),
    ("case", "Case"),
    ("judge", "Judge"),
    ("no_contacts_available", "No contacts of other institutions are available right now."),
    ("other_contacts_title", "📞 Contacts of other institutions:"),
    ("enter_full_name", "📝 Enter your full name for the appointment:"),
    ("choose_date", "📅 Choose a date:"),
    ("no_dates_available", "Unfortunately, there are no dates available for booking."),
    ("choose_time", "⏰ Choose a time:"),
    (
        "no_times_available",
        "Unfortunately, there are no time slots available for this date.",
    ),
    ("appointment_booked_success", "✅ You have been booked successfully!"),
    (
        "appointment_save_failed",
        "⚠️ Sorry, your appointment could not be saved. Please try again later.",
    ),
    ("no_name_provided", "No name"),
    (
        "unrecognized_command",
        "🤷 Sorry, I did not understand your request. Please pick an option from the menu or use /start.",
    ),
    ("unauthorized_access", "🚫 Sorry, you do not have access to this command."),
    ("admin_panel_greeting", "Hello, administrator! This is the admin panel."),
    ("no_appointments_admin", "No appointments."),
    ("no_appointments_user", "No appointments yet."),
    ("slot_taken", "❌ Taken"),
    ("address", "Address"),
    ("schedule", "Working hours"),
    ("phone", "Phone"),
    ("email", "Email"),
    ("info_not_available", "information not available"),
    (
        "generic_user_error",
        "Sorry, an unexpected error occurred. Please try again later.",
    ),
    (
        "generic_user_error_with_contact",
        "Sorry, an unexpected error occurred. Please try again later or contact the administrator.",
    ),
    ("admin_critical_error_notification", "Critical error in bot operation!"),
    ("menu_faq", "❓ FAQ"),
    ("menu_booking", "📅 Appointment"),
    ("menu_court_info", "ℹ️ Court Info"),
    ("menu_schedule", "🗓 Hearing Calendar"),
    ("menu_contacts", "📞 Other Institutions"),
];

fn builtin_table() -> Table {
    let to_map = |pairs: &[(&str, &str)]| {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>()
    };
    let mut table = Table::new();
    table.insert(Locale::Uk, to_map(UK_MESSAGES));
    table.insert(Locale::En, to_map(EN_MESSAGES));
    table
}
