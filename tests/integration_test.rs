use async_trait::async_trait;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::{tempdir, TempDir};
use uuid::Uuid;

use courtbot::bot::Bot;
use courtbot::config::Config;
use courtbot::keyboards::Keyboard;
use courtbot::store::RecordStore;
use courtbot::transport::{Event, Transport, TransportError};

#[derive(Debug, Clone)]
struct SentMessage {
    user_id: i64,
    text: String,
    keyboard: Option<Keyboard>,
}

/// Transport double recording every outbound primitive call.
#[derive(Default)]
struct RecordingTransport {
    sent: Mutex<Vec<SentMessage>>,
    answered: Mutex<Vec<String>>,
}

impl RecordingTransport {
    fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }

    fn last_for(&self, user_id: i64) -> SentMessage {
        self.sent()
            .into_iter()
            .rev()
            .find(|m| m.user_id == user_id)
            .expect("no message sent to user")
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send_message(
        &self,
        user_id: i64,
        text: &str,
        keyboard: Option<Keyboard>,
    ) -> Result<(), TransportError> {
        self.sent.lock().unwrap().push(SentMessage {
            user_id,
            text: text.to_string(),
            keyboard,
        });
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str) -> Result<(), TransportError> {
        self.answered.lock().unwrap().push(callback_id.to_string());
        Ok(())
    }
}

fn build_bot(dir: &TempDir) -> (Bot, Arc<RecordingTransport>) {
    let config = Config::default_for_data_dir(dir.path().to_path_buf());
    let transport = Arc::new(RecordingTransport::default());
    let bot = Bot::new(&config, transport.clone()).unwrap();
    (bot, transport)
}

fn command(user_id: i64, name: &str) -> Event {
    Event::Command {
        name: name.to_string(),
        user_id,
        args: Vec::new(),
    }
}

fn text(user_id: i64, t: &str) -> Event {
    Event::Text {
        user_id,
        text: t.to_string(),
    }
}

fn callback(user_id: i64, payload: &str) -> Event {
    Event::Callback {
        user_id,
        callback_id: Uuid::new_v4().to_string(),
        payload: payload.to_string(),
    }
}

fn inline_payloads(message: &SentMessage) -> Vec<String> {
    match &message.keyboard {
        Some(Keyboard::Inline(rows)) => rows
            .iter()
            .flat_map(|row| row.iter().map(|b| b.payload.clone()))
            .collect(),
        other => panic!("expected inline keyboard, got {other:?}"),
    }
}

/// Scenario A: /start, pick Ukrainian, land on the Ukrainian main menu.
#[tokio::test]
async fn test_start_and_language_selection() {
    let dir = tempdir().unwrap();
    let (bot, transport) = build_bot(&dir);

    bot.handle_event(command(1, "start")).await;
    let greeting = transport.last_for(1);
    assert!(greeting.text.contains("Оберіть мову"));
    assert_eq!(inline_payloads(&greeting), ["uk", "en"]);

    bot.handle_event(callback(1, "uk")).await;
    let confirmation = transport.last_for(1);
    assert_eq!(confirmation.text, "✅ Мову встановлено!");
    match &confirmation.keyboard {
        Some(Keyboard::Reply(rows)) => {
            assert_eq!(rows[0][0], "❓ Поширені питання");
        }
        other => panic!("expected reply keyboard, got {other:?}"),
    }

    // The callback was answered.
    assert_eq!(transport.answered.lock().unwrap().len(), 1);
    // The preference is persisted and survives a fresh store.
    let store = RecordStore::open(dir.path()).unwrap();
    assert_eq!(store.language_for(1).to_string(), "uk");
}

/// Scenario B: full booking dialog, appointment appended, success confirmed.
#[tokio::test]
async fn test_booking_flow_end_to_end() {
    let dir = tempdir().unwrap();
    let (bot, transport) = build_bot(&dir);

    bot.handle_event(text(1, "📅 Запис на консультацію")).await;
    assert!(transport.last_for(1).text.contains("Введіть ПІБ"));

    bot.handle_event(text(1, "Іван Іванов")).await;
    let date_prompt = transport.last_for(1);
    assert!(date_prompt.text.contains("Оберіть дату"));
    let dates = inline_payloads(&date_prompt);
    assert!(!dates.is_empty());
    let date = dates[0].clone();

    bot.handle_event(callback(1, &date)).await;
    let time_prompt = transport.last_for(1);
    assert!(time_prompt.text.contains("Оберіть час"));
    let times = inline_payloads(&time_prompt);
    assert_eq!(times.len(), 7);
    let slot = format!("{date} 10:00");
    assert!(times.contains(&slot));

    bot.handle_event(callback(1, &slot)).await;
    let confirmation = transport.last_for(1);
    assert_eq!(confirmation.text, "✅ Ви успішно записані!");

    let store = RecordStore::open(dir.path()).unwrap();
    let appointments = store.appointments();
    assert_eq!(appointments.len(), 1);
    assert_eq!(appointments[0].user_id, 1);
    assert_eq!(appointments[0].name, "Іван Іванов");
    assert_eq!(appointments[0].time, slot);
}

/// Scenario C: no dates available, the dialog aborts at the name step and
/// nothing is written.
#[tokio::test]
async fn test_booking_aborts_when_no_dates() {
    let dir = tempdir().unwrap();
    let mut config = Config::default_for_data_dir(dir.path().to_path_buf());
    config.booking.window_days = 0;
    let transport = Arc::new(RecordingTransport::default());
    let bot = Bot::new(&config, transport.clone()).unwrap();

    bot.handle_event(text(1, "📅 Запис на консультацію")).await;
    bot.handle_event(text(1, "Іван Іванов")).await;

    let reply = transport.last_for(1);
    assert!(reply.text.contains("доступних дат для запису немає"));
    assert!(!dir.path().join("appointments.json").exists());

    // The session was reset: further text goes through intent dispatch again.
    bot.handle_event(text(1, "whatever")).await;
    assert!(transport.last_for(1).text.contains("не зрозумів"));
}

/// Scenario D: admin command gated by the allow list.
#[tokio::test]
async fn test_admin_command_authorization() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("admins.json"), "[42]").unwrap();
    let (bot, transport) = build_bot(&dir);

    bot.handle_event(command(7, "admin")).await;
    assert!(transport.last_for(7).text.contains("немає доступу"));

    bot.handle_event(command(42, "admin")).await;
    assert!(transport.last_for(42).text.contains("адміністраторе"));
}

/// The admin digest lists every booked appointment.
#[tokio::test]
async fn test_admin_digest_lists_appointments() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("admins.json"), "[42]").unwrap();
    seed_appointment(dir.path(), 1, "Іван Іванов", "2026-09-01 10:00");
    let (bot, transport) = build_bot(&dir);

    bot.handle_event(command(42, "admin")).await;
    let reply = transport.last_for(42);
    assert!(reply.text.contains("— Іван Іванов, 2026-09-01 10:00"));
}

/// The occupied-slot overview deliberately shows all users' slots.
#[tokio::test]
async fn test_slots_overview_is_unfiltered() {
    let dir = tempdir().unwrap();
    seed_appointment(dir.path(), 2, "Петро Петренко", "2026-09-01 11:00");
    let (bot, transport) = build_bot(&dir);

    // User 1 asks, user 2's slot shows up.
    bot.handle_event(command(1, "slots")).await;
    let reply = transport.last_for(1);
    assert!(reply.text.contains("2026-09-01 11:00"));
    assert!(reply.text.contains("❌"));
}

/// FAQ round trip: menu label, keyboard of questions, exact answer.
#[tokio::test]
async fn test_faq_flow() {
    let dir = tempdir().unwrap();
    std::fs::write(
        dir.path().join("faq.json"),
        r#"{"uk": {"Як подати позов?": "Через канцелярію суду."}, "en": {}}"#,
    )
    .unwrap();
    let (bot, transport) = build_bot(&dir);

    bot.handle_event(text(1, "❓ Поширені питання")).await;
    let menu = transport.last_for(1);
    match &menu.keyboard {
        Some(Keyboard::Reply(rows)) => assert_eq!(rows[0][0], "Як подати позов?"),
        other => panic!("expected reply keyboard, got {other:?}"),
    }

    bot.handle_event(text(1, "Як подати позов?")).await;
    assert_eq!(transport.last_for(1).text, "Через канцелярію суду.");
}

/// Unrecognized callback payloads route to the fallback mid-dialog.
#[tokio::test]
async fn test_unexpected_callback_resets_dialog() {
    let dir = tempdir().unwrap();
    let (bot, transport) = build_bot(&dir);

    bot.handle_event(text(1, "📅 Запис на консультацію")).await;
    bot.handle_event(text(1, "Іван Іванов")).await;
    bot.handle_event(callback(1, "not-a-date")).await;

    assert!(transport.last_for(1).text.contains("не зрозумів"));
    assert!(!dir.path().join("appointments.json").exists());
}

/// /start supersedes an in-flight dialog.
#[tokio::test]
async fn test_start_clears_active_session() {
    let dir = tempdir().unwrap();
    let (bot, transport) = build_bot(&dir);

    bot.handle_event(text(1, "📅 Запис на консультацію")).await;
    bot.handle_event(command(1, "start")).await;

    // The next text is not treated as a name: it hits intent dispatch.
    bot.handle_event(text(1, "Іван Іванов")).await;
    assert!(transport.last_for(1).text.contains("не зрозумів"));
}

fn seed_appointment(dir: &Path, user_id: i64, name: &str, time: &str) {
    let store = RecordStore::open(dir).unwrap();
    store
        .append_appointment(courtbot::store::Appointment {
            user_id,
            name: name.to_string(),
            time: time.to_string(),
        })
        .unwrap();
}
