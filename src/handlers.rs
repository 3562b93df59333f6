//! Event dispatch and conversation handlers.
//!
//! One inbound event, one logical flow, exactly one user-visible reply per
//! recognized action. No error leaves a handler: storage faults degrade the
//! feature and alert the admins, unrecognized input routes to the fallback.

use tracing::{error, info, warn};
use uuid::Uuid;

use crate::bot::Bot;
use crate::intent::{classify, Intent};
use crate::keyboards;
use crate::messages::Locale;
use crate::notify::notify_admins;
use crate::session::BookingState;
use crate::store::Appointment;
use crate::transport::Event;

impl Bot {
    /// Entry point for every inbound event from the chat runtime.
    pub async fn handle_event(&self, event: Event) {
        let req = Uuid::new_v4();
        match event {
            Event::Command { name, user_id, .. } => self.on_command(req, user_id, &name).await,
            Event::Text { user_id, text } => self.on_text(req, user_id, &text).await,
            Event::Callback {
                user_id,
                callback_id,
                payload,
            } => self.on_callback(req, user_id, &callback_id, &payload).await,
        }
    }

    async fn on_command(&self, req: Uuid, user_id: i64, name: &str) {
        info!(request_id = %req, user_id, command = name, "command received");
        match name {
            "start" => self.handle_start(req, user_id).await,
            "admin" => self.handle_admin(req, user_id).await,
            "slots" => self.handle_slots_overview(req, user_id).await,
            _ => self.fallback(req, user_id).await,
        }
    }

    async fn on_text(&self, req: Uuid, user_id: i64, text: &str) {
        match self.sessions.get(user_id) {
            Some(BookingState::AskName) => self.handle_name_entered(req, user_id, text).await,
            // A date or time step expects a button press, not text.
            Some(_) => self.fallback(req, user_id).await,
            None => self.dispatch_intent(req, user_id, text).await,
        }
    }

    async fn on_callback(&self, req: Uuid, user_id: i64, callback_id: &str, payload: &str) {
        if let Err(e) = self.transport.answer_callback(callback_id).await {
            warn!(request_id = %req, user_id, error = %e, "failed to answer callback");
        }
        if let Ok(locale) = payload.parse::<Locale>() {
            self.handle_language_selected(req, user_id, locale).await;
            return;
        }
        match self.sessions.get(user_id) {
            Some(BookingState::AskDate { name }) => {
                self.handle_date_selected(req, user_id, name, payload).await
            }
            Some(BookingState::AskTime { name, date }) => {
                self.handle_time_selected(req, user_id, name, date, payload)
                    .await
            }
            _ => self.fallback(req, user_id).await,
        }
    }

    /// `/start`: greet, offer the language picker, supersede any dialog.
    async fn handle_start(&self, req: Uuid, user_id: i64) {
        self.sessions.clear(user_id);
        self.send(
            req,
            user_id,
            &self.messages.get(Locale::Uk, "choose_language"),
            Some(keyboards::language_keyboard()),
        )
        .await;
    }

    async fn handle_language_selected(&self, req: Uuid, user_id: i64, locale: Locale) {
        if let Err(e) = self.store.set_language(user_id, locale) {
            error!(request_id = %req, user_id, error = %e, "failed to persist language choice");
            self.send(
                req,
                user_id,
                &self.messages.get(locale, "generic_user_error"),
                None,
            )
            .await;
            notify_admins(
                &self.store,
                self.transport.as_ref(),
                &format!(
                    "{} set_language failed for user {user_id}: {e}",
                    self.messages.get(Locale::Uk, "admin_critical_error_notification")
                ),
            )
            .await;
            return;
        }
        info!(request_id = %req, user_id, locale = %locale, "language set");
        self.send(
            req,
            user_id,
            &self.messages.get(locale, "language_set_success"),
            Some(keyboards::main_menu(locale, &self.messages)),
        )
        .await;
    }

    async fn dispatch_intent(&self, req: Uuid, user_id: i64, text: &str) {
        let locale = self.store.language_for(user_id);
        let questions = self.store.faq_questions(locale);
        match classify(text, &self.messages, &questions) {
            Intent::Book => {
                info!(request_id = %req, user_id, "booking dialog started");
                self.sessions.set(user_id, BookingState::AskName);
                self.send(
                    req,
                    user_id,
                    &self.messages.get(locale, "enter_full_name"),
                    None,
                )
                .await;
            }
            Intent::Faq => {
                if questions.is_empty() {
                    self.send(
                        req,
                        user_id,
                        &self.messages.get(locale, "data_load_error"),
                        None,
                    )
                    .await;
                } else {
                    self.send(
                        req,
                        user_id,
                        &self.messages.get(locale, "choose_faq_question"),
                        Some(keyboards::faq_keyboard(&questions)),
                    )
                    .await;
                }
            }
            Intent::FaqQuestion(question) => {
                let answer = self
                    .store
                    .faq_answer(locale, &question)
                    .unwrap_or_else(|| self.messages.get(locale, "faq_answer_not_found"));
                self.send(
                    req,
                    user_id,
                    &answer,
                    Some(keyboards::main_menu(locale, &self.messages)),
                )
                .await;
            }
            Intent::CourtInfo => self.handle_court_info(req, user_id, locale).await,
            Intent::Schedule => self.handle_schedule(req, user_id, locale).await,
            Intent::Contacts => self.handle_contacts(req, user_id, locale).await,
            Intent::Unknown(_) => self.fallback(req, user_id).await,
        }
    }

    async fn handle_court_info(&self, req: Uuid, user_id: i64, locale: Locale) {
        let Some(info) = self.store.court_info(locale) else {
            self.send(
                req,
                user_id,
                &self.messages.get(locale, "data_load_error"),
                None,
            )
            .await;
            return;
        };
        let text = format!(
            "📍 {}: {}\n🕒 {}: {}\n📞 {}: {}\n✉️ {}: {}",
            self.messages.get(locale, "address"),
            info.address,
            self.messages.get(locale, "schedule"),
            info.work_time,
            self.messages.get(locale, "phone"),
            info.phone,
            self.messages.get(locale, "email"),
            info.email,
        );
        self.send(req, user_id, &text, None).await;
    }

    async fn handle_schedule(&self, req: Uuid, user_id: i64, locale: Locale) {
        let schedule = self.store.court_schedule();
        if schedule.is_empty() {
            self.send(
                req,
                user_id,
                &self.messages.get(locale, "no_schedule_available"),
                None,
            )
            .await;
            return;
        }
        let mut text = self.messages.get(locale, "court_schedule_title");
        for entry in schedule {
            text.push_str(&format!(
                "\n{} – {} {}: {}, {} {}",
                entry.date,
                self.messages.get(locale, "case"),
                entry.case,
                entry.time,
                self.messages.get(locale, "judge"),
                entry.judge,
            ));
        }
        self.send(req, user_id, &text, None).await;
    }

    async fn handle_contacts(&self, req: Uuid, user_id: i64, locale: Locale) {
        let contacts = self.store.contacts(locale);
        if contacts.is_empty() {
            self.send(
                req,
                user_id,
                &self.messages.get(locale, "no_contacts_available"),
                None,
            )
            .await;
            return;
        }
        let mut text = self.messages.get(locale, "other_contacts_title");
        for contact in contacts {
            text.push_str(&format!("\n📌 {} — {}", contact.org, contact.phone));
        }
        self.send(req, user_id, &text, None).await;
    }

    /// Name step: any text is the full name, verbatim.
    async fn handle_name_entered(&self, req: Uuid, user_id: i64, text: &str) {
        let locale = self.store.language_for(user_id);
        let today = chrono::Local::now().date_naive();
        let dates = self.slots.available_dates(today);
        if dates.is_empty() {
            warn!(request_id = %req, user_id, "no dates available, aborting booking dialog");
            self.sessions.clear(user_id);
            self.send(
                req,
                user_id,
                &self.messages.get(locale, "no_dates_available"),
                None,
            )
            .await;
            return;
        }
        self.sessions.set(
            user_id,
            BookingState::AskDate {
                name: text.to_string(),
            },
        );
        self.send(
            req,
            user_id,
            &self.messages.get(locale, "choose_date"),
            Some(keyboards::inline_options(&dates)),
        )
        .await;
    }

    /// Date step: the payload must be one of the currently offered dates.
    async fn handle_date_selected(&self, req: Uuid, user_id: i64, name: String, payload: &str) {
        let locale = self.store.language_for(user_id);
        let today = chrono::Local::now().date_naive();
        if !self
            .slots
            .available_dates(today)
            .iter()
            .any(|d| d.as_str() == payload)
        {
            self.fallback(req, user_id).await;
            return;
        }
        let times = self.slots.available_times(payload);
        if times.is_empty() {
            warn!(request_id = %req, user_id, date = payload, "no times available, aborting booking dialog");
            self.sessions.clear(user_id);
            self.send(
                req,
                user_id,
                &self.messages.get(locale, "no_times_available"),
                None,
            )
            .await;
            return;
        }
        self.sessions.set(
            user_id,
            BookingState::AskTime {
                name,
                date: payload.to_string(),
            },
        );
        self.send(
            req,
            user_id,
            &self.messages.get(locale, "choose_time"),
            Some(keyboards::inline_options(&times)),
        )
        .await;
    }

    /// Time step: persist the appointment and terminate the dialog.
    async fn handle_time_selected(
        &self,
        req: Uuid,
        user_id: i64,
        name: String,
        date: String,
        payload: &str,
    ) {
        let locale = self.store.language_for(user_id);
        if !self
            .slots
            .available_times(&date)
            .iter()
            .any(|t| t.as_str() == payload)
        {
            self.fallback(req, user_id).await;
            return;
        }
        let name = if name.trim().is_empty() {
            self.messages.get(locale, "no_name_provided")
        } else {
            name
        };
        let appointment = Appointment {
            user_id,
            name: name.clone(),
            time: payload.to_string(),
        };
        self.sessions.clear(user_id);
        match self.store.append_appointment(appointment) {
            Ok(()) => {
                info!(request_id = %req, user_id, name = %name, time = payload, "appointment booked");
                self.send(
                    req,
                    user_id,
                    &self.messages.get(locale, "appointment_booked_success"),
                    Some(keyboards::main_menu(locale, &self.messages)),
                )
                .await;
            }
            Err(e) => {
                error!(request_id = %req, user_id, error = %e, "failed to persist appointment");
                self.send(
                    req,
                    user_id,
                    &self.messages.get(locale, "appointment_save_failed"),
                    Some(keyboards::main_menu(locale, &self.messages)),
                )
                .await;
                notify_admins(
                    &self.store,
                    self.transport.as_ref(),
                    &format!(
                        "{} append_appointment failed for user {user_id}: {e}",
                        self.messages.get(Locale::Uk, "admin_critical_error_notification")
                    ),
                )
                .await;
            }
        }
    }

    /// `/admin`: allow-list gated panel with the full appointments digest.
    async fn handle_admin(&self, req: Uuid, user_id: i64) {
        let locale = self.store.language_for(user_id);
        if !self.store.is_admin(user_id) {
            warn!(request_id = %req, user_id, "unauthorized admin command");
            self.send(
                req,
                user_id,
                &self.messages.get(locale, "unauthorized_access"),
                None,
            )
            .await;
            return;
        }
        let appointments = self.store.appointments();
        let digest = if appointments.is_empty() {
            self.messages.get(locale, "no_appointments_admin")
        } else {
            appointments
                .iter()
                .map(|a| format!("— {}, {}", a.name, a.time))
                .collect::<Vec<_>>()
                .join("\n")
        };
        let text = format!(
            "{}\n\n{digest}",
            self.messages.get(locale, "admin_panel_greeting")
        );
        self.send(req, user_id, &text, None).await;
    }

    /// `/slots`: occupied-slot overview. Shows every booked slot, not just
    /// the caller's.
    async fn handle_slots_overview(&self, req: Uuid, user_id: i64) {
        let locale = self.store.language_for(user_id);
        let appointments = self.store.appointments();
        let text = if appointments.is_empty() {
            self.messages.get(locale, "no_appointments_user")
        } else {
            let taken = self.messages.get(locale, "slot_taken");
            appointments
                .iter()
                .map(|a| format!("— {} {taken}", a.time))
                .collect::<Vec<_>>()
                .join("\n")
        };
        self.send(req, user_id, &text, None).await;
    }

    /// Fallback for anything the active state does not expect: inform the
    /// user and reset to the main menu.
    pub(crate) async fn fallback(&self, req: Uuid, user_id: i64) {
        self.sessions.clear(user_id);
        let locale = self.store.language_for(user_id);
        info!(request_id = %req, user_id, "unrecognized input, resetting to main menu");
        self.send(
            req,
            user_id,
            &self.messages.get(locale, "unrecognized_command"),
            Some(keyboards::main_menu(locale, &self.messages)),
        )
        .await;
    }
}
