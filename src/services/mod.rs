// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod analytics;
pub mod applications;
pub mod authz;
pub mod documents;
pub mod interviews;
pub mod mailer;
pub mod otp;
pub mod profile;
pub mod reminders;
pub mod session;
pub mod storage;

pub use applications::{ApplicationQuery, ApplicationRepository};
pub use documents::{DocumentQuery, DocumentRepository, Upload};
pub use interviews::{InterviewQuery, InterviewRepository};
pub use mailer::{LogMailer, MailError, Mailer, OutgoingMail, SmtpMailer};
pub use otp::{Login, OtpService};
pub use profile::{ProfileService, ProfileView};
pub use reminders::{ReminderDispatcher, ReminderReport};
pub use session::{SessionIssuer, TokenPair};
pub use storage::FileStore;
