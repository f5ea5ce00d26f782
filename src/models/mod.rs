//! Core data models for the back office service.
//!
//! This module contains all the domain models used throughout the service.

mod attendance;
mod client;
mod goals;
mod settings;
mod timeclock;
mod user;

pub use attendance::{AttendanceRecord, ServiceCode, ServiceLocation};
pub use client::{BillType, Client, ClientStatus};
pub use goals::{DailyProgress, Goal, PercentageBucket, PromptType, Trial};
pub use settings::{Document, Gender, MaritalStatus, Race, SettingsLocation, UserSettings};
pub use timeclock::{PauseRecord, TimeRecord, WorkProfile};
pub use user::User;
