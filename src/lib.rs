//! Rail Feedback - a bilingual (English/Hindi) public feedback portal for
//! railway passengers.
//!
//! # Overview
//!
//! Passengers submit issue reports or feedback through a form. Each report
//! is written once to a remote document store and prepended to the list the
//! dashboard shows for the rest of the session. The dashboard filters that
//! list by free text and status and shows per-status counts.
//!
//! # Privacy
//!
//! Passengers may submit anonymously. Anonymous reports have their contact
//! fields cleared when the report is built, before anything is stored or
//! shown, and contact fields are never written to logs.
//!
//! # Modules
//!
//! - [`model`]: Reports and their closed enumerations
//! - [`draft`]: Form state, report construction and the submission flow
//! - [`aggregation`]: Search, status filtering and per-status counts
//! - [`presentation`]: Badge styling for statuses and priorities
//! - [`dashboard`]: Dashboard, details and form catalog views
//! - [`portal`]: The container owning the session's report list
//! - [`storage`]: Firestore, SQLite and in-memory document stores
//! - [`i18n`]: Language selection and user-visible notices
//! - [`config`]: Environment configuration
//! - [`api`]: HTTP API handlers

pub mod aggregation;
pub mod api;
pub mod config;
pub mod dashboard;
pub mod draft;
pub mod error;
pub mod i18n;
pub mod model;
pub mod portal;
pub mod presentation;
pub mod storage;
