//! End-to-end test suite for the DemoQA demo application.
//!
//! The crate is the adapter layer the scenarios in `tests/` are written
//! against:
//!
//! - [`api`]: typed client for the Book Store REST endpoints, with
//!   status-set response validation.
//! - [`pages`]: page objects for the registration form and the CRUD web
//!   table, driven over the Chrome DevTools Protocol.
//! - [`session`]: browser/session lifecycle, one session per scenario.
//! - [`wait`]: bounded poll-until-condition primitives; no fixed sleeps.
//! - [`fixtures`]: per-scenario input data, constructed fresh each time.
//!
//! Scenarios that reach the live deployment are `#[ignore]`d by default;
//! run them with `cargo test -- --ignored` and a chromium install. The
//! unit tests exercise the pure logic (status sets, row extraction,
//! selector mappings, fixtures) without network or browser.

pub mod api;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod pages;
pub mod session;
pub mod wait;

pub use api::{AccountProfile, ApiClient, ApiErrorBody, Book, BookStoreApi, Library};
pub use config::SuiteConfig;
pub use error::{SuiteError, SuiteResult};
pub use pages::{
    FormDraft, Gender, Hobby, PracticeFormPage, RecordDraft, RecordPatch, TableRecord,
    WebTablePage,
};
pub use session::{BrowserSession, PageHandle};
pub use wait::PollOptions;
