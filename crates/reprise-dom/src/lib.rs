//! # reprise-dom
//!
//! In-memory reference host for the Reprise interaction recorder.
//!
//! Provides a `Document` that implements both `EventSurface` (so a recorder
//! can listen to it) and `Environment` (so playback can drive it), a
//! selector matcher for the selectors the recorder derives, a login-page
//! fixture, and two scripted scenarios:
//!
//! 1. **Record and replay**: record a login session, export it, import it
//!    into a second recorder and replay it onto a fresh page.
//! 2. **Missing element**: replay the same session onto a page without the
//!    submit button; the click is skipped and playback continues.
//!
//! Nothing here touches a real browser.

pub mod document;
pub mod fixtures;
pub mod query;
pub mod scenarios;

pub use document::{Activity, Document};
