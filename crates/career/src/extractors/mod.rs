// ABOUTME: Profile document extraction, driven by a data-only selector profile.
// ABOUTME: Covers platform views, general info, top heroes and career stats.

//! Document extraction module.
//!
//! Nothing here knows where a document came from. Every extractor takes a
//! `dom_query` selection plus the relevant slice of a [`profile::SelectorProfile`],
//! so a new markup generation is a new JSON profile rather than new code.
//!
//! Submodules:
//! - `document`: the per-document pipeline (steps after the fetch).
//! - `profile`/`loader`: the selector profile and its embedded default.
//! - `platform`, `general`, `heroes`, `career`: one extractor per section.
//! - `select`, `compiled`, `dropdown`: selection helpers and the matcher cache.

pub mod career;
pub mod compiled;
pub mod document;
pub mod dropdown;
pub mod general;
pub mod heroes;
pub mod loader;
pub mod platform;
pub mod profile;
pub mod select;
