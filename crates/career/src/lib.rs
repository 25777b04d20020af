// ABOUTME: Main library entry point for the ovrstat player stats extractor.
// ABOUTME: Re-exports the public API: Client, ClientBuilder, PlayerProfile, StatsError, ErrorCode, Options.

//! ovrstat - Overwatch player statistics extraction.
//!
//! Resolves a battle tag through the account search, fetches the player's
//! profile page and turns it into a [`PlayerProfile`]: identity, endorsement,
//! competitive ratings, top heroes and per-hero career stats for both play
//! modes.
//!
//! # Example
//!
//! ```no_run
//! use ovrstat_career::{Client, StatsError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), StatsError> {
//!     let client = Client::builder().build();
//!     let profile = client.stats("pc", "Someone#1234").await?;
//!     println!("{} won {} games", profile.name, profile.games_won);
//!     Ok(())
//! }
//! ```

pub mod account;
pub mod aggregate;
pub mod client;
pub mod error;
pub mod extractors;
pub mod models;
pub mod options;
pub mod resource;
pub mod text;

pub use crate::account::{AccountCandidate, AccountStatus, Resolution};
pub use crate::client::Client;
pub use crate::error::{ErrorCode, StatsError};
pub use crate::extractors::loader::{load_builtin_profile, parse_profile};
pub use crate::extractors::platform::{
    PLATFORM_CONSOLE, PLATFORM_NS, PLATFORM_PC, PLATFORM_PSN, PLATFORM_XBL,
};
pub use crate::extractors::profile::{SelectorProfile, SelectorSpec};
pub use crate::models::{
    CareerCategory, CareerStats, CompetitiveStats, PlayerProfile, Rating, StatMap,
    StatsCollection, TopHeroStats,
};
pub use crate::options::{ClientBuilder, Options};
pub use crate::resource::{HttpUpstream, Upstream};
pub use crate::text::{normalize_key, StatValue};
