//! In-memory registry of sports teams and their players.
//!
//! # Examples
//!
//! Direct usage with [`core::registry::Registry`]:
//! ```
//! use bigdecimal::BigDecimal;
//! use chrono::NaiveDate;
//! use roster::{
//!     core::registry::Registry,
//!     player::PlayerDraft,
//!     team::TeamDraft,
//! };
//!
//! let founded = NaiveDate::from_ymd_opt(1902, 3, 6).expect("date");
//! let mut registry = Registry::new();
//! registry.add_team(TeamDraft {
//!     id: 1,
//!     name: "Rovers".to_string(),
//!     created_on: founded,
//!     primary_color: "red".to_string(),
//!     secondary_color: "white".to_string(),
//! }).expect("add team");
//! registry.add_player(PlayerDraft {
//!     id: 10,
//!     team_id: 1,
//!     name: "Ada".to_string(),
//!     born_on: NaiveDate::from_ymd_opt(1998, 7, 1).expect("date"),
//!     skill_level: 87,
//!     salary: BigDecimal::from(52_000),
//! }).expect("add player");
//! registry.set_captain(10).expect("captain");
//! assert_eq!(registry.captain(1), Ok(10));
//! ```
//!
//! Shared usage through the single-writer task:
//! ```no_run
//! use chrono::NaiveDate;
//! use roster::{
//!     core::registry::Registry,
//!     runtime::handle::{spawn_registry, RuntimeConfig},
//!     team::TeamDraft,
//! };
//!
//! # #[tokio::main]
//! # async fn main() {
//! let handle = spawn_registry(Registry::new(), RuntimeConfig::default());
//! handle.add_team(TeamDraft {
//!     id: 1,
//!     name: "Rovers".to_string(),
//!     created_on: NaiveDate::from_ymd_opt(1902, 3, 6).expect("date"),
//!     primary_color: "red".to_string(),
//!     secondary_color: "white".to_string(),
//! }).await.expect("add team");
//! assert_eq!(handle.team_ids().await.expect("teams"), vec![1]);
//! handle.shutdown().await.expect("shutdown");
//! # }
//! ```
#![deny(missing_docs)]

/// Core registry and index helpers.
pub mod core;
/// Player records and drafts.
pub mod player;
/// Single-writer runtime handle and events.
pub mod runtime;
/// Team records and drafts.
pub mod team;
/// Shared primitive types.
pub mod types;
