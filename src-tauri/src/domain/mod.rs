//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has no storage dependencies.

mod entity;
mod category;
mod item;
mod user;
mod identity;

pub use entity::{Entity, DomainError, DomainResult};
pub use category::Category;
pub use item::Item;
pub use user::{UserRecord, ScoreEntry, MAX_LEADERBOARD};
pub use identity::Identity;
