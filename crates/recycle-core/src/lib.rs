//! Recycle Core
//!
//! Runtime-agnostic state for the recycling app:
//! - catalog: categories, items and the navigation cursor into them
//! - search: filtered, display-ready listings
//! - score: the recycling score session and its debounced persistence
//! - source: async collaborator traits implemented by the frontend bindings

pub mod catalog;
pub mod debounce;
pub mod error;
pub mod models;
pub mod notice;
pub mod score;
pub mod search;
pub mod source;

pub use catalog::{CatalogState, ItemsRequest, Settled};
pub use debounce::Debouncer;
pub use error::{AppError, AppResult, Resource};
pub use models::{Category, ClientConfig, Identity, Item, ScoreEntry, UserProfile};
pub use notice::{Notice, NoticeLevel};
pub use score::{PendingWrite, RecycleOutcome, ScoreSession, SessionState, RECYCLE_ZONE};
pub use search::{filter, initial_query, Listing, ListingKind};
pub use source::{load_items, resolve_profile, CatalogSource, LeaderboardSource, ScoreStore};
