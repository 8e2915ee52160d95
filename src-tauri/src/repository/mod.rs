//! Repository Layer
//!
//! Data access abstractions and implementations.

mod traits;
mod db;
mod category_repo;
mod item_repo;
mod user_repo;

#[cfg(test)]
mod tests;

pub use traits::Repository;
pub use db::{init_db, DbState, SharedConnection};
pub use category_repo::CategoryRepository;
pub use item_repo::ItemRepository;
pub use user_repo::UserRepository;
