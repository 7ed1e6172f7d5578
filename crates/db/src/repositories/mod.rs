//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&SqlitePool` as the first argument.

pub mod category_repo;
pub mod qa_item_repo;

pub use category_repo::CategoryRepo;
pub use qa_item_repo::QaItemRepo;
