pub mod categories;
pub mod exports;
pub mod qa;
