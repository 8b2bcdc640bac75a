//! Todo persistence for Focus Board.

mod store;
mod todo;

pub use store::{StoreError, TodoStore};
pub use todo::{normalize_title, Todo};
