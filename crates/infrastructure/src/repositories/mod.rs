pub mod cursor_repository;

pub use cursor_repository::FileCursorStore;
