pub mod directory;
pub mod page_store;
pub mod roster;
