pub mod creation_flow;
pub mod directory_store;
pub mod screen;
