pub mod http_directory;
pub mod in_memory;
