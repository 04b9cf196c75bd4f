pub mod clock;
pub mod file_storage;
pub mod memory_storage;
