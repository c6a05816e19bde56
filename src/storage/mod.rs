pub mod adapter;
pub mod config;
pub mod memory;
pub mod single_file;

pub use adapter::Adapter;
pub use config::SingleFileConfig;
pub use memory::MemoryAdapter;
pub use single_file::SingleFileAdapter;
