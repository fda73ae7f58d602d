pub mod storage;

pub use storage::InMemoryStorage;
