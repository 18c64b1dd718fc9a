pub mod file_store;
pub mod http_backend;

pub use file_store::FileSessionStore;
pub use http_backend::HttpBackend;
