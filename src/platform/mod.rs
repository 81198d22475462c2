//! Platform abstraction layer
//!
//! Handles browser/native differences for storage and logging. The simulation
//! itself never touches this module; only the session layer and the
//! embeddings do.

pub mod storage;

pub use storage::{KeyValueStore, MemoryStore};

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;

/// Initialize logging for the current platform. Safe to call more than once.
pub fn init_logging() {
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = env_logger::builder().format_timestamp_millis().try_init();
    }
}
