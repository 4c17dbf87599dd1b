// TaskList - ordered to-do items mirrored to a key-value storage slot

pub mod codec;
pub mod config;
pub mod filter;
pub mod ids;
pub mod models;
pub mod storage;
pub mod store;

// Re-export main types for convenience
pub use config::{Config, IdStrategy};
pub use filter::{TaskCounts, TaskFilter};
pub use ids::{ClockIds, IdGenerator, SequentialIds};
pub use models::{EditSession, Task, now_ms};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::{DEFAULT_KEY, TaskList};
