pub mod sqlite;
pub mod task_store;
pub mod traits;

pub use sqlite::SqliteBucketStore;
pub use task_store::TaskStore;
pub use traits::BucketStore;
