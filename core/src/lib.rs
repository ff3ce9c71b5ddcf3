pub mod config;
pub mod git;
pub mod model;
pub mod repository;
pub mod service;
pub mod view;

pub use config::Config;
pub use model::task::Task;
pub use repository::{BucketStore, SqliteBucketStore, TaskStore};
pub use service::task_list_service::TaskListService;
pub use view::render;
