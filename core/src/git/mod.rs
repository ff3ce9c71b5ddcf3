pub mod github;
pub mod local;
pub mod remote;
pub mod summary;

pub use github::{GithubClient, GithubItem, IssueSource};
pub use local::Commit;
pub use summary::{RepoPanel, RepoSummary};
