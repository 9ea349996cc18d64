pub mod aggregate;
pub mod classify;
pub mod group;

pub use aggregate::{build_dashboard, PullRequestView, ReviewHost};
pub use classify::{classify, classify_comment, ClassifiedComment, CommentStatus, Severity};
pub use group::{group_by_provider, ProviderGroups};
