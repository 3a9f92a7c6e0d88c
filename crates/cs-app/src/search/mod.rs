//! Search and filter coordination.

mod coordinator;

pub use coordinator::SearchCoordinator;
