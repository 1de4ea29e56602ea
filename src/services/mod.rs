pub mod refresh_coordinator;

pub use refresh_coordinator::RefreshCoordinator;
