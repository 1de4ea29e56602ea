pub mod init;
pub mod repository;
pub mod utils;
pub mod write;

pub use repository::HoldingsRepository;
pub use write::SqliteHoldingsRepository;
