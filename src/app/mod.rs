pub mod app;
pub mod calc;
pub mod portfolio;
pub mod utils;

pub use app::App;
pub use portfolio::Portfolio;
