mod export;
pub use export::Export;

mod overview;
pub use overview::Overview;
