pub mod classifier;
pub mod elapsed;
