pub mod breaks;
pub mod calculator;
pub mod log;
pub mod report;
pub mod session;
pub mod ticker;

pub use breaks::BreakLogic;
pub use report::{Period, ReportLogic};
pub use session::{Correction, SessionLogic};
