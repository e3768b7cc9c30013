pub mod break_record;
pub mod break_type;
pub mod caller;
pub mod session;
pub mod session_status;

pub use break_record::BreakRecord;
pub use break_type::BreakType;
pub use caller::Caller;
pub use session::AttendanceSession;
pub use session_status::SessionStatus;
