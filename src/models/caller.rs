use serde::Serialize;

/// Who is issuing a command, as resolved from the identity source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Caller {
    pub employee_id: String,
    pub is_admin: bool,
}

impl Caller {
    pub fn employee(id: impl Into<String>) -> Self {
        Self {
            employee_id: id.into(),
            is_admin: false,
        }
    }

    pub fn admin(id: impl Into<String>) -> Self {
        Self {
            employee_id: id.into(),
            is_admin: true,
        }
    }
}
