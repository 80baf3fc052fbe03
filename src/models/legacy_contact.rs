use std::fmt;

/// Contact record held by the in-memory store. Unrelated to the persisted `Contact`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegacyContact {
    /// Assigned by the store on creation.
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl LegacyContact {
    pub fn new(name: &str, phone: &str, email: &str) -> Self {
        Self {
            id: 0,
            name: name.to_string(),
            phone: phone.to_string(),
            email: email.to_string(),
        }
    }
}

impl fmt::Display for LegacyContact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID={}, Name={}, Phone={}, Email={}",
            self.id, self.name, self.phone, self.email
        )
    }
}
