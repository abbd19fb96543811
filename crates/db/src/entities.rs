//! Persistence entities held by the library store.

use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

/// An author owning zero or more courses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Date,
    pub date_of_death: Option<Date>,
    /// Category used by the collection filter
    pub main_category: String,
}

impl Author {
    /// Display name matched by free-text search
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Whole years between birth and death, or birth and `today` for living authors.
    pub fn age_on(&self, today: Date) -> i32 {
        let until = self.date_of_death.unwrap_or(today);
        let mut age = until.year() - self.date_of_birth.year();
        if (until.month() as u8, until.day())
            < (self.date_of_birth.month() as u8, self.date_of_birth.day())
        {
            age -= 1;
        }
        age
    }
}

/// A course owned by exactly one author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub author_id: Uuid,
}

/// How a new resource obtains its identifier.
///
/// Standard creation lets the store generate one; upserts force the id the client addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdAssignment {
    Generated,
    ClientSupplied(Uuid),
}

impl IdAssignment {
    pub fn resolve(self) -> Uuid {
        match self {
            IdAssignment::Generated => Uuid::new_v4(),
            IdAssignment::ClientSupplied(id) => id,
        }
    }
}
