//! Common ID Types
//!
//! Type-safe ID wrappers for domain entities.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::str::FromStr;
use uuid::Uuid;

/// Generic typed ID wrapper
///
/// Usage:
/// ```
/// use kernel::id::{Id, markers};
/// type JobId = Id<markers::Job>;
/// ```
pub struct Id<T> {
    value: Uuid,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    /// Create a new random ID (UUID v4)
    pub fn new() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Create from an existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self {
            value: uuid,
            _marker: PhantomData,
        }
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.value
    }

    /// Convert to UUID
    pub fn into_uuid(self) -> Uuid {
        self.value
    }

    /// Reinterpret the same UUID under another marker.
    ///
    /// Company and candidate profiles share the primary key of the
    /// account that owns them; this is the only sanctioned crossing.
    pub fn retag<U>(self) -> Id<U> {
        Id::from_uuid(self.value)
    }
}

// Manual impls: derives would put bounds on the marker type.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> Default for Id<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> FromStr for Id<T> {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self::from_uuid)
    }
}

impl<T> From<Uuid> for Id<T> {
    fn from(uuid: Uuid) -> Self {
        Self::from_uuid(uuid)
    }
}

impl<T> From<Id<T>> for Uuid {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

/// Marker types for different entity IDs
pub mod markers {
    /// Login identity (credentials row)
    pub struct Account;

    /// Company profile (shares the account UUID)
    pub struct Company;

    /// Candidate profile (shares the account UUID)
    pub struct Candidate;

    pub struct Job;

    pub struct JobApplication;

    pub struct Course;

    pub struct Experience;

    pub struct Evaluation;
}

/// Type aliases for common IDs
pub type AccountId = Id<markers::Account>;
pub type CompanyId = Id<markers::Company>;
pub type CandidateId = Id<markers::Candidate>;
pub type JobId = Id<markers::Job>;
pub type JobApplicationId = Id<markers::JobApplication>;
pub type CourseId = Id<markers::Course>;
pub type ExperienceId = Id<markers::Experience>;
pub type EvaluationId = Id<markers::Evaluation>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_type_safety() {
        let job_id: JobId = Id::new();
        let course_id: CourseId = Id::new();

        // These are different types, cannot be mixed
        let _j: Uuid = job_id.into_uuid();
        let _c: Uuid = course_id.into_uuid();
    }

    #[test]
    fn test_id_from_uuid() {
        let uuid = Uuid::new_v4();
        let id: JobId = Id::from_uuid(uuid);
        assert_eq!(id.as_uuid(), &uuid);
    }

    #[test]
    fn test_retag_keeps_uuid() {
        let account: AccountId = Id::new();
        let company: CompanyId = account.retag();
        assert_eq!(account.as_uuid(), company.as_uuid());
    }

    #[test]
    fn test_parse() {
        let uuid = Uuid::new_v4();
        let id: JobId = uuid.to_string().parse().unwrap();
        assert_eq!(id.into_uuid(), uuid);
        assert!("not-a-uuid".parse::<JobId>().is_err());
    }

    #[test]
    fn test_copy_and_eq_without_marker_bounds() {
        let id: EvaluationId = Id::new();
        let copy = id;
        assert_eq!(id, copy);
    }
}
