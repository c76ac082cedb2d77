use serde::{Deserialize, Serialize};

use crate::domain::errors::ValidationError;

/// A region token such as `us-west-2`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region(String);

impl Region {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::EmptyRegion);
        }
        Ok(Self(value))
    }

    /// Map a bucket location constraint to a region.
    ///
    /// The service reports buckets in the classic region with an empty
    /// constraint (or the legacy `US`), and old Irish buckets as `EU`.
    pub fn from_location_constraint(constraint: &str) -> Self {
        match constraint.trim() {
            "" | "US" => Self("us-east-1".to_string()),
            "EU" => Self("eu-west-1".to_string()),
            other => Self(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PartialEq<&str> for Region {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_constraints() {
        assert_eq!(Region::from_location_constraint(""), "us-east-1");
        assert_eq!(Region::from_location_constraint("US"), "us-east-1");
        assert_eq!(Region::from_location_constraint("EU"), "eu-west-1");
        assert_eq!(Region::from_location_constraint("ap-south-1"), "ap-south-1");
    }

    #[test]
    fn test_empty_region_rejected() {
        assert_eq!(Region::new(""), Err(ValidationError::EmptyRegion));
        assert_eq!(Region::new("us-west-2").unwrap().as_str(), "us-west-2");
    }
}
