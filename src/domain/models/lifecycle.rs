use crate::domain::value_objects::BucketName;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle configuration of a bucket, rules in the order the service returned them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifecycleConfiguration {
    pub bucket: BucketName,
    #[serde(default)]
    pub rules: Vec<LifecycleRule>,
}

/// A single lifecycle rule as far as temporary-file cleanup is concerned
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LifecycleRule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub status: RuleStatus,

    /// Key prefix the rule applies to; `None` means the whole bucket
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    // Expiration settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<DateTime<Utc>>,
}

/// Status of a lifecycle rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleStatus {
    Enabled,
    #[default]
    Disabled,
}

impl RuleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleStatus::Enabled => "Enabled",
            RuleStatus::Disabled => "Disabled",
        }
    }

    /// Parse the status text used in lifecycle XML. Anything other than
    /// `Enabled` (case-insensitive) leaves the rule inert.
    pub fn parse_lenient(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("enabled") {
            RuleStatus::Enabled
        } else {
            RuleStatus::Disabled
        }
    }
}

impl LifecycleRule {
    /// Check if this rule is active for the given object key.
    ///
    /// Only checks that the rule is enabled and matches the key; it says
    /// nothing about whether the rule ever expires the objects.
    pub fn covers(&self, key: &str) -> bool {
        if self.status != RuleStatus::Enabled {
            return false;
        }

        match &self.prefix {
            None => true,
            Some(prefix) => key.starts_with(prefix.as_str()),
        }
    }

    /// Check if the rule defines an expiration action
    pub fn expires_objects(&self) -> bool {
        self.expiration_days.is_some() || self.expiration_date.is_some()
    }
}

impl LifecycleConfiguration {
    pub fn new(bucket: BucketName) -> Self {
        Self {
            bucket,
            rules: Vec::new(),
        }
    }

    pub fn with_rules(bucket: BucketName, rules: Vec<LifecycleRule>) -> Self {
        Self { bucket, rules }
    }

    /// First rule, in service order, that covers the key
    pub fn covering_rule(&self, key: &str) -> Option<&LifecycleRule> {
        self.rules.iter().find(|rule| rule.covers(key))
    }
}

/// Outcome of inspecting a bucket's lifecycle configuration for a temp path
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum LifecycleCheck {
    /// An enabled rule applies to the path
    Covered {
        bucket: BucketName,
        #[serde(skip_serializing_if = "Option::is_none")]
        rule_id: Option<String>,
        expires_objects: bool,
    },
    /// The configuration was read but no enabled rule applies to the path
    Uncovered { bucket: BucketName },
    /// The configuration could not be determined
    Unavailable { reason: String },
}

impl LifecycleCheck {
    pub fn is_covered(&self) -> bool {
        matches!(self, LifecycleCheck::Covered { .. })
    }

    /// Whether the lookup itself succeeded, regardless of coverage
    pub fn lookup_succeeded(&self) -> bool {
        !matches!(self, LifecycleCheck::Unavailable { .. })
    }
}
