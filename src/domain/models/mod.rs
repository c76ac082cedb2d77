pub mod lifecycle;

pub use lifecycle::{LifecycleCheck, LifecycleConfiguration, LifecycleRule, RuleStatus};
