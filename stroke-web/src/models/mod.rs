pub mod health;
pub mod payload;

pub use health::{parse_leading_int, HealthMetricsInput, SmokingStatus};
pub use payload::JsonFields;
