/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Subject id issued by the external auth provider.
pub type UserId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
