use uuid::Uuid;

/// Opaque identifier for games and players.
///
/// UUIDv7 puts a millisecond timestamp in front of random bits, so ids are
/// unique across the process lifetime and across anything already persisted
/// without consulting a registry.
pub fn generate_id() -> String {
    Uuid::now_v7().simple().to_string()
}

/// Current time as an RFC 3339 string, the format every model timestamp uses.
pub fn timestamp_now() -> String {
    chrono::Utc::now().to_rfc3339()
}
