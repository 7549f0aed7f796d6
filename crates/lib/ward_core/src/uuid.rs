// Helper for generating UUIDv7 (timestamp-sortable UUIDs)
//
// SQLite has no UUID generation at all, so every id is generated app-side.
// Append-only tables where time-ordering matters (blacklisted tokens,
// password history) use UUIDv7; the users table uses v4.

use uuid::Uuid;

/// Generate a new UUIDv7 (timestamp-sortable).
pub fn uuidv7() -> Uuid {
    Uuid::now_v7()
}

/// Generate a new random UUIDv4.
pub fn uuidv4() -> Uuid {
    Uuid::new_v4()
}
