// User preferences: notification settings and goals.
//
// Persistence goes through the `KeyValueStore` trait so the same logic runs
// against an in-memory map in tests and a JSON file in the CLI.

pub mod notifications;
pub mod store;
