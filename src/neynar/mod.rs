// Neynar API client: Farcaster profiles, casts and search.
//
// `client` speaks HTTP, `models` holds the wire types, `provider` wraps the
// client behind the error-free `PostFeedProvider` trait the rest of the
// crate consumes.

pub mod cache;
pub mod client;
pub mod models;
pub mod provider;
pub mod username;
