// Activity Tracker: engagement analytics for Farcaster accounts.
//
// This is the library root. The engine (`scoring`, `report`) is pure and
// synchronous; `neynar` fetches the data it runs on, `prefs` persists
// notification settings, and `web` exposes it all over HTTP.

pub mod config;
pub mod models;
pub mod neynar;
pub mod output;
pub mod pipeline;
pub mod prefs;
pub mod report;
pub mod scoring;
pub mod share;

#[cfg(feature = "web")]
pub mod web;
