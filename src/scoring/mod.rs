// Engagement statistics engine.
//
// Pure functions that turn a profile and a window of casts into the metrics
// the dashboard shows. Nothing in here does I/O or reads the clock; callers
// pass `now` explicitly.

pub mod engagement;
pub mod growth;
pub mod ratio;
pub mod stats;
pub mod supporters;
pub mod tier;
