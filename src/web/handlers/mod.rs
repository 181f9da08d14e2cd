pub mod engagement;
pub mod farcaster;
pub mod frame;
