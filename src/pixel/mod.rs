//! Pixel snapping policy.

pub mod policy;
