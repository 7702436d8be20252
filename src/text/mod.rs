//! Text measurement and shaping behind the [`oracle::TextOracle`] seam.

pub mod cache;
pub mod monospace;
pub mod oracle;
pub mod parley_oracle;
