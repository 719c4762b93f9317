//! # relay_core
//!
//! Core domain logic for the chat relay: per-player history, the outbound
//! completion client, and the relay that ties them together.

pub mod completion;
pub mod history;
pub mod relay;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}
