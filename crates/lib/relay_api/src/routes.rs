//! Route paths.

pub const POST_CHAT: &str = "/chat";
pub const POST_CLEAR: &str = "/clear";
