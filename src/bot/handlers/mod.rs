//! Discord interaction handlers (lifecycle events).

/// Ready / guild join / guild leave handling
pub mod events;
