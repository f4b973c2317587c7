//! Discord command implementations organized by category.

/// Automatic-delivery configuration commands
pub mod auto;
/// Interactive deal flipbook
pub mod flip;
/// General utility commands
pub mod general;
/// Random single-deal command
pub mod random;
/// Manual update command
pub mod update;

// Export commands
pub use auto::*;
pub use flip::*;
pub use general::*;
pub use random::*;
pub use update::*;
