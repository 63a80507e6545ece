/// State management module
///
/// This module handles all application state, including:
/// - Shared data structures (data.rs)
/// - The select / remove / refresh state machine (session.rs)

pub mod data;
pub mod session;

pub use session::Session;
