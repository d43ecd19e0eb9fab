/// State management module
///
/// This module handles the in-memory state behind the grid window:
/// - Classified cells and label counts (results.rs)
/// - The cell cursor and button enablement (navigator.rs)
/// - Busy flag, status lines and the latest batch together (session.rs)

pub mod navigator;
pub mod results;
pub mod session;
