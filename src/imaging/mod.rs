/// Image handling module
///
/// This module handles:
/// - Decoding user-selected files into RGB bitmaps (loader.rs)
/// - Splitting bitmaps into grid cells (grid.rs)
/// - Turning bitmaps into network input tensors (preprocess.rs)

pub mod grid;
pub mod loader;
pub mod preprocess;
