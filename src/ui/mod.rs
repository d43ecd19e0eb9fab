/// View helpers shared by both classifier windows
///
/// - `preview.rs` - bitmap to iced image conversion and sized previews
/// - `overview.rs` - the miniature grid of classified cells

pub mod overview;
pub mod preview;
