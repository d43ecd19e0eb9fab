/// Miniature grid of every classified cell, laid out rows x cols with the
/// cell under the cursor boxed
use iced::widget::image::Handle;
use iced::widget::{container, text, Column, Image, Row};
use iced::{Alignment, Element};

/// Thumbnail side for one overview cell
const THUMB_SIZE: f32 = 48.0;

pub fn overview<'a, Message: 'a>(
    handles: &[Handle],
    labels: &[String],
    cols: usize,
    current: Option<usize>,
) -> Element<'a, Message> {
    let mut grid = Column::new().spacing(4);

    for (r, chunk) in handles.chunks(cols.max(1)).enumerate() {
        let mut line = Row::new().spacing(4);
        for (c, handle) in chunk.iter().enumerate() {
            let index = r * cols + c;
            let label = labels.get(index).map(String::as_str).unwrap_or("");

            let cell = Column::new()
                .push(Image::new(handle.clone()).width(THUMB_SIZE).height(THUMB_SIZE))
                .push(text(short_label(label)).size(10))
                .width(THUMB_SIZE + 16.0)
                .align_x(Alignment::Center);

            let boxed = container(cell).padding(2);
            let boxed = if current == Some(index) {
                boxed.style(container::bordered_box)
            } else {
                boxed
            };
            line = line.push(boxed);
        }
        grid = grid.push(line);
    }

    grid.into()
}

/// First comma-separated name of an ImageNet label, cut to fit a thumbnail
fn short_label(label: &str) -> String {
    let first = label.split(',').next().unwrap_or(label).trim();
    if first.chars().count() > 12 {
        let cut: String = first.chars().take(11).collect();
        format!("{}…", cut)
    } else {
        first.to_string()
    }
}
