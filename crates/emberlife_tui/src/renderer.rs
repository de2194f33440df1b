use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Widget};

use emberlife_core::sting::Frame;
use emberlife_data::Rgb;

/// Each pixel is drawn two columns wide so it looks roughly square.
pub const PIXEL_WIDTH: u16 = 2;
const PIXEL: &str = "██";
const TITLE: &str = " emberlife  [b] reseed  [x] halt ";

pub struct PanelWidget<'a> {
    frame: &'a Frame,
}

impl<'a> PanelWidget<'a> {
    pub fn new(frame: &'a Frame) -> Self {
        Self { frame }
    }

    pub fn color(rgb: Rgb) -> Color {
        Color::Rgb(rgb.r, rgb.g, rgb.b)
    }

    /// Area the bordered panel needs, centred inside `area` and clipped to it.
    pub fn panel_area(frame: &Frame, area: Rect) -> Rect {
        let want_w = frame.width().saturating_mul(PIXEL_WIDTH).saturating_add(2);
        let want_h = frame.height().saturating_add(2);
        let w = want_w.min(area.width);
        let h = want_h.min(area.height);
        Rect {
            x: area.x + (area.width - w) / 2,
            y: area.y + (area.height - h) / 2,
            width: w,
            height: h,
        }
    }
}

impl Widget for PanelWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let outer = Self::panel_area(self.frame, area);
        let block = Block::default().borders(Borders::ALL).title(TITLE);
        let inner = block.inner(outer);
        block.render(outer, buf);

        for (y, row) in self.frame.rows().enumerate() {
            let ty = inner.y + y as u16;
            if ty >= inner.bottom() {
                break;
            }
            for (x, rgb) in row.iter().enumerate() {
                let tx = inner.x + x as u16 * PIXEL_WIDTH;
                if tx + PIXEL_WIDTH > inner.right() {
                    break;
                }
                buf.set_string(tx, ty, PIXEL, Style::default().fg(Self::color(*rgb)));
            }
        }
    }
}
