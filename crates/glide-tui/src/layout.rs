use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::widgets::Block;

/// Width of the clickable arrow columns
const ARROW_WIDTH: u16 = 3;

/// Screen areas of every interactive element, recomputed each frame and
/// kept for mouse hit-testing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppLayout {
    pub area: Rect,
    /// Whole carousel block; hover is tracked against this
    pub carousel: Rect,
    pub carousel_prev: Rect,
    pub carousel_next: Rect,
    pub slide: Rect,
    /// One cell per indicator dot, index-aligned with the slides
    pub dots: Vec<Rect>,
    pub slider: Rect,
    pub slider_prev: Rect,
    pub slider_next: Rect,
    pub track: Rect,
    pub status: Rect,
}

/// What sits under a pointer position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    CarouselPrev,
    CarouselNext,
    Dot(usize),
    SliderPrev,
    SliderNext,
    Track,
    None,
}

impl AppLayout {
    pub fn compute(area: Rect, slide_count: usize) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(55),
                Constraint::Min(7),
                Constraint::Length(1),
            ])
            .split(area);

        let carousel = rows[0];
        let carousel_inner = Block::bordered().inner(carousel);
        let carousel_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(carousel_inner);
        let [carousel_prev, slide, carousel_next] = arrow_split(carousel_rows[0]);
        let dots = dot_cells(carousel_rows[1], slide_count);

        let slider = rows[1];
        let [slider_prev, track, slider_next] = arrow_split(Block::bordered().inner(slider));

        Self {
            area,
            carousel,
            carousel_prev,
            carousel_next,
            slide,
            dots,
            slider,
            slider_prev,
            slider_next,
            track,
            status: rows[2],
        }
    }

    pub fn is_over_carousel(&self, column: u16, row: u16) -> bool {
        self.carousel.contains(Position::new(column, row))
    }

    pub fn hit_test(&self, column: u16, row: u16) -> HitTarget {
        let pos = Position::new(column, row);
        if self.carousel_prev.contains(pos) {
            return HitTarget::CarouselPrev;
        }
        if self.carousel_next.contains(pos) {
            return HitTarget::CarouselNext;
        }
        if let Some(i) = self.dots.iter().position(|dot| dot.contains(pos)) {
            return HitTarget::Dot(i);
        }
        if self.slider_prev.contains(pos) {
            return HitTarget::SliderPrev;
        }
        if self.slider_next.contains(pos) {
            return HitTarget::SliderNext;
        }
        if self.track.contains(pos) {
            return HitTarget::Track;
        }
        HitTarget::None
    }
}

fn arrow_split(area: Rect) -> [Rect; 3] {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(ARROW_WIDTH),
            Constraint::Min(1),
            Constraint::Length(ARROW_WIDTH),
        ])
        .split(area);
    [cols[0], cols[1], cols[2]]
}

/// Dots are one cell wide with a one cell gap, centered in `row`.
/// Dots that do not fit are left without a cell.
fn dot_cells(row: Rect, count: usize) -> Vec<Rect> {
    if count == 0 || row.height == 0 {
        return Vec::new();
    }
    let needed = (count * 2 - 1).min(u16::MAX as usize) as u16;
    let start = row.x + row.width.saturating_sub(needed) / 2;
    (0..count)
        .map_while(|i| {
            let x = start.checked_add(u16::try_from(i * 2).ok()?)?;
            (x < row.right()).then(|| Rect::new(x, row.y, 1, 1))
        })
        .collect()
}
