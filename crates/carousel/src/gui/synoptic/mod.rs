pub mod view;

pub use view::draw;

pub const HATCH_SPACING: f64 = 6.0;
pub const HATCH_WIDTH: f64 = 1.0;
pub const LABEL_FONT_SIZE: f64 = 9.0;
pub const NAV_ARROW_SIZE: f64 = 14.0;
pub const CURVE_BORDER_WIDTH: f64 = 1.0;
/// Gap between the outer and inner arc of an end cap, one bucket deep.
pub const CURVE_GAP: f64 = conveyor::layout::LINE_HEIGHT as f64 - 2.0;
pub const ZOOM_HANDLE_BORDER: f64 = 2.0;
