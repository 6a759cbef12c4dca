use super::{
    CURVE_BORDER_WIDTH, CURVE_GAP, HATCH_SPACING, HATCH_WIDTH, LABEL_FONT_SIZE, NAV_ARROW_SIZE,
    ZOOM_HANDLE_BORDER,
};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use conveyor::Carousel;
use conveyor::nav::NavDirection;
use conveyor::scene::{NodeId, NodeKind, Rect};
use conveyor::style::{self, Fill};
use conveyor::tray::{Tray, TrayKind};
use palette::Srgba;

fn set_source(cr: &Context, color: Srgba<u8>) {
    let (r, g, b, a) = color.into_format::<f64, f64>().into_components();
    cr.set_source_rgba(r, g, b, a);
}

fn set_theme_source(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

struct TrayRenderer<'a, K> {
    tray: &'a Tray<K>,
    rect: Rect,
}

impl<'a, K: TrayKind> TrayRenderer<'a, K> {
    fn new(tray: &'a Tray<K>, rect: Rect) -> Self {
        Self { tray, rect }
    }

    fn bounds(&self) -> (f64, f64, f64, f64) {
        (
            f64::from(self.rect.x),
            f64::from(self.rect.y),
            f64::from(self.rect.width),
            f64::from(self.rect.height),
        )
    }

    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        self.draw_fill(cr)?;
        self.draw_overlay(cr)?;
        self.draw_border(cr)?;
        self.draw_label(cr, colors)
    }

    fn draw_fill(&self, cr: &Context) -> Result<(), cairo::Error> {
        let (x, y, w, h) = self.bounds();
        match self.tray.fill() {
            Fill::Solid(color) => {
                set_source(cr, color);
                cr.rectangle(x, y, w, h);
                cr.fill()
            }
            Fill::Hatched => self.draw_hatching(cr),
        }
    }

    fn draw_hatching(&self, cr: &Context) -> Result<(), cairo::Error> {
        let (x, y, w, h) = self.bounds();
        cr.save()?;
        cr.rectangle(x, y, w, h);
        cr.clip();

        set_source(cr, style::black());
        cr.set_line_width(HATCH_WIDTH);
        // diagonals from bottom-left to top-right, spaced along the top edge
        let mut offset = -h;
        while offset < w {
            cr.move_to(x + offset, y + h);
            cr.line_to(x + offset + h, y);
            offset += HATCH_SPACING;
        }
        cr.stroke()?;
        cr.restore()
    }

    fn draw_overlay(&self, cr: &Context) -> Result<(), cairo::Error> {
        let Some(overlay) = self.tray.style().overlay else {
            return Ok(());
        };
        let (x, y, w, h) = self.bounds();
        set_source(cr, overlay);
        cr.rectangle(x, y, w, h);
        cr.fill()
    }

    fn draw_border(&self, cr: &Context) -> Result<(), cairo::Error> {
        let border = self.tray.style().border;
        let (x, y, w, h) = self.bounds();
        let lw = f64::from(border.width);
        // keep strokes inside the tray
        let (left, top) = (x + lw / 2.0, y + lw / 2.0);
        let (right, bottom) = (x + w - lw / 2.0, y + h - lw / 2.0);

        set_source(cr, border.color);
        cr.set_line_width(lw);
        cr.move_to(right, top);
        cr.line_to(left, top);
        cr.line_to(left, bottom);
        cr.line_to(right, bottom);
        if border.right_edge {
            cr.close_path();
        }
        cr.stroke()
    }

    fn draw_label(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let Some(label) = self.tray.label() else {
            return Ok(());
        };
        let (x, y, w, h) = self.bounds();
        let lines: Vec<&str> = label.lines().collect();
        let line_height = LABEL_FONT_SIZE + 2.0;
        let block = line_height * lines.len() as f64;

        set_theme_source(cr, colors.foreground);
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Normal);
        cr.set_font_size(LABEL_FONT_SIZE);

        for (i, line) in lines.iter().enumerate() {
            if let Ok(ext) = cr.text_extents(line) {
                cr.move_to(
                    x + (w - ext.width()) / 2.0 - ext.x_bearing(),
                    y + (h - block) / 2.0 + line_height * (i as f64 + 1.0) - 2.0,
                );
                cr.show_text(line)?;
            }
        }
        Ok(())
    }
}

/// Quadratic Bezier segment from `from` through control `ctrl` to `to`.
fn quad_to(cr: &Context, from: (f64, f64), ctrl: (f64, f64), to: (f64, f64)) {
    let c1 = (
        from.0 + 2.0 / 3.0 * (ctrl.0 - from.0),
        from.1 + 2.0 / 3.0 * (ctrl.1 - from.1),
    );
    let c2 = (
        to.0 + 2.0 / 3.0 * (ctrl.0 - to.0),
        to.1 + 2.0 / 3.0 * (ctrl.1 - to.1),
    );
    cr.curve_to(c1.0, c1.1, c2.0, c2.1, to.0, to.1);
}

/// Half-ring end cap joining the two lines. `flip` opens it to the right.
fn draw_curve(cr: &Context, rect: Rect, flip: bool) -> Result<(), cairo::Error> {
    let (w, h) = (f64::from(rect.width), f64::from(rect.height));
    let t = CURVE_BORDER_WIDTH;
    let outer = w - t;
    let inner = outer - CURVE_GAP;

    cr.save()?;
    cr.translate(f64::from(rect.x), f64::from(rect.y));
    cr.new_path();

    for (edge, inset) in [(outer, 0.0), (inner, CURVE_GAP)] {
        let (open_x, apex_x) = if flip { (w, w - edge) } else { (0.0, edge) };
        let (top, bottom) = (t + inset, h - t - inset);
        let start = (open_x, top);
        let mid = (apex_x, h / 2.0);
        let end = (open_x, bottom);

        cr.move_to(start.0, start.1);
        quad_to(cr, start, (apex_x, top), mid);
        quad_to(cr, mid, (apex_x, bottom), end);
    }

    cr.set_fill_rule(cairo::FillRule::EvenOdd);
    set_source(cr, style::curve_fill());
    cr.fill_preserve()?;
    set_source(cr, style::black());
    cr.set_line_width(t);
    cr.stroke()?;
    cr.restore()
}

fn draw_nav_button(
    cr: &Context,
    rect: Rect,
    direction: NavDirection,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let cx = f64::from(rect.x) + f64::from(rect.width) / 2.0;
    let cy = f64::from(rect.y) + f64::from(rect.height) / 2.0;
    let half = NAV_ARROW_SIZE / 2.0;
    let tip = match direction {
        NavDirection::Left => -half,
        NavDirection::Right => half,
    };

    set_theme_source(cr, colors.button);
    cr.move_to(cx + tip, cy);
    cr.line_to(cx - tip, cy - half);
    cr.line_to(cx - tip, cy + half);
    cr.close_path();
    cr.fill()
}

fn draw_zoom_handle(cr: &Context, rect: Rect) -> Result<(), cairo::Error> {
    let (x, y, w, h) = (
        f64::from(rect.x),
        f64::from(rect.y),
        f64::from(rect.width),
        f64::from(rect.height),
    );
    cr.rectangle(x, y, w, h);
    cr.set_source_rgba(126.0 / 255.0, 25.0 / 255.0, 227.0 / 255.0, 0.125);
    cr.fill_preserve()?;
    cr.set_source_rgb(126.0 / 255.0, 0.0, 1.0);
    cr.set_line_width(ZOOM_HANDLE_BORDER);
    cr.stroke()
}

fn draw_node(
    cr: &Context,
    carousel: &Carousel,
    id: NodeId,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let scene = carousel.scene();
    let node = scene.node(id);
    if !node.visible {
        return Ok(());
    }

    match node.kind {
        NodeKind::View => {
            let r = node.rect;
            set_theme_source(cr, colors.background);
            cr.rectangle(
                f64::from(r.x),
                f64::from(r.y),
                f64::from(r.width),
                f64::from(r.height),
            );
            cr.fill()?;
        }
        NodeKind::NavButton(direction) => draw_nav_button(cr, node.rect, direction, colors)?,
        NodeKind::ScrollArea => {
            let r = node.rect;
            cr.save()?;
            cr.rectangle(
                f64::from(r.x),
                f64::from(r.y),
                f64::from(r.width),
                f64::from(r.height),
            );
            cr.clip();
            cr.translate(
                f64::from(r.x) - f64::from(scene.scroll_offset()),
                f64::from(r.y),
            );
            for &child in &node.children {
                draw_node(cr, carousel, child, colors)?;
            }
            return cr.restore();
        }
        NodeKind::Curve { flip } => draw_curve(cr, node.rect, flip)?,
        NodeKind::Bucket { slot } => {
            if let Some(tray) = carousel.trays().get(slot) {
                TrayRenderer::new(tray, node.rect).draw(cr, colors)?;
            }
        }
        NodeKind::ZoomHandle => draw_zoom_handle(cr, node.rect)?,
        NodeKind::Content
        | NodeKind::Level
        | NodeKind::Lines
        | NodeKind::Line(_)
        | NodeKind::Separator => {}
    }

    for &child in &node.children {
        draw_node(cr, carousel, child, colors)?;
    }
    Ok(())
}

pub fn draw(cr: &Context, carousel: &Carousel, colors: &ThemeColors) -> Result<(), cairo::Error> {
    draw_node(cr, carousel, carousel.scene().root(), colors)
}
