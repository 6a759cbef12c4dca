use conveyor::ticker::{TickCallback, TickFlow, TickSource};
use std::time::Duration;

/// Fires ticks from the GLib main loop, on the GTK thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct GlibTicker;

impl TickSource for GlibTicker {
    fn schedule(&mut self, interval: Duration, mut on_tick: TickCallback) {
        glib::timeout_add_local(interval, move || match on_tick() {
            TickFlow::Continue => glib::ControlFlow::Continue,
            TickFlow::Break => glib::ControlFlow::Break,
        });
    }
}
