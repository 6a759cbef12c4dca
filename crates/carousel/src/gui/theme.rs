use conveyor::style;
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

/// Alpha of the navigation arrows, so the buckets below stay readable.
const NAV_BUTTON_ALPHA: f64 = 0.8;

const CSS: &str = "
.carousel-drawing-area {
    background: none;
    background-color: transparent;
}
";

/// Colors taken from the desktop theme; everything else comes from
/// `conveyor::style`.
pub struct ThemeColors {
    pub background: Srgba<f64>,
    pub foreground: Srgba<f64>,
    pub button: Srgba<f64>,
}

fn to_srgba(color: &gdk::RGBA) -> Srgba<f64> {
    Srgba::new(
        f64::from(color.red()),
        f64::from(color.green()),
        f64::from(color.blue()),
        f64::from(color.alpha()),
    )
}

impl ThemeColors {
    #[allow(deprecated)]
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        let named = |name: &str, fallback: Srgba<u8>| {
            context
                .lookup_color(name)
                .map(|c| to_srgba(&c))
                .unwrap_or_else(|| fallback.into_format::<f64, f64>())
        };

        let mut button = named("theme_selected_bg_color", style::output_selected());
        button.alpha = NAV_BUTTON_ALPHA;

        Self {
            background: named("theme_base_color", style::background()),
            foreground: named("theme_fg_color", style::black()),
            button,
        }
    }
}

pub fn load_css() {
    let Some(display) = gdk::Display::default() else {
        log::warn!("No display, carousel CSS not loaded");
        return;
    };
    let provider = gtk::CssProvider::new();
    provider.load_from_data(CSS);
    gtk::style_context_add_provider_for_display(
        &display,
        &provider,
        gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gdk_color_keeps_components() {
        let color = to_srgba(&gdk::RGBA::new(1.0, 0.5, 0.0, 0.25));
        assert_eq!(color, Srgba::new(1.0, 0.5, 0.0, 0.25));
    }

    #[test]
    fn test_fallbacks_come_from_the_carousel_palette() {
        let background = style::background().into_format::<f64, f64>();
        assert_eq!(background, Srgba::new(1.0, 1.0, 1.0, 1.0));
        let button = style::output_selected().into_format::<f64, f64>();
        assert!((button.red - 94.0 / 255.0).abs() < 1e-9);
    }
}
