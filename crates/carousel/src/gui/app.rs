use crate::config::Config;
use crate::gui::synoptic;
use crate::gui::theme::{self, ThemeColors};
use crate::sys::ticker::GlibTicker;
use conveyor::carousel::PointerPress;
use conveyor::ring::Motion;
use conveyor::ticker::{TickFlow, TickSource};
use conveyor::{Carousel, TrayId, TraySelected};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

pub struct AppModel {
    pub carousel: Rc<RefCell<Carousel>>,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Press(f64, f64),
    Release,
    Close,
}

#[derive(Debug)]
pub enum AppOutput {
    BucketSelected(TrayId),
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Carousel, Config);
    type Input = AppMsg;
    type Output = AppOutput;

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some(&title),
            set_default_width: geometry.width as i32 + 2 * geometry.x.max(0),
            set_default_height: geometry.height as i32 + 2 * geometry.y.max(0),

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Close);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_content_width: geometry.width as i32,
                set_content_height: geometry.height as i32,
                set_margin_start: geometry.x.max(0),
                set_margin_top: geometry.y.max(0),
                set_halign: gtk::Align::Start,
                set_valign: gtk::Align::Start,
                add_css_class: "carousel-drawing-area",

                add_controller = gtk::GestureClick {
                    set_button: gtk::gdk::BUTTON_PRIMARY,
                    connect_pressed[sender] => move |_, _, x, y| {
                        sender.input(AppMsg::Press(x, y));
                    },
                    connect_released[sender] => move |_, _, _, _| {
                        sender.input(AppMsg::Release);
                    },
                    // the press turned into a drag or was cancelled
                    connect_stopped[sender] => move |_| {
                        sender.input(AppMsg::Release);
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (carousel, config) = init;
        let geometry = config.geometry;
        let title = format!("Carousel ({} level)", carousel.level());

        theme::load_css();

        let model = AppModel {
            carousel: Rc::new(RefCell::new(carousel)),
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let carousel_draw = model.carousel.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                if let Err(e) = synoptic::draw(cr, &carousel_draw.borrow(), &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        if config.animation.enabled {
            let carousel_tick = model.carousel.clone();
            let drawing_area = model.drawing_area.clone();
            GlibTicker.schedule(
                config.animation.interval(),
                Box::new(move || match carousel_tick.borrow_mut().advance() {
                    Motion::Rotated { .. } => {
                        drawing_area.queue_draw();
                        TickFlow::Continue
                    }
                    Motion::Stopped => {
                        log::info!("Ring reached its last tick, animation stopped");
                        TickFlow::Break
                    }
                }),
            );
        }

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Press(x, y) => {
                let press = self.carousel.borrow_mut().press(x, y);
                match press {
                    PointerPress::Bucket(slot) => log::debug!("Bucket slot {} pressed", slot),
                    PointerPress::Scrolled(direction) => {
                        log::debug!("Synoptic scrolled {:?}", direction)
                    }
                    PointerPress::Ignored => return,
                }
                self.drawing_area.queue_draw();
            }
            AppMsg::Release => {
                let selected = self.carousel.borrow_mut().release();
                if let Some(TraySelected(id)) = selected {
                    log::info!("Tray {} selected", id);
                    self.drawing_area.queue_draw();
                    let _ = sender.output(AppOutput::BucketSelected(id));
                }
            }
            AppMsg::Close => {
                relm4::main_application().quit();
            }
        }
    }
}
