use crate::config;
use crate::events::AppEvent;
use crate::gui::icons::IconCache;
use crate::gui::surface::CairoSurface;
use circleseek::{CircleSeekBar, Invalidation, PointerEvent, Rect, ScrollCallback};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

pub const DEFAULT_SIZE: i32 = 320;

struct LoggingCallback;

impl ScrollCallback for LoggingCallback {
    fn on_start_scrolling(&mut self, start_value: i32) {
        log::info!("Started scrolling at {}", start_value);
    }

    fn on_end_scrolling(&mut self, end_value: i32) {
        log::info!("Stopped scrolling at {}", end_value);
    }
}

pub struct AppModel {
    pub bar: Rc<RefCell<CircleSeekBar>>,
    pub config_path: PathBuf,
    pub size: (i32, i32),
    pub icons: Rc<RefCell<IconCache>>,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Pointer(PointerEvent),
    Resize(i32, i32),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (
        CircleSeekBar,
        PathBuf,
        async_channel::Receiver<AppEvent>,
    );
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        gtk::ApplicationWindow {
            set_title: Some("Circle Seek"),
            set_default_size: (DEFAULT_SIZE, DEFAULT_SIZE),

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,

                connect_resize[sender] => move |_, width, height| {
                    sender.input(AppMsg::Resize(width, height));
                },

                add_controller = gtk::GestureDrag {
                    connect_drag_begin[sender] => move |gesture, x, y| {
                        // keep scrolled ancestors from stealing the drag
                        gesture.set_state(gtk::EventSequenceState::Claimed);
                        sender.input(AppMsg::Pointer(PointerEvent::down(x, y)));
                    },
                    connect_drag_update[sender] => move |gesture, dx, dy| {
                        if let Some((x, y)) = gesture.start_point() {
                            sender.input(AppMsg::Pointer(PointerEvent::moved(x + dx, y + dy)));
                        }
                    },
                    connect_drag_end[sender] => move |gesture, dx, dy| {
                        let (x, y) = gesture.start_point().unwrap_or_default();
                        sender.input(AppMsg::Pointer(PointerEvent::up(x + dx, y + dy)));
                    },
                    connect_cancel[sender] => move |gesture, _| {
                        let (x, y) = gesture.start_point().unwrap_or_default();
                        sender.input(AppMsg::Pointer(PointerEvent::cancel(x, y)));
                    },
                },
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (mut bar, config_path, rx) = init;

        let widgets = view_output!();

        let area = widgets.drawing_area.downgrade();
        bar.set_invalidator(move |invalidation| {
            let Some(area) = area.upgrade() else {
                return;
            };
            if invalidation == Invalidation::Layout {
                area.queue_resize();
            }
            area.queue_draw();
        });
        bar.set_callback(LoggingCallback);
        bar.set_on_value_changed(|value| log::debug!("Value changed to {}", value));

        let model = AppModel {
            bar: Rc::new(RefCell::new(bar)),
            config_path,
            size: (0, 0),
            icons: Rc::default(),
            drawing_area: widgets.drawing_area.clone(),
        };

        let bar_draw = model.bar.clone();
        let icons_draw = model.icons.clone();
        widgets
            .drawing_area
            .set_draw_func(move |_, cr, width, height| {
                let mut icons = icons_draw.borrow_mut();
                let mut surface = CairoSurface::new(cr, &mut icons);
                let mut bar = bar_draw.borrow_mut();
                let bounds = Rect::new(0.0, 0.0, width as f64, height as f64);
                bar.on_layout(bounds, &surface);
                if let Err(e) = bar.on_draw(&mut surface) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        root.set_visible(true);

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Pointer(event) => {
                let response = self.bar.borrow_mut().on_pointer_event(event);
                if response.should_redraw {
                    self.drawing_area.queue_draw();
                }
            }
            AppMsg::Resize(width, height) => {
                let (old_width, old_height) = std::mem::replace(&mut self.size, (width, height));
                self.bar.borrow_mut().on_size_changed(
                    width as f64,
                    height as f64,
                    old_width as f64,
                    old_height as f64,
                );
            }
            AppMsg::ConfigReload => match config::load_config(&self.config_path) {
                Ok(new_config) => {
                    self.icons.borrow_mut().clear();
                    self.bar.borrow_mut().apply_config(new_config);
                    self.drawing_area.queue_draw();
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}
