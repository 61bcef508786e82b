use crate::config::{self, Placement};
use crate::events::AppEvent;
use crate::gui::ring::{self, State};
use crate::gui::theme::{self, ThemeColors};
use crate::gui::window;
use dial::{InputOutcome, Point};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

pub struct AppModel {
    pub state: Rc<RefCell<State>>,
    pub visible: bool,
    pub placement: Placement,
    pub area: (f64, f64),
    pub root: gtk::ApplicationWindow,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Show,
    Hide,
    Toggle,
    Click(Point),
    PointerMove(Point),
    DragBegin(Point),
    DragUpdate(Point, bool),
    DragEnd,
    Scroll(f64),
    Resize(f64, f64),
    SetValue(usize, f64),
    Configure(usize, Vec<(String, String)>),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Show => AppMsg::Show,
            AppEvent::Hide => AppMsg::Hide,
            AppEvent::Toggle => AppMsg::Toggle,
            AppEvent::SetValue(i, v) => AppMsg::SetValue(i, v),
            AppEvent::Configure(i, attrs) => AppMsg::Configure(i, attrs),
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

impl AppModel {
    fn area_center(&self) -> Point {
        Point::new(self.area.0 / 2.0, self.area.1 / 2.0)
    }

    fn redraw_if(&self, outcome: InputOutcome) {
        if outcome.should_redraw() {
            self.drawing_area.queue_draw();
        }
    }

    fn show(&mut self) {
        self.visible = true;

        let center = match self.placement {
            Placement::Cursor => {
                window::pointer_position(&self.root).unwrap_or_else(|| self.area_center())
            }
            Placement::Center => self.area_center(),
        };
        self.state.borrow_mut().place(center);
        self.drawing_area.queue_draw();
    }

    fn hide(&mut self) {
        self.visible = false;
        self.state.borrow_mut().drag_end();
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (State, Placement, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Dials"),
            #[watch]
            set_visible: model.visible,
            #[watch]
            set_opacity: if model.visible { 1.0 } else { 0.0 },
            add_css_class: "dials-window",
            set_decorated: false,

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Hide);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "dials-drawing-area",

                connect_resize[sender] => move |_, width, height| {
                    sender.input(AppMsg::Resize(width as f64, height as f64));
                },

                add_controller = gtk::EventControllerMotion {
                    connect_motion[sender] => move |_, x, y| {
                        sender.input(AppMsg::PointerMove(Point::new(x, y)));
                    }
                },

                add_controller = gtk::GestureClick {
                    connect_released[sender] => move |_, _, x, y| {
                        sender.input(AppMsg::Click(Point::new(x, y)));
                    }
                },

                add_controller = gtk::GestureDrag {
                    connect_drag_begin[sender] => move |_, x, y| {
                        sender.input(AppMsg::DragBegin(Point::new(x, y)));
                    },
                    connect_drag_update[sender] => move |gesture, dx, dy| {
                        if let Some((x, y)) = gesture.start_point() {
                            let touch = window::is_touch(gesture);
                            sender.input(AppMsg::DragUpdate(Point::new(x + dx, y + dy), touch));
                        }
                    },
                    connect_drag_end[sender] => move |_, _, _| {
                        sender.input(AppMsg::DragEnd);
                    }
                },

                add_controller = gtk::EventControllerScroll::new(gtk::EventControllerScrollFlags::VERTICAL) {
                    connect_scroll[sender] => move |_, _, dy| {
                        sender.input(AppMsg::Scroll(dy));
                        glib::Propagation::Stop
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
        let (state, placement, rx) = init;

        theme::load_css();
        window::init_overlay(&root);

        let state = Rc::new(RefCell::new(state));

        let model = AppModel {
            state: state.clone(),
            visible: false,
            placement,
            area: (0.0, 0.0),
            root: root.clone(),
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let state_draw = model.state.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                if let Err(e) = ring::draw(cr, &state_draw.borrow(), &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        root.set_visible(false);

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Show => self.show(),
            AppMsg::Hide => self.hide(),
            AppMsg::Toggle => {
                if self.visible {
                    self.hide();
                } else {
                    self.show();
                }
            }
            AppMsg::Click(point) => {
                if !self.visible {
                    return;
                }
                let outcome = self.state.borrow_mut().click(point);
                match outcome {
                    Some(_) => self.drawing_area.queue_draw(),
                    None => self.hide(),
                }
            }
            AppMsg::PointerMove(point) => self.state.borrow_mut().pointer_moved(point),
            AppMsg::DragBegin(point) => {
                if self.visible && self.state.borrow_mut().drag_begin(point) {
                    self.drawing_area.queue_draw();
                }
            }
            AppMsg::DragUpdate(point, touch) => {
                if !self.visible {
                    return;
                }
                let outcome = self.state.borrow_mut().drag_update(point, touch);
                self.redraw_if(outcome);
            }
            AppMsg::DragEnd => self.state.borrow_mut().drag_end(),
            AppMsg::Scroll(dy) => {
                if !self.visible {
                    return;
                }
                let outcome = self.state.borrow_mut().scroll(dy);
                self.redraw_if(outcome);
            }
            AppMsg::Resize(width, height) => {
                self.area = (width, height);
                if !self.visible {
                    return;
                }
                let needs_center = self.placement == Placement::Center
                    || !self.state.borrow().group.is_attached();
                let center = if needs_center {
                    self.area_center()
                } else {
                    self.state.borrow().group.host().center()
                };
                let outcome = self.state.borrow_mut().place(center);
                self.redraw_if(outcome);
            }
            AppMsg::SetValue(index, value) => {
                if let Err(e) = self.state.borrow_mut().set_value(index, value) {
                    log::error!("Failed to set dial {}: {}", index, e);
                }
                self.drawing_area.queue_draw();
            }
            AppMsg::Configure(index, attributes) => {
                if let Err(e) = self.state.borrow_mut().configure(index, &attributes) {
                    log::error!("Failed to configure dial {}: {}", index, e);
                }
                self.drawing_area.queue_draw();
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    self.placement = new_config.placement;
                    self.state.borrow_mut().reload(&new_config);
                    self.drawing_area.queue_draw();
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}
