use dials::config;
use dials::gui::app::AppModel;
use dials::gui::ring::State;
use dials::sys::runtime;
use relm4::prelude::*;

fn main() {
    env_logger::init();

    let config = config::load_or_setup();
    let state = State::new(&config);

    let (tx, rx) = async_channel::bounded(32);

    if runtime::start_background_services(tx).is_none() {
        log::warn!("Running without control socket or config reload");
    }

    RelmApp::new("org.dials.dials").run::<AppModel>((state, config.placement, rx));
}
