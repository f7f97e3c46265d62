/// iced front end: window, key bindings and the display sink

pub mod canvas;
pub mod sink;
pub mod viewer;
