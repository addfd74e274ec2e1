pub mod app_state;
pub mod input;
pub mod renderer;
pub mod view_model;
pub mod widgets;
