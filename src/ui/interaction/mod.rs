//! Mouse interaction: hit areas registered while rendering, and the
//! handler that turns a click into an App mutation.

mod click_handler;
mod hit_area;

pub use click_handler::handle_click_action;
pub use hit_area::{ClickAction, HitArea, HitAreaRegistry};
