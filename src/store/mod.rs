pub mod display_cache;
pub mod view_state;

pub use display_cache::{short_hex, DisplayCache};
pub use view_state::ViewState;
