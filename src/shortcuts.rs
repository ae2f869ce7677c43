//! Key hint labels. The bindings themselves live in `App::handle_key`.

pub const SUBMIT_SHORTCUT: &str = "^S";
pub const DISMISS_SHORTCUT: &str = "^D";
pub const CLEAR_SHORTCUT: &str = "^R";
