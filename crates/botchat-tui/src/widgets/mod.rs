//! Custom widget components

mod composer;
mod header;
mod login_form;
mod status_bar;
mod transcript;

pub use composer::Composer;
pub use header::MainHeader;
pub use login_form::LoginForm;
pub use status_bar::StatusBar;
pub use transcript::{wrap_line, Transcript};
