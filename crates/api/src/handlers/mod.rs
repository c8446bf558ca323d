pub mod redirect;

pub use redirect::{handle_redirect, redirect_request};
