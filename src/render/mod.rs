mod renderer;

pub use renderer::{Renderer, WELCOME_TEXT};
