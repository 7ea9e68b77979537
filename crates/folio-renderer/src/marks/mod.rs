//! Built-in mark renderers.

mod code;
mod decorator;
mod link;

pub use code::CodeMark;
pub use decorator::DecoratorMark;
pub use link::{InternalLinkMark, LinkMark};
