//! Rendering surfaces consuming the parsed document.

mod html;
pub mod math;
mod text;

pub use html::{render_html, HtmlConfig};
pub use math::{latex_to_unicode, MathBackend, MathRenderer};
pub use text::{render_text, TextConfig};

pub(crate) use html::{escape_html, ready_script};
