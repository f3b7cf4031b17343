//! # ferroform-render
//!
//! Swappable HTML rendering for form field descriptors.
//!
//! Descriptors coming out of `ferroform-core` are render-agnostic; this
//! crate turns them into the default markup consumed by the reactive
//! client controller. A different rendering target only needs to
//! consume the same descriptors.

mod escape;
mod template;

pub use escape::escape_html;
pub use template::{render_field, render_form, RenderOptions};
