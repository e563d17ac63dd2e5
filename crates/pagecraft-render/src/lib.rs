//! PageCraft Render Library
//!
//! Draws page documents in two modes from one dispatch: the editable builder
//! canvas and the live public page. Output is a visual tree that can be
//! serialized to HTML.

mod build;
mod html;
mod renderer;
mod vnode;

pub use build::{build_tree, class, DROPPABLE_ATTR, SECTION_MAX_WIDTH};
pub use html::{escape_attr, escape_text, HtmlOptions, HtmlRenderer};
pub use renderer::{RenderContext, RenderMode, RenderResult, Renderer, RendererError};
pub use vnode::{Decoration, VNode};
