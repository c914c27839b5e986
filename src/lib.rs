#[macro_use]
mod attrs;
mod error;
mod js;
mod node;
mod util;

pub use attrs::{Attrs, HasAttributes};
pub use error::{Error, Result};
pub use js::JsNode;
pub use node::{
	Element, Form, FormAttributes, GenericAttributes, Input, InputAttributes,
	Kind, Node, Paragraph,
};
pub use util::WriteHTMLTo;

// Used by the `attributes!` macro expansion
#[doc(hidden)]
pub use attrs::attribute_name;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;
