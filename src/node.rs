use super::attrs::{Attrs, HasAttributes};
use super::error::{Error, Result};
use super::util::{Appender, WriteHTMLTo};
use std::fmt;

attributes! {
	// Attributes accepted by every element kind
	pub trait GenericAttributes {
		id,
	}
}

attributes! {
	pub trait FormAttributes: GenericAttributes {
		method, action,
	}
}

attributes! {
	pub trait InputAttributes: GenericAttributes {
		r#type, name,
	}
}

// Declares the element kinds, their tags, the attribute traits they implement
// and their child operations. Generates the Kind enum and a typed wrapper
// struct around Node for each kind.
macro_rules! kinds {
	(
		$(
			$(#[$meta:meta])*
			$kind:ident($tag:literal): $($attrs:ident),+ {
				$($op:ident => $child:ident),* $(,)?
			}
		)+
	) => {
		// Kind of a markup element
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
		pub enum Kind {
			$($kind,)+
		}

		impl Kind {
			pub const ALL: &'static [Kind] = &[$(Kind::$kind,)+];

			// HTML tag of the element
			pub fn tag(self) -> &'static str {
				match self {
					$(Kind::$kind => $tag,)+
				}
			}

			// Lookup kind by its HTML tag
			pub fn from_tag(tag: &str) -> Option<Self> {
				match tag {
					$($tag => Some(Kind::$kind),)+
					_ => None,
				}
			}

			// Resolve an attribute name, if recognized by this kind or any of
			// its ancestors
			pub fn attribute(self, name: &str) -> Option<&'static str> {
				match self {
					$(
						Kind::$kind => {
							$(
								if let Some(n) =
									<$kind as $attrs>::declared(name)
								{
									return Some(n);
								}
							)+
							None
						}
					)+
				}
			}

			// Reports, if this kind exposes a child operation for the child
			// kind
			pub fn accepts_child(self, child: Kind) -> bool {
				match self {
					$(Kind::$kind => false $(|| child == Kind::$child)*,)+
				}
			}
		}

		$(
			$(#[$meta])*
			#[derive(Debug, Clone, PartialEq, Eq)]
			pub struct $kind(Node);

			impl $kind {
				// Create an element and immediately run build against it
				pub fn new(build: impl FnOnce(&mut Self)) -> Self {
					let mut el = Self::empty();
					build(&mut el);
					el
				}

				// Create an element with no attributes or children
				#[inline]
				pub fn empty() -> Self {
					Self(Node::new(Kind::$kind))
				}

				#[inline]
				pub fn node(&self) -> &Node {
					&self.0
				}

				// Format element and subtree as HTML
				#[inline]
				pub fn render(&self) -> String {
					self.0.render()
				}

				$(
					// Append a child built by build
					pub fn $op(
						&mut self,
						build: impl FnOnce(&mut $child),
					) -> &mut Self {
						self.0.push($child::new(build).into());
						self
					}
				)*
			}

			impl Default for $kind {
				fn default() -> Self {
					Self::empty()
				}
			}

			impl HasAttributes for $kind {
				#[inline]
				fn attrs(&self) -> &Attrs {
					&self.0.attrs
				}

				#[inline]
				fn attrs_mut(&mut self) -> &mut Attrs {
					&mut self.0.attrs
				}
			}

			$(impl $attrs for $kind {})+

			impl From<$kind> for Node {
				#[inline]
				fn from(el: $kind) -> Node {
					el.0
				}
			}

			impl WriteHTMLTo for $kind {
				#[inline]
				fn write_html_to<W: fmt::Write>(&self, w: &mut W) -> fmt::Result {
					self.0.write_html_to(w)
				}
			}

			impl fmt::Display for $kind {
				fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
					self.0.write_html_to(f)
				}
			}
		)+
	};
}

kinds! {
	// Generic element. Only accepts the base attributes and has no child
	// operations.
	Element("element"): GenericAttributes {}

	/// `<form>` element. Children are appended with [`Form::p`].
	///
	/// ```
	/// use tagtree::{Form, FormAttributes, GenericAttributes, InputAttributes};
	///
	/// let form = Form::new(|f| {
	///     f.method("post").action("/");
	///     f.p(|p| {
	///         p.id("my_firstname");
	///         p.input(|i| {
	///             i.r#type("text").name("firstname");
	///         });
	///     });
	/// });
	/// assert_eq!(
	///     form.render(),
	///     r#"<form method="post" action="/"><p id="my_firstname"><input type="text" name="firstname"></input></p></form>"#,
	/// );
	/// ```
	Form("form"): GenericAttributes, FormAttributes {
		p => Paragraph,
	}

	// `<p>` element. Children are appended with `Paragraph::input`.
	Paragraph("p"): GenericAttributes {
		input => Input,
	}

	/// `<input>` element. Has no child operations.
	///
	/// Only declared attributes have setters:
	///
	/// ```compile_fail
	/// use tagtree::{GenericAttributes, Input, InputAttributes};
	///
	/// Input::new(|i| {
	///     i.style("red");
	/// });
	/// ```
	///
	/// Attributes of unrelated kinds are not inherited:
	///
	/// ```compile_fail
	/// use tagtree::{FormAttributes, GenericAttributes, Input, InputAttributes};
	///
	/// Input::new(|i| {
	///     i.method("post");
	/// });
	/// ```
	///
	/// Nor can it have children:
	///
	/// ```compile_fail
	/// use tagtree::Input;
	///
	/// Input::new(|i| {
	///     i.input(|_| {});
	/// });
	/// ```
	Input("input"): GenericAttributes, InputAttributes {}
}

impl fmt::Display for Kind {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(self.tag())
	}
}

/*
Markup element with its attributes and subtree.

Node is the untyped representation shared by all kinds. The typed wrappers
(Form, Paragraph, ...) restrict the available setters and child operations at
compile time, while Node checks the same rules at run time.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
	kind: Kind,

	// Only contains attributes recognized by kind
	attrs: Attrs,

	// Children in append order
	children: Vec<Node>,
}

impl Node {
	// Create an empty Node of the passed kind
	pub fn new(kind: Kind) -> Self {
		Self {
			kind,
			attrs: Default::default(),
			children: Default::default(),
		}
	}

	// Create an empty Node from its HTML tag
	pub fn from_tag(tag: &str) -> Result<Self> {
		match Kind::from_tag(tag) {
			Some(kind) => Ok(Self::new(kind)),
			None => {
				tracing::warn!(tag, "unknown element kind");
				Err(Error::UnknownKind(tag.into()))
			}
		}
	}

	#[inline]
	pub fn kind(&self) -> Kind {
		self.kind
	}

	#[inline]
	pub fn tag(&self) -> &'static str {
		self.kind.tag()
	}

	#[inline]
	pub fn attrs(&self) -> &Attrs {
		&self.attrs
	}

	// Value of an attribute, if set
	pub fn attribute(&self, name: &str) -> Option<&str> {
		self.attrs.get(name)
	}

	#[inline]
	pub fn children(&self) -> &[Node] {
		&self.children
	}

	// Set an attribute by name. The name must be recognized by the node's kind.
	pub fn set_attribute(
		&mut self,
		name: &str,
		value: impl Into<String>,
	) -> Result<()> {
		match self.kind.attribute(name) {
			Some(name) => {
				self.attrs.set(name, value.into());
				Ok(())
			}
			None => {
				tracing::warn!(
					tag = self.tag(),
					attribute = name,
					"unknown attribute"
				);
				Err(Error::UnknownAttribute {
					tag: self.tag(),
					name: name.into(),
				})
			}
		}
	}

	// Append a child. The node's kind must expose a child operation for the
	// child's kind.
	pub fn append(&mut self, child: impl Into<Node>) -> Result<()> {
		let child = child.into();
		if !self.kind.accepts_child(child.kind) {
			tracing::warn!(
				parent = self.tag(),
				child = child.tag(),
				"unknown child operation"
			);
			return Err(Error::UnknownChild {
				parent: self.tag(),
				child: child.tag(),
			});
		}
		self.push(child);
		Ok(())
	}

	fn push(&mut self, child: Node) {
		tracing::trace!(parent = self.tag(), child = child.tag(), "append child");
		self.children.push(child);
	}

	// Format element and subtree as HTML
	pub fn render(&self) -> String {
		let mut w = Appender::with_capacity(self.html_len());

		// Appender never returns an error
		let _ = self.write_html_to(&mut w);

		let html = w.dump();
		tracing::debug!(tag = self.tag(), len = html.len(), "rendered");
		html
	}

	// Rough length of the node and its subtree, when written as HTML
	fn html_len(&self) -> usize {
		self.tag().len() * 2
			+ 5 + self.attrs.html_len()
			+ self.children.iter().map(Node::html_len).sum::<usize>()
	}
}

impl WriteHTMLTo for Node {
	fn write_html_to<W: fmt::Write>(&self, w: &mut W) -> fmt::Result {
		let tag = self.tag();
		w.write_char('<')?;
		w.write_str(tag)?;
		self.attrs.write_html_to(w)?;
		w.write_char('>')?;
		for ch in self.children.iter() {
			ch.write_html_to(w)?;
		}
		write!(w, "</{}>", tag)
	}
}

impl fmt::Display for Node {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		self.write_html_to(f)
	}
}

#[cfg(test)]
type TestResult = std::result::Result<(), Error>;

#[cfg(test)]
macro_rules! assert_html {
	($node:expr, $expected:expr) => {{
		assert_eq!($node.render(), $expected);
	}};
}

#[cfg(test)]
fn sample_form() -> Form {
	Form::new(|f| {
		f.method("post").action("/");
		f.p(|p| {
			p.id("my_firstname");
			p.input(|i| {
				i.r#type("text").name("firstname");
			});
		});
	})
}

#[test]
fn sample_tree() {
	assert_html!(
		sample_form(),
		r#"<form method="post" action="/"><p id="my_firstname"><input type="text" name="firstname"></input></p></form>"#
	);
}

#[test]
fn empty_elements() {
	assert_html!(Input::empty(), "<input></input>");
	assert_html!(Input::new(|_| {}), "<input></input>");
	assert_html!(Paragraph::default(), "<p></p>");
	assert_html!(Element::empty(), "<element></element>");
	assert_html!(Node::new(Kind::Form), "<form></form>");
}

#[test]
fn sibling_isolation() {
	let form = Form::new(|f| {
		f.p(|p| {
			p.id("first");
		});
		f.p(|_| {});
	});
	let children = form.node().children();
	assert_eq!(children[0].attribute("id"), Some("first"));
	assert_eq!(children[1].attribute("id"), None);
	assert_html!(form, r#"<form><p id="first"></p><p></p></form>"#);
}

#[test]
fn reset_keeps_position() {
	let input = Input::new(|i| {
		i.name("a").r#type("text").name("b");
	});
	assert_html!(input, r#"<input name="b" type="text"></input>"#);
}

#[test]
fn inherited_attributes() {
	let form = Form::new(|f| {
		f.id("login").method("post");
	});
	assert_html!(form, r#"<form id="login" method="post"></form>"#);

	let input = Input::new(|i| {
		i.r#type("password").id("pw");
	});
	assert_html!(input, r#"<input type="password" id="pw"></input>"#);
}

#[test]
fn child_order() {
	let form = Form::new(|f| {
		for id in &["c1", "c2", "c3"] {
			f.p(|p| {
				p.id(*id);
			});
		}
	});
	assert_html!(
		form,
		r#"<form><p id="c1"></p><p id="c2"></p><p id="c3"></p></form>"#
	);
}

#[test]
fn values_not_escaped() {
	let input = Input::new(|i| {
		i.name(r#"say "hi" & <bye>"#);
	});
	assert_html!(input, r#"<input name="say "hi" & <bye>"></input>"#);
}

#[test]
fn repeated_render() {
	let form = sample_form();
	let first = form.render();
	assert_eq!(form.render(), first);
	assert_eq!(form.to_string(), first);
	assert_eq!(form.node().to_string(), first);
}

#[test]
fn recognized_attributes() {
	for kind in Kind::ALL {
		assert_eq!(kind.attribute("id"), Some("id"));
		assert_eq!(kind.attribute("style"), None);
	}
	assert_eq!(Kind::Form.attribute("action"), Some("action"));
	assert_eq!(Kind::Form.attribute("type"), None);
	assert_eq!(Kind::Input.attribute("type"), Some("type"));
	assert_eq!(Kind::Input.attribute("method"), None);
	assert_eq!(Kind::Paragraph.attribute("name"), None);
}

#[test]
fn tags() {
	for kind in Kind::ALL {
		assert_eq!(Kind::from_tag(kind.tag()), Some(*kind));
	}
	assert_eq!(Kind::Paragraph.to_string(), "p");
	assert_eq!(Kind::from_tag("div"), None);
}

#[test]
fn dynamic_tree() -> TestResult {
	let mut input = Node::from_tag("input")?;
	input.set_attribute("type", "text")?;
	input.set_attribute("name", "firstname")?;

	let mut p = Node::new(Kind::Paragraph);
	p.set_attribute("id", "my_firstname")?;
	p.append(input)?;

	let mut form = Node::new(Kind::Form);
	form.set_attribute("method", "post")?;
	form.set_attribute("action", "/")?;
	form.append(p)?;

	assert_eq!(form, *sample_form().node());
	assert_html!(form, sample_form().render());
	Ok(())
}

#[test]
fn child_operations() {
	let form = Form::new(|f| {
		f.p(|p| {
			p.input(|_| {});
		});
	});
	let p = &form.node().children()[0];
	let input = &p.children()[0];
	assert_eq!(p.kind(), Kind::Paragraph);
	assert_eq!(input.kind(), Kind::Input);
	assert!(Kind::Form.accepts_child(p.kind()));
	assert!(Kind::Paragraph.accepts_child(input.kind()));

	for parent in Kind::ALL {
		for child in Kind::ALL {
			let expected = match (parent, child) {
				(Kind::Form, Kind::Paragraph)
				| (Kind::Paragraph, Kind::Input) => true,
				_ => false,
			};
			assert_eq!(parent.accepts_child(*child), expected);
		}
	}
}

#[test]
fn attribute_order_in_equality() {
	let a = Input::new(|i| {
		i.name("x").r#type("t");
	});
	let b = Input::new(|i| {
		i.r#type("t").name("x");
	});
	assert_ne!(a.render(), b.render());
	assert_ne!(a, b);
	assert_ne!(a.node(), b.node());

	let c = Input::new(|i| {
		i.name("y").r#type("t").name("x");
	});
	assert_eq!(a, c);
}

#[test]
fn dynamic_unknown_attribute() {
	let mut input = Node::new(Kind::Input);
	assert_eq!(
		input.set_attribute("style", "red"),
		Err(Error::UnknownAttribute {
			tag: "input",
			name: "style".into(),
		})
	);
	assert_eq!(
		input.set_attribute("method", "post"),
		Err(Error::UnknownAttribute {
			tag: "input",
			name: "method".into(),
		})
	);
	assert!(input.attrs().is_empty());
	assert_html!(input, "<input></input>");
}

#[test]
fn dynamic_unknown_child() -> TestResult {
	let mut form = Node::new(Kind::Form);
	assert_eq!(
		form.append(Input::empty()),
		Err(Error::UnknownChild {
			parent: "form",
			child: "input",
		})
	);
	assert_eq!(
		Node::new(Kind::Input).append(Node::new(Kind::Input)),
		Err(Error::UnknownChild {
			parent: "input",
			child: "input",
		})
	);
	assert!(form.children().is_empty());

	form.append(Paragraph::empty())?;
	assert_html!(form, "<form><p></p></form>");
	Ok(())
}

#[test]
fn dynamic_unknown_kind() {
	assert_eq!(Node::from_tag("div"), Err(Error::UnknownKind("div".into())));
}

#[test]
fn error_messages() {
	assert_eq!(
		Error::UnknownAttribute {
			tag: "input",
			name: "style".into(),
		}
		.to_string(),
		r#"<input> does not accept attribute "style""#
	);
	assert_eq!(
		Error::UnknownChild {
			parent: "form",
			child: "input",
		}
		.to_string(),
		"<form> does not accept <input> children"
	);
}
