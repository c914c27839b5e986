use super::util::WriteHTMLTo;
use indexmap::IndexMap;
use std::fmt;

// Declares a trait with one setter method per listed attribute name. Any type
// implementing `HasAttributes` can opt into the setters by implementing the
// generated trait.
//
// A parent attribute trait may be named after the colon. It becomes a
// supertrait, so the setters and recognized names accumulate down the
// hierarchy.
//
// Keywords are declared as raw identifiers: `r#type` sets the `type`
// attribute.
#[macro_export]
macro_rules! attributes {
	(
		$(#[$meta:meta])*
		$vis:vis trait $name:ident $(: $parent:ident)? {
			$($attr:ident),+ $(,)?
		}
	) => {
		$(#[$meta])*
		$vis trait $name: $crate::HasAttributes $(+ $parent)? {
			// Attribute names declared by this trait only
			const DECLARED: &'static [&'static str] =
				&[$($crate::attribute_name(stringify!($attr))),+];

			// Resolve an attribute name against this trait and all of its
			// ancestors
			fn declared(name: &str) -> Option<&'static str> {
				for n in <Self as $name>::DECLARED {
					if *n == name {
						return Some(*n);
					}
				}
				$(
					if let Some(n) = <Self as $parent>::declared(name) {
						return Some(n);
					}
				)?
				None
			}

			$(
				fn $attr(&mut self, value: impl Into<String>) -> &mut Self {
					const NAME: &'static str =
						$crate::attribute_name(stringify!($attr));
					self.attrs_mut().set(NAME, value.into());
					self
				}
			)+
		}
	};
}

// Strips the raw identifier prefix from a stringified identifier
pub const fn attribute_name(ident: &'static str) -> &'static str {
	match ident.as_bytes() {
		[b'r', b'#', rest @ ..] => match std::str::from_utf8(rest) {
			Ok(s) => s,
			Err(_) => ident,
		},
		_ => ident,
	}
}

// Host of an attribute map. Required by all traits generated with
// `attributes!`.
pub trait HasAttributes {
	fn attrs(&self) -> &Attrs;
	fn attrs_mut(&mut self) -> &mut Attrs;
}

// Attribute storage, that preserves the order in which each attribute was
// first set
#[derive(Default, Debug, Clone)]
pub struct Attrs(IndexMap<&'static str, String>);

// Attribute maps are only equal, if they would be written out identically
impl PartialEq for Attrs {
	fn eq(&self, other: &Self) -> bool {
		self.0.iter().eq(other.0.iter())
	}
}

impl Eq for Attrs {}

impl Attrs {
	// Create empty attribute map
	#[inline]
	pub fn new() -> Self {
		Default::default()
	}

	// Set an attribute value. Setting an existing attribute replaces its value,
	// but keeps its position.
	pub fn set(&mut self, key: &'static str, val: String) {
		tracing::trace!(attribute = key, value = %val, "set attribute");
		self.0.insert(key, val);
	}

	// Value of an attribute, if set
	pub fn get(&self, key: &str) -> Option<&str> {
		self.0.get(key).map(String::as_str)
	}

	#[inline]
	pub fn len(&self) -> usize {
		self.0.len()
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	// Iterate attributes in output order
	pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
		self.0.iter().map(|(k, v)| (*k, v.as_str()))
	}

	// Rough length of the attributes, when written as HTML
	pub(crate) fn html_len(&self) -> usize {
		self.0.iter().map(|(k, v)| k.len() + v.len() + 4).sum()
	}
}

// Values are written as is. No escaping is performed.
impl WriteHTMLTo for Attrs {
	fn write_html_to<W: fmt::Write>(&self, w: &mut W) -> fmt::Result {
		for (k, v) in self.0.iter() {
			w.write_char(' ')?;
			w.write_str(k)?;
			w.write_str("=\"")?;
			w.write_str(v)?;
			w.write_char('"')?;
		}
		Ok(())
	}
}

#[cfg(test)]
fn to_html(attrs: &Attrs) -> String {
	let mut s = String::new();
	attrs.write_html_to(&mut s).unwrap();
	s
}

#[test]
fn raw_identifier_names() {
	assert_eq!(attribute_name("r#type"), "type");
	assert_eq!(attribute_name("method"), "method");
	assert_eq!(attribute_name("r"), "r");
}

#[test]
fn empty_attrs() {
	let attrs = Attrs::new();
	assert!(attrs.is_empty());
	assert_eq!(to_html(&attrs), "");
}

#[test]
fn first_set_order() {
	let mut attrs = Attrs::new();
	attrs.set("method", "get".into());
	attrs.set("action", "/".into());
	attrs.set("method", "post".into());

	assert_eq!(attrs.len(), 2);
	assert_eq!(attrs.get("method"), Some("post"));
	assert_eq!(
		attrs.iter().collect::<Vec<_>>(),
		vec![("method", "post"), ("action", "/")]
	);
	assert_eq!(to_html(&attrs), r#" method="post" action="/""#);
}

#[test]
fn order_sensitive_equality() {
	let mut a = Attrs::new();
	a.set("name", "x".into());
	a.set("type", "t".into());

	let mut b = Attrs::new();
	b.set("type", "t".into());
	b.set("name", "x".into());
	assert_ne!(a, b);

	b = Attrs::new();
	b.set("name", "y".into());
	b.set("type", "t".into());
	assert_ne!(a, b);
	b.set("name", "x".into());
	assert_eq!(a, b);
}

#[test]
fn values_not_escaped() {
	let mut attrs = Attrs::new();
	attrs.set("name", r#"a"b<c>&"#.into());
	assert_eq!(to_html(&attrs), r#" name="a"b<c>&""#);
}

#[cfg(test)]
mod generated {
	use super::*;

	#[derive(Default)]
	struct Host(Attrs);

	impl HasAttributes for Host {
		fn attrs(&self) -> &Attrs {
			&self.0
		}

		fn attrs_mut(&mut self) -> &mut Attrs {
			&mut self.0
		}
	}

	attributes! {
		trait BaseAttributes {
			id,
		}
	}

	attributes! {
		trait ChildAttributes: BaseAttributes {
			r#type, name
		}
	}

	impl BaseAttributes for Host {}
	impl ChildAttributes for Host {}

	#[test]
	fn declared_names() {
		assert_eq!(<Host as BaseAttributes>::DECLARED, &["id"]);
		assert_eq!(<Host as ChildAttributes>::DECLARED, &["type", "name"]);
	}

	#[test]
	fn cumulative_declarations() {
		assert_eq!(<Host as ChildAttributes>::declared("type"), Some("type"));
		assert_eq!(<Host as ChildAttributes>::declared("id"), Some("id"));
		assert_eq!(<Host as BaseAttributes>::declared("type"), None);
		assert_eq!(<Host as ChildAttributes>::declared("style"), None);
	}

	#[test]
	fn setters_are_per_instance() {
		let mut a = Host::default();
		let mut b = Host::default();
		a.id("a").r#type("text");
		b.id("b");

		assert_eq!(a.attrs().get("id"), Some("a"));
		assert_eq!(a.attrs().get("type"), Some("text"));
		assert_eq!(b.attrs().get("id"), Some("b"));
		assert_eq!(b.attrs().get("type"), None);
	}
}
