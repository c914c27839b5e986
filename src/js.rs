use super::node::Node;
use super::util;
use wasm_bindgen::prelude::{wasm_bindgen, JsValue};

/*
Element node exposed to JS.

Mirrors the dynamic Node API: attribute names and child kinds are checked at
run time and violations are thrown as string exceptions.
*/
#[wasm_bindgen]
pub struct JsNode {
	node: Node,
}

#[wasm_bindgen]
impl JsNode {
	// Create an empty element from its HTML tag
	#[wasm_bindgen(constructor)]
	pub fn new(tag: &str) -> Result<JsNode, JsValue> {
		util::set_panic_hook();
		Node::from_tag(tag)
			.map(|node| JsNode { node })
			.map_err(util::cast_error)
	}

	#[wasm_bindgen(getter)]
	pub fn tag(&self) -> String {
		self.node.tag().into()
	}

	#[wasm_bindgen(js_name = setAttribute)]
	pub fn set_attribute(
		&mut self,
		name: &str,
		value: &str,
	) -> Result<(), JsValue> {
		self.node
			.set_attribute(name, value)
			.map_err(util::cast_error)
	}

	// Value of an attribute, if set
	#[wasm_bindgen(js_name = getAttribute)]
	pub fn get_attribute(&self, name: &str) -> Option<String> {
		self.node.attribute(name).map(String::from)
	}

	// Append child node. The child is consumed and can not be used from JS
	// afterwards.
	#[wasm_bindgen(js_name = appendChild)]
	pub fn append_child(&mut self, child: JsNode) -> Result<(), JsValue> {
		self.node.append(child.node).map_err(util::cast_error)
	}

	// Format element and subtree as HTML
	pub fn render(&self) -> String {
		self.node.render()
	}
}

impl From<Node> for JsNode {
	fn from(node: Node) -> Self {
		Self { node }
	}
}

impl AsRef<Node> for JsNode {
	fn as_ref(&self) -> &Node {
		&self.node
	}
}

// JsValue conversions only work on wasm targets. Native tests stick to the
// success paths. Thrown errors are covered by the wasm tests below.
#[test]
fn js_node_tree() {
	let mut input = JsNode::new("input").unwrap();
	input.set_attribute("type", "text").unwrap();
	input.set_attribute("name", "firstname").unwrap();
	assert_eq!(input.get_attribute("type").as_deref(), Some("text"));
	assert_eq!(input.get_attribute("id"), None);

	let mut p = JsNode::new("p").unwrap();
	p.set_attribute("id", "my_firstname").unwrap();
	p.append_child(input).unwrap();

	let mut form = JsNode::new("form").unwrap();
	form.set_attribute("method", "post").unwrap();
	form.set_attribute("action", "/").unwrap();
	form.append_child(p).unwrap();

	assert_eq!(form.tag(), "form");
	assert_eq!(
		form.render(),
		r#"<form method="post" action="/"><p id="my_firstname"><input type="text" name="firstname"></input></p></form>"#
	);
}

#[test]
fn js_node_from_node() {
	use crate::{Input, InputAttributes};

	let node = Input::new(|i| {
		i.name("q");
	});
	let js = JsNode::from(Node::from(node));
	assert_eq!(js.as_ref().tag(), "input");
	assert_eq!(js.render(), r#"<input name="q"></input>"#);
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm {
	use super::*;
	use wasm_bindgen_test::wasm_bindgen_test;

	#[wasm_bindgen_test]
	fn unknown_tag() {
		match JsNode::new("div") {
			Ok(_) => panic!("<div> constructed"),
			Err(e) => assert_eq!(
				e.as_string().as_deref(),
				Some("unknown element kind: div")
			),
		}
	}

	#[wasm_bindgen_test]
	fn unknown_attribute() {
		let mut input = JsNode::new("input").unwrap();
		input.set_attribute("name", "q").unwrap();
		let before = input.render();

		let res = input.set_attribute("style", "red");
		assert!(res.is_err());
		assert_eq!(
			res.unwrap_err().as_string().as_deref(),
			Some(r#"<input> does not accept attribute "style""#)
		);
		assert_eq!(input.get_attribute("style"), None);
		assert_eq!(input.render(), before);
	}

	#[wasm_bindgen_test]
	fn unknown_child() {
		let mut form = JsNode::new("form").unwrap();
		form.set_attribute("method", "post").unwrap();
		let before = form.render();

		let res = form.append_child(JsNode::new("input").unwrap());
		assert!(res.is_err());
		assert_eq!(
			res.unwrap_err().as_string().as_deref(),
			Some("<form> does not accept <input> children")
		);
		assert_eq!(form.render(), before);
		assert_eq!(before, r#"<form method="post"></form>"#);
	}
}
