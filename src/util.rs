use std::fmt;
use std::fmt::Display;
use wasm_bindgen::JsValue;

// Efficient append-only string builder for reducing reallocations
pub struct Appender {
	buffers: Vec<String>,
}

impl Appender {
	// Create an Appender with the first buffer sized for the expected output
	pub fn with_capacity(capacity: usize) -> Self {
		Appender {
			buffers: vec![String::with_capacity(capacity.max(64))],
		}
	}

	fn current(&mut self) -> &mut String {
		// Never empty: created with one buffer and only ever grows
		let i = self.buffers.len() - 1;
		&mut self.buffers[i]
	}

	fn assert_cap(&mut self, append_size: usize) {
		let buf = self.current();
		let cap = buf.capacity();
		if buf.len() + append_size > cap {
			self.buffers
				.push(String::with_capacity((cap * 2).max(append_size)));
		}
	}

	// Dump all partial buffers into whole string
	pub fn dump(self) -> String {
		match self.buffers.len() {
			1 => self.buffers.into_iter().next().unwrap_or_default(),
			_ => self.buffers.concat(),
		}
	}
}

impl fmt::Write for Appender {
	fn write_str(&mut self, s: &str) -> fmt::Result {
		self.assert_cap(s.len());
		self.current().write_str(s)
	}

	fn write_char(&mut self, c: char) -> fmt::Result {
		self.assert_cap(c.len_utf8());
		self.current().write_char(c)
	}
}

// Cast Rust error to JSValue to be thrown as exception
pub fn cast_error<T: Display>(e: T) -> JsValue {
	JsValue::from(format!("{}", e))
}

// Forward panic messages to the browser console. Only needs to be called once,
// but calling it more is harmless.
pub fn set_panic_hook() {
	#[cfg(feature = "console_error_panic_hook")]
	console_error_panic_hook::set_once();
}

// Able to write itself as HTML to w
pub trait WriteHTMLTo {
	fn write_html_to<W: fmt::Write>(&self, w: &mut W) -> fmt::Result;
}

#[test]
fn appender_grows() {
	use fmt::Write;

	let mut w = Appender::with_capacity(0);
	for _ in 0..100 {
		w.write_str("<input>").unwrap();
		w.write_char('!').unwrap();
	}
	assert!(w.buffers.len() > 1);
	assert_eq!(w.dump(), "<input>!".repeat(100));
}

#[test]
fn appender_single_buffer() {
	use fmt::Write;

	let mut w = Appender::with_capacity(16);
	write!(w, "<{}></{}>", "p", "p").unwrap();
	assert_eq!(w.buffers.len(), 1);
	assert_eq!(w.dump(), "<p></p>");
}
