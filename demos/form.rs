// Builds a small login form and prints its markup.
//
// RUST_LOG=tagtree=trace cargo run --example form

use tagtree::{Form, FormAttributes, GenericAttributes, InputAttributes};
use tracing_subscriber::EnvFilter;

fn main() {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::from_default_env())
		.init();

	let form = Form::new(|f| {
		f.method("post").action("/");
		f.p(|p| {
			p.id("my_firstname");
			p.input(|i| {
				i.r#type("text").name("firstname");
			});
		});
	});

	println!("{}", form.render());
}
