use thiserror::Error;

// Failures of the dynamic, string-keyed construction API.
// The typed API rejects the same mistakes at compile time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
	#[error("<{tag}> does not accept attribute \"{name}\"")]
	UnknownAttribute { tag: &'static str, name: String },

	#[error("<{parent}> does not accept <{child}> children")]
	UnknownChild {
		parent: &'static str,
		child: &'static str,
	},

	#[error("unknown element kind: {0}")]
	UnknownKind(String),
}

pub type Result<T> = std::result::Result<T, Error>;
