pub mod pdf;
pub mod report;

mod error;

pub use error::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Raw extracted text of one page. `number` is 1-based.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageText {
	pub number: u32,
	pub text: String,
}
