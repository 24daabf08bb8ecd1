pub mod author;
pub mod quotes;

pub use author::{Author, AuthorName};
pub use quotes::{NewQuote, Quote};
