pub mod builder;
pub mod document;
pub mod extract;
pub mod macros;
pub mod markdown;
pub mod package;
pub mod sections;
pub mod source;
pub mod syntax;
pub mod url;

pub use builder::{BuildError, BuildResult, Builder};
pub use syntax::SyntaxTable;
