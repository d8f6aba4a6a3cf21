pub mod formatting;
pub mod markup;
pub mod text;
