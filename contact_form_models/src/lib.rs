pub mod contact;
pub mod form;
mod macros;
