pub mod contact;
mod macros;
pub mod theme;
pub mod validation;
