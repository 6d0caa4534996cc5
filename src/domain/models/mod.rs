mod message;
mod product;
mod quote;
mod token;

pub use message::*;
pub use product::*;
pub use quote::*;
pub use token::*;
