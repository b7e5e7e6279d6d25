//! Token model, factories, and buffered token navigation

pub mod factory;
pub mod token;
pub mod token_stream;

pub use factory::{CommonTokenFactory, TokenFactory};
pub use token::{Token, TokenProvenance, TokenType};
pub use token_stream::TokenStream;
