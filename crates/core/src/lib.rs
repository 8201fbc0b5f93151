//! Core abstractions for pagetalk — chat grounded in web pages.

pub use {
    error::{Error, Result},
    message::{Message, Role},
    page::WebPage,
    parser::{Parsed, parse},
    provider::{Fetcher, Generator},
    request::{ChatRequest, ChatResponse},
    session::Session,
};

mod error;
mod message;
mod page;
mod parser;
mod provider;
mod request;
mod session;
