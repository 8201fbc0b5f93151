//! Chat orchestration engine.
//!
//! Ties the message normalizer, session store, content fetcher, and
//! generative backend together into the per-request turn state
//! machine. Generic over [`pcore::Generator`] and [`pcore::Fetcher`].

pub use {
    chat::{ChatEngine, DEFAULT_QUESTION},
    store::SessionStore,
};

mod chat;
mod store;
