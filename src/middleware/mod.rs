//! Request middleware.
//!
//! One concern lives here: body parsing. [`parse_body`] runs in the
//! dispatch path before route lookup, the same position body-parsing
//! middleware occupies when installed ahead of the routes it feeds.

mod body;

pub(crate) use body::parse_body;
