// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit message grammar: cleanup, header, body and footers.

mod cleanup;
mod footer;
mod message;

pub use cleanup::{cleanup, SCISSORS_LINE};
pub use footer::{
    is_continuation, parse_trailer, spaced_trailer_token, Footer, BREAKING_CHANGE_HYPHEN_TOKEN,
    BREAKING_CHANGE_TOKEN,
};
pub use message::{Header, StructuredMessage};

use crate::error::ParseError;

/// Parse a raw commit message into its structured form.
pub fn parse(raw: &str) -> Result<StructuredMessage, ParseError> {
    StructuredMessage::parse(raw)
}
