//! Email module.
//!
//! This module contains everything related to decoding raw emails
//! into displayable records.

mod email;
pub use email::*;

mod emails;
pub use emails::*;

mod headers;

mod parts;
pub use parts::*;
