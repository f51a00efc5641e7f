mod backend;
pub mod imap;

pub use self::backend::{Backend, Error, Result};
pub use self::imap::{ImapBackend, ImapConfig};
