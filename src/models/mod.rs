pub mod mail;

pub use mail::{ContactRequest, Recipients, RelayResponse, SendEmailRequest};
