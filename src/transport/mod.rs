//! Transport layer: wire-format details (signing, form encoding, response decoding).

mod form;
mod response;
mod signature;

pub use form::encode_form;
pub use response::{ApiReply, decode_json_response};
pub use signature::control_sum;
