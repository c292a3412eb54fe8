//! Authentication module
//!
//! Plaza requests are authenticated by an HMAC-SHA256 signature over the
//! method, content type, date and path. The [`Signer`] trait is the seam for
//! alternative signing schemes; [`Authenticator`] applies the resulting
//! headers to a request.

mod authenticator;
mod types;

pub use authenticator::{Authenticator, HmacSigner, Signer};
pub use types::{
    format_date, Credentials, SigningRequest, AUTHORIZATION_HEADER, CONTENT_TYPE, DATE_FORMAT,
    DATE_HEADER,
};
