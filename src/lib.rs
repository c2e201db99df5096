//! Typed Rust client for the ePochta (AtomPark) SMS HTTP API v3.
//!
//! The crate has three layers: a domain layer of strong types and the endpoint table,
//! a transport layer for the wire format (control sum, form encoding, reply
//! classification), and a small client layer orchestrating requests.
//!
//! ```rust,no_run
//! use epochta::{
//!     Credentials, EpochtaClient, MessageText, RawPhoneNumber, SendOptions, SendSms, SenderName,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), epochta::EpochtaError> {
//!     let client = EpochtaClient::new(Credentials::new("public", "private")?)?;
//!     let request = SendSms::new(
//!         SenderName::new("MyShop")?,
//!         MessageText::new("hello")?,
//!         RawPhoneNumber::new("380632345678")?,
//!         SendOptions::default(),
//!     );
//!     let _payload = client.send_sms(request).await?;
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{ClientConfig, Credentials, EpochtaClient, EpochtaClientBuilder, EpochtaError};
pub use domain::{
    CreateCampaign, Endpoint, EndpointRequest, EndpointSpec, MessageText, MethodName, ParamValue,
    PhoneNumber, PrivateKey, PublicKey, RawPhoneNumber, RequestParams, SearchFields,
    SearchOperation, SendDateTime, SendOptions, SendSms, SendSmsGroup, SenderName, SenderStatus,
    SmsLifetime, ValidationError,
};
pub use transport::control_sum;
