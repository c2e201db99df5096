//! Domain layer: strong types with validation and invariants (no I/O).

mod endpoint;
mod params;
mod request;
mod response;
mod validation;
mod value;

pub use endpoint::{Endpoint, EndpointRequest, EndpointSpec};
pub use params::{ParamValue, RequestParams};
pub use request::{
    CreateCampaign, SearchFields, SearchOperation, SendOptions, SendSms, SendSmsGroup,
};
pub use response::SenderStatus;
pub use validation::ValidationError;
pub use value::{
    MessageText, MethodName, PhoneNumber, PrivateKey, PublicKey, RawPhoneNumber, SendDateTime,
    SenderName, SmsLifetime,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_key_rejects_empty() {
        assert!(matches!(
            PublicKey::new("   "),
            Err(ValidationError::Empty {
                field: PublicKey::FIELD
            })
        ));
    }

    #[test]
    fn private_key_rejects_empty() {
        assert!(matches!(
            PrivateKey::new(""),
            Err(ValidationError::Empty {
                field: PrivateKey::FIELD
            })
        ));
    }

    #[test]
    fn phone_number_parses_with_region_and_trims() {
        let pn = PhoneNumber::parse(Some(phonenumber::country::Id::UA), " 0632345678 ").unwrap();
        assert_eq!(pn.raw(), "0632345678");
        let raw: RawPhoneNumber = pn.into();
        assert_eq!(raw.raw(), "380632345678");
    }

    #[test]
    fn typed_requests_pass_table_validation() {
        let request: EndpointRequest = SendSms::new(
            SenderName::new("Shop").unwrap(),
            MessageText::new("hi").unwrap(),
            RawPhoneNumber::new("380632345678").unwrap(),
            SendOptions::default(),
        )
        .into();
        assert!(request.into_parts().is_ok());
    }

    #[test]
    fn every_endpoint_without_required_params_validates_empty() {
        for endpoint in Endpoint::ALL {
            let spec = endpoint.spec();
            let result = endpoint.request().into_parts();
            assert_eq!(
                result.is_ok(),
                spec.required.is_empty(),
                "{endpoint:?}: unexpected validation outcome"
            );
        }
    }
}
