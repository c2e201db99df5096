//! Declarative table of the remote API surface.
//!
//! Every endpoint is a fixed method name plus the parameter names it accepts. Requests are
//! checked against the table before they reach the dispatcher.

use crate::domain::params::{ParamValue, RequestParams};
use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Method name and parameter schema of one endpoint.
pub struct EndpointSpec {
    pub method: &'static str,
    pub required: &'static [&'static str],
    pub optional: &'static [&'static str],
}

impl EndpointSpec {
    /// Whether `name` is part of this endpoint's schema.
    pub fn accepts(&self, name: &str) -> bool {
        self.required.contains(&name) || self.optional.contains(&name)
    }

    /// Check that every required parameter is set (and not null) and that nothing
    /// outside the schema is present.
    pub fn validate(&self, params: &RequestParams) -> Result<(), ValidationError> {
        for &name in self.required {
            match params.get(name) {
                Some(value) if !value.is_null() => {}
                _ => {
                    return Err(ValidationError::MissingParam {
                        method: self.method,
                        param: name.to_owned(),
                    });
                }
            }
        }

        if let Some((name, _)) = params.iter().find(|(name, _)| !self.accepts(name)) {
            return Err(ValidationError::UnknownParam {
                method: self.method,
                param: name.to_owned(),
            });
        }

        Ok(())
    }
}

type Schema = (&'static str, &'static [&'static str], &'static [&'static str]);

const PAGING: &[&str] = &["from", "offset"];
const SEND_OPTIONAL: &[&str] = &["datetime", "sms_lifetime", "type", "asender"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Known API endpoints.
///
/// Several endpoints share a remote method and differ only in the parameters they send.
pub enum Endpoint {
    AddAddressBook,
    DelAddressBook,
    EditAddressBook,
    GetAddressBook,
    SearchAddressBook,
    CloneAddressBook,
    AddPhoneToAddressBook,
    AddPhonesToAddressBook,
    GetPhoneById,
    GetPhoneByPhone,
    GetAllPhones,
    GetPhonesByAddressBook,
    DelPhoneFromAddressBook,
    DelPhonesByAddressBook,
    DelPhoneFromAddressBookGroup,
    EditPhone,
    SearchPhones,
    AddPhoneToExceptions,
    DelPhoneFromExceptions,
    EditExceptions,
    GetException,
    SearchPhonesInExceptions,
    GetUserBalance,
    SendSms,
    SendSmsGroup,
    RegisterSender,
    GetSenderStatus,
    CreateCampaign,
    GetCampaignInfo,
    GetCampaignDeliveryStats,
    CancelCampaign,
    DeleteCampaign,
    GetCampaignList,
    CheckCampaignPrice,
}

impl Endpoint {
    /// Every endpoint, in table order.
    pub const ALL: &'static [Endpoint] = &[
        Self::AddAddressBook,
        Self::DelAddressBook,
        Self::EditAddressBook,
        Self::GetAddressBook,
        Self::SearchAddressBook,
        Self::CloneAddressBook,
        Self::AddPhoneToAddressBook,
        Self::AddPhonesToAddressBook,
        Self::GetPhoneById,
        Self::GetPhoneByPhone,
        Self::GetAllPhones,
        Self::GetPhonesByAddressBook,
        Self::DelPhoneFromAddressBook,
        Self::DelPhonesByAddressBook,
        Self::DelPhoneFromAddressBookGroup,
        Self::EditPhone,
        Self::SearchPhones,
        Self::AddPhoneToExceptions,
        Self::DelPhoneFromExceptions,
        Self::EditExceptions,
        Self::GetException,
        Self::SearchPhonesInExceptions,
        Self::GetUserBalance,
        Self::SendSms,
        Self::SendSmsGroup,
        Self::RegisterSender,
        Self::GetSenderStatus,
        Self::CreateCampaign,
        Self::GetCampaignInfo,
        Self::GetCampaignDeliveryStats,
        Self::CancelCampaign,
        Self::DeleteCampaign,
        Self::GetCampaignList,
        Self::CheckCampaignPrice,
    ];

    pub fn spec(self) -> EndpointSpec {
        let (method, required, optional): Schema = match self {
            Self::AddAddressBook => ("addAddressbook", &["name"], &["description"]),
            Self::DelAddressBook => ("delAddressbook", &["idAddressBook"], &[]),
            Self::EditAddressBook => (
                "editAddressbook",
                &["idAddressBook", "newName"],
                &["newDescr"],
            ),
            Self::GetAddressBook => (
                "getAddressbook",
                &[],
                &["idAddressBook", "from", "offset"],
            ),
            Self::SearchAddressBook => (
                "searchAddressBook",
                &[],
                &["searchFields", "from", "offset"],
            ),
            Self::CloneAddressBook => ("cloneaddressbook", &["idAddressBook"], &[]),
            Self::AddPhoneToAddressBook => (
                "addPhoneToAddressBook",
                &["idAddressBook", "phone"],
                &["variables"],
            ),
            Self::AddPhonesToAddressBook => {
                ("addPhoneToAddressBook", &["idAddressBook", "data"], &[])
            }
            Self::GetPhoneById => ("getPhoneFromAddressBook", &["idPhone"], &["idAddressBook"]),
            Self::GetPhoneByPhone => ("getPhoneFromAddressBook", &["phone"], &[]),
            Self::GetAllPhones => ("getPhoneFromAddressBook", &[], PAGING),
            Self::GetPhonesByAddressBook => (
                "getPhoneFromAddressBook",
                &["idAddressBook"],
                &["phone", "from", "offset"],
            ),
            Self::DelPhoneFromAddressBook => ("delPhoneFromAddressBook", &["idPhone"], &[]),
            Self::DelPhonesByAddressBook => {
                ("delPhoneFromAddressBook", &["idAddressBook"], &[])
            }
            Self::DelPhoneFromAddressBookGroup => {
                ("delphonefromaddressbookgroup", &["idPhones"], &[])
            }
            Self::EditPhone => ("editPhone", &["idPhone", "phone"], &["variables"]),
            Self::SearchPhones => ("searchPhones", &["searchFields"], PAGING),
            Self::AddPhoneToExceptions => {
                ("addPhoneToExceptions", &["reason"], &["idPhone", "phone"])
            }
            Self::DelPhoneFromExceptions => (
                "delPhoneFromExceptions",
                &[],
                &["idPhone", "phone", "idException"],
            ),
            Self::EditExceptions => ("editExceptions", &["idException", "reason"], &[]),
            Self::GetException => (
                "getException",
                &[],
                &["idException", "phone", "idAddresbook", "from", "offset"],
            ),
            Self::SearchPhonesInExceptions => (
                "searchPhonesInExceptions",
                &[],
                &["searchFields", "from", "offset"],
            ),
            Self::GetUserBalance => ("getUserBalance", &[], &["currency"]),
            Self::SendSms => ("sendSMS", &["sender", "text", "phone"], SEND_OPTIONAL),
            Self::SendSmsGroup => ("sendsmsgroup", &["sender", "text", "phones"], SEND_OPTIONAL),
            Self::RegisterSender => ("registerSender", &["name", "country"], &[]),
            Self::GetSenderStatus => (
                "getSenderStatus",
                &[],
                &["idName", "name", "country", "from", "offset"],
            ),
            Self::CreateCampaign => (
                "createCampaign",
                &[
                    "sender",
                    "text",
                    "list_id",
                    "datetime",
                    "batch",
                    "batchinterval",
                    "sms_lifetime",
                    "control_phone",
                ],
                &[],
            ),
            Self::GetCampaignInfo => ("getCampaignInfo", &["id"], &[]),
            Self::GetCampaignDeliveryStats => {
                ("getCampaignDeliveryStats", &["id"], &["datefrom"])
            }
            Self::CancelCampaign => ("cancelCampaign", &["id"], &[]),
            Self::DeleteCampaign => ("deleteCampaign", &["id"], &[]),
            Self::GetCampaignList => ("getCampaignList", &[], &[]),
            Self::CheckCampaignPrice => {
                ("checkCampaignPrice", &["sender", "text", "list_id"], &[])
            }
        };

        EndpointSpec {
            method,
            required,
            optional,
        }
    }

    /// Remote method name.
    pub fn method(self) -> &'static str {
        self.spec().method
    }

    /// Start a request for this endpoint.
    pub fn request(self) -> EndpointRequest {
        EndpointRequest::new(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Parameters collected for one endpoint call.
pub struct EndpointRequest {
    endpoint: Endpoint,
    params: RequestParams,
}

impl EndpointRequest {
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            params: RequestParams::new(),
        }
    }

    /// Set a parameter. Null values are accepted here and dropped on the wire.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(name, value);
        self
    }

    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    pub fn params(&self) -> &RequestParams {
        &self.params
    }

    /// Validate against the endpoint table and split into method name and params.
    pub fn into_parts(self) -> Result<(&'static str, RequestParams), ValidationError> {
        let spec = self.endpoint.spec();
        spec.validate(&self.params)?;
        Ok((spec.method, self.params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_names_match_remote_api() {
        assert_eq!(Endpoint::AddAddressBook.method(), "addAddressbook");
        assert_eq!(Endpoint::CloneAddressBook.method(), "cloneaddressbook");
        assert_eq!(Endpoint::SendSms.method(), "sendSMS");
        assert_eq!(Endpoint::SendSmsGroup.method(), "sendsmsgroup");
        assert_eq!(Endpoint::GetPhoneById.method(), "getPhoneFromAddressBook");
        assert_eq!(Endpoint::GetAllPhones.method(), "getPhoneFromAddressBook");
        assert_eq!(Endpoint::GetCampaignList.method(), "getCampaignList");
    }

    #[test]
    fn table_is_well_formed() {
        for endpoint in Endpoint::ALL {
            let spec = endpoint.spec();
            assert!(!spec.method.is_empty(), "{endpoint:?} has no method");
            for name in spec.required {
                assert!(
                    !spec.optional.contains(name),
                    "{endpoint:?}: {name} is both required and optional"
                );
            }
            for name in spec.required.iter().chain(spec.optional) {
                assert!(
                    !matches!(*name, "key" | "sum" | "test" | "version" | "action"),
                    "{endpoint:?} declares reserved parameter {name}"
                );
            }
        }
    }

    #[test]
    fn missing_required_param_is_rejected() {
        let err = Endpoint::SendSms
            .request()
            .param("sender", "Shop")
            .param("text", "hi")
            .into_parts()
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingParam {
                method: "sendSMS",
                param: "phone".to_owned(),
            }
        );
    }

    #[test]
    fn null_required_param_counts_as_missing() {
        let err = Endpoint::GetCampaignInfo
            .request()
            .param("id", None::<i64>)
            .into_parts()
            .unwrap_err();
        assert!(matches!(err, ValidationError::MissingParam { .. }));
    }

    #[test]
    fn unknown_param_is_rejected() {
        let err = Endpoint::GetUserBalance
            .request()
            .param("currency", "USD")
            .param("phone", "380632345678")
            .into_parts()
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownParam {
                method: "getUserBalance",
                param: "phone".to_owned(),
            }
        );
    }

    #[test]
    fn valid_request_splits_into_method_and_params() {
        let (method, params) = Endpoint::GetCampaignDeliveryStats
            .request()
            .param("id", 42_i64)
            .into_parts()
            .unwrap();
        assert_eq!(method, "getCampaignDeliveryStats");
        assert_eq!(params.get("id"), Some(&ParamValue::Int(42)));
        assert!(!params.contains("datefrom"));
    }
}
