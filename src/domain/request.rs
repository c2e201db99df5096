use serde_json::{Map, Value, json};

use crate::domain::endpoint::{Endpoint, EndpointRequest};
use crate::domain::params::ParamValue;
use crate::domain::validation::ValidationError;
use crate::domain::value::{MessageText, RawPhoneNumber, SendDateTime, SenderName, SmsLifetime};

#[derive(Debug, Clone, Default)]
pub struct SendOptions {
    pub datetime: Option<SendDateTime>,
    pub sms_lifetime: Option<SmsLifetime>,
    pub sms_type: Option<u32>,
    pub asender: Option<SenderName>,
}

impl SendOptions {
    fn apply(&self, request: EndpointRequest) -> EndpointRequest {
        request
            .param(SendDateTime::FIELD, self.datetime.map(SendDateTime::to_wire))
            .param(SmsLifetime::FIELD, self.sms_lifetime.map(SmsLifetime::code))
            .param("type", self.sms_type)
            .param("asender", self.asender.as_ref())
    }
}

#[derive(Debug, Clone)]
/// Single message to one recipient (`sendSMS`).
pub struct SendSms {
    sender: SenderName,
    text: MessageText,
    phone: RawPhoneNumber,
    options: SendOptions,
}

impl SendSms {
    pub fn new(
        sender: SenderName,
        text: MessageText,
        phone: RawPhoneNumber,
        options: SendOptions,
    ) -> Self {
        Self {
            sender,
            text,
            phone,
            options,
        }
    }

    pub fn options(&self) -> &SendOptions {
        &self.options
    }
}

impl From<SendSms> for EndpointRequest {
    fn from(value: SendSms) -> Self {
        let request = Endpoint::SendSms
            .request()
            .param(SenderName::FIELD, &value.sender)
            .param(MessageText::FIELD, &value.text)
            .param(RawPhoneNumber::FIELD, &value.phone);
        value.options.apply(request)
    }
}

#[derive(Debug, Clone)]
/// One message to many recipients (`sendsmsgroup`).
pub struct SendSmsGroup {
    sender: SenderName,
    text: MessageText,
    phones: Vec<RawPhoneNumber>,
    options: SendOptions,
}

impl SendSmsGroup {
    /// Form field name used by the API (`phones`).
    pub const PHONES_FIELD: &'static str = "phones";

    pub fn new(
        sender: SenderName,
        text: MessageText,
        phones: Vec<RawPhoneNumber>,
        options: SendOptions,
    ) -> Result<Self, ValidationError> {
        if phones.is_empty() {
            return Err(ValidationError::Empty {
                field: Self::PHONES_FIELD,
            });
        }
        Ok(Self {
            sender,
            text,
            phones,
            options,
        })
    }

    pub fn phones(&self) -> &[RawPhoneNumber] {
        &self.phones
    }
}

impl From<SendSmsGroup> for EndpointRequest {
    fn from(value: SendSmsGroup) -> Self {
        let phones = value
            .phones
            .iter()
            .map(|phone| phone.raw().to_owned())
            .collect::<Vec<_>>();
        let request = Endpoint::SendSmsGroup
            .request()
            .param(SenderName::FIELD, &value.sender)
            .param(MessageText::FIELD, &value.text)
            .param(SendSmsGroup::PHONES_FIELD, phones);
        value.options.apply(request)
    }
}

#[derive(Debug, Clone)]
/// Campaign over an address book (`createCampaign`).
pub struct CreateCampaign {
    pub sender: SenderName,
    pub text: MessageText,
    /// Address book id.
    pub list_id: i64,
    pub datetime: SendDateTime,
    /// Messages per batch.
    pub batch: u32,
    /// Minutes between batches.
    pub batch_interval: u32,
    pub sms_lifetime: SmsLifetime,
    /// Number that receives a copy of the campaign message.
    pub control_phone: RawPhoneNumber,
}

impl From<CreateCampaign> for EndpointRequest {
    fn from(value: CreateCampaign) -> Self {
        Endpoint::CreateCampaign
            .request()
            .param(SenderName::FIELD, &value.sender)
            .param(MessageText::FIELD, &value.text)
            .param("list_id", value.list_id)
            .param(SendDateTime::FIELD, value.datetime.to_wire())
            .param("batch", value.batch)
            .param("batchinterval", value.batch_interval)
            .param(SmsLifetime::FIELD, value.sms_lifetime.code())
            .param("control_phone", &value.control_phone)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchOperation {
    Like,
    Eq,
    Gt,
    Ge,
    Lt,
    Le,
}

impl SearchOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Eq => "=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Lt => "<",
            Self::Le => "<=",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Search conditions for the `search*` endpoints (`searchFields`).
///
/// Encoded as `{"<field>":{"operation":"<op>","value":"<value>"}}`. A later condition on the
/// same field replaces the earlier one.
pub struct SearchFields(Vec<(String, SearchOperation, String)>);

impl SearchFields {
    /// Form field name used by the API (`searchFields`).
    pub const FIELD: &'static str = "searchFields";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn condition(
        mut self,
        field: impl Into<String>,
        operation: SearchOperation,
        value: impl Into<String>,
    ) -> Self {
        self.0.push((field.into(), operation, value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_json(&self) -> String {
        let mut fields = Map::new();
        for (field, operation, value) in &self.0 {
            fields.insert(
                field.clone(),
                json!({ "operation": operation.as_str(), "value": value }),
            );
        }
        Value::Object(fields).to_string()
    }
}

impl From<SearchFields> for ParamValue {
    fn from(value: SearchFields) -> Self {
        Self::Str(value.to_json())
    }
}
