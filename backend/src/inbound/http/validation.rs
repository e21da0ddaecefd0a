//! Path parameter validation shared by inbound HTTP adapters.

use serde_json::json;
use uuid::Uuid;

use crate::domain::portfolio::EntryId;
use crate::domain::{Error, MessageId};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidUuid,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidUuid => "invalid_uuid",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

const ID_FIELD: FieldName = FieldName::new("id");

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("{field} must be a valid UUID")).with_details(json!({
        "field": field,
        "value": value,
        "code": ErrorCode::InvalidUuid.as_str(),
    }))
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|_| invalid_uuid_error(field, value))
}

/// Parse the `{id}` segment of an inbox route.
pub(crate) fn parse_message_id(value: &str) -> Result<MessageId, Error> {
    parse_uuid(value, ID_FIELD).map(MessageId::from_uuid)
}

/// Parse the `{id}` segment of a content route.
pub(crate) fn parse_entry_id(value: &str) -> Result<EntryId, Error> {
    parse_uuid(value, ID_FIELD).map(EntryId::from_uuid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode as DomainErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("42")]
    #[case("3fa85f64-5717-4562-b3fc")]
    fn malformed_ids_report_the_field(#[case] raw: &str) {
        let err = parse_message_id(raw).expect_err("malformed id");
        assert_eq!(err.code(), DomainErrorCode::InvalidRequest);
        let details = err.details().expect("details");
        assert_eq!(details["field"], "id");
        assert_eq!(details["code"], "invalid_uuid");
        assert_eq!(details["value"], raw);
    }

    #[rstest]
    fn well_formed_ids_parse() {
        let raw = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
        let id = parse_entry_id(raw).expect("valid id");
        assert_eq!(id.to_string(), raw);
    }
}
