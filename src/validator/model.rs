use serde_json::{Map, Number, Value};
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;
use trust_dns_proto::rr::RecordType;

/// The update request body exactly as a client sent it.
///
/// Only the outer shape is checked when parsing: the body must be a JSON object. Field types
/// are left to the accessors, so that the validator stage owning a field is the one that
/// rejects it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateRecordRequest {
    fields: Map<String, Value>,
}

impl UpdateRecordRequest {
    /// Parse a raw request body.
    ///
    /// # Errors
    ///
    /// Fails if `body` is not UTF-8 JSON or is not a JSON object.
    pub fn parse(body: &[u8]) -> Result<Self, serde_json::Error> {
        Ok(Self {
            fields: serde_json::from_slice(body)?,
        })
    }

    /// `id`, if it is a string.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.fields.get("id").and_then(Value::as_str)
    }

    /// `domain`, if it is a string.
    #[must_use]
    pub fn domain(&self) -> Option<&str> {
        self.fields.get("domain").and_then(Value::as_str)
    }

    /// `type` as sent, unless it is blank (absent, `null`, `false`, `0` or `""`).
    #[must_use]
    pub fn kind(&self) -> Option<&Value> {
        self.present("type")
    }

    /// `addr` as text, unless it is blank. A non-string value is kept in its JSON form so
    /// that it later fails to parse as an address.
    #[must_use]
    pub fn addr(&self) -> Option<String> {
        self.present("addr").map(|addr| match addr {
            Value::String(addr) => addr.clone(),
            other => other.to_string(),
        })
    }

    /// `timestamp`, if it is a JSON number (integral or not).
    #[must_use]
    pub fn timestamp(&self) -> Option<&Number> {
        match self.fields.get("timestamp") {
            Some(Value::Number(ts)) => Some(ts),
            _ => None,
        }
    }

    fn present(&self, field: &str) -> Option<&Value> {
        self.fields.get(field).filter(|value| !is_blank(value))
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}

/// The address family of the record being updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressFamily {
    Ipv4,
    Ipv6,
}

#[derive(thiserror::Error, Debug)]
#[error("unknown address family \"{0}\"")]
pub struct UnknownFamily(String);

impl FromStr for AddressFamily {
    type Err = UnknownFamily;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ipv4" => Ok(Self::Ipv4),
            "ipv6" => Ok(Self::Ipv6),
            _ => Err(UnknownFamily(s.to_string())),
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ipv4 => "ipv4",
            Self::Ipv6 => "ipv6",
        })
    }
}

impl AddressFamily {
    /// The DNS record type that holds addresses of this family.
    #[must_use]
    pub fn record_type(self) -> RecordType {
        match self {
            Self::Ipv4 => RecordType::A,
            Self::Ipv6 => RecordType::AAAA,
        }
    }

    #[must_use]
    pub fn contains(self, addr: &IpAddr) -> bool {
        matches!(
            (self, addr),
            (Self::Ipv4, IpAddr::V4(_)) | (Self::Ipv6, IpAddr::V6(_))
        )
    }
}

/// A fully validated update request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRequest {
    pub id: String,
    pub domain: String,
    pub addr: Option<String>,
    pub family: AddressFamily,
    pub timestamp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_body() {
        let req = UpdateRecordRequest::parse(
            br#"{"id":"a","domain":"a.example.com","addr":null,"type":"ipv6","timestamp":17}"#,
        )
        .unwrap();
        assert_eq!(req.id(), Some("a"));
        assert_eq!(req.domain(), Some("a.example.com"));
        assert_eq!(req.addr(), None);
        assert_eq!(req.kind(), Some(&Value::from("ipv6")));
        assert_eq!(req.timestamp().and_then(Number::as_i64), Some(17));
    }

    #[test]
    fn test_parse_only_rejects_non_objects() {
        for body in ["", "{", "5", "[]", r#""id""#, "null"] {
            assert!(UpdateRecordRequest::parse(body.as_bytes()).is_err(), "{body}");
        }
        assert!(UpdateRecordRequest::parse(br#"{"timestamp":"17","id":5}"#).is_ok());
    }

    #[test]
    fn test_wrongly_typed_fields() {
        let req = UpdateRecordRequest::parse(
            br#"{"id":5,"domain":["a"],"addr":7,"type":4,"timestamp":"17"}"#,
        )
        .unwrap();
        assert_eq!(req.id(), None);
        assert_eq!(req.domain(), None);
        assert_eq!(req.addr().as_deref(), Some("7"));
        assert_eq!(req.kind(), Some(&Value::from(4)));
        assert_eq!(req.timestamp(), None);
    }

    #[test]
    fn test_blank_fields_are_absent() {
        for blank in [r#""""#, "null", "false", "0"] {
            let body = format!(r#"{{"type":{blank},"addr":{blank}}}"#);
            let req = UpdateRecordRequest::parse(body.as_bytes()).unwrap();
            assert_eq!(req.kind(), None, "{blank}");
            assert_eq!(req.addr(), None, "{blank}");
        }
    }

    #[test]
    fn test_fractional_timestamp() {
        let req = UpdateRecordRequest::parse(br#"{"timestamp":1700000000.0}"#).unwrap();
        assert_eq!(req.timestamp().and_then(Number::as_f64), Some(1_700_000_000.0));
    }

    #[test]
    fn test_family() {
        assert_eq!("ipv4".parse::<AddressFamily>().unwrap(), AddressFamily::Ipv4);
        assert_eq!("ipv6".parse::<AddressFamily>().unwrap(), AddressFamily::Ipv6);
        assert!("IPV4".parse::<AddressFamily>().is_err());
        assert_eq!(AddressFamily::Ipv4.record_type(), RecordType::A);
        assert_eq!(AddressFamily::Ipv6.record_type(), RecordType::AAAA);
        assert!(AddressFamily::Ipv4.contains(&"192.0.2.1".parse().unwrap()));
        assert!(!AddressFamily::Ipv4.contains(&"2001:db8::1".parse().unwrap()));
    }
}
