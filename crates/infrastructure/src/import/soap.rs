//! SOAP envelope detection.

use courier_domain::request::{BodyType, Header, HttpMethod};

use super::RequestDraft;

const SOAP_11_NAMESPACE: &str = "http://schemas.xmlsoap.org/soap/envelope/";
const SOAP_12_NAMESPACE: &str = "http://www.w3.org/2003/05/soap-envelope";

/// SOAP protocol version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoapVersion {
    /// SOAP 1.1
    V11,
    /// SOAP 1.2
    V12,
}

impl SoapVersion {
    /// Content type used to post an envelope of this version.
    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::V11 => "text/xml; charset=utf-8",
            Self::V12 => "application/soap+xml; charset=utf-8",
        }
    }
}

/// Returns the SOAP version when the text holds an `Envelope` element and
/// a SOAP envelope namespace.
#[must_use]
pub fn detect_soap(text: &str) -> Option<SoapVersion> {
    let version = if text.contains(SOAP_12_NAMESPACE) {
        SoapVersion::V12
    } else if text.contains(SOAP_11_NAMESPACE) {
        SoapVersion::V11
    } else {
        return None;
    };

    opening_tags(text)
        .any(|name| local_name(name) == "Envelope")
        .then_some(version)
}

/// Builds a POST draft carrying the envelope.
#[must_use]
pub fn parse_soap(text: &str, version: SoapVersion) -> RequestDraft {
    let mut headers = vec![Header::new("Content-Type", version.content_type())];
    if version == SoapVersion::V11 {
        if let Some(operation) = body_operation(text) {
            headers.push(Header::new("SOAPAction", operation));
        }
    }

    RequestDraft {
        method: Some(HttpMethod::Post),
        url: None,
        headers,
        body: Some(text.to_string()),
        body_type: Some(BodyType::Xml),
    }
}

/// Local name of the first element inside `Body`.
fn body_operation(text: &str) -> Option<&str> {
    let mut tags = opening_tags(text);
    tags.by_ref().find(|name| local_name(name) == "Body")?;
    tags.next().map(local_name)
}

/// Names of opening and self-closing tags in document order. Closing
/// tags, comments, processing instructions and declarations are skipped.
fn opening_tags(text: &str) -> impl Iterator<Item = &str> {
    text.split('<').skip(1).filter_map(|chunk| {
        let first = chunk.chars().next()?;
        if matches!(first, '/' | '!' | '?') {
            return None;
        }
        let end = chunk
            .find(|c: char| c.is_whitespace() || c == '>' || c == '/')
            .unwrap_or(chunk.len());
        let name = &chunk[..end];
        (!name.is_empty()).then_some(name)
    })
}

fn local_name(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SOAP_11: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Header/>
  <soap:Body>
    <!-- lookup -->
    <m:GetPrice xmlns:m="https://www.w3schools.com/prices">
      <m:Item>Apples</m:Item>
    </m:GetPrice>
  </soap:Body>
</soap:Envelope>"#;

    const SOAP_12: &str = r#"<env:Envelope xmlns:env="http://www.w3.org/2003/05/soap-envelope">
  <env:Body><Ping/></env:Body>
</env:Envelope>"#;

    #[test]
    fn test_detects_versions() {
        assert_eq!(detect_soap(SOAP_11), Some(SoapVersion::V11));
        assert_eq!(detect_soap(SOAP_12), Some(SoapVersion::V12));
    }

    #[test]
    fn test_requires_envelope_and_namespace() {
        assert_eq!(detect_soap("<Envelope><Body/></Envelope>"), None);
        assert_eq!(
            detect_soap(r#"<root xmlns="http://schemas.xmlsoap.org/soap/envelope/"/>"#),
            None
        );
    }

    #[test]
    fn test_soap_11_draft() {
        let draft = parse_soap(SOAP_11, SoapVersion::V11);
        assert_eq!(draft.method, Some(HttpMethod::Post));
        assert_eq!(draft.body_type, Some(BodyType::Xml));
        assert_eq!(draft.body.as_deref(), Some(SOAP_11));
        assert_eq!(
            draft.headers,
            vec![
                Header::new("Content-Type", "text/xml; charset=utf-8"),
                Header::new("SOAPAction", "GetPrice")
            ]
        );
    }

    #[test]
    fn test_soap_12_draft_has_no_action_header() {
        let draft = parse_soap(SOAP_12, SoapVersion::V12);
        assert_eq!(
            draft.headers,
            vec![Header::new(
                "Content-Type",
                "application/soap+xml; charset=utf-8"
            )]
        );
    }
}
