//! TwiML replies for the inbound SMS webhook.

use std::fmt;

use quick_xml::escape::partial_escape;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// A `<Response>` document holding zero or more `<Message>` replies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessagingResponse {
    messages: Vec<String>,
}

impl MessagingResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a reply message.
    pub fn message(mut self, body: impl Into<String>) -> Self {
        self.messages.push(body.into());
        self
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Render the XML document.
    pub fn to_xml(&self) -> String {
        let mut xml = String::from(XML_DECLARATION);
        if self.messages.is_empty() {
            xml.push_str("<Response />");
            return xml;
        }

        xml.push_str("<Response>");
        for message in &self.messages {
            xml.push_str("<Message>");
            xml.push_str(&partial_escape(message.as_str()));
            xml.push_str("</Message>");
        }
        xml.push_str("</Response>");
        xml
    }
}

impl fmt::Display for MessagingResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_xml())
    }
}
