//! Provider payload shapes and the builders that produce them from inbound
//! requests.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{ContactRequest, Recipients, SendEmailRequest};

pub const DEFAULT_SUBJECT: &str = "No Subject";
pub const CONTACT_SUBJECT: &str = "New Contact Form Submission";
pub const CONTACT_SENDER_NAME: &str = "Contact Form";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sender {
    pub name: String,
    pub email: String,
}

/// A single recipient. The address is whatever JSON the caller sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub email: Value,
}

/// Message handed to the delivery provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub from: Sender,
    pub to: Vec<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cc: Option<Vec<Address>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bcc: Option<Vec<Address>>,
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
}

impl Envelope {
    /// Build the envelope for a generic relay request.
    ///
    /// `to` is passed through untouched, even when empty; the provider
    /// reports anything it cannot deliver.
    pub fn relay(from: Sender, request: SendEmailRequest) -> Self {
        let subject = request
            .subject
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_SUBJECT.to_string());

        Self {
            from,
            to: request.to.map(addresses).unwrap_or_default(),
            cc: optional_addresses(request.cc),
            bcc: optional_addresses(request.bcc),
            subject,
            text: request.message,
            html: None,
        }
    }

    /// Build the fixed-recipient envelope for a contact form submission.
    pub fn contact(sender_email: &str, receiver_email: &str, form: &ContactForm) -> Self {
        Self {
            from: Sender {
                name: CONTACT_SENDER_NAME.to_string(),
                email: sender_email.to_string(),
            },
            to: vec![Address {
                email: Value::String(receiver_email.to_string()),
            }],
            cc: None,
            bcc: None,
            subject: CONTACT_SUBJECT.to_string(),
            text: Some(format!(
                "{} ({}, {}): {}",
                form.name, form.email, form.phone, form.message
            )),
            html: Some(form.to_html()),
        }
    }

    pub fn recipient_count(&self) -> usize {
        self.to.len()
            + self.cc.as_ref().map_or(0, Vec::len)
            + self.bcc.as_ref().map_or(0, Vec::len)
    }
}

fn addresses(recipients: Recipients) -> Vec<Address> {
    recipients
        .into_vec()
        .into_iter()
        .map(|email| Address { email })
        .collect()
}

/// Blank or empty cc/bcc lists are left off the payload.
fn optional_addresses(recipients: Option<Recipients>) -> Option<Vec<Address>> {
    let list = addresses(recipients.filter(|r| !r.is_blank())?);
    (!list.is_empty()).then_some(list)
}

/// A contact form submission with every field present.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl ContactForm {
    /// Returns `None` when any field is missing or empty.
    pub fn from_request(request: ContactRequest) -> Option<Self> {
        let present = |v: Option<String>| v.filter(|s| !s.is_empty());

        Some(Self {
            name: present(request.name)?,
            email: present(request.email)?,
            phone: present(request.phone)?,
            message: present(request.message)?,
        })
    }

    pub fn to_html(&self) -> String {
        format!(
            "\n<h2>New Contact Form Submission</h2>\n\
             <p><strong>Name:</strong> {}</p>\n\
             <p><strong>Email:</strong> {}</p>\n\
             <p><strong>Phone:</strong> {}</p>\n\
             <p><strong>Message:</strong><br>{}</p>\n",
            escape_html(&self.name),
            escape_html(&self.email),
            escape_html(&self.phone),
            escape_html(&self.message).replace('\n', "<br>"),
        )
    }
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
