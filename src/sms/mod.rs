//! SMS formatting, delivery and webhook replies.

pub mod format;
pub mod twilio;
pub mod twiml;

pub use format::{
    format_body, render_bulleted, render_numbered, truncate_to_budget, MessageStyle, SmsBudget,
    SmsFormatter, HEADER,
};
pub use twilio::{SmsSender, TwilioClient};
pub use twiml::MessagingResponse;
