//! Inbound SMS command parsing.

/// A command recognized in an inbound SMS body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Subscribe,
    Unsubscribe,
    RequestNews,
    Unknown,
}

impl Command {
    /// Classify a message body by case-insensitive prefix.
    ///
    /// Prefixes are checked in the order START, STOP, NEWS, so "STOPPED"
    /// unsubscribes and "news please" requests headlines.
    pub fn parse(text: &str) -> Self {
        let command = text.trim().to_uppercase();
        if command.starts_with("START") {
            Command::Subscribe
        } else if command.starts_with("STOP") {
            Command::Unsubscribe
        } else if command.starts_with("NEWS") {
            Command::RequestNews
        } else {
            Command::Unknown
        }
    }
}
