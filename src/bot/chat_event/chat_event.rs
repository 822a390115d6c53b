/// One inbound chat line, already stripped of transport details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEvent {
    pub channel: String,
    pub sender: String, // lowercase twitch login
    pub message: String,
}

impl ChatEvent {
    pub fn new(channel: impl Into<String>, sender: impl Into<String>, message: impl Into<String>) -> Self {
        ChatEvent {
            channel: channel.into(),
            sender: sender.into(),
            message: message.into(),
        }
    }
}
