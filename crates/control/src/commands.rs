use vitals_core::{BlockageStatus, Message, Toggle};

/// Operator commands accepted on the control channel.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `status full|partial|none`
    Status(BlockageStatus),
    /// `toggle saline|suction`
    Toggle(Toggle),
    /// `reload`
    Reload,
    /// `quit` / `exit`
    Quit,
    /// Input we don't understand; carries the raw line for the log.
    Unknown(String),
}

impl Command {
    /// Event-bus message for this command, `None` for unknown input.
    pub fn into_message(self) -> Option<Message> {
        match self {
            Command::Status(s)  => Some(Message::StatusChanged(s)),
            Command::Toggle(t)  => Some(Message::ToggleFlipped(t)),
            Command::Reload     => Some(Message::ConfigReloaded),
            Command::Quit       => Some(Message::Shutdown),
            Command::Unknown(_) => None,
        }
    }
}

/// Parse one input line into a typed [`Command`].
///
/// Matching is case-insensitive; a trailing `blockage` after the status word
/// is accepted so `status partial blockage` works too.
pub fn parse_command(line: &str) -> Command {
    let lower = line.trim().to_lowercase();
    let mut words = lower.split_whitespace();

    let verb = words.next().unwrap_or("");
    let arg = words.next().unwrap_or("");
    let rest: Vec<&str> = words.collect();

    let parsed = match (verb, arg, rest.as_slice()) {
        ("status", "full", [] | ["blockage"]) => Some(Command::Status(BlockageStatus::Full)),
        ("status", "partial", [] | ["blockage"]) => Some(Command::Status(BlockageStatus::Partial)),
        ("status", "none" | "no" | "clear", [] | ["blockage"]) => {
            Some(Command::Status(BlockageStatus::Clear))
        }
        ("toggle", "saline", []) => Some(Command::Toggle(Toggle::Saline)),
        ("toggle", "suction", []) => Some(Command::Toggle(Toggle::Suction)),
        ("reload", "", []) => Some(Command::Reload),
        ("quit" | "exit", "", []) => Some(Command::Quit),
        _ => None,
    };

    parsed.unwrap_or_else(|| Command::Unknown(line.trim().to_string()))
}
