use thiserror::Error;

use crate::broker::UserId;
use crate::broker::message::Message;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Join(UserId),
    Leave(UserId),
    Direct { recipient: UserId, content: String },
    Broadcast(String),
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConsoleError {
    #[error("`{0}` needs a user id")]
    MissingUser(&'static str),

    #[error("direct message to `{0}` has no content")]
    EmptyDirect(UserId),

    #[error("unknown command `{0}`")]
    UnknownCommand(String),
}

impl ConsoleCommand {
    /// Parses one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, ConsoleError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        if let Some(rest) = line.strip_prefix('/') {
            let (name, arg) = split_word(rest);
            let command = match name {
                "join" => ConsoleCommand::Join(required_user(arg, "/join")?),
                "leave" => ConsoleCommand::Leave(required_user(arg, "/leave")?),
                "quit" => ConsoleCommand::Quit,
                other => return Err(ConsoleError::UnknownCommand(other.to_string())),
            };
            return Ok(Some(command));
        }

        if let Some(rest) = line.strip_prefix('@') {
            let (recipient, content) = split_word(rest);
            if recipient.is_empty() {
                return Err(ConsoleError::MissingUser("@"));
            }
            if content.is_empty() {
                return Err(ConsoleError::EmptyDirect(recipient.to_string()));
            }
            return Ok(Some(ConsoleCommand::Direct {
                recipient: recipient.to_string(),
                content: content.to_string(),
            }));
        }

        Ok(Some(ConsoleCommand::Broadcast(line.to_string())))
    }

    /// Builds the message this command submits on behalf of `sender`, if any.
    pub fn into_message(self, sender: &str) -> Option<Message> {
        match self {
            ConsoleCommand::Direct { recipient, content } => {
                Some(Message::direct(sender, recipient, content))
            }
            ConsoleCommand::Broadcast(content) => Some(Message::broadcast(sender, content)),
            _ => None,
        }
    }
}

fn split_word(s: &str) -> (&str, &str) {
    match s.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (s, ""),
    }
}

fn required_user(arg: &str, command: &'static str) -> Result<UserId, ConsoleError> {
    match arg.split_whitespace().next() {
        Some(id) => Ok(id.to_string()),
        None => Err(ConsoleError::MissingUser(command)),
    }
}
