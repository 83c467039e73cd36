//! Slash command parsing for the chat application.
//!
//! This module handles parsing of special commands that start with `/`,
//! allowing users to control the session and their account without sending
//! messages to the backend.

/// A parsed chat command.
///
/// These commands control the chat session and are not sent to the API.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,

    /// Clear the conversation history.
    Clear,

    /// Log in as the given username (password prompted separately).
    Login(String),

    /// Register the given username (password prompted separately).
    Register(String),

    /// Clear the stored token.
    Logout,

    /// Show the current session, if any.
    WhoAmI,

    /// Show session statistics.
    Stats,

    /// Save the transcript to a file.
    SaveTranscript(String),

    /// Load a transcript from a file.
    LoadTranscript(String),

    /// Exit the application.
    Quit,

    /// An unrecognized or malformed command, with an error message.
    Invalid(String),
}

/// Parses a slash command from an input line.
///
/// Returns `None` when the line is not a command and should be sent to the
/// assistant as a question.
pub fn parse_command(line: &str) -> Option<ChatCommand> {
    let line = line.trim();
    if !line.starts_with('/') {
        return None;
    }

    let mut parts = line.splitn(2, char::is_whitespace);
    let command = parts.next().unwrap_or("");
    let rest = parts.next().map(str::trim).unwrap_or("");

    Some(match command {
        "/help" => ChatCommand::Help,
        "/clear" => ChatCommand::Clear,
        "/login" => {
            if rest.is_empty() {
                ChatCommand::Invalid("usage: /login <username>".to_string())
            } else {
                ChatCommand::Login(rest.to_string())
            }
        }
        "/register" => {
            if rest.is_empty() {
                ChatCommand::Invalid("usage: /register <username>".to_string())
            } else {
                ChatCommand::Register(rest.to_string())
            }
        }
        "/logout" => ChatCommand::Logout,
        "/whoami" => ChatCommand::WhoAmI,
        "/stats" => ChatCommand::Stats,
        "/save" => {
            if rest.is_empty() {
                ChatCommand::Invalid("usage: /save <path>".to_string())
            } else {
                ChatCommand::SaveTranscript(rest.to_string())
            }
        }
        "/load" => {
            if rest.is_empty() {
                ChatCommand::Invalid("usage: /load <path>".to_string())
            } else {
                ChatCommand::LoadTranscript(rest.to_string())
            }
        }
        "/quit" | "/exit" => ChatCommand::Quit,
        _ => ChatCommand::Invalid(format!(
            "Unknown command: {}. Type /help for commands.",
            command
        )),
    })
}

/// Returns the help text listing available commands.
pub fn help_text() -> String {
    [
        "/help              Show this help",
        "/login <username>  Log in (you will be prompted for a password)",
        "/register <user>   Create an account and log in",
        "/logout            Forget the stored token",
        "/whoami            Show the current session",
        "/clear             Clear the conversation",
        "/stats             Show session statistics",
        "/save <path>       Save the transcript to a file",
        "/load <path>       Load a transcript from a file",
        "/quit              Exit",
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_not_a_command() {
        assert_eq!(parse_command("what is a tort?"), None);
        assert_eq!(parse_command(""), None);
    }

    #[test]
    fn parses_bare_commands() {
        assert_eq!(parse_command("/help"), Some(ChatCommand::Help));
        assert_eq!(parse_command("/clear"), Some(ChatCommand::Clear));
        assert_eq!(parse_command("/logout"), Some(ChatCommand::Logout));
        assert_eq!(parse_command("/whoami"), Some(ChatCommand::WhoAmI));
        assert_eq!(parse_command("/stats"), Some(ChatCommand::Stats));
        assert_eq!(parse_command("/quit"), Some(ChatCommand::Quit));
        assert_eq!(parse_command("/exit"), Some(ChatCommand::Quit));
    }

    #[test]
    fn parses_commands_with_arguments() {
        assert_eq!(
            parse_command("/login ada"),
            Some(ChatCommand::Login("ada".to_string()))
        );
        assert_eq!(
            parse_command("/register ada"),
            Some(ChatCommand::Register("ada".to_string()))
        );
        assert_eq!(
            parse_command("/save transcript.json"),
            Some(ChatCommand::SaveTranscript("transcript.json".to_string()))
        );
        assert_eq!(
            parse_command("/load transcript.json"),
            Some(ChatCommand::LoadTranscript("transcript.json".to_string()))
        );
    }

    #[test]
    fn missing_arguments_are_invalid() {
        assert!(matches!(
            parse_command("/login"),
            Some(ChatCommand::Invalid(_))
        ));
        assert!(matches!(
            parse_command("/save"),
            Some(ChatCommand::Invalid(_))
        ));
    }

    #[test]
    fn unknown_command_is_invalid() {
        assert!(matches!(
            parse_command("/frobnicate"),
            Some(ChatCommand::Invalid(_))
        ));
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        assert_eq!(
            parse_command("  /login   ada  "),
            Some(ChatCommand::Login("ada".to_string()))
        );
    }

    #[test]
    fn help_text_lists_every_command() {
        let help = help_text();
        for command in [
            "/help", "/login", "/register", "/logout", "/whoami", "/clear", "/stats", "/save",
            "/load", "/quit",
        ] {
            assert!(help.contains(command), "missing {command}");
        }
    }
}
