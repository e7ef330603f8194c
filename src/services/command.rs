//! Parsing of raw chat text into bot commands.

/// Commands understood by the bot, independent of their arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// Announce a new match.
    CreateMatch,
    /// List the matches of the current chat.
    ListMatches,
    /// Take a seat (or a waiting-list spot) in a match.
    Join,
    /// Give up a seat or waiting-list spot.
    Leave,
    /// Cancel a match (creator only).
    Cancel,
    /// Show the command reference.
    Help,
}

impl CommandKind {
    /// Resolve a lowercase token (without marker) into a command.
    fn from_token(token: &str) -> Option<Self> {
        let kind = match token {
            "padel" | "create" => Self::CreateMatch,
            "liste" | "list" => Self::ListMatches,
            "rj" | "join" => Self::Join,
            "quitter" | "leave" => Self::Leave,
            "annuler" | "cancel" => Self::Cancel,
            "aide" | "help" => Self::Help,
            _ => return None,
        };
        Some(kind)
    }

    /// Token advertised in replies and in the help text.
    pub fn token(self) -> &'static str {
        match self {
            Self::CreateMatch => "padel",
            Self::ListMatches => "liste",
            Self::Join => "rj",
            Self::Leave => "quitter",
            Self::Cancel => "annuler",
            Self::Help => "aide",
        }
    }
}

/// Fully parsed command with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    /// `/padel <date> <time>`
    CreateMatch {
        /// Date as typed.
        date: String,
        /// Time as typed.
        time: String,
    },
    /// `/liste`
    ListMatches,
    /// `/rj <id>`
    Join {
        /// Target match.
        match_id: String,
    },
    /// `/quitter <id>`
    Leave {
        /// Target match.
        match_id: String,
    },
    /// `/annuler <id>`
    Cancel {
        /// Target match.
        match_id: String,
    },
    /// `/aide`
    Help,
}

/// What the bot should do with a piece of chat text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedMessage {
    /// Not addressed to the bot: no reply, no mutation.
    Ignored,
    /// A known command missing required arguments.
    Malformed(CommandKind),
    /// A command ready to dispatch.
    Command(ChatCommand),
}

/// Parse `text` using `prefix` as the command marker.
///
/// The command token must follow the marker directly and is case-insensitive; date and time keep the sender's
/// casing while match identifiers are lowercased. Extra arguments are ignored.
pub fn parse_message(text: &str, prefix: char) -> ParsedMessage {
    let Some(body) = text
        .trim()
        .strip_prefix(prefix)
        .filter(|body| !body.starts_with(char::is_whitespace))
    else {
        return ParsedMessage::Ignored;
    };

    let mut words = body.split_whitespace();
    let Some(kind) = words
        .next()
        .and_then(|token| CommandKind::from_token(&token.to_lowercase()))
    else {
        return ParsedMessage::Ignored;
    };

    let command = match kind {
        CommandKind::CreateMatch => match (words.next(), words.next()) {
            (Some(date), Some(time)) => ChatCommand::CreateMatch {
                date: date.to_owned(),
                time: time.to_owned(),
            },
            _ => return ParsedMessage::Malformed(kind),
        },
        CommandKind::ListMatches => ChatCommand::ListMatches,
        CommandKind::Help => ChatCommand::Help,
        CommandKind::Join | CommandKind::Leave | CommandKind::Cancel => {
            let Some(match_id) = words.next().map(str::to_lowercase) else {
                return ParsedMessage::Malformed(kind);
            };
            match kind {
                CommandKind::Join => ChatCommand::Join { match_id },
                CommandKind::Leave => ChatCommand::Leave { match_id },
                _ => ChatCommand::Cancel { match_id },
            }
        }
    };

    ParsedMessage::Command(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> ParsedMessage {
        parse_message(text, '/')
    }

    #[test]
    fn plain_chatter_is_ignored() {
        assert_eq!(parse("on joue ce soir ?"), ParsedMessage::Ignored);
        assert_eq!(parse(""), ParsedMessage::Ignored);
        assert_eq!(parse("rj 1234"), ParsedMessage::Ignored);
    }

    #[test]
    fn token_must_touch_the_marker() {
        assert_eq!(parse("/ rj 1234"), ParsedMessage::Ignored);
        assert_eq!(parse("/  padel 12/08 18h"), ParsedMessage::Ignored);
        assert_eq!(
            parse(" /rj 1234"),
            ParsedMessage::Command(ChatCommand::Join {
                match_id: "1234".into()
            })
        );
    }

    #[test]
    fn unknown_commands_are_ignored() {
        assert_eq!(parse("/tennis 12/08 18h"), ParsedMessage::Ignored);
        assert_eq!(parse("/"), ParsedMessage::Ignored);
    }

    #[test]
    fn create_keeps_argument_casing() {
        assert_eq!(
            parse("  /PADEL Samedi 18H30 extra  "),
            ParsedMessage::Command(ChatCommand::CreateMatch {
                date: "Samedi".into(),
                time: "18H30".into(),
            })
        );
        assert_eq!(
            parse("/create 12/08 18h"),
            ParsedMessage::Command(ChatCommand::CreateMatch {
                date: "12/08".into(),
                time: "18h".into(),
            })
        );
    }

    #[test]
    fn missing_arguments_are_malformed() {
        assert_eq!(
            parse("/padel 12/08"),
            ParsedMessage::Malformed(CommandKind::CreateMatch)
        );
        assert_eq!(parse("/rj"), ParsedMessage::Malformed(CommandKind::Join));
        assert_eq!(
            parse("/quitter   "),
            ParsedMessage::Malformed(CommandKind::Leave)
        );
        assert_eq!(
            parse("/annuler"),
            ParsedMessage::Malformed(CommandKind::Cancel)
        );
    }

    #[test]
    fn id_commands_accept_aliases() {
        assert_eq!(
            parse("/rj 0427"),
            ParsedMessage::Command(ChatCommand::Join {
                match_id: "0427".into()
            })
        );
        assert_eq!(
            parse("/Leave 0427"),
            ParsedMessage::Command(ChatCommand::Leave {
                match_id: "0427".into()
            })
        );
        assert_eq!(
            parse("/cancel 0427"),
            ParsedMessage::Command(ChatCommand::Cancel {
                match_id: "0427".into()
            })
        );
    }

    #[test]
    fn argument_free_commands() {
        assert_eq!(
            parse("/liste"),
            ParsedMessage::Command(ChatCommand::ListMatches)
        );
        assert_eq!(parse("/help"), ParsedMessage::Command(ChatCommand::Help));
        assert_eq!(parse("/AIDE"), ParsedMessage::Command(ChatCommand::Help));
    }

    #[test]
    fn custom_prefix_is_honoured() {
        assert_eq!(
            parse_message("!liste", '!'),
            ParsedMessage::Command(ChatCommand::ListMatches)
        );
        assert_eq!(parse_message("/liste", '!'), ParsedMessage::Ignored);
    }
}
