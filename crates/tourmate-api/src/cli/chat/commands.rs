//! Slash commands available inside the chat loop.

use console::style;

use tourmate_types::language::DISPLAY_LANGUAGES;

/// Parsed slash command.
#[derive(Debug, PartialEq, Eq)]
pub enum ChatCommand {
    Help,
    History,
    Clear,
    Exit,
    /// Switch the reply language for subsequent turns.
    Language(String),
}

/// Parse a chat input line as a slash command, if it is one.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let input = input.trim();
    if !input.starts_with('/') {
        return None;
    }
    let (command, rest) = match input.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (input, ""),
    };
    match command {
        "/help" => Some(ChatCommand::Help),
        "/history" => Some(ChatCommand::History),
        "/clear" => Some(ChatCommand::Clear),
        "/exit" | "/quit" => Some(ChatCommand::Exit),
        "/language" => Some(ChatCommand::Language(rest.to_string())),
        _ => None,
    }
}

/// Print the in-chat help text.
pub fn print_help() {
    println!();
    println!("  {}", style("Commands").bold());
    println!("  /help              Show this help");
    println!("  /history           Show the transcript so far");
    println!("  /language <name>   Switch reply language");
    println!("  /clear             Clear the screen");
    println!("  /exit              End the session");
    println!();
    println!("  {}", style("Languages").bold());
    for language in DISPLAY_LANGUAGES {
        println!("  {language}");
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_text_is_not_a_command() {
        assert_eq!(parse("tell me about Kandy"), None);
        assert_eq!(parse(""), None);
    }

    #[test]
    fn test_parse_known_commands() {
        assert_eq!(parse("/help"), Some(ChatCommand::Help));
        assert_eq!(parse("/exit"), Some(ChatCommand::Exit));
        assert_eq!(parse("/quit"), Some(ChatCommand::Exit));
        assert_eq!(parse(" /history "), Some(ChatCommand::History));
    }

    #[test]
    fn test_parse_language_keeps_argument() {
        assert_eq!(
            parse("/language 日本語 (Japanese)"),
            Some(ChatCommand::Language("日本語 (Japanese)".to_string()))
        );
        assert_eq!(parse("/language"), Some(ChatCommand::Language(String::new())));
    }

    #[test]
    fn test_parse_unknown_slash_command() {
        assert_eq!(parse("/frobnicate"), None);
    }
}
