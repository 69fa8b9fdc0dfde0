use crate::types::score::ScoreMode;

/// One line of input to the interactive film builder.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Add(Vec<String>),
    Remove(Vec<String>),
    Clear,
    Show,
    Mode(ScoreMode),
    Filter(Option<String>),
    Unlocked(bool),
    Top(usize),
    Related(String),
    Help,
    Quit,
}

const ALIASES: [(&str, &str); 7] = [
    ("a", "add"),
    ("+", "add"),
    ("rm", "remove"),
    ("-", "remove"),
    ("ls", "show"),
    ("q", "quit"),
    ("exit", "quit"),
];

pub const HELP: &str = "\
commands:
  add TAG...        select tags (alias: a, +)
  remove TAG...     deselect tags (alias: rm, -)
  clear             empty the selection
  show              print the panel again (alias: ls)
  mode delta|next   rank by delta or by next score
  filter [TEXT]     only offer tags containing TEXT; no TEXT clears it
  unlocked on|off   only offer unlocked tags
  top N             number of next tags to show
  related TAG       compatibility table for a tag
  help              this text
  quit              leave the session (alias: q, exit)
";

fn expand_alias(head: &str) -> &str {
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == head)
        .map(|(_, target)| *target)
        .unwrap_or(head)
}

/// Parses a session line. Blank lines and `#` comments yield `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<SessionCommand>, String> {
    let mut tokens = line.split_whitespace();
    let head = match tokens.next() {
        Some(token) if !token.starts_with('#') => token.to_lowercase(),
        _ => return Ok(None),
    };
    let args: Vec<String> = tokens.map(ToString::to_string).collect();

    let command = match expand_alias(&head) {
        "add" | "remove" if args.is_empty() => {
            return Err(format!("{head} needs at least one tag"));
        }
        "add" => SessionCommand::Add(args),
        "remove" => SessionCommand::Remove(args),
        "clear" => SessionCommand::Clear,
        "show" => SessionCommand::Show,
        "mode" => match args.first().map(|arg| arg.to_lowercase()).as_deref() {
            Some("delta") => SessionCommand::Mode(ScoreMode::Delta),
            Some("next") | Some("score") => SessionCommand::Mode(ScoreMode::Next),
            _ => return Err("mode expects delta or next".to_string()),
        },
        "filter" => SessionCommand::Filter(if args.is_empty() {
            None
        } else {
            Some(args.join(" "))
        }),
        "unlocked" => match args.first().map(|arg| arg.to_lowercase()).as_deref() {
            Some("on") | Some("true") => SessionCommand::Unlocked(true),
            Some("off") | Some("false") => SessionCommand::Unlocked(false),
            _ => return Err("unlocked expects on or off".to_string()),
        },
        "top" => match args.first().and_then(|arg| arg.parse::<usize>().ok()) {
            Some(limit) if limit > 0 => SessionCommand::Top(limit),
            _ => return Err("top expects a positive number".to_string()),
        },
        "related" => match args.as_slice() {
            [tag] => SessionCommand::Related(tag.clone()),
            _ => return Err("related expects exactly one tag".to_string()),
        },
        "help" | "?" => SessionCommand::Help,
        "quit" => SessionCommand::Quit,
        other => return Err(format!("unknown command: {other} (try help)")),
    };
    Ok(Some(command))
}
