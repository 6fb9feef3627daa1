//! REPL command parsing.

use crate::filter::{CategoryFilter, StatusFilter};
use crate::types::{Category, Priority, TodoAction, TodoId};
use chrono::NaiveDate;

/// One line of user input
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// `add <text> [due=YYYY-MM-DD] [priority=..] [category=..]`
    Add {
        /// Task text, possibly blank
        text: String,
        /// `due=`
        due_date: Option<NaiveDate>,
        /// `priority=`, medium when absent
        priority: Priority,
        /// `category=`, previous choice kept when absent
        category: Option<Category>,
    },
    /// `toggle <id>`
    Toggle(TodoId),
    /// `delete <id>`
    Delete(TodoId),
    /// `filter status=..`
    FilterStatus(StatusFilter),
    /// `filter category=..`
    FilterCategory(CategoryFilter),
    /// `list`
    List,
    /// `reload`
    Reload,
    /// `signout`
    SignOut,
    /// `help`
    Help,
    /// `quit`
    Quit,
}

/// Usage text printed by `help`
pub const HELP: &str = "\
commands:
  add <text> [due=YYYY-MM-DD] [priority=low|medium|high] [category=personal|work|shopping|...]
  toggle <id>
  delete <id>
  filter status=<all|active|completed>
  filter category=<all|personal|work|shopping|...>
  list
  reload
  signout
  quit";

impl Command {
    /// Parse one input line
    ///
    /// # Errors
    ///
    /// Returns a message for the user when the line is not a known command
    /// or an argument does not parse.
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        match verb.to_ascii_lowercase().as_str() {
            "add" => parse_add(rest),
            "toggle" => parse_id(rest).map(Self::Toggle),
            "delete" | "rm" => parse_id(rest).map(Self::Delete),
            "filter" => parse_filter(rest),
            "list" | "ls" | "" => Ok(Self::List),
            "reload" => Ok(Self::Reload),
            "signout" | "logout" => Ok(Self::SignOut),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(format!("unknown command '{other}', try 'help'")),
        }
    }

    /// Store actions carrying out this command
    ///
    /// Commands handled by the terminal itself (`list`, `help`, `quit`) map
    /// to nothing.
    #[must_use]
    pub fn into_actions(self) -> Vec<TodoAction> {
        match self {
            Self::Add {
                text,
                due_date,
                priority,
                category,
            } => {
                let mut actions = vec![
                    TodoAction::SetDraftText(text),
                    TodoAction::SetDraftDueDate(due_date),
                    TodoAction::SetDraftPriority(priority),
                ];
                if let Some(category) = category {
                    actions.push(TodoAction::SetDraftCategory(category));
                }
                actions.push(TodoAction::SubmitDraft);
                actions
            },
            Self::Toggle(id) => vec![TodoAction::ToggleTodo { id }],
            Self::Delete(id) => vec![TodoAction::DeleteTodo { id }],
            Self::FilterStatus(status) => vec![TodoAction::SetStatusFilter(status)],
            Self::FilterCategory(category) => vec![TodoAction::SetCategoryFilter(category)],
            Self::Reload => vec![TodoAction::Reload],
            Self::SignOut => vec![TodoAction::SignOut],
            Self::List | Self::Help | Self::Quit => Vec::new(),
        }
    }
}

fn parse_add(rest: &str) -> Result<Command, String> {
    let mut words = Vec::new();
    let mut due_date = None;
    let mut priority = Priority::default();
    let mut category = None;

    for word in rest.split_whitespace() {
        match word.split_once('=') {
            Some(("due", value)) => {
                due_date = Some(
                    NaiveDate::parse_from_str(value, "%Y-%m-%d")
                        .map_err(|_| format!("due date '{value}' is not YYYY-MM-DD"))?,
                );
            },
            Some(("priority", value)) => priority = value.parse()?,
            Some(("category", value)) => category = Some(Category::from(value.to_ascii_lowercase())),
            _ => words.push(word),
        }
    }

    Ok(Command::Add {
        text: words.join(" "),
        due_date,
        priority,
        category,
    })
}

fn parse_id(rest: &str) -> Result<TodoId, String> {
    rest.parse()
        .map_err(|_| format!("expected a numeric id, got '{rest}'"))
}

fn parse_filter(rest: &str) -> Result<Command, String> {
    match rest.split_once('=') {
        Some(("status", value)) => value.parse().map(Command::FilterStatus),
        Some(("category", value)) => value.parse().map(Command::FilterCategory),
        _ => Err("usage: filter status=<all|active|completed> | filter category=<name|all>".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_collects_options_anywhere_in_line() {
        assert_eq!(
            Command::parse("add Buy due=2025-01-02 oat milk category=Shopping priority=high"),
            Ok(Command::Add {
                text: "Buy oat milk".to_string(),
                due_date: NaiveDate::from_ymd_opt(2025, 1, 2),
                priority: Priority::High,
                category: Some(Category::Shopping),
            })
        );
    }

    #[test]
    fn add_keeps_previous_category_when_absent() {
        let actions = Command::parse("add Call mom").map(Command::into_actions);

        assert_eq!(
            actions,
            Ok(vec![
                TodoAction::SetDraftText("Call mom".to_string()),
                TodoAction::SetDraftDueDate(None),
                TodoAction::SetDraftPriority(Priority::Medium),
                TodoAction::SubmitDraft,
            ])
        );
    }

    #[test]
    fn bad_arguments_are_reported() {
        assert!(Command::parse("add x due=tomorrow").is_err());
        assert!(Command::parse("add x priority=urgent").is_err());
        assert!(Command::parse("toggle seven").is_err());
        assert!(Command::parse("filter mood=happy").is_err());
        assert!(Command::parse("frobnicate").is_err());
    }

    #[test]
    fn simple_commands_parse() {
        assert_eq!(Command::parse("toggle 7"), Ok(Command::Toggle(TodoId::new(7))));
        assert_eq!(Command::parse("delete 3"), Ok(Command::Delete(TodoId::new(3))));
        assert_eq!(
            Command::parse("filter status=active"),
            Ok(Command::FilterStatus(StatusFilter::Active))
        );
        assert_eq!(
            Command::parse("filter category=all"),
            Ok(Command::FilterCategory(CategoryFilter::All))
        );
        assert_eq!(Command::parse("  QUIT "), Ok(Command::Quit));
        assert_eq!(Command::parse(""), Ok(Command::List));
    }
}
