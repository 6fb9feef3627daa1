//! Terminal rendering of the todo list.

use crate::filter::{CategoryFilter, Counts, StatusFilter};
use crate::types::{Category, Priority, Todo, TodoState};
use colored::{ColoredString, Colorize};

/// Shown when no row passes the selectors
pub const EMPTY_MESSAGE: &str = "No todos found. Add some tasks to get started!";

/// Priority label in its color
#[must_use]
pub fn priority_label(priority: Priority) -> ColoredString {
    let label = priority.as_str();
    match priority {
        Priority::High => label.red(),
        Priority::Medium => label.yellow(),
        Priority::Low => label.green(),
    }
}

/// Category label in its color
#[must_use]
pub fn category_label(category: &Category) -> ColoredString {
    let label = category.as_str();
    match category {
        Category::Work => label.blue(),
        Category::Personal => label.green(),
        Category::Shopping => label.purple(),
        Category::Other(_) => label.bright_black(),
    }
}

/// One list line: checkbox, id, text, due date, tags
#[must_use]
pub fn todo_line(todo: &Todo) -> String {
    let (mark, text) = if todo.completed {
        ("[x]".green(), todo.text.strikethrough().dimmed())
    } else {
        ("[ ]".normal(), todo.text.normal())
    };

    let mut line = format!("{mark} {:>4}  {text}", todo.id);
    if let Some(due) = todo.due_date {
        line.push_str(&format!("  due {}", due.format("%Y-%m-%d")));
    }
    line.push_str(&format!(
        "  {}  {}",
        priority_label(todo.priority),
        category_label(&todo.category)
    ));
    line
}

/// Whole view: selector header, visible rows, footer
#[must_use]
pub fn todo_list(state: &TodoState) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", selector_line(state).bold()));

    let visible = state.visible_todos();
    if visible.is_empty() {
        out.push_str(&format!("  {}\n", EMPTY_MESSAGE.bright_black()));
    } else {
        for todo in visible {
            out.push_str(&todo_line(todo));
            out.push('\n');
        }
    }

    out.push_str(&footer(state.counts()));
    out
}

fn selector_line(state: &TodoState) -> String {
    let status = match state.filter.status {
        StatusFilter::All => "all",
        StatusFilter::Active => "active",
        StatusFilter::Completed => "completed",
    };
    let category = match &state.filter.category {
        CategoryFilter::All => "all categories",
        CategoryFilter::Only(category) => category.as_str(),
    };
    format!("ToDoIt  [{status} | {category}]")
}

fn footer(counts: Counts) -> String {
    format!(
        "{} total, {} active, {} completed\n",
        counts.total, counts.active, counts.completed
    )
}
