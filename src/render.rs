//! List Rendering
//!
//! Builds the `<ul>` contents from the stored items. Rows carry
//! `data-id` / `data-action` attributes so one delegated click handler on
//! the list can route toggles and deletes.

use crate::models::Item;

pub const EMPTY_PLACEHOLDER: &str = r#"<li class="empty">No items yet</li>"#;

/// What a click inside the list asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListAction {
    Toggle(u64),
    Delete(u64),
}

impl ListAction {
    /// Read back the `data-action` / `data-id` pair of a clicked row
    pub fn parse(action: &str, id: &str) -> Option<Self> {
        let id = id.parse().ok()?;
        match action {
            "toggle" => Some(ListAction::Toggle(id)),
            "delete" => Some(ListAction::Delete(id)),
            _ => None,
        }
    }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn render_todo_list(items: &[Item]) -> String {
    if items.is_empty() {
        return EMPTY_PLACEHOLDER.to_string();
    }
    items
        .iter()
        .map(|item| {
            format!(
                r#"<li class="{}" data-id="{}"><span class="todo-text" data-action="toggle">{}</span><button class="delete-btn" data-action="delete" title="Delete">🗑️</button></li>"#,
                if item.completed { "todo-item completed" } else { "todo-item" },
                item.id,
                escape_html(&item.text)
            )
        })
        .collect()
}

/// "3 items, 1 done"
pub fn summary(items: &[Item]) -> String {
    let done = items.iter().filter(|i| i.completed).count();
    let noun = if items.len() == 1 { "item" } else { "items" };
    format!("{} {}, {} done", items.len(), noun, done)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64, text: &str, completed: bool) -> Item {
        Item {
            completed,
            ..Item::new(id, text, String::new())
        }
    }

    #[test]
    fn test_empty_list_renders_placeholder() {
        let html = render_todo_list(&[]);
        assert_eq!(html, EMPTY_PLACEHOLDER);
        assert!(!html.is_empty());
    }

    #[test]
    fn test_text_is_escaped() {
        let html = render_todo_list(&[item(1, "<img src=x onerror=\"alert(1)\"> & 'x'", false)]);
        assert!(!html.contains("<img"));
        assert!(html.contains("&lt;img src=x onerror=&quot;alert(1)&quot;&gt; &amp; &#39;x&#39;"));
    }

    #[test]
    fn test_rows_keep_order_and_state() {
        let html = render_todo_list(&[item(1, "first", true), item(2, "second", false)]);
        let first = html.find("first").unwrap();
        let second = html.find("second").unwrap();
        assert!(first < second);
        assert!(html.contains(r#"<li class="todo-item completed" data-id="1">"#));
        assert!(html.contains(r#"<li class="todo-item" data-id="2">"#));
    }

    #[test]
    fn test_parse_action() {
        assert_eq!(ListAction::parse("toggle", "42"), Some(ListAction::Toggle(42)));
        assert_eq!(ListAction::parse("delete", "42"), Some(ListAction::Delete(42)));
        assert_eq!(ListAction::parse("delete", "x"), None);
        assert_eq!(ListAction::parse("rename", "42"), None);
    }

    #[test]
    fn test_summary() {
        assert_eq!(summary(&[]), "0 items, 0 done");
        assert_eq!(summary(&[item(1, "a", true)]), "1 item, 1 done");
        assert_eq!(summary(&[item(1, "a", true), item(2, "b", false)]), "2 items, 1 done");
    }
}
