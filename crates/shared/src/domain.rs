use std::{collections::HashSet, fmt};

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(TodoId);

impl TodoId {
    /// Id for an item added while the server is unreachable: one past the
    /// largest id present, or `1` for an empty list. When the largest id is
    /// `i64::MAX`, the smallest unused positive id is taken instead.
    pub fn next_local<'a>(items: impl IntoIterator<Item = &'a TodoItem>) -> Self {
        let ids: HashSet<i64> = items.into_iter().map(|item| item.id.0).collect();
        let max = ids.iter().copied().max().unwrap_or(0);
        match max.checked_add(1) {
            Some(next) => Self(next),
            None => Self((1..).find(|id| !ids.contains(id)).unwrap_or(1)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: TodoId,
    pub content: String,
}

impl TodoItem {
    pub fn new(id: TodoId, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_local_id_starts_at_one() {
        assert_eq!(TodoId::next_local(&Vec::<TodoItem>::new()), TodoId(1));
    }

    #[test]
    fn next_local_id_skips_past_largest_even_with_gaps() {
        let items = vec![
            TodoItem::new(TodoId(7), "a"),
            TodoItem::new(TodoId(2), "b"),
        ];
        assert_eq!(TodoId::next_local(&items), TodoId(8));
    }

    #[test]
    fn next_local_id_falls_back_to_smallest_unused_at_max() {
        let items = vec![
            TodoItem::new(TodoId(i64::MAX), "server"),
            TodoItem::new(TodoId(1), "a"),
            TodoItem::new(TodoId(3), "c"),
        ];
        assert_eq!(TodoId::next_local(&items), TodoId(2));
    }

    #[test]
    fn todo_item_uses_plain_integer_id_on_the_wire() {
        let item: TodoItem =
            serde_json::from_str(r#"{"id":5,"content":"x"}"#).expect("decode todo");
        assert_eq!(item, TodoItem::new(TodoId(5), "x"));
        assert_eq!(
            serde_json::to_string(&item).expect("encode todo"),
            r#"{"id":5,"content":"x"}"#
        );
    }
}
