//! Runtime-mutable symbol tables.
//!
//! A `Symbols<T>` is both a table and a parser: parsing matches the longest
//! key that prefixes the remaining input and produces a clone of its value.
//! Semantic actions may add or remove entries while parsing; those changes
//! are logged on the `Context` and undone when the parse ends.

use crate::context::{Context, Revert};
use crate::cursors::StrCursor;
use crate::error::{PResult, ParseError};
use crate::parser::Parser;
use rustc_hash::FxHashMap;
use std::borrow::Cow;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::trace;

struct Node<T> {
    children: FxHashMap<char, usize>,
    value: Option<T>,
}

impl<T> Node<T> {
    fn new() -> Self {
        Node {
            children: FxHashMap::default(),
            value: None,
        }
    }
}

/// Character trie; node 0 is the root
///
/// Nodes left without a value or children are unlinked and their slots
/// reused, so the trie only holds the paths of live keys.
struct SymbolTable<T> {
    nodes: Vec<Node<T>>,
    free: Vec<usize>,
    len: usize,
}

impl<T> SymbolTable<T> {
    fn new() -> Self {
        SymbolTable {
            nodes: vec![Node::new()],
            free: Vec::new(),
            len: 0,
        }
    }

    fn find(&self, key: &str) -> Option<usize> {
        key.chars()
            .try_fold(0, |node, c| self.nodes[node].children.get(&c).copied())
    }

    /// Nodes visited by `key`, starting with the root
    fn path(&self, key: &str) -> Option<Vec<usize>> {
        let mut path = vec![0];
        for c in key.chars() {
            let node = path[path.len() - 1];
            path.push(*self.nodes[node].children.get(&c)?);
        }
        Some(path)
    }

    fn alloc(&mut self) -> usize {
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = Node::new();
                slot
            }
            None => {
                self.nodes.push(Node::new());
                self.nodes.len() - 1
            }
        }
    }

    fn insert(&mut self, key: &str, value: T) -> Option<T> {
        let mut node = 0;
        for c in key.chars() {
            node = match self.nodes[node].children.get(&c) {
                Some(&child) => child,
                None => {
                    let child = self.alloc();
                    self.nodes[node].children.insert(c, child);
                    child
                }
            };
        }
        let previous = self.nodes[node].value.replace(value);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    fn remove(&mut self, key: &str) -> Option<T> {
        let path = self.path(key)?;
        let node = path[path.len() - 1];
        let previous = self.nodes[node].value.take();
        if previous.is_some() {
            self.len -= 1;
            self.prune(&path, key);
        }
        previous
    }

    /// Unlink the dead tail of `path`, deepest node first; the root stays
    fn prune(&mut self, path: &[usize], key: &str) {
        let parents = path.iter().rev().skip(1);
        let edges = path.iter().rev().zip(parents).zip(key.chars().rev());
        for ((&node, &parent), c) in edges {
            let dead = self.nodes[node].value.is_none() && self.nodes[node].children.is_empty();
            if !dead {
                break;
            }
            self.nodes[parent].children.remove(&c);
            self.free.push(node);
        }
    }

    fn get(&self, key: &str) -> Option<&T> {
        self.nodes[self.find(key)?].value.as_ref()
    }

    /// Byte length and value of the longest key that prefixes `text`
    fn longest_match(&self, text: &str) -> Option<(usize, &T)> {
        let mut node = 0;
        let mut best = self.nodes[0].value.as_ref().map(|value| (0, value));
        for (offset, c) in text.char_indices() {
            let Some(&child) = self.nodes[node].children.get(&c) else {
                break;
            };
            node = child;
            if let Some(value) = &self.nodes[node].value {
                best = Some((offset + c.len_utf8(), value));
            }
        }
        best
    }

    /// Take every entry out, leaving only the root
    fn drain(&mut self) -> Vec<(String, T)> {
        let mut entries = Vec::with_capacity(self.len);
        let mut stack = vec![(0, String::new())];
        while let Some((node, key)) = stack.pop() {
            if let Some(value) = self.nodes[node].value.take() {
                entries.push((key.clone(), value));
            }
            for (&c, &child) in &self.nodes[node].children {
                let mut child_key = key.clone();
                child_key.push(c);
                stack.push((child, child_key));
            }
        }
        self.nodes.truncate(1);
        self.nodes[0] = Node::new();
        self.free.clear();
        self.len = 0;
        entries
    }

    #[cfg(test)]
    fn live_nodes(&self) -> usize {
        self.nodes.len() - self.free.len()
    }
}

/// Undo record for one in-parse change of a table
struct SymbolUndo<T> {
    table: Rc<RefCell<SymbolTable<T>>>,
    key: String,
    previous: Option<T>,
}

impl<T> Revert for SymbolUndo<T> {
    fn revert(self: Box<Self>) {
        let SymbolUndo {
            table,
            key,
            previous,
        } = *self;
        let mut table = table.borrow_mut();
        match previous {
            Some(value) => {
                table.insert(&key, value);
            }
            None => {
                table.remove(&key);
            }
        }
    }
}

/// Shared handle to a symbol table
///
/// Clones share the same table, so a handle used inside a grammar sees the
/// entries added through any other handle.
pub struct Symbols<T> {
    table: Rc<RefCell<SymbolTable<T>>>,
    name: Cow<'static, str>,
}

impl<T> Clone for Symbols<T> {
    fn clone(&self) -> Self {
        Symbols {
            table: Rc::clone(&self.table),
            name: self.name.clone(),
        }
    }
}

impl<T> Default for Symbols<T> {
    fn default() -> Self {
        Symbols::new()
    }
}

impl<T> Symbols<T> {
    pub fn new() -> Self {
        Symbols {
            table: Rc::new(RefCell::new(SymbolTable::new())),
            name: Cow::Borrowed("symbol"),
        }
    }

    /// Describe what the table matches in diagnostics
    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    /// Builder form of `add`
    pub fn with(self, key: &str, value: T) -> Self {
        self.add(key, value);
        self
    }

    /// Add or replace an entry permanently, returning the replaced value
    pub fn add(&self, key: &str, value: T) -> Option<T> {
        self.table.borrow_mut().insert(key, value)
    }

    /// Remove an entry permanently
    pub fn remove_entry(&self, key: &str) -> Option<T> {
        self.table.borrow_mut().remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.table.borrow().get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.table.borrow().len
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone> Symbols<T> {
    pub fn get(&self, key: &str) -> Option<T> {
        self.table.borrow().get(key).cloned()
    }
}

impl<T: 'static> Symbols<T> {
    /// Add or replace an entry for the rest of the current parse
    pub fn insert(&self, ctx: &mut Context<'_, '_>, key: &str, value: T) {
        let previous = self.table.borrow_mut().insert(key, value);
        ctx.log_undo(Box::new(SymbolUndo {
            table: Rc::clone(&self.table),
            key: key.to_string(),
            previous,
        }));
    }

    /// Remove an entry for the rest of the current parse
    pub fn remove(&self, ctx: &mut Context<'_, '_>, key: &str) {
        let Some(previous) = self.table.borrow_mut().remove(key) else {
            return;
        };
        ctx.log_undo(Box::new(SymbolUndo {
            table: Rc::clone(&self.table),
            key: key.to_string(),
            previous: Some(previous),
        }));
    }

    /// Remove every entry for the rest of the current parse
    pub fn clear(&self, ctx: &mut Context<'_, '_>) {
        let entries = self.table.borrow_mut().drain();
        for (key, value) in entries {
            ctx.log_undo(Box::new(SymbolUndo {
                table: Rc::clone(&self.table),
                key,
                previous: Some(value),
            }));
        }
    }
}

impl<'code, T> Parser<'code> for Symbols<T>
where
    T: Clone,
{
    type Output = T;

    fn parse(
        &self,
        cursor: StrCursor<'code>,
        ctx: &mut Context<'code, '_>,
    ) -> PResult<'code, Self::Output> {
        let cursor = ctx.skip(cursor);
        let matched = self
            .table
            .borrow()
            .longest_match(cursor.rest())
            .map(|(len, value)| (len, value.clone()));
        match matched {
            Some((len, value)) => {
                trace!(symbol = self.name.as_ref(), len, "matched symbol");
                Ok((value, cursor.advance(len)))
            }
            None => Err(ctx.soft(ParseError::expected(self.name.clone(), cursor))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::Cursor;
    use crate::entry::parse;
    use crate::prelude::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_longest_match_wins() {
        let ops = Symbols::new()
            .with("<", 1)
            .with("<=", 2)
            .with("<<=", 3);
        let data = "<<=x";
        let cursor = StrCursor::new(data);
        let mut ctx = Context::new(data);

        let (value, cursor) = ops.parse(cursor, &mut ctx).unwrap();
        assert_eq!(value, 3);
        assert_eq!(cursor.position(), 3);
    }

    #[test]
    fn test_falls_back_to_shorter_key() {
        let ops = Symbols::new().with("<", 1).with("<<=", 3);
        let data = "<<x";
        let cursor = StrCursor::new(data);
        let mut ctx = Context::new(data);

        let (value, cursor) = ops.parse(cursor, &mut ctx).unwrap();
        assert_eq!(value, 1);
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn test_no_match_uses_name() {
        let keywords = Symbols::<()>::new().with("if", ()).named("keyword");
        let data = "while";
        let cursor = StrCursor::new(data);
        let mut ctx = Context::new(data);

        let failure = keywords.parse(cursor, &mut ctx).unwrap_err();
        assert_eq!(
            failure.to_string(),
            "expected keyword at line 1, byte offset 0"
        );
    }

    #[test]
    fn test_multibyte_keys() {
        let greek = Symbols::new().with("α", 'a').with("αβ", 'b');
        let data = "αβγ";
        let cursor = StrCursor::new(data);
        let mut ctx = Context::new(data);

        let (value, cursor) = greek.parse(cursor, &mut ctx).unwrap();
        assert_eq!(value, 'b');
        assert_eq!(cursor.value(), Some('γ'));
    }

    #[test]
    fn test_setup_operations() {
        let table = Symbols::new();
        assert!(table.is_empty());
        assert_eq!(table.add("one", 1), None);
        assert_eq!(table.add("one", 11), Some(1));
        table.add("two", 2);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("one"), Some(11));
        assert!(!table.contains_key("on"));
        assert_eq!(table.remove_entry("one"), Some(11));
        assert_eq!(table.remove_entry("one"), None);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_parse_time_insert_is_rolled_back() {
        let names = Symbols::<u32>::new().named("declared name");
        let declare = {
            let names = names.clone();
            lit("let ")
                .ignore_then(alpha().repeated().at_least(1).raw())
                .action(move |name, ctx| names.insert(ctx, *name, 1))
                .omit()
        };
        let grammar = declare.then(lit(';')).then(names.clone());

        // The inserted name is usable later in the same parse
        assert!(parse("let x;x", &grammar).is_ok());
        // and gone afterwards
        assert!(!names.contains_key("x"));
        assert!(parse("let x;y", &grammar).is_err());
        assert!(names.is_empty());
    }

    #[test]
    fn test_parse_time_changes_revert_in_reverse_order() {
        let table = Symbols::new().with("a", 1);
        {
            let mut ctx = Context::new("");
            table.insert(&mut ctx, "a", 2);
            table.insert(&mut ctx, "a", 3);
            table.remove(&mut ctx, "a");
            table.insert(&mut ctx, "b", 4);
            assert_eq!(table.get("a"), None);
            assert_eq!(table.get("b"), Some(4));
        }
        assert_eq!(table.get("a"), Some(1));
        assert_eq!(table.get("b"), None);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_remove_prunes_dead_branches() {
        let mut table = SymbolTable::new();
        table.insert("ab", 1);
        table.insert("abcd", 2);
        assert_eq!(table.live_nodes(), 5);

        // "ab" still needs the shared prefix
        assert_eq!(table.remove("abcd"), Some(2));
        assert_eq!(table.live_nodes(), 3);
        assert_eq!(table.remove("ab"), Some(1));
        assert_eq!(table.live_nodes(), 1);

        // Freed slots are reused
        table.insert("xyz", 3);
        assert_eq!(table.nodes.len(), 5);
        assert_eq!(table.live_nodes(), 4);
        assert_eq!(table.get("xyz"), Some(&3));
    }

    #[test]
    fn test_removing_inner_key_keeps_longer_keys() {
        let mut table = SymbolTable::new();
        table.insert("ab", 1);
        table.insert("abc", 2);

        assert_eq!(table.remove("ab"), Some(1));
        assert_eq!(table.live_nodes(), 4);
        assert_eq!(table.longest_match("abcx"), Some((3, &2)));
        assert_eq!(table.remove("zz"), None);
    }

    #[test]
    fn test_repeated_parses_do_not_grow_table() {
        let names = Symbols::new().with("base", 0u32);
        let grammar = {
            let names = names.clone();
            alnum()
                .repeated()
                .at_least(1)
                .raw()
                .action(move |name, ctx| names.insert(ctx, *name, 1))
        };
        let inputs: Vec<String> = (0..200).map(|i| format!("key{}", i)).collect();
        let before = names.table.borrow().live_nodes();

        for input in &inputs {
            assert!(parse(input, &grammar).is_ok());
        }

        assert_eq!(names.table.borrow().live_nodes(), before);
        assert_eq!(names.len(), 1);
        assert_eq!(names.get("base"), Some(0));
    }

    #[test]
    fn test_parse_time_clear_is_restored() {
        let table = Symbols::new().with("x", 1).with("xy", 2).with("z", 3);
        {
            let mut ctx = Context::new("");
            table.clear(&mut ctx);
            assert!(table.is_empty());
        }
        assert_eq!(table.len(), 3);
        assert_eq!(table.get("xy"), Some(2));
        assert_eq!(table.table.borrow().live_nodes(), 4);
    }
}
