// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use rustc_hash::FxHashMap;

use crate::{Binding, KeyPress, KeySeq, KeySeqParseError, key_seq_to_string, keymap_names,
            parse_key_seq};

/// Result of looking up a key sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyLookup<'a> {
    /// Bound, and no longer sequence starts with it.
    Exact(&'a Binding),
    /// Bound, and also a prefix of longer bound sequences.
    Ambiguous(&'a Binding),
    /// Not bound itself, but longer sequences start with it.
    Prefix,
    NoMatch,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct KeyMapNode {
    binding: Option<Binding>,
    children: FxHashMap<KeyPress, KeyMapNode>,
}

impl KeyMapNode {
    fn is_empty(&self) -> bool { self.binding.is_none() && self.children.is_empty() }

    fn collect<'a>(&'a self, prefix: &mut KeySeq, acc: &mut Vec<(KeySeq, &'a Binding)>) {
        if let Some(binding) = &self.binding {
            acc.push((prefix.clone(), binding));
        }
        for (key, child) in &self.children {
            prefix.push(*key);
            child.collect(prefix, acc);
            prefix.pop();
        }
    }
}

/// A trie from key sequences to [`Binding`]s, plus two fallbacks: `unicode` for
/// printable chars that have no binding of their own (usually `self-insert`), and
/// `nomatch` for everything else.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyMap {
    root: KeyMapNode,
    pub unicode: Option<Binding>,
    pub nomatch: Option<Binding>,
}

impl KeyMap {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Bind `keys`, replacing any previous binding of exactly these keys.
    pub fn bind(&mut self, keys: &[KeyPress], binding: Binding) {
        if keys.is_empty() {
            return;
        }
        let mut node = &mut self.root;
        for key in keys {
            node = node.children.entry(*key).or_default();
        }
        node.binding = Some(binding);
    }

    /// Bind a sequence given in key notation.
    ///
    /// # Errors
    ///
    /// Returns an error if `notation` can't be parsed.
    pub fn bind_str(&mut self, notation: &str, binding: Binding) -> Result<(), KeySeqParseError> {
        let keys = parse_key_seq(notation)?;
        self.bind(&keys, binding);
        Ok(())
    }

    /// Remove the binding of exactly `keys`. Longer sequences stay bound.
    pub fn unbind(&mut self, keys: &[KeyPress]) -> Option<Binding> {
        fn remove(node: &mut KeyMapNode, keys: &[KeyPress]) -> Option<Binding> {
            let Some((first, rest)) = keys.split_first() else {
                return node.binding.take();
            };
            let child = node.children.get_mut(first)?;
            let removed = remove(child, rest);
            if child.is_empty() {
                node.children.remove(first);
            }
            removed
        }
        if keys.is_empty() {
            return None;
        }
        remove(&mut self.root, keys)
    }

    /// The binding of exactly `keys`.
    #[must_use]
    pub fn bound(&self, keys: &[KeyPress]) -> Option<&Binding> {
        self.node(keys).and_then(|node| node.binding.as_ref())
    }

    #[must_use]
    pub fn lookup(&self, keys: &[KeyPress]) -> KeyLookup<'_> {
        let Some(node) = self.node(keys) else {
            return KeyLookup::NoMatch;
        };
        let has_longer = !node.children.is_empty();
        match (&node.binding, has_longer) {
            (Some(binding), false) => KeyLookup::Exact(binding),
            (Some(binding), true) => KeyLookup::Ambiguous(binding),
            (None, true) => KeyLookup::Prefix,
            (None, false) => KeyLookup::NoMatch,
        }
    }

    /// Does any bound sequence start with `keys` and continue past it.
    #[must_use]
    pub fn has_longer(&self, keys: &[KeyPress]) -> bool {
        self.node(keys).is_some_and(|node| !node.children.is_empty())
    }

    /// All bindings, sorted by their notation.
    #[must_use]
    pub fn bindings(&self) -> Vec<(KeySeq, &Binding)> {
        let mut acc = vec![];
        self.root.collect(&mut KeySeq::new(), &mut acc);
        acc.sort_by_cached_key(|(keys, _)| key_seq_to_string(keys));
        acc
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_empty() && self.unicode.is_none() && self.nomatch.is_none()
    }

    fn node(&self, keys: &[KeyPress]) -> Option<&KeyMapNode> {
        let mut node = &self.root;
        for key in keys {
            node = node.children.get(key)?;
        }
        Some(node)
    }
}

/// Look `keys` up in several keymaps at once, highest priority first. The first layer
/// with a binding for exactly `keys` supplies it (an explicit [`Binding::Unbound`] stops
/// the search without a binding). Any layer with longer sequences makes the result a
/// prefix.
#[must_use]
pub fn lookup_layers<'a>(layers: &[&'a KeyMap], keys: &[KeyPress]) -> KeyLookup<'a> {
    let exact = layers
        .iter()
        .copied()
        .find_map(|layer| layer.bound(keys))
        .filter(|binding| !binding.is_unbound());
    let has_longer = layers.iter().any(|layer| layer.has_longer(keys));
    match (exact, has_longer) {
        (Some(binding), false) => KeyLookup::Exact(binding),
        (Some(binding), true) => KeyLookup::Ambiguous(binding),
        (None, true) => KeyLookup::Prefix,
        (None, false) => KeyLookup::NoMatch,
    }
}

/// The named keymaps of one reader.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyMaps {
    maps: FxHashMap<String, KeyMap>,
}

impl KeyMaps {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&KeyMap> { self.maps.get(name) }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut KeyMap> { self.maps.get_mut(name) }

    /// The keymap called `name`, created empty if it doesn't exist yet.
    pub fn get_or_create(&mut self, name: &str) -> &mut KeyMap {
        self.maps.entry(name.to_string()).or_default()
    }

    pub fn insert(&mut self, name: &str, keymap: KeyMap) -> Option<KeyMap> {
        self.maps.insert(name.to_string(), keymap)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool { self.maps.contains_key(name) }

    /// Keymap names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.maps.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// `main` followed by the given layers, skipping any that don't exist.
    #[must_use]
    pub fn layers(&self, mode_layers: &[&str]) -> Vec<&KeyMap> {
        std::iter::once(keymap_names::MAIN)
            .chain(mode_layers.iter().copied())
            .filter_map(|name| self.get(name))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WidgetName;
    use pretty_assertions::assert_eq;

    fn keymap() -> KeyMap {
        let mut keymap = KeyMap::new();
        keymap.bind_str("^X", WidgetName::Abort.into()).unwrap();
        keymap.bind_str("^X^U", WidgetName::Undo.into()).unwrap();
        keymap.bind_str("^Xr", WidgetName::HistoryIncrementalSearchBackward.into()).unwrap();
        keymap.bind_str("gE", WidgetName::ViBackwardBlankWordEnd.into()).unwrap();
        keymap.bind_str("x", WidgetName::ViDeleteChar.into()).unwrap();
        keymap
    }

    #[test]
    fn test_lookup_outcomes() {
        let keymap = keymap();
        let ctrl_x = KeyPress::ctrl('x');
        assert_eq!(
            keymap.lookup(&[ctrl_x]),
            KeyLookup::Ambiguous(&Binding::from(WidgetName::Abort))
        );
        assert_eq!(
            keymap.lookup(&[ctrl_x, KeyPress::ctrl('u')]),
            KeyLookup::Exact(&Binding::from(WidgetName::Undo))
        );
        assert_eq!(keymap.lookup(&[KeyPress::ch('g')]), KeyLookup::Prefix);
        assert_eq!(keymap.lookup(&[KeyPress::ch('q')]), KeyLookup::NoMatch);
        assert_eq!(
            keymap.lookup(&[KeyPress::ch('x')]),
            KeyLookup::Exact(&Binding::from(WidgetName::ViDeleteChar))
        );
    }

    #[test]
    fn test_unbind_prunes() {
        let mut keymap = keymap();
        let keys = parse_key_seq("gE").unwrap();
        assert_eq!(
            keymap.unbind(&keys),
            Some(Binding::from(WidgetName::ViBackwardBlankWordEnd))
        );
        assert_eq!(keymap.lookup(&[KeyPress::ch('g')]), KeyLookup::NoMatch);

        // Unbinding the short sequence keeps the longer ones.
        keymap.unbind(&[KeyPress::ctrl('x')]);
        assert_eq!(keymap.lookup(&[KeyPress::ctrl('x')]), KeyLookup::Prefix);
    }

    #[test]
    fn test_bindings_are_listed() {
        let keymap = keymap();
        let listed: Vec<String> = keymap
            .bindings()
            .into_iter()
            .map(|(keys, binding)| format!("{} {binding:?}", key_seq_to_string(&keys)))
            .collect();
        assert_eq!(listed.len(), 5);
        assert!(listed.iter().any(|it| it.starts_with("^X^U ")));
    }

    #[test]
    fn test_layers_main_overrides_and_unbound_hides() {
        let lower = keymap();
        let mut main = KeyMap::new();
        main.bind_str("x", WidgetName::Beep.into()).unwrap();
        main.bind_str("^X^U", Binding::Unbound).unwrap();

        let layers = [&main, &lower];
        assert_eq!(
            lookup_layers(&layers, &[KeyPress::ch('x')]),
            KeyLookup::Exact(&Binding::from(WidgetName::Beep))
        );
        assert_eq!(
            lookup_layers(&layers, &parse_key_seq("^X^U").unwrap()),
            KeyLookup::NoMatch
        );
        assert_eq!(lookup_layers(&layers, &[KeyPress::ch('g')]), KeyLookup::Prefix);
    }
}
