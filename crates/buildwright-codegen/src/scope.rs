//! Hierarchical key/value environment shared by everything that emits code
//! for one generated unit.
//!
//! A [`Scope`] is a chain of frames. The outermost frame lives at
//! [`Level::Unit`] and holds helpers shared by the whole unit; each generated
//! method opens a child frame at [`Level::Method`] for its temporaries.
//!
//! Keys implement [`Element`] and carry the level they must be stored at.
//! Lookups walk from the current frame outward, while insertions are routed
//! to the nearest frame whose level matches the key, so a unit-level helper
//! requested from inside a method is still produced once for the whole unit.

use std::any::Any;
use std::fmt;

/// Nesting level of a scope frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    /// One generated unit (the value type, its builder and their impls).
    Unit,
    /// One generated method body.
    Method,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Unit => f.write_str("unit"),
            Level::Method => f.write_str("method"),
        }
    }
}

/// A typed scope key.
///
/// Keys are compared by value on their concrete type, so two keys of
/// different types never alias even if they render identically.
pub trait Element: Clone + Eq + fmt::Debug + 'static {
    type Value: Clone + 'static;

    /// The level of the frame this key's value must be stored in.
    fn level(&self) -> Level;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScopeError {
    /// No frame in the chain has the level the key requires.
    #[error("not in {level} scope: cannot store `{key}`")]
    LevelNotInChain { level: Level, key: String },
}

impl From<ScopeError> for darling::Error {
    fn from(err: ScopeError) -> Self {
        darling::Error::custom(err)
    }
}

struct Entry {
    key: Box<dyn Any>,
    value: Box<dyn Any>,
}

/// Storage for a single level of a [`Scope`].
pub struct Frame {
    level: Level,
    entries: Vec<Entry>,
}

impl Frame {
    fn new(level: Level) -> Self {
        Self {
            level,
            entries: Vec::new(),
        }
    }

    fn get<K: Element>(&self, key: &K) -> Option<&K::Value> {
        self.entries
            .iter()
            .find(|entry| entry.key.downcast_ref::<K>() == Some(key))
            .and_then(|entry| entry.value.downcast_ref::<K::Value>())
    }

    fn insert<K: Element>(&mut self, key: K, value: K::Value) {
        self.entries.push(Entry {
            key: Box::new(key),
            value: Box::new(value),
        });
    }

    fn keys<K: Element>(&self) -> impl Iterator<Item = &K> {
        self.entries
            .iter()
            .filter_map(|entry| entry.key.downcast_ref::<K>())
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("level", &self.level)
            .field("entries", &self.entries.len())
            .finish()
    }
}

/// A frame plus mutable access to every enclosing frame.
///
/// Child scopes borrow their ancestors, so a method scope cannot outlive the
/// unit it was opened from and two sibling method scopes can never be alive
/// at the same time.
pub struct Scope<'p> {
    ancestors: Vec<&'p mut Frame>,
    frame: Frame,
}

impl Scope<'static> {
    /// Creates the root scope of a generated unit.
    pub fn unit() -> Self {
        Scope {
            ancestors: Vec::new(),
            frame: Frame::new(Level::Unit),
        }
    }
}

impl<'p> Scope<'p> {
    /// Opens a method-level child of this scope.
    pub fn method(&mut self) -> Scope<'_> {
        let mut ancestors: Vec<&mut Frame> = self.ancestors.iter_mut().map(|f| &mut **f).collect();
        ancestors.push(&mut self.frame);
        Scope {
            ancestors,
            frame: Frame::new(Level::Method),
        }
    }

    pub fn level(&self) -> Level {
        self.frame.level
    }

    /// Frames from the current one outward to the root.
    fn frames(&self) -> impl Iterator<Item = &Frame> {
        std::iter::once(&self.frame).chain(self.ancestors.iter().rev().map(|f| &**f))
    }

    fn owning_frame<K: Element>(&mut self, key: &K) -> Result<&mut Frame, ScopeError> {
        let level = key.level();
        if self.frame.level == level {
            return Ok(&mut self.frame);
        }
        self.ancestors
            .iter_mut()
            .rev()
            .find(|frame| frame.level == level)
            .map(|frame| &mut **frame)
            .ok_or_else(|| ScopeError::LevelNotInChain {
                level,
                key: format!("{key:?}"),
            })
    }

    pub fn contains<K: Element>(&self, key: &K) -> bool {
        self.frames().any(|frame| frame.get(key).is_some())
    }

    /// Returns the value stored for `key` in the nearest frame that has one.
    pub fn get<K: Element>(&self, key: &K) -> Option<K::Value> {
        self.frames().find_map(|frame| frame.get(key)).cloned()
    }

    /// Returns the value for `key`, producing it with `supplier` if no frame
    /// in the chain has one yet.
    ///
    /// The value is stored in the nearest frame whose level matches the key.
    /// `supplier` runs at most once per key per chain and is never run when
    /// no such frame exists.
    pub fn compute_if_absent<K, F>(&mut self, key: K, supplier: F) -> Result<K::Value, ScopeError>
    where
        K: Element,
        F: FnOnce() -> K::Value,
    {
        if let Some(value) = self.get(&key) {
            return Ok(value);
        }
        let frame = self.owning_frame(&key)?;
        let value = supplier();
        frame.insert(key, value.clone());
        Ok(value)
    }

    /// Stores `value` for `key` unless the owning frame already has one.
    ///
    /// Returns the previously stored value, if any; it is never overwritten.
    pub fn put_if_absent<K: Element>(
        &mut self,
        key: K,
        value: K::Value,
    ) -> Result<Option<K::Value>, ScopeError> {
        let frame = self.owning_frame(&key)?;
        if let Some(existing) = frame.get(&key).cloned() {
            return Ok(Some(existing));
        }
        frame.insert(key, value);
        Ok(None)
    }

    /// All keys of type `K` stored anywhere in the chain, root first.
    pub fn keys_of_type<K: Element>(&self) -> Vec<K> {
        let mut keys: Vec<K> = Vec::new();
        let root_first = self
            .ancestors
            .iter()
            .map(|f| &**f)
            .chain(std::iter::once(&self.frame));
        for frame in root_first {
            for key in frame.keys::<K>() {
                if !keys.contains(key) {
                    keys.push(key.clone());
                }
            }
        }
        keys
    }
}

impl fmt::Debug for Scope<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("frame", &self.frame)
            .field("ancestors", &self.ancestors)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Shared(&'static str);

    impl Element for Shared {
        type Value = String;

        fn level(&self) -> Level {
            Level::Unit
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Temp(&'static str);

    impl Element for Temp {
        type Value = u32;

        fn level(&self) -> Level {
            Level::Method
        }
    }

    #[test]
    fn test_unit_key_from_method_is_stored_in_unit() {
        let calls = Cell::new(0);
        let mut unit = Scope::unit();
        {
            let mut method = unit.method();
            let value = method
                .compute_if_absent(Shared("defaults"), || {
                    calls.set(calls.get() + 1);
                    "first".to_string()
                })
                .unwrap();
            assert_eq!(value, "first");

            let again = method
                .compute_if_absent(Shared("defaults"), || {
                    calls.set(calls.get() + 1);
                    "second".to_string()
                })
                .unwrap();
            assert_eq!(again, "first");
        }
        assert_eq!(calls.get(), 1);
        assert_eq!(unit.get(&Shared("defaults")), Some("first".to_string()));

        let mut sibling = unit.method();
        let seen = sibling
            .compute_if_absent(Shared("defaults"), || "third".to_string())
            .unwrap();
        assert_eq!(seen, "first");
    }

    #[test]
    fn test_sibling_method_scopes_are_isolated() {
        let mut unit = Scope::unit();
        unit.put_if_absent(Shared("helper"), "h".to_string()).unwrap();
        {
            let mut first = unit.method();
            first.put_if_absent(Temp("x"), 1).unwrap();
            assert!(first.contains(&Temp("x")));
            assert!(first.contains(&Shared("helper")));
        }
        let second = unit.method();
        assert!(!second.contains(&Temp("x")));
        assert_eq!(second.get(&Temp("x")), None);
        assert_eq!(second.get(&Shared("helper")), Some("h".to_string()));
    }

    #[test]
    fn test_missing_level_is_an_error_and_supplier_is_not_run() {
        let mut unit = Scope::unit();
        let called = Cell::new(false);
        let err = unit
            .compute_if_absent(Temp("y"), || {
                called.set(true);
                3
            })
            .unwrap_err();
        assert!(!called.get());
        assert_eq!(
            err,
            ScopeError::LevelNotInChain {
                level: Level::Method,
                key: "Temp(\"y\")".to_string(),
            }
        );
        assert!(err.to_string().starts_with("not in method scope"));
        assert!(unit.put_if_absent(Temp("y"), 3).is_err());
    }

    #[test]
    fn test_put_if_absent_never_overwrites() {
        let mut unit = Scope::unit();
        let mut method = unit.method();
        assert_eq!(method.put_if_absent(Temp("n"), 1).unwrap(), None);
        assert_eq!(method.put_if_absent(Temp("n"), 2).unwrap(), Some(1));
        assert_eq!(method.get(&Temp("n")), Some(1));
        assert_eq!(
            method.put_if_absent(Shared("s"), "a".to_string()).unwrap(),
            None
        );
        assert_eq!(
            method.put_if_absent(Shared("s"), "b".to_string()).unwrap(),
            Some("a".to_string())
        );
    }

    #[test]
    fn test_keys_of_type_are_root_first_and_typed() {
        let mut unit = Scope::unit();
        unit.put_if_absent(Shared("a"), String::new()).unwrap();
        unit.put_if_absent(Shared("b"), String::new()).unwrap();
        let mut method = unit.method();
        method.put_if_absent(Temp("t"), 0).unwrap();
        method.put_if_absent(Shared("c"), String::new()).unwrap();

        assert_eq!(
            method.keys_of_type::<Shared>(),
            vec![Shared("a"), Shared("b"), Shared("c")]
        );
        assert_eq!(method.keys_of_type::<Temp>(), vec![Temp("t")]);
    }

    #[test]
    fn test_nested_method_routes_to_nearest_method_frame() {
        let mut unit = Scope::unit();
        let mut outer = unit.method();
        {
            let mut inner = outer.method();
            assert_eq!(inner.level(), Level::Method);
            inner.compute_if_absent(Temp("inner"), || 7).unwrap();
        }
        assert!(!outer.contains(&Temp("inner")));
    }
}
