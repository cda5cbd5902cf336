//! Screen attribute registry mirrored from the current area.
//!
//! Rendering and physics code read area-level settings (background, music,
//! underwater flags and so on) from a shared registry rather than from the
//! area itself. The handler writes into it on every location transition
//! through the single-mutation [`AttributeRegistry`] seam.

use std::cell::RefCell;
use std::rc::Rc;

use hashbrown::HashMap;
use serde_json::Value;

/// Key/value slot the handler mirrors area attributes into.
#[cfg_attr(test, mockall::automock)]
pub trait AttributeRegistry {
    /// Overwrites `name` with `value`.
    fn set_attribute(&mut self, name: &str, value: Value);

    /// Reads back a previously mirrored value.
    fn attribute(&self, name: &str) -> Option<Value>;
}

/// In-memory registry backed by a [`HashMap`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScreenAttributes {
    values: HashMap<String, Value>,
}

impl ScreenAttributes {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrows a value without cloning it.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Number of mirrored names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing has been mirrored yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl AttributeRegistry for ScreenAttributes {
    fn set_attribute(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_owned(), value);
    }

    fn attribute(&self, name: &str) -> Option<Value> {
        self.values.get(name).cloned()
    }
}

/// Lets the caller keep a handle on the registry it injected.
///
/// # Examples
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// use maps_handler::{AttributeRegistry, ScreenAttributes};
/// use serde_json::json;
///
/// let shared = Rc::new(RefCell::new(ScreenAttributes::new()));
/// let mut injected = Rc::clone(&shared);
/// injected.set_attribute("setting", json!("Underworld"));
/// assert_eq!(shared.borrow().get("setting"), Some(&json!("Underworld")));
/// ```
impl<R: AttributeRegistry> AttributeRegistry for Rc<RefCell<R>> {
    fn set_attribute(&mut self, name: &str, value: Value) {
        self.borrow_mut().set_attribute(name, value);
    }

    fn attribute(&self, name: &str) -> Option<Value> {
        self.borrow().attribute(name)
    }
}
