use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::value::Value;

struct Frame {
    vars: HashMap<String, Value>,
    parent: Option<Environment>,
}

/// A frame holding variable bindings, plus an optional parent link. `get` walks the chain
/// toward the root; `set` always writes into this frame, never a parent's — this is what lets
/// `if`/`while`/bare blocks share the enclosing frame while function calls get a genuinely
/// fresh one.
#[derive(Clone)]
pub struct Environment(Rc<RefCell<Frame>>);

impl Environment {
    pub fn global() -> Self {
        Self(Rc::new(RefCell::new(Frame {
            vars: HashMap::new(),
            parent: None,
        })))
    }

    /// A new frame whose parent is `self` — used only on function call, never for `if`/`while`/
    /// bare blocks.
    pub fn child(&self) -> Self {
        Self(Rc::new(RefCell::new(Frame {
            vars: HashMap::new(),
            parent: Some(self.clone()),
        })))
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        let frame = self.0.borrow();
        if let Some(value) = frame.vars.get(name) {
            return Some(value.clone());
        }
        frame.parent.as_ref().and_then(|parent| parent.get(name))
    }

    pub fn set(&self, name: &str, value: Value) {
        self.0.borrow_mut().vars.insert(name.to_owned(), value);
    }
}
