use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

pub type HelperFn = Arc<dyn Fn(Option<&Value>) -> String + Send + Sync>;

/// One entry of a [`HelperBundle`]: either something callable or plain data.
#[derive(Clone)]
pub enum Helper {
    Func(HelperFn),
    Value(Value),
}

impl Helper {
    pub fn func(f: impl Fn(Option<&Value>) -> String + Send + Sync + 'static) -> Self {
        Helper::Func(Arc::new(f))
    }

    /// Call the helper when it is invocable.
    pub fn call(&self, value: Option<&Value>) -> Option<String> {
        match self {
            Helper::Func(f) => Some(f(value)),
            Helper::Value(_) => None,
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Helper::Value(value) => Some(value),
            Helper::Func(_) => None,
        }
    }
}

impl fmt::Debug for Helper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Helper::Func(_) => f.write_str("Helper::Func(..)"),
            Helper::Value(value) => f.debug_tuple("Helper::Value").field(value).finish(),
        }
    }
}

/// Locale-dependent helpers, rebuilt by the helper factory on every switch.
#[derive(Debug, Clone, Default)]
pub struct HelperBundle {
    entries: BTreeMap<String, Helper>,
}

impl HelperBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fn(
        mut self,
        name: impl Into<String>,
        f: impl Fn(Option<&Value>) -> String + Send + Sync + 'static,
    ) -> Self {
        self.insert(name, Helper::func(f));
        self
    }

    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, Helper::Value(value.into()));
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, helper: Helper) -> Option<Helper> {
        self.entries.insert(name.into(), helper)
    }

    pub fn get(&self, name: &str) -> Option<&Helper> {
        self.entries.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
