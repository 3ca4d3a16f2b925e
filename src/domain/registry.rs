// Generic named-object store with add/remove notifications
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("'{name}' is already registered")]
pub struct DuplicateNameError {
    pub name: String,
}

type Listener<T> = Box<dyn Fn(&str, &T) + Send + Sync>;

/// Name-keyed store for registered values (widget type factories, mostly).
/// Mutations are synchronous and observable through listeners; there is no
/// background work.
pub struct Registry<T> {
    items: HashMap<String, T>,
    on_add: Vec<Listener<T>>,
    on_remove: Vec<Listener<T>>,
}

impl<T> Registry<T> {
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
            on_add: Vec::new(),
            on_remove: Vec::new(),
        }
    }

    /// Registers `value` under `name`. Names are unique; a second add under
    /// the same name fails and leaves the registry unchanged.
    pub fn add(&mut self, name: impl Into<String>, value: T) -> Result<(), DuplicateNameError> {
        let name = name.into();
        if self.items.contains_key(&name) {
            return Err(DuplicateNameError { name });
        }

        self.items.insert(name.clone(), value);
        if let Some(value) = self.items.get(&name) {
            for listener in &self.on_add {
                listener(&name, value);
            }
        }
        Ok(())
    }

    /// Non-throwing lookup.
    pub fn get(&self, name: &str) -> Option<&T> {
        self.items.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    /// Unregisters and returns the stored value. Removing an absent name is
    /// a no-op: `None` comes back and no notification fires.
    pub fn remove(&mut self, name: &str) -> Option<T> {
        let value = self.items.remove(name)?;
        for listener in &self.on_remove {
            listener(name, &value);
        }
        Some(value)
    }

    pub fn on_add(&mut self, listener: impl Fn(&str, &T) + Send + Sync + 'static) {
        self.on_add.push(Box::new(listener));
    }

    pub fn on_remove(&mut self, listener: impl Fn(&str, &T) + Send + Sync + 'static) {
        self.on_remove.push(Box::new(listener));
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<(String, T)> for Registry<T> {
    fn from_iter<I: IntoIterator<Item = (String, T)>>(iter: I) -> Self {
        let mut registry = Self::new();
        for (name, value) in iter {
            // Last writer wins while pre-seeding, matching HashMap collect.
            registry.items.insert(name, value);
        }
        registry
    }
}
