use classforge_syntax::Value;

/// A class constant; immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Constant {
    name: String,
    value: Value,
}

impl Constant {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}
