use crate::Value;

/// Mutable state threaded through the writer while a statement is generated.
///
/// Every placeholder written pushes its argument here, so the argument list
/// always matches the placeholders one to one and in text order.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Context {
    pub arguments: Vec<Value>,
}

impl Context {
    pub fn new() -> Self {
        Default::default()
    }

    /// Number of placeholders written so far.
    pub fn counter(&self) -> usize {
        self.arguments.len()
    }
}
