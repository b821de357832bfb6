//! Ordered storage for a scenario's tests.

use super::test::Test;

/// The tests of one scenario, in registration order.
#[derive(Debug, Default)]
pub struct Registry {
    label: String,
    tests: Vec<Test>,
}

impl Registry {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            tests: Vec::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn tests(&self) -> &[Test] {
        &self.tests
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    pub(crate) fn push(&mut self, test: Test) {
        self.tests.push(test);
    }

    pub(crate) fn get(&self, index: usize) -> Option<&Test> {
        self.tests.get(index)
    }

    pub(crate) fn tests_mut(&mut self) -> &mut [Test] {
        &mut self.tests
    }
}
