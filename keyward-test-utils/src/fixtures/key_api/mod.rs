use crate::TestContext;

pub mod factory;
pub mod mockito;

impl TestContext {
    pub fn key_api<'a>(&'a mut self) -> KeyApiFixtures<'a> {
        KeyApiFixtures { test: self }
    }
}

pub struct KeyApiFixtures<'a> {
    pub test: &'a mut TestContext,
}
