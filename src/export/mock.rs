use super::{ShareItem, ShareSurface};
use crate::{Error, Result};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct MockShareSurface {
    presented: Arc<Mutex<Vec<Vec<ShareItem>>>>,
    has_context: bool,
}

impl MockShareSurface {
    pub fn new() -> Self {
        Self {
            presented: Arc::new(Mutex::new(Vec::new())),
            has_context: true,
        }
    }

    /// Behave as if there were nowhere to present from.
    pub fn without_context(mut self) -> Self {
        self.has_context = false;
        self
    }

    pub fn get_presented(&self) -> Vec<Vec<ShareItem>> {
        self.presented.lock().unwrap().clone()
    }

    pub fn get_present_count(&self) -> usize {
        self.presented.lock().unwrap().len()
    }
}

impl Default for MockShareSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl ShareSurface for MockShareSurface {
    fn present(&self, items: &[ShareItem]) -> Result<()> {
        if !self.has_context {
            return Err(Error::NoPresentationContext(
                "mock surface has no context".to_string(),
            ));
        }
        self.presented.lock().unwrap().push(items.to_vec());
        Ok(())
    }
}
