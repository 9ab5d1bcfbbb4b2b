//! Mock rendering collaborator.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::renderer::{RenderError, RenderPage, RenderSession, Renderer, WaitFor};

#[derive(Default)]
struct MockState {
    sessions_opened: AtomicUsize,
    pages_opened: AtomicUsize,
    navigations: Mutex<Vec<String>>,
    /// (script substring, response) rules, first match wins. Scripts with
    /// no matching rule evaluate to null.
    script_rules: Mutex<Vec<(String, Value)>>,
    title: Mutex<String>,
    navigation_failure: Mutex<Option<String>>,
}

/// Mock implementation of the rendering collaborator.
///
/// Provides controllable behavior for testing:
/// - Script responses keyed by substring of the evaluated script
/// - Recorded navigations and open counts for assertions
/// - Injectable navigation failures
#[derive(Clone, Default)]
pub struct MockRenderer {
    state: Arc<MockState>,
}

impl MockRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond with `value` to any evaluated script containing `needle`.
    /// Rules are matched in registration order; unmatched scripts
    /// evaluate to null.
    pub fn on_script(&self, needle: &str, value: Value) {
        self.state
            .script_rules
            .lock()
            .unwrap()
            .push((needle.to_string(), value));
    }

    /// Document title reported by every page of this renderer.
    pub fn set_title(&self, title: &str) {
        *self.state.title.lock().unwrap() = title.to_string();
    }

    /// Make every subsequent navigation fail with `message`.
    pub fn fail_navigation(&self, message: &str) {
        *self.state.navigation_failure.lock().unwrap() = Some(message.to_string());
    }

    pub fn sessions_opened(&self) -> usize {
        self.state.sessions_opened.load(Ordering::SeqCst)
    }

    pub fn pages_opened(&self) -> usize {
        self.state.pages_opened.load(Ordering::SeqCst)
    }

    pub fn navigations(&self) -> Vec<String> {
        self.state.navigations.lock().unwrap().clone()
    }

    /// A standalone page sharing this renderer's scripted rules, for
    /// component-level tests that bypass the session layer.
    pub fn scripted_page(&self) -> MockPage {
        MockPage {
            state: Arc::clone(&self.state),
        }
    }
}

#[async_trait]
impl Renderer for MockRenderer {
    async fn open_session(&self) -> Result<Box<dyn RenderSession>, RenderError> {
        self.state.sessions_opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockSession {
            state: Arc::clone(&self.state),
        }))
    }
}

struct MockSession {
    state: Arc<MockState>,
}

#[async_trait]
impl RenderSession for MockSession {
    async fn open_page(&self) -> Result<Box<dyn RenderPage>, RenderError> {
        self.state.pages_opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockPage {
            state: Arc::clone(&self.state),
        }))
    }

    async fn close(self: Box<Self>) -> Result<(), RenderError> {
        Ok(())
    }
}

pub struct MockPage {
    state: Arc<MockState>,
}

#[async_trait]
impl RenderPage for MockPage {
    async fn navigate(&self, url: &str, _wait: WaitFor) -> Result<(), RenderError> {
        if let Some(message) = self.state.navigation_failure.lock().unwrap().clone() {
            return Err(RenderError::Navigation(message));
        }
        self.state.navigations.lock().unwrap().push(url.to_string());
        Ok(())
    }

    async fn evaluate(&self, script: &str) -> Result<Value, RenderError> {
        let rules = self.state.script_rules.lock().unwrap();
        for (needle, value) in rules.iter() {
            if script.contains(needle.as_str()) {
                return Ok(value.clone());
            }
        }
        Ok(Value::Null)
    }

    async fn title(&self) -> Result<String, RenderError> {
        Ok(self.state.title.lock().unwrap().clone())
    }

    async fn close(self: Box<Self>) -> Result<(), RenderError> {
        Ok(())
    }
}
