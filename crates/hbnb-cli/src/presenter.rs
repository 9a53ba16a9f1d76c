//! Terminal stand-in for the page: notifications go to stderr and
//! navigations are reported instead of followed.

use std::sync::Mutex;

use hbnb_core::{FormId, Presenter};
use tracing::debug;

#[derive(Default)]
pub struct TerminalPresenter {
    location: Mutex<Option<String>>,
}

impl TerminalPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last page navigated to, if any
    pub fn location(&self) -> Option<String> {
        self.location
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Presenter for TerminalPresenter {
    fn notify(&self, message: &str) {
        eprintln!("{}", message);
    }

    fn navigate(&self, path: &str) {
        debug!(path = path, "Navigating");
        *self.location.lock().unwrap_or_else(|e| e.into_inner()) = Some(path.to_string());
        eprintln!("→ {}", path);
    }

    fn reset_form(&self, form: FormId) {
        debug!(form = %form, "Form reset");
    }
}
