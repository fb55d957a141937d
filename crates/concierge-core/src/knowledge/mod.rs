//! Knowledge base: the single mutable system-prompt template.
//!
//! Replacement is all-or-nothing: the profile and its assembled prompt are
//! swapped together under one write lock, so a reader never observes a
//! half-updated template. No versioning or history is retained.

use std::sync::RwLock;

use concierge_types::knowledge::KnowledgeProfile;

/// Process-wide owner of the active knowledge profile and assembled prompt.
pub struct KnowledgeBase {
    inner: RwLock<State>,
}

struct State {
    profile: KnowledgeProfile,
    prompt: String,
}

impl KnowledgeBase {
    /// Start from the built-in default profile.
    pub fn new() -> Self {
        let profile = KnowledgeProfile::default();
        let prompt = profile.assemble();
        Self {
            inner: RwLock::new(State { profile, prompt }),
        }
    }

    /// Replace the whole profile; returns the newly assembled prompt.
    pub fn replace(&self, profile: KnowledgeProfile) -> String {
        let prompt = profile.assemble();
        let mut state = self.inner.write().expect("knowledge lock poisoned");
        state.profile = profile;
        state.prompt = prompt.clone();
        prompt
    }

    /// The active system prompt.
    pub fn current_prompt(&self) -> String {
        self.inner
            .read()
            .expect("knowledge lock poisoned")
            .prompt
            .clone()
    }

    /// The active welcome message.
    pub fn current_welcome_message(&self) -> String {
        self.inner
            .read()
            .expect("knowledge lock poisoned")
            .profile
            .welcome_message
            .clone()
    }

    /// Copy of the active profile.
    pub fn profile(&self) -> KnowledgeProfile {
        self.inner
            .read()
            .expect("knowledge lock poisoned")
            .profile
            .clone()
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::new()
    }
}
