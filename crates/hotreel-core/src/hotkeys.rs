//! Hotkey Registrar - owns the set of registered global hotkeys
//!
//! The registrar never hands raw tokens to callers. Every change to the
//! binding set goes through [`HotkeyRegistrar::rebind`], which clears all
//! registrations and registers the new set from scratch.

use crate::{types::Binding, types::BindingSet, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Handler invoked by a backend when its hotkey fires.
///
/// Backends typically call this on their own event thread.
pub type HotkeyHandler = Arc<dyn Fn() + Send + Sync>;

/// Opaque registration handle issued by a backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HotkeyToken(pub u32);

/// OS-level global hotkey facility
pub trait HotkeyBackend {
    /// Register `combo` and invoke `handler` whenever it is pressed
    fn register(&mut self, combo: &str, handler: HotkeyHandler) -> Result<HotkeyToken>;

    /// Remove a registration made by this backend
    fn unregister(&mut self, token: HotkeyToken) -> Result<()>;
}

/// A combination that could not be registered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationFailure {
    pub combo: String,
    pub reason: String,
}

/// Outcome of a rebind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RebindReport {
    pub registered: usize,
    pub failed: Vec<RegistrationFailure>,
}

impl RebindReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Failed combinations joined for display
    pub fn failed_combos(&self) -> String {
        self.failed
            .iter()
            .map(|f| f.combo.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

struct Registration {
    combo: String,
    token: HotkeyToken,
}

/// Registered hotkey set, rebuilt in full on every change
pub struct HotkeyRegistrar<B: HotkeyBackend> {
    backend: B,
    registrations: Vec<Registration>,
}

impl<B: HotkeyBackend> HotkeyRegistrar<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            registrations: Vec::new(),
        }
    }

    /// Replace all registrations with one per binding.
    ///
    /// A combination that fails to register is reported and skipped; the
    /// remaining entries are still registered.
    pub fn rebind<F>(&mut self, bindings: &BindingSet, on_fire: F) -> RebindReport
    where
        F: Fn(&Binding) + Send + Sync + 'static,
    {
        self.clear();

        let on_fire = Arc::new(on_fire);
        let mut report = RebindReport::default();

        for binding in bindings.iter() {
            let fired = binding.clone();
            let callback = on_fire.clone();
            let handler: HotkeyHandler = Arc::new(move || (*callback)(&fired));

            match self.backend.register(&binding.key, handler) {
                Ok(token) => {
                    debug!(combo = %binding.key, token = token.0, "Hotkey registered");
                    self.registrations.push(Registration {
                        combo: binding.key.clone(),
                        token,
                    });
                    report.registered += 1;
                }
                Err(e) => {
                    warn!(combo = %binding.key, error = %e, "Hotkey registration failed");
                    report.failed.push(RegistrationFailure {
                        combo: binding.key.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            registered = report.registered,
            failed = report.failed.len(),
            "Hotkeys rebound"
        );
        report
    }

    /// Unregister everything
    pub fn shutdown(&mut self) {
        if !self.registrations.is_empty() {
            info!(count = self.registrations.len(), "Unregistering hotkeys");
        }
        self.clear();
    }

    pub fn registered_count(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_registered(&self, combo: &str) -> bool {
        self.registrations.iter().any(|r| r.combo == combo)
    }

    /// Registered combinations in registration order
    pub fn registered(&self) -> impl Iterator<Item = &str> {
        self.registrations.iter().map(|r| r.combo.as_str())
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn clear(&mut self) {
        for registration in self.registrations.drain(..) {
            if let Err(e) = self.backend.unregister(registration.token) {
                warn!(combo = %registration.combo, error = %e, "Hotkey unregistration failed");
            }
        }
    }
}

impl<B: HotkeyBackend> Drop for HotkeyRegistrar<B> {
    fn drop(&mut self) {
        self.clear();
    }
}
