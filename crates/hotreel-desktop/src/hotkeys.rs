//! Global hotkey backend on top of `global-hotkey`.

use global_hotkey::{hotkey::HotKey, GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState};
use hotreel_core::{Error, HotkeyBackend, HotkeyHandler, HotkeyToken, Result};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::trace;

type HandlerMap = Arc<RwLock<HashMap<u32, HotkeyHandler>>>;

/// OS hotkey registrations with per-hotkey handlers.
///
/// Create on the thread that runs the window event loop; on Windows and
/// macOS hotkey events are delivered through that loop.
pub struct GlobalHotkeys {
    manager: GlobalHotKeyManager,
    registered: HashMap<u32, HotKey>,
    handlers: HandlerMap,
}

impl GlobalHotkeys {
    pub fn new() -> Result<Self> {
        let manager = GlobalHotKeyManager::new()
            .map_err(|e| Error::HotkeyBackend(format!("Failed to init hotkey manager: {e}")))?;

        let handlers: HandlerMap = Arc::default();
        let routes = handlers.clone();
        GlobalHotKeyEvent::set_event_handler(Some(move |event: GlobalHotKeyEvent| {
            if event.state != HotKeyState::Pressed {
                return;
            }
            let handler = routes.read().get(&event.id).cloned();
            match handler {
                Some(handler) => handler(),
                None => trace!(id = event.id, "Hotkey event without handler"),
            }
        }));

        Ok(Self {
            manager,
            registered: HashMap::new(),
            handlers,
        })
    }
}

impl HotkeyBackend for GlobalHotkeys {
    fn register(&mut self, combo: &str, handler: HotkeyHandler) -> Result<HotkeyToken> {
        let hotkey = parse_combo(combo)?;
        self.manager
            .register(hotkey)
            .map_err(|e| Error::HotkeyRegistration {
                combo: combo.to_string(),
                reason: e.to_string(),
            })?;

        let id = hotkey.id();
        self.registered.insert(id, hotkey);
        self.handlers.write().insert(id, handler);
        Ok(HotkeyToken(id))
    }

    fn unregister(&mut self, token: HotkeyToken) -> Result<()> {
        self.handlers.write().remove(&token.0);
        if let Some(hotkey) = self.registered.remove(&token.0) {
            self.manager
                .unregister(hotkey)
                .map_err(|e| Error::HotkeyBackend(e.to_string()))?;
        }
        Ok(())
    }
}

impl Drop for GlobalHotkeys {
    fn drop(&mut self) {
        GlobalHotKeyEvent::set_event_handler(None::<fn(GlobalHotKeyEvent)>);
    }
}

/// Parse a key combination such as `shift+t` or `ctrl+alt+F5`
pub fn parse_combo(combo: &str) -> Result<HotKey> {
    combo.trim().parse::<HotKey>().map_err(|e| Error::InvalidHotkey {
        combo: combo.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use global_hotkey::hotkey::{Code, Modifiers};

    #[test]
    fn test_parse_combo() {
        assert_eq!(
            parse_combo("shift+t").unwrap(),
            HotKey::new(Some(Modifiers::SHIFT), Code::KeyT)
        );
        assert_eq!(
            parse_combo(" ctrl+1 ").unwrap(),
            HotKey::new(Some(Modifiers::CONTROL), Code::Digit1)
        );
        assert_eq!(
            parse_combo("ctrl+alt+F5").unwrap(),
            HotKey::new(Some(Modifiers::CONTROL | Modifiers::ALT), Code::F5)
        );
    }

    #[test]
    fn test_parse_combo_rejects_garbage() {
        let err = parse_combo("ctrl+notakey").unwrap_err();
        assert!(matches!(err, Error::InvalidHotkey { ref combo, .. } if combo == "ctrl+notakey"));
        assert!(parse_combo("").is_err());
    }
}
