use super::{ShareItem, ShareSurface};
use crate::{Error, Result};
use std::sync::Mutex;

/// Desktop stand-in for a share sheet.
///
/// Text goes to the system clipboard (via `arboard`); files are opened with
/// the user's default handler (via `open`), which offers printing, mailing
/// and saving from there.
pub struct DesktopShareSurface {
    // Kept alive: on X11 the clipboard is served by the owning process.
    clipboard: Mutex<Option<arboard::Clipboard>>,
}

impl DesktopShareSurface {
    pub fn new() -> Self {
        Self {
            clipboard: Mutex::new(None),
        }
    }

    fn copy_text(&self, text: &str) -> Result<()> {
        let mut guard = self
            .clipboard
            .lock()
            .map_err(|e| Error::NoPresentationContext(e.to_string()))?;

        if guard.is_none() {
            let clipboard = arboard::Clipboard::new()
                .map_err(|e| Error::NoPresentationContext(format!("clipboard unavailable: {}", e)))?;
            *guard = Some(clipboard);
        }

        match guard.as_mut() {
            Some(clipboard) => clipboard
                .set_text(text.to_string())
                .map_err(|e| Error::NoPresentationContext(format!("clipboard unavailable: {}", e))),
            None => Err(Error::NoPresentationContext(
                "clipboard unavailable".to_string(),
            )),
        }
    }
}

impl Default for DesktopShareSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl ShareSurface for DesktopShareSurface {
    fn present(&self, items: &[ShareItem]) -> Result<()> {
        for item in items {
            match item {
                ShareItem::Text(text) => {
                    self.copy_text(text)?;
                    tracing::info!("Copied {} characters to the clipboard", text.chars().count());
                }
                ShareItem::File(path) => {
                    open::that(path).map_err(|e| {
                        tracing::error!("Failed to open {}: {}", path.display(), e);
                        Error::NoPresentationContext(format!(
                            "no handler for {}: {}",
                            path.display(),
                            e
                        ))
                    })?;
                    tracing::info!("Opened {}", path.display());
                }
            }
        }
        Ok(())
    }
}
