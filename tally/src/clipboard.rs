use crate::errors::TallyError;
use arboard::Clipboard;

/// Destination for copied text.
pub trait ClipboardSink {
    fn copy(&mut self, text: &str) -> Result<(), TallyError>;
}

/// The desktop clipboard. The handle is opened lazily and kept afterwards.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<Clipboard>,
}

impl ClipboardSink for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<(), TallyError> {
        let clipboard = match &mut self.inner {
            Some(clipboard) => clipboard,
            slot @ None => slot.insert(Clipboard::new()?),
        };
        clipboard.set_text(text.to_string())?;
        Ok(())
    }
}

impl std::fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemClipboard")
            .field("open", &self.inner.is_some())
            .finish()
    }
}
