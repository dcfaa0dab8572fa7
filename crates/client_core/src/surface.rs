//! Capability interface over the visible transcript, plus an in-memory implementation.

/// Opaque reference to an appended entry. Stays valid until the entry is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryHandle(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Text { bold: bool },
    Command,
    Spacer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub kind: EntryKind,
    pub text: String,
}

impl TranscriptEntry {
    pub fn text(text: impl Into<String>, bold: bool) -> Self {
        Self {
            kind: EntryKind::Text { bold },
            text: text.into(),
        }
    }

    pub fn command(command: &str) -> Self {
        Self {
            kind: EntryKind::Command,
            text: command_line(command),
        }
    }

    pub fn spacer() -> Self {
        Self {
            kind: EntryKind::Spacer,
            text: "\n".to_string(),
        }
    }

    pub fn is_bold(&self) -> bool {
        matches!(self.kind, EntryKind::Text { bold: true })
    }
}

/// Displayed form of a command line.
pub fn command_line(command: &str) -> String {
    format!("\n> {command}\n")
}

/// What the renderer needs from a display surface.
pub trait TranscriptSurface {
    fn append(&mut self, entry: TranscriptEntry) -> EntryHandle;
    /// Deletes the entry; unknown handles are ignored.
    fn remove(&mut self, handle: EntryHandle);
    fn set_text(&mut self, handle: EntryHandle, text: &str);
    fn scroll_to_end(&mut self);
}

/// Surfaces that also carry a window or display title.
pub trait TitleSurface {
    fn set_title(&mut self, title: &str);
}

#[derive(Debug, Default, Clone)]
pub struct Transcript {
    entries: Vec<(EntryHandle, TranscriptEntry)>,
    next_handle: u64,
    title: Option<String>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &TranscriptEntry> {
        self.entries.iter().map(|(_, entry)| entry)
    }

    pub fn get(&self, handle: EntryHandle) -> Option<&TranscriptEntry> {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == handle)
            .map(|(_, entry)| entry)
    }

    pub fn contains_text(&self, text: &str) -> bool {
        self.entries().any(|entry| entry.text == text)
    }

    pub fn texts(&self) -> Vec<&str> {
        self.entries().map(|entry| entry.text.as_str()).collect()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

impl TranscriptSurface for Transcript {
    fn append(&mut self, entry: TranscriptEntry) -> EntryHandle {
        let handle = EntryHandle(self.next_handle);
        self.next_handle += 1;
        self.entries.push((handle, entry));
        handle
    }

    fn remove(&mut self, handle: EntryHandle) {
        self.entries.retain(|(candidate, _)| *candidate != handle);
    }

    fn set_text(&mut self, handle: EntryHandle, text: &str) {
        if let Some((_, entry)) = self
            .entries
            .iter_mut()
            .find(|(candidate, _)| *candidate == handle)
        {
            entry.text = text.to_string();
        }
    }

    fn scroll_to_end(&mut self) {}
}

impl TitleSurface for Transcript {
    fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
    }
}
