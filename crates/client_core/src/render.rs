//! Transcript renderer: applies response envelopes to a [`TranscriptSurface`].

use shared::protocol::{ResponseEnvelope, ResponsePart, StyledSpan};

use crate::surface::{command_line, EntryHandle, TranscriptEntry, TranscriptSurface};

/// Owns the surface and the retraction bookkeeping for one transcript.
///
/// Only the entries of the most recently rendered part are retractable. They are removed
/// before the next part renders when that previous part was ephemeral.
#[derive(Debug)]
pub struct Renderer<S> {
    surface: S,
    previous_entries: Vec<EntryHandle>,
    pending_entries: Vec<EntryHandle>,
    last_ephemeral: bool,
    last_command_entry: Option<EntryHandle>,
}

impl<S: TranscriptSurface> Renderer<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            previous_entries: Vec::new(),
            pending_entries: Vec::new(),
            last_ephemeral: false,
            last_command_entry: None,
        }
    }

    pub fn render(&mut self, envelope: &ResponseEnvelope) {
        for part in &envelope.parts {
            self.render_part(part);
        }
    }

    /// Echoes a submitted line. The echo is the target of later prompt overrides.
    pub fn render_command_echo(&mut self, command: &str) {
        let handle = self.surface.append(TranscriptEntry::command(command));
        self.last_command_entry = Some(handle);
        self.surface.append(TranscriptEntry::spacer());
        self.surface.scroll_to_end();
    }

    fn render_part(&mut self, part: &ResponsePart) {
        if self.last_ephemeral {
            for handle in self.previous_entries.drain(..) {
                self.surface.remove(handle);
            }
        }

        if let (Some(prompt), Some(command)) = (&part.override_prompt, self.last_command_entry) {
            self.surface.set_text(command, &command_line(prompt));
        }

        self.last_ephemeral = part.ephemeral;

        for span in &part.spans {
            self.append_span(span);
        }

        self.previous_entries = std::mem::take(&mut self.pending_entries);
        self.surface.append(TranscriptEntry::spacer());
        self.surface.scroll_to_end();
    }

    fn append_span(&mut self, span: &StyledSpan) {
        let handle = self
            .surface
            .append(TranscriptEntry::text(span.text.clone(), span.is_bold()));
        self.pending_entries.push(handle);
        self.surface.scroll_to_end();
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn last_ephemeral(&self) -> bool {
        self.last_ephemeral
    }

    pub fn previous_entries(&self) -> &[EntryHandle] {
        &self.previous_entries
    }

    pub fn last_command_entry(&self) -> Option<EntryHandle> {
        self.last_command_entry
    }
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
