//! ANSI terminal rendering of the transcript.

use std::{
    borrow::Cow,
    io::{self, Write},
};

use client_core::{
    EntryHandle, TitleSurface, Transcript, TranscriptEntry, TranscriptSurface,
};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[3J\x1b[H";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";
const ERASE_PREVIOUS_LINE: &str = "\x1b[1A\x1b[2K";

/// Writes entries as they arrive and repaints the whole transcript after a removal or rewrite.
pub struct TerminalView<W: Write> {
    transcript: Transcript,
    out: W,
    dirty: bool,
    interactive: bool,
}

impl<W: Write> TerminalView<W> {
    /// `interactive` means the user's keystrokes are echoed on `out` by the terminal.
    pub fn new(out: W, interactive: bool) -> Self {
        Self {
            transcript: Transcript::new(),
            out,
            dirty: false,
            interactive,
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Removes the line the terminal echoed while the user typed, so only the command echo
    /// remains.
    pub fn discard_typed_line(&mut self) {
        if self.interactive {
            report(self.out.write_all(ERASE_PREVIOUS_LINE.as_bytes()));
        }
    }

    fn repaint(&mut self) {
        let result = self.out.write_all(CLEAR_SCREEN.as_bytes()).and_then(|()| {
            self.transcript
                .entries()
                .try_for_each(|entry| write_entry(&mut self.out, entry))
        });
        report(result);
        self.dirty = false;
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TranscriptSurface for TerminalView<W> {
    fn append(&mut self, entry: TranscriptEntry) -> EntryHandle {
        let handle = self.transcript.append(entry.clone());
        if self.dirty {
            self.repaint();
        } else {
            report(write_entry(&mut self.out, &entry));
        }
        handle
    }

    fn remove(&mut self, handle: EntryHandle) {
        self.transcript.remove(handle);
        self.dirty = true;
    }

    fn set_text(&mut self, handle: EntryHandle, text: &str) {
        self.transcript.set_text(handle, text);
        self.dirty = true;
    }

    fn scroll_to_end(&mut self) {
        if self.dirty {
            self.repaint();
        }
        report(self.out.flush());
    }
}

impl<W: Write> TitleSurface for TerminalView<W> {
    fn set_title(&mut self, title: &str) {
        let title: String = title.chars().filter(|c| !c.is_control()).collect();
        self.transcript.set_title(&title);
        report(write!(self.out, "\x1b]0;{title}\x07").and_then(|()| self.out.flush()));
    }
}

fn write_entry(out: &mut impl Write, entry: &TranscriptEntry) -> io::Result<()> {
    let text = printable(&entry.text);
    if entry.is_bold() {
        write!(out, "{BOLD}{text}{RESET}")
    } else {
        out.write_all(text.as_bytes())
    }
}

/// Server text with escape sequences neutralised; newlines and tabs are kept.
fn printable(text: &str) -> Cow<'_, str> {
    if text.chars().any(is_unsafe_control) {
        Cow::Owned(text.chars().filter(|c| !is_unsafe_control(*c)).collect())
    } else {
        Cow::Borrowed(text)
    }
}

fn is_unsafe_control(c: char) -> bool {
    c.is_control() && c != '\n' && c != '\t'
}

fn report(result: io::Result<()>) {
    if let Err(err) = result {
        tracing::warn!(%err, "failed to write to terminal");
    }
}
