//! Line-oriented terminal picker.
//!
//! Each input line is one user action:
//! - `:q` dismisses the picker
//! - an empty line accepts the highlighted (first) item, or nothing when the value is empty
//! - `:N` accepts the N-th displayed item (1-based)
//! - anything else replaces the whole value

use super::{Picker, PickerEvent, PickerItem};
use crate::session::Notice;
use std::fmt;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

/// Number of items rendered after each list update.
const VISIBLE_ITEMS: usize = 10;

/// What a single input line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineCommand {
    Event(PickerEvent),
    /// `:N` pointing past the displayed list.
    NoSuchItem(usize),
}

/// Interpret one input line against the current value and displayed items.
pub fn parse_line(line: &str, value: &str, items: &[PickerItem]) -> LineCommand {
    let line = line.trim_end_matches(['\r', '\n']);

    if line == ":q" {
        return LineCommand::Event(PickerEvent::Dismissed);
    }

    if line.is_empty() {
        let label = if value.trim().is_empty() {
            String::new()
        } else {
            items.first().map(|i| i.label.clone()).unwrap_or_default()
        };
        return LineCommand::Event(PickerEvent::ItemAccepted(label));
    }

    if let Some(n) = line.strip_prefix(':').and_then(|n| n.trim().parse::<usize>().ok()) {
        return match n.checked_sub(1).and_then(|i| items.get(i)) {
            Some(item) => LineCommand::Event(PickerEvent::ItemAccepted(item.label.clone())),
            None => LineCommand::NoSuchItem(n),
        };
    }

    LineCommand::Event(PickerEvent::ValueChanged(line.to_string()))
}

/// Picker reading actions from an async line source and rendering to a writer.
pub struct LinePicker<R, W> {
    lines: Lines<R>,
    out: W,
    value: String,
    items: Vec<PickerItem>,
    closed: bool,
}

impl<R, W> fmt::Debug for LinePicker<R, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinePicker")
            .field("value", &self.value)
            .field("items", &self.items.len())
            .field("closed", &self.closed)
            .finish()
    }
}

impl<R: AsyncBufRead + Unpin, W: Write> LinePicker<R, W> {
    pub fn new(reader: R, out: W) -> Self {
        Self {
            lines: reader.lines(),
            out,
            value: String::new(),
            items: Vec::new(),
            closed: false,
        }
    }

    /// The items currently displayed.
    pub fn items(&self) -> &[PickerItem] {
        &self.items
    }

    pub fn into_writer(self) -> W {
        self.out
    }

    fn emit(&mut self, args: fmt::Arguments<'_>) {
        if let Err(e) = self.out.write_fmt(args).and_then(|()| self.out.flush()) {
            tracing::debug!("Failed to render picker output: {}", e);
        }
    }

    fn render_items(&mut self) {
        if self.items.is_empty() {
            self.emit(format_args!("  (no matches)\n"));
            return;
        }

        let mut listing = String::new();
        for (i, item) in self.items.iter().take(VISIBLE_ITEMS).enumerate() {
            listing.push_str(&format!("  {:>2}. {}", i + 1, item.label));
            if let Some(annotation) = &item.annotation {
                listing.push_str(&format!("  ({})", annotation));
            }
            listing.push('\n');
        }
        if self.items.len() > VISIBLE_ITEMS {
            listing.push_str(&format!(
                "  ... and {} more\n",
                self.items.len() - VISIBLE_ITEMS
            ));
        }
        self.emit(format_args!("{}", listing));
    }
}

impl<R: AsyncBufRead + Unpin, W: Write> Picker for LinePicker<R, W> {
    async fn next_event(&mut self) -> Option<PickerEvent> {
        loop {
            if self.closed {
                return None;
            }

            let line = match self.lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => return None,
                Err(e) => {
                    tracing::warn!("Failed to read picker input: {}", e);
                    return None;
                }
            };

            match parse_line(&line, &self.value, &self.items) {
                LineCommand::Event(event) => {
                    if let PickerEvent::ValueChanged(value) = &event {
                        self.value.clone_from(value);
                    }
                    return Some(event);
                }
                LineCommand::NoSuchItem(n) => {
                    self.emit(format_args!("No item {} in the list\n", n));
                }
            }
        }
    }

    fn value(&self) -> &str {
        &self.value
    }

    fn set_value(&mut self, value: &str) {
        value.clone_into(&mut self.value);
        if !value.is_empty() {
            self.emit(format_args!("> {}\n", value));
        }
    }

    fn set_items(&mut self, items: Vec<PickerItem>) {
        self.items = items;
        self.render_items();
    }

    fn set_title(&mut self, title: &str) {
        self.emit(format_args!("{}\n", title));
    }

    fn notify(&mut self, notice: &Notice) {
        let level = if notice.is_warning() { "warning" } else { "info" };
        self.emit(format_args!("{}: {}\n", level, notice));
    }

    fn close(&mut self) {
        self.closed = true;
    }
}
