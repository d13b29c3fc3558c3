//! Terminal and JSON-lines observers for playback runs.

use std::io::{self, Write};

use playback::{StepEvent, StepObserver, COLOR_PALETTE};
use shared::{domain::StepStatus, error::EngineError, protocol::PlaybackEvent};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";
const RESET: &str = "\x1b[0m";

/// Parses `#RRGGBB`.
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Bar length for `value` scaled so that `max` fills `width` cells.
pub fn bar_length(value: u64, max: u64, width: usize) -> usize {
    if max == 0 {
        return 0;
    }
    let scaled = u128::from(value) * width as u128 / u128::from(max);
    usize::try_from(scaled).unwrap_or(width).max(usize::from(value > 0))
}

fn bar_line(index: usize, value: u64, max: u64, width: usize, color: Option<&str>) -> String {
    let bar = "█".repeat(bar_length(value, max, width));
    match color.and_then(hex_to_rgb) {
        Some((r, g, b)) => format!("{index:>3} \x1b[38;2;{r};{g};{b}m{bar}{RESET} {value}"),
        None => format!("{index:>3} {bar} {value}"),
    }
}

pub struct TerminalRenderer<W: Write> {
    out: W,
    bar_width: usize,
    color: bool,
    clear: bool,
    last: Vec<u64>,
    error: Option<io::Error>,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, bar_width: usize) -> Self {
        Self {
            out,
            bar_width,
            color: false,
            clear: false,
            last: Vec::new(),
            error: None,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Redraw each frame on a cleared screen instead of appending.
    pub fn with_clear(mut self, clear: bool) -> Self {
        self.clear = clear;
        self
    }

    /// First write failure seen since the last call.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    fn emit(&mut self, text: &str) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.out.write_all(text.as_bytes()).and_then(|()| self.out.flush()) {
            self.error = Some(err);
        }
    }
}

impl<W: Write> StepObserver for TerminalRenderer<W> {
    fn on_step(&mut self, event: &StepEvent<'_>) {
        self.last = event.sequence.to_vec();
        let max = self.last.iter().copied().max().unwrap_or(0);
        let status = match event.status {
            StepStatus::Progressed => "progressed",
            StepStatus::Completed => "completed",
        };

        let mut frame = String::new();
        if self.clear {
            frame.push_str(CLEAR_SCREEN);
        }
        frame.push_str(&format!("{} step {} ({status})\n", event.kind, event.step));
        for (index, &value) in self.last.iter().enumerate() {
            let color = self
                .color
                .then_some(COLOR_PALETTE[index % COLOR_PALETTE.len()]);
            frame.push_str(&bar_line(index, value, max, self.bar_width, color));
            frame.push('\n');
        }
        self.emit(&frame);
    }

    fn on_status(&mut self, message: &str) {
        self.emit(&format!("> {message}\n"));
    }

    fn on_highlight(&mut self, index: usize, color: &str) {
        let Some(&value) = self.last.get(index) else {
            return;
        };
        let max = self.last.iter().copied().max().unwrap_or(0);
        let color = self.color.then_some(color);
        let line = bar_line(index, value, max, self.bar_width, color);
        self.emit(&format!("{line} *\n"));
    }
}

/// Writes one [`PlaybackEvent`] JSON object per line.
pub struct JsonRenderer<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    pub fn write_event(&mut self, event: &PlaybackEvent) {
        if self.error.is_some() {
            return;
        }
        let result = serde_json::to_writer(&mut self.out, event)
            .map_err(io::Error::from)
            .and_then(|()| self.out.write_all(b"\n"))
            .and_then(|()| self.out.flush());
        if let Err(err) = result {
            self.error = Some(err);
        }
    }
}

impl<W: Write> StepObserver for JsonRenderer<W> {
    fn on_step(&mut self, event: &StepEvent<'_>) {
        self.write_event(&event.to_protocol());
    }

    fn on_status(&mut self, message: &str) {
        self.write_event(&PlaybackEvent::Status {
            message: message.to_string(),
        });
    }

    fn on_highlight(&mut self, index: usize, color: &str) {
        self.write_event(&PlaybackEvent::Highlight {
            index,
            color: color.to_string(),
        });
    }
}

/// Output chosen at startup: bar chart or JSON lines.
pub enum Renderer<W: Write> {
    Terminal(TerminalRenderer<W>),
    Json(JsonRenderer<W>),
}

impl<W: Write> Renderer<W> {
    /// Surfaces an engine failure to the user in the renderer's format.
    pub fn report_error(&mut self, err: &EngineError) {
        match self {
            Renderer::Terminal(renderer) => renderer.on_status(&format!("Error: {err}")),
            Renderer::Json(renderer) => renderer.write_event(&PlaybackEvent::Error(err.into())),
        }
    }

    pub fn take_error(&mut self) -> Option<io::Error> {
        match self {
            Renderer::Terminal(renderer) => renderer.take_error(),
            Renderer::Json(renderer) => renderer.take_error(),
        }
    }
}

impl<W: Write> StepObserver for Renderer<W> {
    fn on_step(&mut self, event: &StepEvent<'_>) {
        match self {
            Renderer::Terminal(renderer) => renderer.on_step(event),
            Renderer::Json(renderer) => renderer.on_step(event),
        }
    }

    fn on_status(&mut self, message: &str) {
        match self {
            Renderer::Terminal(renderer) => renderer.on_status(message),
            Renderer::Json(renderer) => renderer.on_status(message),
        }
    }

    fn on_highlight(&mut self, index: usize, color: &str) {
        match self {
            Renderer::Terminal(renderer) => renderer.on_highlight(index, color),
            Renderer::Json(renderer) => renderer.on_highlight(index, color),
        }
    }
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
