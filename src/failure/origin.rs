use std::fmt;
use std::panic::Location;

/// A single call-site recorded when a failure is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OriginFrame {
    pub file: &'static str,
    pub line: u32,
    pub column: u32,
}

impl OriginFrame {
    pub fn from_location(location: &'static Location<'static>) -> Self {
        Self {
            file: location.file(),
            line: location.line(),
            column: location.column(),
        }
    }

    /// Frame for whoever called the enclosing `#[track_caller]` function.
    #[track_caller]
    pub fn caller() -> Self {
        Self::from_location(Location::caller())
    }
}

impl fmt::Display for OriginFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// Diagnostic origin metadata, innermost frame first.
///
/// Rust has no automatic stack capture on construction, so frames come from
/// `#[track_caller]` locations plus whatever outer frames the caller pushes.
/// Only used for diagnostics; never serialized onto the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Origin {
    frames: Vec<OriginFrame>,
}

impl Origin {
    pub fn empty() -> Self {
        Self { frames: Vec::new() }
    }

    #[track_caller]
    pub fn here() -> Self {
        Self {
            frames: vec![OriginFrame::caller()],
        }
    }

    pub fn from_frames(frames: Vec<OriginFrame>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[OriginFrame] {
        &self.frames
    }

    pub fn first(&self) -> Option<&OriginFrame> {
        self.frames.first()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn push(&mut self, frame: OriginFrame) {
        self.frames.push(frame);
    }

    pub fn extend(&mut self, frames: impl IntoIterator<Item = OriginFrame>) {
        self.frames.extend(frames);
    }

    /// Drops the innermost frame. No-op on an empty origin.
    pub fn drop_first(&mut self) {
        if !self.frames.is_empty() {
            self.frames.remove(0);
        }
    }
}
