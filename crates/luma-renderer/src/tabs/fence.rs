//! Code fence detection for line-based directive scanning.
//!
//! Tag syntax inside fenced code blocks is sample text, not markup.

/// An open code fence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Fence {
    marker: char,
    len: usize,
}

/// Line-by-line tracker of whether the scanner is inside a code fence.
///
/// Fences open with three or more backticks or tildes; the closing fence
/// uses the same marker, is at least as long and has nothing but
/// whitespace after it.
#[derive(Debug, Default)]
pub(crate) struct FenceTracker {
    open: Option<Fence>,
}

impl FenceTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn in_fence(&self) -> bool {
        self.open.is_some()
    }

    /// Feed one line. Returns `true` when the line opened or closed a fence.
    pub(crate) fn update(&mut self, line: &str) -> bool {
        let Some((marker, len, rest)) = fence_run(line.trim_start()) else {
            return false;
        };

        match self.open {
            Some(open) => {
                let closes = marker == open.marker && len >= open.len && rest.trim().is_empty();
                if closes {
                    self.open = None;
                }
                closes
            }
            None => {
                self.open = Some(Fence { marker, len });
                true
            }
        }
    }
}

/// Split a leading run of three or more fence markers off a line.
fn fence_run(trimmed: &str) -> Option<(char, usize, &str)> {
    let marker = trimmed.chars().next().filter(|c| matches!(c, '`' | '~'))?;
    let len = trimmed.chars().take_while(|&c| c == marker).count();
    // Fence markers are ASCII, so the char count is also the byte offset.
    (len >= 3).then(|| (marker, len, &trimmed[len..]))
}
