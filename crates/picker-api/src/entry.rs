/// A highlighted byte range inside [`DirEntry::display`].
///
/// `group` is a style hint (for example `"Directory"`). Hosts decide how a
/// group maps onto colours and must snap the range to char boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightSpan {
    pub start: usize,
    pub end: usize,
    pub group: &'static str,
}

impl HighlightSpan {
    pub const fn new(start: usize, end: usize, group: &'static str) -> Self {
        Self { start, end, group }
    }

    /// Clamp the span to `text`, widening it to the surrounding char boundaries.
    pub fn snapped_to(&self, text: &str) -> Option<(usize, usize)> {
        let len = text.len();
        let mut start = self.start.min(len);
        let mut end = self.end.min(len);
        while start > 0 && !text.is_char_boundary(start) {
            start -= 1;
        }
        while end < len && !text.is_char_boundary(end) {
            end += 1;
        }
        (start < end).then_some((start, end))
    }
}

/// One candidate directory in the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Full path handed to directory handlers.
    pub value: String,
    /// Label rendered in the result list.
    pub display: String,
    /// Key the sorter scores against.
    pub ordinal: String,
    pub highlights: Vec<HighlightSpan>,
}

impl DirEntry {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            display: value.clone(),
            ordinal: value.clone(),
            value,
            highlights: Vec::new(),
        }
    }

    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = display.into();
        self
    }

    pub fn with_highlight(mut self, span: HighlightSpan) -> Self {
        self.highlights.push(span);
        self
    }
}
