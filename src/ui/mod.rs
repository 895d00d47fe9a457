// ── UI state & text pagination ───────────────────────────────────────────────

pub mod click;

use std::collections::VecDeque;

use crate::world::Command;

/// Marker appended to the last line of every page that has a successor.
pub const ELLIPSIS: &str = "..";
/// Columns reserved for the marker: one separating space plus the marker.
const ELLIPSIS_COST: usize = 1 + ELLIPSIS.len();
/// Narrowest line that still leaves room for one character and the marker.
pub const MIN_LINE_WIDTH: usize = ELLIPSIS_COST + 1;

/// One page of wrapped text: up to `lines_per_page` display-ready lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    pub lines: Vec<String>,
}

impl Page {
    pub fn ends_with_ellipsis(&self) -> bool {
        self.lines.last().is_some_and(|l| l.ends_with(ELLIPSIS))
    }
}

struct Line {
    words: Vec<String>,
    continued: bool,
}

impl Line {
    fn width(&self) -> usize {
        let chars: usize = self.words.iter().map(|w| w.chars().count()).sum();
        chars + self.words.len().saturating_sub(1)
    }

    fn render(self) -> String {
        let mut s = self.words.join(" ");
        if self.continued {
            s.push(' ');
            s.push_str(ELLIPSIS);
        }
        s
    }
}

/// Split on whitespace and hard-break any word longer than `cap` chars.
fn split_words(text: &str, cap: usize) -> VecDeque<String> {
    let mut out = VecDeque::new();
    for word in text.split_whitespace() {
        let chars: Vec<char> = word.chars().collect();
        for chunk in chars.chunks(cap) {
            out.push_back(chunk.iter().collect());
        }
    }
    out
}

/// Word-wrap `text` into lines of at most `line_width` chars and group them
/// into pages of `lines_per_page` lines.
///
/// Words are packed greedily. When a line closes on a page boundary, trailing
/// words of that page's last line are moved back to the next page until the
/// line fits `line_width - 3`, and the line gets a ` ..` continuation marker.
/// No text is dropped. Words longer than `line_width - 3` are split so the
/// move-back always terminates.
///
/// `line_width` is raised to [`MIN_LINE_WIDTH`] and `lines_per_page` to 1.
/// The function is pure: the same input always yields the same pages.
pub fn paginate(text: &str, line_width: usize, lines_per_page: usize) -> Vec<Page> {
    let width = line_width.max(MIN_LINE_WIDTH);
    let per_page = lines_per_page.max(1);
    let cap = width - ELLIPSIS_COST;

    let mut queue = split_words(text, cap);
    let mut lines: Vec<Line> = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut current_len = 0usize;

    while let Some(word) = queue.pop_front() {
        let len = word.chars().count();
        let cost = if current.is_empty() { len } else { len + 1 };

        if current.is_empty() || current_len + cost <= width {
            current.push(word);
            current_len += cost;
            continue;
        }

        lines.push(Line { words: std::mem::take(&mut current), continued: false });
        current_len = 0;
        queue.push_front(word);

        if lines.len() % per_page == 0 {
            if let Some(last) = lines.last_mut() {
                while last.width() > cap && last.words.len() > 1 {
                    if let Some(moved) = last.words.pop() {
                        queue.push_front(moved);
                    }
                }
                last.continued = true;
            }
        }
    }
    if !current.is_empty() {
        lines.push(Line { words: current, continued: false });
    }

    let mut pages = Vec::with_capacity(lines.len().div_ceil(per_page));
    let mut lines = lines.into_iter().peekable();
    while lines.peek().is_some() {
        let page: Vec<String> = lines.by_ref().take(per_page).map(Line::render).collect();
        pages.push(Page { lines: page });
    }
    pages
}

// ── PageSet ──────────────────────────────────────────────────────────────────

/// Paginated message plus the reader's position in it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageSet {
    pages: Vec<Page>,
    cursor: usize,
}

impl PageSet {
    pub fn from_text(text: &str, line_width: usize, lines_per_page: usize) -> Self {
        Self { pages: paginate(text, line_width, lines_per_page), cursor: 0 }
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> Option<&Page> {
        self.pages.get(self.cursor)
    }

    pub fn has_prev(&self) -> bool {
        self.cursor > 0
    }

    pub fn has_next(&self) -> bool {
        self.cursor + 1 < self.pages.len()
    }

    /// Move to page `index`, clamped to the valid range.
    pub fn goto(&mut self, index: usize) {
        self.cursor = index.min(self.pages.len().saturating_sub(1));
    }

    pub fn next(&mut self) {
        self.goto(self.cursor.saturating_add(1));
    }

    pub fn prev(&mut self) {
        self.goto(self.cursor.saturating_sub(1));
    }
}

// ── UiState ──────────────────────────────────────────────────────────────────

/// State mutated by click handlers and message changes; read during draw.
#[derive(Debug, Default)]
pub struct UiState {
    pub pages: PageSet,
    message: String,
    line_width: usize,
    lines_per_page: usize,
    /// Commands queued by click handlers, drained by the controller.
    pub pending: Vec<Command>,
}

impl UiState {
    pub fn new(line_width: usize, lines_per_page: usize) -> Self {
        Self { line_width, lines_per_page, ..Self::default() }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Repaginate when the message changed; the cursor goes back to page 0.
    /// Returns whether anything changed.
    pub fn set_message(&mut self, message: &str) -> bool {
        if self.message == message {
            return false;
        }
        self.message = message.to_owned();
        self.pages = PageSet::from_text(message, self.line_width, self.lines_per_page);
        tracing::debug!(pages = self.pages.len(), "message repaginated");
        true
    }

    /// Drop the message, its pages and any queued commands.
    pub fn clear(&mut self) {
        self.message.clear();
        self.pages = PageSet::default();
        self.pending.clear();
    }
}
