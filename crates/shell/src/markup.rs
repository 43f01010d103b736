//! The inline tag language used in terminal output, e.g.
//! `[g]Directories:[/g] [dir]documents/[/dir]`.
//!
//! Known tags nest on a stack. A closing tag pops whatever is innermost, a
//! stray closing tag is dropped, and anything still open at the end of the
//! line closes implicitly. Unknown tags are kept as literal text.

const RESET: &str = "\x1b[0m";
const RESTRICTED_MARKER: &str = "(restricted access)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Red,
    Green,
    Blue,
    Yellow,
    Cyan,
    White,
    Restricted,
    Directory,
    File,
    Executable,
}

impl Tag {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "r" => Some(Tag::Red),
            "g" => Some(Tag::Green),
            "b" => Some(Tag::Blue),
            "y" => Some(Tag::Yellow),
            "c" => Some(Tag::Cyan),
            "w" => Some(Tag::White),
            "rst" => Some(Tag::Restricted),
            "dir" => Some(Tag::Directory),
            "file" => Some(Tag::File),
            "exe" => Some(Tag::Executable),
            _ => None,
        }
    }

    /// Tags that mark a clickable listing entry rather than a plain color.
    pub fn is_item(self) -> bool {
        matches!(
            self,
            Tag::Restricted | Tag::Directory | Tag::File | Tag::Executable
        )
    }

    fn sgr(self) -> &'static str {
        match self {
            Tag::Red | Tag::Restricted => "\x1b[31m",
            Tag::Green | Tag::Executable => "\x1b[32m",
            Tag::Yellow => "\x1b[33m",
            Tag::Blue => "\x1b[34m",
            Tag::Cyan => "\x1b[36m",
            Tag::White | Tag::File => "\x1b[37m",
            Tag::Directory => "\x1b[1;34m",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: Option<Tag>,
}

#[derive(Default)]
struct SpanBuilder {
    spans: Vec<Span>,
    text: String,
    stack: Vec<Tag>,
}

impl SpanBuilder {
    fn flush(&mut self) {
        if self.text.is_empty() {
            return;
        }
        self.spans.push(Span {
            text: std::mem::take(&mut self.text),
            style: self.stack.last().copied(),
        });
    }

    fn open(&mut self, tag: Tag) {
        self.flush();
        self.stack.push(tag);
    }

    fn close(&mut self) {
        if self.stack.is_empty() {
            return;
        }
        self.flush();
        self.stack.pop();
    }

    fn finish(mut self) -> Vec<Span> {
        self.flush();
        self.spans
    }
}

pub fn parse(line: &str) -> Vec<Span> {
    let mut builder = SpanBuilder::default();
    let mut rest = line;

    while let Some(start) = rest.find('[') {
        builder.text.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        let Some(end) = after.find(']') else {
            builder.text.push_str(&rest[start..]);
            rest = "";
            break;
        };

        let inner = &after[..end];
        let (closing, name) = match inner.strip_prefix('/') {
            Some(name) => (true, name),
            None => (false, inner),
        };

        match Tag::from_name(name) {
            Some(_) if closing => builder.close(),
            Some(tag) => builder.open(tag),
            None => {
                // not a tag: keep the bracket and rescan from the next char
                builder.text.push('[');
                rest = after;
                continue;
            }
        }
        rest = &after[end + 1..];
    }

    builder.text.push_str(rest);
    builder.finish()
}

/// The line with every known tag removed.
pub fn to_plain(line: &str) -> String {
    parse(line).into_iter().map(|span| span.text).collect()
}

pub fn to_ansi(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    for span in parse(line) {
        match span.style {
            Some(tag) => {
                out.push_str(tag.sgr());
                out.push_str(&span.text);
                out.push_str(RESET);
            }
            None => out.push_str(&span.text),
        }
    }
    out
}

/// A clickable listing entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub kind: Tag,
    pub name: String,
    pub directory: bool,
}

impl Item {
    /// The command a click on this entry would run.
    pub fn command(&self) -> String {
        if self.directory {
            format!("cd {}", self.name)
        } else {
            format!("cat {}", self.name)
        }
    }
}

pub fn items(line: &str) -> Vec<Item> {
    parse(line)
        .into_iter()
        .filter_map(|span| {
            let kind = span.style.filter(|tag| tag.is_item())?;
            let label = span.text.replace(RESTRICTED_MARKER, "");
            let label = label.trim();
            let directory = kind == Tag::Directory || label.ends_with('/');
            let name = label.trim_end_matches('/');
            if name.is_empty() {
                return None;
            }
            Some(Item {
                kind,
                name: name.to_string(),
                directory,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_listing_line() {
        let spans = parse("[g]Directories:[/g] [dir]documents/[/dir]");
        assert_eq!(
            spans,
            vec![
                Span { text: "Directories:".to_string(), style: Some(Tag::Green) },
                Span { text: " ".to_string(), style: None },
                Span { text: "documents/".to_string(), style: Some(Tag::Directory) },
            ]
        );
    }

    #[test]
    fn test_unclosed_tag_closes_at_end() {
        let spans = parse("[r]alert");
        assert_eq!(spans, vec![Span { text: "alert".to_string(), style: Some(Tag::Red) }]);
    }

    #[test]
    fn test_unknown_tags_pass_through() {
        assert_eq!(to_plain("[x]odd[/x] [1] text"), "[x]odd[/x] [1] text");
        assert_eq!(to_plain("array[0] and [g]ok"), "array[0] and ok");
        assert_eq!(to_plain("dangling [g"), "dangling [g");
    }

    #[test]
    fn test_stray_close_is_dropped() {
        assert_eq!(to_plain("a[/g]b"), "ab");
    }

    #[test]
    fn test_nested_styles() {
        let spans = parse("[y]outer [r]inner[/r] tail[/y]");
        let styles: Vec<_> = spans.iter().map(|span| span.style).collect();
        assert_eq!(styles, vec![Some(Tag::Yellow), Some(Tag::Red), Some(Tag::Yellow)]);
    }

    #[test]
    fn test_to_ansi() {
        assert_eq!(to_ansi("[exe]tetris[/exe]!"), "\x1b[32mtetris\x1b[0m!");
        assert_eq!(to_ansi("plain"), "plain");
    }

    #[test]
    fn test_items_and_commands() {
        let line = "[g]Directories:[/g] [dir]documents/[/dir] [rst]restricted/ (restricted access)[/rst]";
        let found = items(line);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].name, "documents");
        assert_eq!(found[0].command(), "cd documents");
        assert_eq!(found[1].kind, Tag::Restricted);
        assert_eq!(found[1].name, "restricted");
        assert!(found[1].directory);

        let found = items("[c]Scenes:[/c] [exe]welcome[/exe] [rst]admin_panel (restricted access)[/rst]");
        assert_eq!(found[0].command(), "cat welcome");
        assert_eq!(found[1].command(), "cat admin_panel");
    }
}
