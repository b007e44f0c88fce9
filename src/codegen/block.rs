// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Indentation-aware source builder.
//!
//! Lines, blocks and groups form a tree that renders with four spaces per
//! block level. A group collects statements that belong together without
//! adding a level, so an emitter can return several statements as one
//! element.

const INDENT: &str = "    ";

/// One node of the source tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeElement {
    /// A single line; empty renders as a blank line
    Line(String),
    /// Delimited block, one level deeper
    Block(CodeBlock),
    /// Statements at the enclosing level
    Group(CodeGroup),
}

impl CodeElement {
    fn write(&self, level: usize, out: &mut String) {
        match self {
            CodeElement::Line(line) => write_line(level, line, out),
            CodeElement::Block(block) => block.write(level, out),
            CodeElement::Group(group) => {
                for child in &group.children {
                    child.write(level, out);
                }
            }
        }
    }
}

impl From<CodeBlock> for CodeElement {
    fn from(block: CodeBlock) -> Self {
        CodeElement::Block(block)
    }
}

impl From<CodeGroup> for CodeElement {
    fn from(group: CodeGroup) -> Self {
        CodeElement::Group(group)
    }
}

fn write_line(level: usize, line: &str, out: &mut String) {
    if !line.is_empty() {
        for _ in 0..level {
            out.push_str(INDENT);
        }
        out.push_str(line);
    }
    out.push('\n');
}

/// A `header {` ... `}` block, or `header[` ... `]` for lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    header: String,
    list: bool,
    suffix: &'static str,
    children: Vec<CodeElement>,
}

impl CodeBlock {
    /// Brace-delimited block opened on the header line.
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            list: false,
            suffix: "",
            children: Vec::new(),
        }
    }

    /// Bracket-delimited list opened directly after the header.
    pub fn list(header: impl Into<String>) -> Self {
        Self {
            list: true,
            ..Self::new(header)
        }
    }

    /// Close with `},`.
    pub fn with_comma(mut self) -> Self {
        self.suffix = ",";
        self
    }

    /// Close with `};`.
    pub fn with_semicolon(mut self) -> Self {
        self.suffix = ";";
        self
    }

    /// Append a line.
    pub fn add_line(&mut self, line: impl Into<String>) -> &mut Self {
        self.children.push(CodeElement::Line(line.into()));
        self
    }

    /// Append a nested element.
    pub fn add(&mut self, element: impl Into<CodeElement>) -> &mut Self {
        self.children.push(element.into());
        self
    }

    /// True when nothing has been added.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Render at the top level.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write(0, &mut out);
        out
    }

    fn write(&self, level: usize, out: &mut String) {
        let (open, close) = if self.list { ("[", "]") } else { ("{", "}") };
        let opener = match (self.header.is_empty(), self.list) {
            (true, _) => open.to_string(),
            (false, true) => format!("{}{open}", self.header),
            (false, false) => format!("{} {open}", self.header),
        };
        write_line(level, &opener, out);
        for child in &self.children {
            child.write(level + 1, out);
        }
        write_line(level, &format!("{close}{}", self.suffix), out);
    }
}

/// Statements rendered at the level of whatever contains them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeGroup {
    children: Vec<CodeElement>,
}

impl CodeGroup {
    /// Empty group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line.
    pub fn add_line(&mut self, line: impl Into<String>) -> &mut Self {
        self.children.push(CodeElement::Line(line.into()));
        self
    }

    /// Append a nested element.
    pub fn add(&mut self, element: impl Into<CodeElement>) -> &mut Self {
        self.children.push(element.into());
        self
    }

    /// Render at the top level.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.write(0, &mut out);
        }
        out
    }
}
