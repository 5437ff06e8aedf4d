use serde::{Deserialize, Serialize};

use crate::classify::line_level;

/// One heading of the outline with its body lines and sub-headings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutlineNode {
    #[serde(rename = "text")]
    pub title: String,
    pub level: u8,
    pub content: Vec<String>,
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    fn open(title: &str, level: u8) -> Self {
        OutlineNode { title: title.to_string(), level, content: Vec::new(), children: Vec::new() }
    }
}

/// Single-pass outline builder.
///
/// Open headings live on a stack whose bottom is a level-0 root that is
/// never emitted. Levels strictly increase from bottom to top. A node is
/// attached to its parent when it is popped, which keeps sibling order.
#[derive(Debug)]
pub struct OutlineBuilder {
    stack: Vec<OutlineNode>,
}

impl Default for OutlineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl OutlineBuilder {
    pub fn new() -> Self {
        OutlineBuilder { stack: vec![OutlineNode::default()] }
    }

    /// Levels of the currently open nodes, root first.
    pub fn open_levels(&self) -> Vec<u8> {
        self.stack.iter().map(|n| n.level).collect()
    }

    fn close_top(&mut self) {
        if self.stack.len() > 1 {
            if let Some(done) = self.stack.pop() {
                if let Some(parent) = self.stack.last_mut() {
                    parent.children.push(done);
                }
            }
        }
    }

    /// Feed one line. Blank lines are ignored.
    pub fn push_line(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        let level = line_level(line);
        if level == 0 {
            if let Some(top) = self.stack.last_mut() {
                top.content.push(line.to_string());
            }
            return;
        }
        while self.stack.len() > 1 && self.stack.last().is_some_and(|top| top.level >= level) {
            self.close_top();
        }
        self.stack.push(OutlineNode::open(line, level));
    }

    /// Close every open heading and split the root into the body lines seen
    /// before any heading and the outline forest.
    pub fn into_parts(mut self) -> (Vec<String>, Vec<OutlineNode>) {
        while self.stack.len() > 1 {
            self.close_top();
        }
        match self.stack.pop() {
            Some(root) => (root.content, root.children),
            None => (Vec::new(), Vec::new()),
        }
    }

    /// The outline forest; lines before the first heading are not part of it.
    pub fn finish(self) -> Vec<OutlineNode> {
        self.into_parts().1
    }
}

/// Build the outline forest of a section, one line per `\n`.
pub fn build_outline(text: &str) -> Vec<OutlineNode> {
    let mut builder = OutlineBuilder::new();
    for line in text.lines() {
        builder.push_line(line);
    }
    builder.finish()
}

const PREVIEW_WIDTH: usize = 60;

fn shorten(s: &str) -> String {
    if s.chars().count() > PREVIEW_WIDTH {
        let head: String = s.chars().take(PREVIEW_WIDTH).collect();
        format!("{}...", head)
    } else {
        s.to_string()
    }
}

fn render_into(nodes: &[OutlineNode], depth: usize, out: &mut String) {
    let indent = "    ".repeat(depth);
    for node in nodes {
        out.push_str(&format!("{}[L{}] {}\n", indent, node.level, shorten(&node.title)));
        for line in &node.content {
            out.push_str(&format!("{}    [Body] {}\n", indent, shorten(line)));
        }
        render_into(&node.children, depth + 1, out);
    }
}

/// Indented plain-text preview of an outline.
pub fn render_outline(nodes: &[OutlineNode]) -> String {
    let mut out = String::new();
    render_into(nodes, 0, &mut out);
    out
}
