//! src/ui/node.rs
//!
//! Recursive layout Node + Panel trait used to compose each frame.
//!
//! Panels borrow the data they render for the duration of one frame, so the
//! tree is rebuilt on every draw.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Panel trait: any renderable surface implements this.
pub trait Panel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect);
}

/// Node tree used to compose the UI each frame.
pub enum Node<'a> {
    Group {
        direction: Direction,
        constraints: Vec<Constraint>,
        children: Vec<Node<'a>>,
    },
    Leaf {
        panel: Box<dyn Panel + 'a>,
    },
}

impl Node<'_> {
    /// Draw the node into the given area.
    pub fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        match self {
            Node::Group {
                direction,
                constraints,
                children,
            } => {
                let chunks = Layout::default()
                    .direction(*direction)
                    .constraints(constraints.iter().copied())
                    .split(area);
                for (child, chunk) in children.iter().zip(chunks.iter()) {
                    child.draw(f, *chunk);
                }
            }
            Node::Leaf { panel } => panel.draw(f, area),
        }
    }
}

/// Split `area` vertically among `children`.
pub fn column<'a>(constraints: Vec<Constraint>, children: Vec<Node<'a>>) -> Node<'a> {
    Node::Group {
        direction: Direction::Vertical,
        constraints,
        children,
    }
}

/// Split `area` horizontally among `children`.
pub fn row<'a>(constraints: Vec<Constraint>, children: Vec<Node<'a>>) -> Node<'a> {
    Node::Group {
        direction: Direction::Horizontal,
        constraints,
        children,
    }
}

/// Wrap a panel as a leaf node.
pub fn leaf<'a>(panel: impl Panel + 'a) -> Node<'a> {
    Node::Leaf {
        panel: Box::new(panel),
    }
}
