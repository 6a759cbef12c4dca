//! Element tree of a carousel synoptic.
//!
//! Nodes live in an arena and refer to their children by [`NodeId`]. The
//! tree is laid out top-down from the root rectangle each time it is built.
//! Children of the scroll area use content coordinates; everything else uses
//! view coordinates.

use crate::layout::{
    self, CURVES_WIDTH, CarouselLayout, LINE_HEIGHT, LINES_SPACING, NAV_BUTTON_WIDTH,
    ZOOM_HANDLE_HEIGHT, ZOOM_HANDLE_WIDTH,
};
use crate::model::ConveyorSide;
use crate::nav::{NavDirection, SynopticNav};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= f64::from(self.x)
            && x < f64::from(self.right())
            && y >= f64::from(self.y)
            && y < f64::from(self.bottom())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    View,
    NavButton(NavDirection),
    ScrollArea,
    Content,
    Level,
    Curve { flip: bool },
    Lines,
    Line(ConveyorSide),
    Separator,
    Bucket { slot: usize },
    ZoomHandle,
}

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub rect: Rect,
    pub visible: bool,
    pub children: Vec<NodeId>,
}

#[derive(Debug, Clone)]
pub struct Scene {
    nodes: Vec<Node>,
    buckets: Vec<NodeId>,
    scroll_offset: u32,
}

impl Scene {
    pub fn build(layout: &CarouselLayout, nav: &SynopticNav) -> Self {
        let mut scene = Self {
            nodes: Vec::new(),
            buckets: Vec::new(),
            scroll_offset: nav.offset(),
        };

        let root = scene.push(
            None,
            NodeKind::View,
            Rect::new(0, 0, layout.width, layout.height),
        );
        scene.build_view(root, layout, nav);
        scene
    }

    fn push(&mut self, parent: Option<NodeId>, kind: NodeKind, rect: Rect) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            rect,
            visible: true,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(id);
        }
        id
    }

    /// Buttons and scroll area packed left to right, hidden buttons take no room.
    fn build_view(&mut self, root: NodeId, layout: &CarouselLayout, nav: &SynopticNav) {
        let height = layout.height;
        let show_left = nav.is_button_visible(NavDirection::Left);
        let show_right = nav.is_button_visible(NavDirection::Right);
        let mut x = 0;

        let left = self.push(
            Some(root),
            NodeKind::NavButton(NavDirection::Left),
            Rect::new(x, 0, NAV_BUTTON_WIDTH, height),
        );
        self.nodes[left.0].visible = show_left;
        if show_left {
            x += NAV_BUTTON_WIDTH as i32;
        }

        let area = self.push(
            Some(root),
            NodeKind::ScrollArea,
            Rect::new(x, 0, layout.synoptic_width, height),
        );
        x += layout.synoptic_width as i32;

        let right = self.push(
            Some(root),
            NodeKind::NavButton(NavDirection::Right),
            Rect::new(x, 0, NAV_BUTTON_WIDTH, height),
        );
        self.nodes[right.0].visible = show_right;

        let content = self.push(
            Some(area),
            NodeKind::Content,
            Rect::new(0, 0, layout.content_width(), height),
        );
        self.build_level(content, layout);

        let zoom = self.push(
            Some(content),
            NodeKind::ZoomHandle,
            Rect::new(0, 0, ZOOM_HANDLE_WIDTH, ZOOM_HANDLE_HEIGHT),
        );
        self.nodes[zoom.0].visible = false;
    }

    fn build_level(&mut self, content: NodeId, layout: &CarouselLayout) {
        let level_height = layout.level_height();
        let line_width = layout.line_width();
        let level = self.push(
            Some(content),
            NodeKind::Level,
            Rect::new(0, 0, layout.content_width().saturating_sub(1), level_height),
        );

        self.push(
            Some(level),
            NodeKind::Curve { flip: true },
            Rect::new(0, 0, CURVES_WIDTH, level_height),
        );

        let lines_x = CURVES_WIDTH as i32;
        let lines = self.push(
            Some(level),
            NodeKind::Lines,
            Rect::new(lines_x, 0, line_width, level_height),
        );

        self.push(
            Some(level),
            NodeKind::Curve { flip: false },
            Rect::new(lines_x + line_width as i32, 0, CURVES_WIDTH, level_height),
        );

        let back = self.push(
            Some(lines),
            NodeKind::Line(ConveyorSide::Back),
            Rect::new(lines_x, 0, line_width, LINE_HEIGHT),
        );
        self.push(
            Some(lines),
            NodeKind::Separator,
            Rect::new(lines_x, LINE_HEIGHT as i32, line_width, LINES_SPACING),
        );
        let front = self.push(
            Some(lines),
            NodeKind::Line(ConveyorSide::Front),
            Rect::new(
                lines_x,
                (LINE_HEIGHT + LINES_SPACING) as i32,
                line_width,
                LINE_HEIGHT,
            ),
        );

        self.build_buckets(layout, back, front);
    }

    fn build_buckets(&mut self, layout: &CarouselLayout, back: NodeId, front: NodeId) {
        let offsets = |side| -> Vec<u32> {
            layout
                .line(side)
                .map(|p| p.offsets().collect())
                .unwrap_or_default()
        };
        let front_offsets = offsets(ConveyorSide::Front);
        let back_offsets = offsets(ConveyorSide::Back);

        for slot in 0..layout.nb_buckets {
            let Some(place) = layout::placement(slot, layout.nb_buckets) else {
                continue;
            };
            let (line, x_offsets) = match place.side {
                ConveyorSide::Front => (front, &front_offsets),
                ConveyorSide::Back => (back, &back_offsets),
            };
            let width = layout
                .line(place.side)
                .map(|p| p.widths()[place.index])
                .unwrap_or_default();
            let line_rect = self.nodes[line.0].rect;
            let rect = Rect::new(
                line_rect.x + x_offsets[place.index] as i32,
                line_rect.y,
                width,
                line_rect.height,
            );
            let id = self.push(Some(line), NodeKind::Bucket { slot }, rect);
            self.buckets.push(id);
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn scroll_offset(&self) -> u32 {
        self.scroll_offset
    }

    pub fn bucket_rect(&self, slot: usize) -> Option<Rect> {
        self.buckets.get(slot).map(|id| self.nodes[id.0].rect)
    }

    /// Deepest visible node under a point given in view coordinates.
    pub fn node_at(&self, x: f64, y: f64) -> Option<NodeId> {
        self.descend(self.root(), x, y)
    }

    fn descend(&self, id: NodeId, x: f64, y: f64) -> Option<NodeId> {
        let node = &self.nodes[id.0];
        if !node.visible || !node.rect.contains(x, y) {
            return None;
        }

        let (cx, cy) = match node.kind {
            NodeKind::ScrollArea => (
                x - f64::from(node.rect.x) + f64::from(self.scroll_offset),
                y - f64::from(node.rect.y),
            ),
            _ => (x, y),
        };

        // later children are stacked on top
        node.children
            .iter()
            .rev()
            .find_map(|&child| self.descend(child, cx, cy))
            .or(Some(id))
    }

    /// Ring slot of the bucket under a point in view coordinates.
    pub fn bucket_at(&self, x: f64, y: f64) -> Option<usize> {
        match self.node_at(x, y).map(|id| self.nodes[id.0].kind) {
            Some(NodeKind::Bucket { slot }) => Some(slot),
            _ => None,
        }
    }

    pub fn nav_button_at(&self, x: f64, y: f64) -> Option<NavDirection> {
        match self.node_at(x, y).map(|id| self.nodes[id.0].kind) {
            Some(NodeKind::NavButton(direction)) => Some(direction),
            _ => None,
        }
    }
}
