/// Horizontal paging of the synoptic scroll area.
///
/// The content is two pages wide. Only the button that leads to the hidden
/// page is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SynopticNav {
    page_width: u32,
    offset: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavDirection {
    Left,
    Right,
}

impl SynopticNav {
    pub fn new(page_width: u32) -> Self {
        Self {
            page_width,
            offset: 0,
        }
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn page_width(&self) -> u32 {
        self.page_width
    }

    pub fn scroll(&mut self, direction: NavDirection) -> bool {
        let target = match direction {
            NavDirection::Right => self.offset.saturating_add(self.page_width),
            NavDirection::Left => self.offset.saturating_sub(self.page_width),
        }
        .min(self.page_width);

        let moved = target != self.offset;
        self.offset = target;
        moved
    }

    pub fn is_button_visible(&self, direction: NavDirection) -> bool {
        match direction {
            NavDirection::Left => self.offset > 0,
            NavDirection::Right => self.offset < self.page_width,
        }
    }
}
