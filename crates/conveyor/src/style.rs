use crate::model::{BucketState, ContainerTrayState, OutputTrayState};
use palette::Srgba;

fn rgb(red: u8, green: u8, blue: u8) -> Srgba<u8> {
    Srgba::new(red, green, blue, 255)
}

pub fn black() -> Srgba<u8> {
    rgb(0, 0, 0)
}

/// Synoptic background when the desktop theme does not provide one.
pub fn background() -> Srgba<u8> {
    rgb(0xFF, 0xFF, 0xFF)
}

/// Highlight shown while a tray is held down.
pub fn pressed() -> Srgba<u8> {
    rgb(0x5E, 0xA9, 0xF3)
}

pub fn output_selected() -> Srgba<u8> {
    rgb(0x5E, 0x96, 0xEB)
}

pub fn container_selected() -> Srgba<u8> {
    rgb(0x12, 0x8A, 0xE6)
}

pub fn zoom_default() -> Srgba<u8> {
    rgb(109, 224, 230)
}

pub fn zoom_selected() -> Srgba<u8> {
    rgb(94, 150, 235)
}

/// End-cap fill of the carousel.
pub fn curve_fill() -> Srgba<u8> {
    rgb(170, 170, 170)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fill {
    Solid(Srgba<u8>),
    /// Diagonal hatching on a transparent background, used for unknown contents.
    Hatched,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Border {
    pub width: u8,
    pub color: Srgba<u8>,
    /// Adjacent trays share an edge, only the last one in a line draws its right side.
    pub right_edge: bool,
}

impl Border {
    pub fn solid(width: u8, color: Srgba<u8>, is_last: bool) -> Self {
        Self {
            width,
            color,
            right_edge: is_last,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrayStyle {
    pub fill: Fill,
    pub border: Border,
    pub overlay: Option<Srgba<u8>>,
}

impl TrayStyle {
    fn plain(fill: Fill, is_last: bool) -> Self {
        Self {
            fill,
            border: Border::solid(1, black(), is_last),
            overlay: None,
        }
    }
}

pub fn bucket_fill(state: BucketState) -> Fill {
    match state {
        BucketState::Empty => Fill::Solid(rgb(0xFF, 0xFF, 0xFF)),
        BucketState::Injected => Fill::Solid(rgb(0x99, 0xCC, 0xFF)),
        BucketState::Sorted => Fill::Solid(rgb(0x73, 0xE6, 0x00)),
        BucketState::Rejected => Fill::Solid(rgb(0xFF, 0x9D, 0x3B)),
        BucketState::Failure => Fill::Solid(rgb(0xE4, 0x34, 0x34)),
        BucketState::Disabled => Fill::Solid(rgb(0x80, 0x80, 0x80)),
        BucketState::Unknown => Fill::Hatched,
    }
}

pub fn bucket_style(state: BucketState, is_last: bool) -> TrayStyle {
    TrayStyle::plain(bucket_fill(state), is_last)
}

pub fn output_style(state: OutputTrayState, selected: bool, is_last: bool) -> TrayStyle {
    let color = if selected {
        output_selected()
    } else {
        match state {
            OutputTrayState::Enabled => rgb(0xE1, 0xF4, 0xFF),
            OutputTrayState::InhibitedU => rgb(0x82, 0x82, 0xC4),
            OutputTrayState::InhibitedPatd => rgb(0x6D, 0xAD, 0xAD),
            OutputTrayState::InhibitedSd => rgb(0xB8, 0x8C, 0x5A),
        }
    };
    TrayStyle::plain(Fill::Solid(color), is_last)
}

pub fn container_style(state: ContainerTrayState, selected: bool, is_last: bool) -> TrayStyle {
    let fill = match state {
        ContainerTrayState::Unknown => Fill::Solid(rgb(0xF4, 0x42, 0x42)),
        ContainerTrayState::Empty => Fill::Solid(rgb(0xF9, 0xF6, 0xE8)),
        ContainerTrayState::NotEmpty => Fill::Solid(rgb(0xFA, 0xC1, 0x91)),
        ContainerTrayState::Ejected => Fill::Hatched,
    };

    if selected && state != ContainerTrayState::Ejected {
        // A selected container is boxed on every side, last in line or not.
        let highlight = container_selected();
        TrayStyle {
            fill,
            border: Border::solid(3, highlight, true),
            overlay: Some(Srgba::new(highlight.red, highlight.green, highlight.blue, 51)),
        }
    } else {
        TrayStyle::plain(fill, is_last)
    }
}

pub fn zoom_style(selected: bool, default: Srgba<u8>, is_last: bool) -> TrayStyle {
    let color = if selected { zoom_selected() } else { default };
    TrayStyle {
        fill: Fill::Solid(color),
        border: Border::solid(2, black(), is_last),
        overlay: None,
    }
}
