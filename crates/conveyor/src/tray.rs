//! Trays: every rectangle of the synoptic that carries an id, a color and
//! optionally a label. Shared behaviour lives in [`Tray`], what differs per
//! kind of tray lives behind [`TrayKind`].

use crate::model::{
    BucketState, ContainerTrayState, ConveyorLevel, ConveyorSide, OutputId, OutputTrayState,
    ProductCode, TrayId,
};
use crate::style::{self, Fill, TrayStyle};
use palette::Srgba;
use std::fmt;

pub trait TrayKind {
    type State: Copy + PartialEq + fmt::Debug;

    fn state(&self) -> Self::State;

    fn store(&mut self, state: Self::State);

    fn style(&self, selected: bool, is_last: bool) -> TrayStyle;

    /// State to go back to on [`Tray::restore_previous_state`].
    fn previous_state(&self) -> Option<Self::State> {
        None
    }

    fn selectable(&self) -> bool {
        true
    }

    /// Whether the current state may stay selected.
    fn keeps_selection(&self) -> bool {
        true
    }

    fn on_select(&mut self) {}

    fn on_deselect(&mut self) {}
}

#[derive(Debug, Clone)]
pub struct Tray<K> {
    id: TrayId,
    label: Option<String>,
    selected: bool,
    is_last: bool,
    pressed: bool,
    style: TrayStyle,
    kind: K,
}

impl<K: TrayKind> Tray<K> {
    pub fn new(id: TrayId, kind: K) -> Self {
        let style = kind.style(false, false);
        Self {
            id,
            label: None,
            selected: false,
            is_last: false,
            pressed: false,
            style,
            kind,
        }
    }

    pub fn id(&self) -> TrayId {
        self.id
    }

    pub fn set_id(&mut self, id: TrayId) {
        self.id = id;
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = Some(label.into());
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_last(&self) -> bool {
        self.is_last
    }

    pub fn set_is_last(&mut self, is_last: bool) {
        self.is_last = is_last;
        self.restyle();
    }

    pub fn kind(&self) -> &K {
        &self.kind
    }

    pub fn state(&self) -> K::State {
        self.kind.state()
    }

    pub fn style(&self) -> &TrayStyle {
        &self.style
    }

    /// Fill currently on screen, the pressed highlight while held down.
    pub fn fill(&self) -> Fill {
        if self.pressed {
            Fill::Solid(style::pressed())
        } else {
            self.style.fill
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn set_state(&mut self, state: K::State) {
        self.kind.store(state);
        if !self.kind.keeps_selection() {
            self.selected = false;
        }
        self.restyle();
    }

    pub fn restore_previous_state(&mut self) {
        if let Some(previous) = self.kind.previous_state() {
            self.set_state(previous);
        }
    }

    /// Returns `false` when already selected or when the tray refuses selection.
    pub fn select(&mut self) -> bool {
        if self.selected || !self.kind.selectable() {
            return false;
        }
        self.selected = true;
        self.kind.on_select();
        self.restyle();
        true
    }

    pub fn deselect(&mut self) -> bool {
        if !self.selected || !self.kind.selectable() {
            return false;
        }
        self.selected = false;
        self.kind.on_deselect();
        self.restyle();
        true
    }

    /// Swaps in the pressed highlight. A second press while held is ignored.
    pub fn press(&mut self) -> bool {
        if self.pressed {
            return false;
        }
        self.pressed = true;
        true
    }

    /// Puts back the fill of the current state and reports the tray id once.
    pub fn release(&mut self) -> Option<TrayId> {
        if !self.pressed {
            return None;
        }
        self.pressed = false;
        Some(self.id)
    }

    fn restyle(&mut self) {
        self.style = self.kind.style(self.selected, self.is_last);
    }
}

// Buckets

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketKind {
    pub state: BucketState,
    pub previous_state: BucketState,
    pub side: ConveyorSide,
    pub level: ConveyorLevel,
    pub disabled: bool,
}

impl BucketKind {
    pub fn new(side: ConveyorSide, level: ConveyorLevel) -> Self {
        Self {
            state: BucketState::Empty,
            previous_state: BucketState::Empty,
            side,
            level,
            disabled: false,
        }
    }
}

impl TrayKind for BucketKind {
    type State = BucketState;

    fn state(&self) -> BucketState {
        self.state
    }

    fn store(&mut self, state: BucketState) {
        if state == BucketState::Disabled {
            if self.state != BucketState::Disabled {
                self.previous_state = self.state;
            }
            self.disabled = true;
        } else {
            self.disabled = false;
        }
        self.state = state;
    }

    fn style(&self, _selected: bool, is_last: bool) -> TrayStyle {
        style::bucket_style(self.state, is_last)
    }

    fn previous_state(&self) -> Option<BucketState> {
        self.disabled.then_some(self.previous_state)
    }
}

pub type BucketTray = Tray<BucketKind>;

impl Tray<BucketKind> {
    pub fn bucket(id: TrayId, side: ConveyorSide, level: ConveyorLevel) -> Self {
        Self::new(id, BucketKind::new(side, level))
    }

    pub fn is_disabled(&self) -> bool {
        self.kind.disabled
    }
}

// Output trays

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputKind {
    pub state: OutputTrayState,
    pub previous_state: OutputTrayState,
    pub side: ConveyorSide,
    pub level: ConveyorLevel,
    pub output_id: OutputId,
}

impl OutputKind {
    fn output_base(level: ConveyorLevel, side: ConveyorSide) -> u32 {
        match (level, side) {
            (ConveyorLevel::Upper, ConveyorSide::Front) => 21001,
            (ConveyorLevel::Upper, ConveyorSide::Back) => 22001,
            (_, ConveyorSide::Front) => 11001,
            (_, ConveyorSide::Back) => 12001,
        }
    }
}

impl TrayKind for OutputKind {
    type State = OutputTrayState;

    fn state(&self) -> OutputTrayState {
        self.state
    }

    fn store(&mut self, state: OutputTrayState) {
        self.state = state;
    }

    fn style(&self, selected: bool, is_last: bool) -> TrayStyle {
        style::output_style(self.state, selected, is_last)
    }

    fn previous_state(&self) -> Option<OutputTrayState> {
        Some(self.previous_state)
    }

    fn on_select(&mut self) {
        self.previous_state = self.state;
    }

    fn on_deselect(&mut self) {
        self.state = self.previous_state;
    }
}

pub type OutputTray = Tray<OutputKind>;

impl Tray<OutputKind> {
    /// Output tray labelled `"UF\n3"` style with its sorter output number.
    pub fn output(id: TrayId, level: ConveyorLevel, side: ConveyorSide) -> Self {
        let output_id = OutputId::new((OutputKind::output_base(level, side) + *id).to_string());
        let kind = OutputKind {
            state: OutputTrayState::Enabled,
            previous_state: OutputTrayState::Enabled,
            side,
            level,
            output_id,
        };
        let mut tray = Self::new(id, kind);
        tray.set_label(format!("{}{}\n{}", level.prefix(), side.prefix(), id));
        tray
    }

    pub fn output_id(&self) -> &OutputId {
        &self.kind.output_id
    }
}

// Container trays

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerKind {
    pub state: ContainerTrayState,
    pub previous_state: ContainerTrayState,
    pub side: ConveyorSide,
    pub level: ConveyorLevel,
    pub tray_ref: Option<String>,
    pub output: Option<OutputId>,
    pub sorting_product: ProductCode,
}

impl TrayKind for ContainerKind {
    type State = ContainerTrayState;

    fn state(&self) -> ContainerTrayState {
        self.state
    }

    fn store(&mut self, state: ContainerTrayState) {
        self.state = state;
    }

    fn style(&self, selected: bool, is_last: bool) -> TrayStyle {
        style::container_style(self.state, selected, is_last)
    }

    fn previous_state(&self) -> Option<ContainerTrayState> {
        Some(self.previous_state)
    }

    fn keeps_selection(&self) -> bool {
        self.state != ContainerTrayState::Ejected
    }

    fn on_select(&mut self) {
        self.previous_state = self.state;
    }

    fn on_deselect(&mut self) {
        self.state = self.previous_state;
    }
}

pub type ContainerTray = Tray<ContainerKind>;

impl Tray<ContainerKind> {
    pub fn container(id: TrayId, level: ConveyorLevel, side: ConveyorSide) -> Self {
        let kind = ContainerKind {
            state: ContainerTrayState::Unknown,
            previous_state: ContainerTrayState::Unknown,
            side,
            level,
            tray_ref: None,
            output: None,
            sorting_product: ProductCode::default(),
        };
        Self::new(id, kind)
    }

    pub fn assign(&mut self, output: OutputId, product: ProductCode) {
        self.kind.output = Some(output);
        self.kind.sorting_product = product;
    }
}

// Zoom line segments

#[derive(Debug, Clone, PartialEq)]
pub struct ZoomKind {
    pub enabled: bool,
    pub default_color: Srgba<u8>,
}

impl TrayKind for ZoomKind {
    /// A zoom segment has no sorting state, only its resting color.
    type State = Srgba<u8>;

    fn state(&self) -> Srgba<u8> {
        self.default_color
    }

    fn store(&mut self, color: Srgba<u8>) {
        self.default_color = color;
    }

    fn style(&self, selected: bool, is_last: bool) -> TrayStyle {
        style::zoom_style(selected, self.default_color, is_last)
    }

    fn selectable(&self) -> bool {
        self.enabled
    }
}

pub type ZoomSegment = Tray<ZoomKind>;

impl Tray<ZoomKind> {
    pub fn zoom_segment(id: TrayId, is_end: bool) -> Self {
        let kind = ZoomKind {
            enabled: true,
            default_color: style::zoom_default(),
        };
        let mut tray = Self::new(id, kind);
        tray.set_label(id.to_string());
        tray.set_is_last(is_end);
        tray
    }

    pub fn enable(&mut self, enabled: bool) {
        self.kind.enabled = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_disable_and_restore() {
        let mut tray = BucketTray::bucket(TrayId::new(4), ConveyorSide::Front, ConveyorLevel::Upper);
        tray.set_state(BucketState::Sorted);
        tray.set_state(BucketState::Disabled);
        assert!(tray.is_disabled());
        assert_eq!(tray.fill(), style::bucket_fill(BucketState::Disabled));

        tray.restore_previous_state();
        assert_eq!(tray.state(), BucketState::Sorted);
        assert!(!tray.is_disabled());
    }

    #[test]
    fn test_bucket_without_disable_has_nothing_to_restore() {
        let mut tray = BucketTray::bucket(TrayId::new(0), ConveyorSide::Back, ConveyorLevel::Upper);
        tray.set_state(BucketState::Injected);
        tray.restore_previous_state();
        assert_eq!(tray.state(), BucketState::Injected);
    }

    #[test]
    fn test_last_bucket_draws_right_edge() {
        let mut tray = BucketTray::bucket(TrayId::new(0), ConveyorSide::Back, ConveyorLevel::Upper);
        assert!(!tray.style().border.right_edge);
        tray.set_is_last(true);
        assert!(tray.style().border.right_edge);
    }

    #[test]
    fn test_output_labels_and_ids() {
        let cases = vec![
            (ConveyorLevel::Upper, ConveyorSide::Front, "UF\n7", "21008"),
            (ConveyorLevel::Upper, ConveyorSide::Back, "UB\n7", "22008"),
            (ConveyorLevel::Lower, ConveyorSide::Front, "LF\n7", "11008"),
            (ConveyorLevel::Lower, ConveyorSide::Back, "LB\n7", "12008"),
        ];

        for (level, side, label, output_id) in cases {
            let tray = OutputTray::output(TrayId::new(7), level, side);
            assert_eq!(tray.label(), Some(label));
            assert_eq!(tray.output_id().as_str(), output_id);
        }
    }

    #[test]
    fn test_output_select_round_trip() {
        let mut tray = OutputTray::output(TrayId::new(1), ConveyorLevel::Upper, ConveyorSide::Front);
        tray.set_state(OutputTrayState::InhibitedSd);
        let resting = tray.fill();

        assert!(tray.select());
        assert!(!tray.select());
        assert_eq!(tray.fill(), Fill::Solid(style::output_selected()));

        // state changes while selected keep the highlight
        tray.set_state(OutputTrayState::InhibitedU);
        assert_eq!(tray.fill(), Fill::Solid(style::output_selected()));

        assert!(tray.deselect());
        assert_eq!(tray.state(), OutputTrayState::InhibitedSd);
        assert_eq!(tray.fill(), resting);
        assert!(!tray.deselect());
    }

    #[test]
    fn test_ejected_container_drops_selection() {
        let mut tray =
            ContainerTray::container(TrayId::new(2), ConveyorLevel::Lower, ConveyorSide::Back);
        tray.set_state(ContainerTrayState::NotEmpty);
        assert!(tray.select());
        assert_eq!(tray.style().border.width, 3);

        tray.set_state(ContainerTrayState::Ejected);
        assert!(!tray.is_selected());
        assert_eq!(tray.fill(), Fill::Hatched);
    }

    #[test]
    fn test_container_assignment() {
        let mut tray =
            ContainerTray::container(TrayId::new(2), ConveyorLevel::Lower, ConveyorSide::Back);
        tray.assign(OutputId::new("12003"), ProductCode::new("LETTERS"));
        assert_eq!(tray.kind().output.as_ref().map(|o| o.as_str()), Some("12003"));
        assert_eq!(tray.kind().sorting_product.as_str(), "LETTERS");
    }

    #[test]
    fn test_disabled_zoom_segment_ignores_selection() {
        let mut seg = ZoomSegment::zoom_segment(TrayId::new(3), false);
        assert_eq!(seg.label(), Some("3"));

        seg.enable(false);
        assert!(!seg.select());

        seg.enable(true);
        assert!(seg.select());
        assert_eq!(seg.fill(), Fill::Solid(style::zoom_selected()));
        assert!(seg.deselect());
        assert_eq!(seg.fill(), Fill::Solid(style::zoom_default()));
    }
}
