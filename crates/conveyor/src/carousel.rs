use crate::gesture::{ClickGesture, TraySelected};
use crate::layout::{self, CarouselLayout, LayoutError};
use crate::model::{ConveyorLevel, TrayId};
use crate::nav::{NavDirection, SynopticNav};
use crate::ring::{Motion, RingConfig, RingError, RingSimulator};
use crate::scene::Scene;
use crate::tray::BucketTray;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CarouselError {
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error(transparent)]
    Ring(#[from] RingError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselParams {
    pub width: u32,
    pub height: u32,
    pub nb_buckets: usize,
    pub level: ConveyorLevel,
    pub step: u32,
    pub max_ticks: u32,
    /// Seeds random bucket states; all buckets start empty without one.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPress {
    Bucket(usize),
    Scrolled(NavDirection),
    Ignored,
}

/// One carousel level: the rotating ring, its buckets and their layout.
#[derive(Debug, Clone)]
pub struct Carousel {
    ring: RingSimulator,
    layout: CarouselLayout,
    nav: SynopticNav,
    scene: Scene,
    trays: Vec<BucketTray>,
    gesture: ClickGesture,
    level: ConveyorLevel,
}

impl Carousel {
    pub fn new(params: CarouselParams) -> Result<Self, CarouselError> {
        let layout = CarouselLayout::new(params.width, params.height, params.nb_buckets)?;
        let ring_config = RingConfig {
            size: params.nb_buckets,
            step: params.step,
            max_ticks: params.max_ticks,
        };
        let ring = match params.seed {
            Some(seed) => RingSimulator::seeded(ring_config, seed)?,
            None => RingSimulator::new(ring_config)?,
        };

        let nav = SynopticNav::new(layout.synoptic_width);
        let scene = Scene::build(&layout, &nav);
        let trays = Self::create_trays(&layout, params.level);

        let mut carousel = Self {
            ring,
            layout,
            nav,
            scene,
            trays,
            gesture: ClickGesture::default(),
            level: params.level,
        };
        carousel.sync_trays();

        log::info!(
            "Carousel ready: {} buckets on level {}",
            params.nb_buckets,
            params.level
        );
        Ok(carousel)
    }

    fn create_trays(layout: &CarouselLayout, level: ConveyorLevel) -> Vec<BucketTray> {
        (0..layout.nb_buckets)
            .filter_map(|slot| layout::placement(slot, layout.nb_buckets))
            .enumerate()
            .map(|(slot, place)| {
                let mut tray = BucketTray::bucket(TrayId::new(slot as u32), place.side, level);
                let is_last = layout
                    .line(place.side)
                    .is_some_and(|line| line.is_last(place.index));
                tray.set_is_last(is_last);
                tray
            })
            .collect()
    }

    fn sync_trays(&mut self) {
        for (tray, bucket) in self.trays.iter_mut().zip(self.ring.slots()) {
            tray.set_id(bucket.id);
            tray.set_state(bucket.state);
        }
    }

    /// Advances the ring one tick and repaints the buckets from it.
    pub fn advance(&mut self) -> Motion {
        let motion = self.ring.tick();
        match motion {
            Motion::Rotated { offset } => {
                self.sync_trays();
                log::trace!(
                    "ring rotated by {} at position {}",
                    offset,
                    self.ring.position()
                );
            }
            Motion::Stopped => {}
        }
        motion
    }

    pub fn press(&mut self, x: f64, y: f64) -> PointerPress {
        if let Some(direction) = self.scene.nav_button_at(x, y) {
            if self.nav.scroll(direction) {
                self.scene = Scene::build(&self.layout, &self.nav);
            }
            return PointerPress::Scrolled(direction);
        }

        if let Some(slot) = self.scene.bucket_at(x, y)
            && self.gesture.press(&mut self.trays, slot)
        {
            return PointerPress::Bucket(slot);
        }
        PointerPress::Ignored
    }

    pub fn release(&mut self) -> Option<TraySelected> {
        self.gesture.release(&mut self.trays)
    }

    pub fn ring(&self) -> &RingSimulator {
        &self.ring
    }

    pub fn layout(&self) -> &CarouselLayout {
        &self.layout
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn trays(&self) -> &[BucketTray] {
        &self.trays
    }

    pub fn level(&self) -> ConveyorLevel {
        self.level
    }

    pub fn is_finished(&self) -> bool {
        self.ring.is_finished()
    }
}
