//! Toolkit-free core of the carousel synoptic: the bucket ring and its
//! motion, line layout, tray model and styling, pointer gestures and the
//! element tree used for painting and hit testing.

pub mod carousel;
pub mod gesture;
pub mod layout;
pub mod macros;
pub mod model;
pub mod nav;
pub mod ring;
pub mod scene;
pub mod style;
pub mod ticker;
pub mod tray;

pub use carousel::{Carousel, CarouselError, CarouselParams, PointerPress};
pub use gesture::TraySelected;
pub use model::{Bucket, BucketState, ConveyorLevel, ConveyorSide, TrayId};
