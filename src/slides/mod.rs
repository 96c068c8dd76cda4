/*!
 * Slide generation core: position calculation, assembly and the
 * line-to-slide mapping.
 */

pub mod assembler;
pub mod mapper;
pub mod model;
pub mod position;

pub use assembler::{Assembler, COVER_TEXTBOX_KEY};
pub use mapper::{LineToSlideMapper, LineToSlideMapping};
pub use model::{BackgroundMaster, SlideDeck, SlideDescriptor, SlideKind, TextObject};
pub use position::{PositionCursor, SlotPosition, Weights};
