/*!
 * Settings for slide generation.
 *
 * - `tree`: sparse, JSON-shaped stored settings (global scopes + sections)
 * - `registry`: field metadata, defaults and ranges
 * - `model`: typed, fully resolved settings
 * - `resolver`: section → global → default layering
 * - `presets`: named baseline trees
 */

pub mod model;
pub mod presets;
pub mod registry;
pub mod resolver;
pub mod tree;

pub use model::{ResolvedSettings, SecondaryTextSource, TextStyle, TextboxLayout, TextboxPosition};
pub use presets::{PresetLibrary, PresetsCatalog, DEFAULT_PRESET};
pub use registry::{FieldKind, FieldSpec, SettingsRegistry, MAX_TEXTBOXES};
pub use resolver::{ScopedSettings, SettingsResolver, SettingsScope};
pub use tree::{SectionSettings, SettingsTree};
