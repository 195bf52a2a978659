pub mod scene;
pub mod settings;

pub use scene::{
    component_display_name, section_display_name, short_id, Placement, SceneState, ShelfCapacity,
};
pub use settings::{CommitMode, DragSettings, EngineSettings, HistorySettings, SnapSettings};
