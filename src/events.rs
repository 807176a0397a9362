use crate::ScreenSize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    FieldEvent(FieldEvent),
    AppEvent(AppEvent),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEvent {
    /// Build the next level of the tower
    NextStep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    CameraEvent(CameraEvent),

    /// Show the outlines of the level above the one currently shown
    LevelUp,

    /// Show the outlines of the level below the one currently shown
    LevelDown,

    /// Exit the application
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraEvent {
    /// Pan by `(dx, dy)` terminal characters
    Move { dx: i8, dy: i8 },

    Resize { cols: ScreenSize, rows: ScreenSize },

    ResetView,
}
