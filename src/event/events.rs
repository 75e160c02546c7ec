use crate::fill::FillOutcome;
use crate::tools::ToolKind;

/// Informational notifications for host UI state. Hosts may ignore them.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    StrokeCommitted {
        stroke_count: usize,
    },
    FillApplied {
        outcome: FillOutcome,
    },
    UndoPerformed {
        stroke_count: usize,
        can_undo: bool,
    },
    ClearPerformed,
    Resized {
        device_width: u32,
        device_height: u32,
    },
    ToolChanged {
        old: ToolKind,
        new: ToolKind,
    },
}
