// Services layer for business logic
// Services own response shaping, calling storage directly

pub mod diagnostics;
pub mod points;

pub use diagnostics::DiagnosticsService;
pub use points::PointsService;
