//! Host frame-scheduler seam.
//!
//! The batch does not own the frame loop. It hands the host two tasks, one
//! per [`Phase`], and relies on the host's contract: every registered task
//! runs once per frame, the update phase runs before the draw phase, and
//! tasks within a phase run in ascending priority order.

use crate::camera::Camera;
use crate::gfx::RenderBackend;

/// Which half of the frame a task runs in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    Update,
    Draw,
}

/// Per-frame context handed to every scheduled task.
pub struct FrameContext<'a> {
    /// The host's graphics layer, for draw-phase tasks.
    pub gfx: &'a mut dyn RenderBackend,
    /// The host's default camera, if it exposes one.
    pub default_camera: Option<&'a dyn Camera>,
}

/// A callback run once per frame for the registered lifetime of the task.
pub type FrameTask = Box<dyn FnMut(&mut FrameContext<'_>)>;

/// Contract the host's scheduler must satisfy.
///
/// De-registration is the host's concern; the batch never removes its
/// tasks.
pub trait FrameScheduler {
    fn add_task(&mut self, phase: Phase, priority: i32, task: FrameTask);
}
