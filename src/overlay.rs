//! Debug overlay seam.
//!
//! Hosts with a console or on-screen overlay can surface live batch
//! counters by implementing [`DebugOverlay`]; the batch registers a named
//! formatter and the overlay calls it whenever it wants a fresh value.

/// Formatter producing the current value of a watch as a short string.
pub type WatchFn = Box<dyn Fn() -> String>;

/// Overlay capability: shows named, live-updating watch strings.
pub trait DebugOverlay {
    fn add_watch(&mut self, name: &str, format: WatchFn);
}
