//! Cursor collaborators: the toolkit surface and the optional pointer warp.
//!
//! Pointer warping is a process-wide capability that may fail to come up
//! (no display server, sandboxing). It is initialised once with [`install`];
//! a failure logs a single warning and the capability stays absent for the
//! life of the process. Call sites go through [`warp`] and treat `None` as
//! "not available".

use once_cell::sync::OnceCell;
use tracing::{debug, warn};

use crate::Result;

/// Cursor the observer asks the surface to show.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorShape {
    /// Whatever cursor the surface had when the observer was built.
    Initial,
    /// A fully transparent cursor.
    Hidden,
}

/// The toolkit component the observer's cursor helpers act on.
pub trait Surface: Send {
    /// Show `shape` over the surface.
    fn set_cursor(&self, shape: CursorShape);

    /// Width and height in pixels.
    fn size(&self) -> (i32, i32);

    /// Top-left corner in screen coordinates; `None` while not showing.
    fn screen_origin(&self) -> Option<(i32, i32)>;
}

/// OS-level pointer positioning.
pub trait PointerWarp: Send + Sync {
    /// Move the pointer to screen coordinates.
    fn warp_to(&self, x: i32, y: i32) -> Result<()>;
}

/// Outcome of the one-time initialisation.
static WARP: OnceCell<Option<Box<dyn PointerWarp>>> = OnceCell::new();

/// Initialise the warp capability from `factory`, at most once per process.
///
/// Later calls do not run their factory. Returns whether the capability is
/// available.
pub fn install<F>(factory: F) -> bool
where
    F: FnOnce() -> Result<Box<dyn PointerWarp>>,
{
    WARP.get_or_init(|| match factory() {
        Ok(w) => {
            debug!("pointer_warp_ready");
            Some(w)
        }
        Err(e) => {
            warn!(error = %e, "pointer warp unavailable; pointer will not be recentred");
            None
        }
    })
    .is_some()
}

/// The warp capability, if it was installed successfully.
pub fn warp() -> Option<&'static dyn PointerWarp> {
    WARP.get().and_then(|w| w.as_deref())
}
