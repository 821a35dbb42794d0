//! Places a [`Page`] gets drawn.

use crate::error::SurfaceError;
use crate::page::Page;

pub mod html;
pub mod terminal;

pub use html::{render_html, HtmlSurface};
pub use terminal::{render_text, TerminalSurface};

/// A display target for the page. The controller calls [`Surface::refresh`]
/// after every state transition it applies.
pub trait Surface: Send {
    fn refresh(&mut self, page: &Page) -> Result<(), SurfaceError>;

    /// Release anything the surface holds on to (spinners, handles).
    fn detach(&mut self) {}
}

impl<A: Surface, B: Surface> Surface for (A, B) {
    fn refresh(&mut self, page: &Page) -> Result<(), SurfaceError> {
        self.0.refresh(page)?;
        self.1.refresh(page)
    }

    fn detach(&mut self) {
        self.0.detach();
        self.1.detach();
    }
}

impl<S: Surface> Surface for Option<S> {
    fn refresh(&mut self, page: &Page) -> Result<(), SurfaceError> {
        match self {
            Some(surface) => surface.refresh(page),
            None => Ok(()),
        }
    }

    fn detach(&mut self) {
        if let Some(surface) = self {
            surface.detach();
        }
    }
}
