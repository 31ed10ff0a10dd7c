// File: crates/capture-core/src/expr.rs
// Summary: Deferred plotting expressions and the values they evaluate to.

use std::io;

use anyhow::Result;

use crate::surface::Surface;

/// A value that draws itself when displayed rather than when constructed.
///
/// `print` renders onto the active surface and may also write a textual
/// representation to `out`; capture discards that text.
pub trait Plottable {
    fn print(&self, surface: &mut dyn Surface, out: &mut dyn io::Write) -> Result<()>;
}

/// Result of evaluating a [`PlotExpr`]: an optional value and whether it
/// would auto-display at top level.
pub struct Outcome<'a> {
    value: Option<Box<dyn Plottable + 'a>>,
    visible: bool,
}

impl<'a> Outcome<'a> {
    /// Nothing to display (an assignment, or drawing done purely for effect).
    pub fn invisible() -> Self {
        Self { value: None, visible: false }
    }

    /// A value that is printed onto the surface after evaluation.
    pub fn visible(value: impl Plottable + 'a) -> Self {
        Self { value: Some(Box::new(value)), visible: true }
    }

    /// A value that is returned but not displayed.
    pub fn hidden(value: impl Plottable + 'a) -> Self {
        Self { value: Some(Box::new(value)), visible: false }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Trigger display for a visible value, sending its text to a sink.
    pub(crate) fn display(self, surface: &mut dyn Surface) -> Result<()> {
        match self.value {
            Some(value) if self.visible => value.print(surface, &mut io::sink()),
            _ => Ok(()),
        }
    }
}

type Thunk<'a> = Box<dyn FnOnce(&mut dyn Surface) -> Result<Outcome<'a>> + 'a>;

/// A plotting expression captured at the call site and evaluated exactly once,
/// later, against the active surface.
pub struct PlotExpr<'a> {
    thunk: Thunk<'a>,
}

impl<'a> PlotExpr<'a> {
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce(&mut dyn Surface) -> Result<Outcome<'a>> + 'a,
    {
        Self { thunk: Box::new(f) }
    }

    /// Expression that draws for effect and yields an invisible result.
    pub fn draw<F>(f: F) -> Self
    where
        F: FnOnce(&mut dyn Surface) -> Result<()> + 'a,
    {
        Self::new(move |surface| {
            f(surface)?;
            Ok(Outcome::invisible())
        })
    }

    /// Expression whose visible result is `value`, drawn when displayed.
    pub fn value(value: impl Plottable + 'a) -> Self {
        Self::new(move |_| Ok(Outcome::visible(value)))
    }

    pub(crate) fn evaluate(self, surface: &mut dyn Surface) -> Result<Outcome<'a>> {
        (self.thunk)(surface)
    }
}

impl<'a, P: Plottable + ?Sized> Plottable for &'a P {
    fn print(&self, surface: &mut dyn Surface, out: &mut dyn io::Write) -> Result<()> {
        (**self).print(surface, out)
    }
}
