//! Context types for rule execution.

use crate::element::{CanvasElement, CanvasSize, Document, Page};
use crate::format::ValidationOptions;
use crate::zones::Zones;

/// Context provided to every rule during a validation pass.
///
/// Zones are computed once per pass and shared by all rules.
#[derive(Debug, Clone)]
pub struct CheckContext<'a> {
    /// Document under validation.
    pub document: &'a Document,
    /// Options for this pass.
    pub options: &'a ValidationOptions,
    /// Zones of the document's canvas.
    pub zones: Zones,
}

impl<'a> CheckContext<'a> {
    /// Creates a context, computing zones for the document's canvas.
    #[must_use]
    pub fn new(document: &'a Document, options: &'a ValidationOptions) -> Self {
        Self {
            document,
            options,
            zones: options.zones(document.canvas_size),
        }
    }

    /// Canvas size of the document.
    #[must_use]
    pub fn canvas(&self) -> CanvasSize {
        self.document.canvas_size
    }

    /// Iterates over every element together with its page.
    pub fn elements(&self) -> impl Iterator<Item = (&'a Page, &'a CanvasElement)> {
        self.document.elements()
    }

    /// Iterates over the pages.
    pub fn pages(&self) -> impl Iterator<Item = &'a Page> {
        self.document.pages.iter().map(|p| &**p)
    }

    /// Whether any element satisfies `pred`.
    pub fn any_element(&self, pred: impl Fn(&CanvasElement) -> bool) -> bool {
        self.elements().any(|(_, e)| pred(e))
    }
}

/// Context provided to a rule's fix routine.
#[derive(Debug, Clone, Copy)]
pub struct FixContext<'a> {
    /// Canvas size of the document being fixed.
    pub canvas: CanvasSize,
    /// Options of the pass that produced the violation.
    pub options: &'a ValidationOptions,
}

impl<'a> FixContext<'a> {
    /// Creates a fix context.
    #[must_use]
    pub fn new(canvas: CanvasSize, options: &'a ValidationOptions) -> Self {
        Self { canvas, options }
    }
}
