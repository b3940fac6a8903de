//! Per-line point capture.

use crate::config::Domain;
use crate::line::{Line, LineId};
use crate::spline;
use kurbo::Point;

/// What a line currently draws as visual feedback.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LineRender {
    /// No points yet.
    #[default]
    Empty,
    /// Exactly one point; nothing to interpolate.
    Marker(Point),
    /// Interpolated curve through two or more points. Markers are drawn at
    /// the line's own points.
    Curve(Vec<Point>),
}

/// Result of feeding a pointer-down event to a [`LineCapture`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// The capture is not receiving events.
    Disconnected,
    /// The pointer was outside the data region.
    OutsideDataRegion,
    /// The point lies outside the domain bounds.
    OutsideDomain,
    /// Same as the last recorded point; discarded.
    Duplicate,
    Appended,
}

/// Owns one line's points and turns pointer-downs into appends while connected.
#[derive(Debug, Clone)]
pub struct LineCapture {
    id: LineId,
    line: Line,
    domain: Domain,
    connected: bool,
    render: LineRender,
}

impl LineCapture {
    /// Create a disconnected capture with an empty line.
    pub fn new(id: LineId, domain: Domain) -> Self {
        Self {
            id,
            line: Line::new(),
            domain,
            connected: false,
            render: LineRender::Empty,
        }
    }

    pub fn id(&self) -> LineId {
        self.id
    }

    pub fn line(&self) -> &Line {
        &self.line
    }

    pub fn render(&self) -> &LineRender {
        &self.render
    }

    /// Start receiving pointer-down events. Calling twice is harmless.
    pub fn connect(&mut self) {
        if self.connected {
            log::debug!("Line {} re-connected", self.id);
        }
        self.connected = true;
    }

    /// Stop receiving pointer-down events. Safe when already disconnected.
    pub fn disconnect(&mut self) {
        self.connected = false;
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Record a pointer-down at `position` (domain coordinates, `None` when
    /// outside the data region).
    pub fn handle_pointer_down(&mut self, position: Option<Point>) -> CaptureOutcome {
        if !self.connected {
            return CaptureOutcome::Disconnected;
        }
        let Some(point) = position else {
            return CaptureOutcome::OutsideDataRegion;
        };
        if !self.domain.contains(point) {
            log::debug!("Ignoring click outside domain at ({}, {})", point.x, point.y);
            return CaptureOutcome::OutsideDomain;
        }
        if !self.line.push_dedup(point) {
            log::warn!("Skipping repeated coordinate ({}, {})", point.x, point.y);
            return CaptureOutcome::Duplicate;
        }

        log::debug!("Line {}: added ({}, {})", self.id, point.x, point.y);
        self.refresh();
        CaptureOutcome::Appended
    }

    /// Replace the whole line (seeding from a saved document) and recompute
    /// the curve once. Points are taken as-is.
    pub fn set_points(&mut self, points: Vec<Point>) {
        self.line.replace(points);
        self.refresh();
    }

    fn refresh(&mut self) {
        self.render = match self.line.points() {
            [] => LineRender::Empty,
            [only] => LineRender::Marker(*only),
            points => LineRender::Curve(spline::interpolate(points, &self.domain)),
        };
    }
}
