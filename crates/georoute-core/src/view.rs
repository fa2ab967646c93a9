//! Route view state machine.
//!
//! Every route action is tagged with a monotonically increasing request id.
//! Only the completion carrying the latest issued id may change the view,
//! so overlapping fetches that finish out of order cannot overwrite a newer
//! result with an older one.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::map::{Camera, MapSurface};
use crate::models::RouteResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Idle,
    Fetching { request_id: RequestId },
    RenderedNoRoute,
    RenderedWithRoute { route: RouteResult },
}

/// User-visible message raised by the view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn no_route() -> Self {
        Self {
            title: "No route found".to_string(),
            message: "Maybe invalid origin or destination. Need to specify points on the road."
                .to_string(),
        }
    }
}

/// What a completion did to the view.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// The map was redrawn with this many points.
    Rendered { points: usize },
    /// Empty result; the no-route notice was raised.
    NoRoute,
    /// A newer request was issued since; the result was dropped.
    Discarded { latest: RequestId },
}

/// View state plus the map surface it drives.
pub struct RouteView<S> {
    state: ViewState,
    latest: RequestId,
    notice: Option<Notice>,
    surface: S,
}

impl<S: MapSurface> RouteView<S> {
    /// Create an idle view and place the camera at its initial position.
    pub fn new(mut surface: S) -> Self {
        surface.set_camera(Camera::initial());
        Self {
            state: ViewState::Idle,
            latest: RequestId(0),
            notice: None,
            surface,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Acknowledge the current notice.
    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn latest_request(&self) -> RequestId {
        self.latest
    }

    /// Enter `Fetching` for a new route action. Allowed from any state.
    pub fn begin_fetch(&mut self) -> RequestId {
        self.latest = RequestId(self.latest.0 + 1);
        self.state = ViewState::Fetching {
            request_id: self.latest,
        };
        self.notice = None;
        tracing::info!(request_id = %self.latest, "route fetch started");
        self.latest
    }

    /// Apply a finished fetch. The map is touched at most once, and only
    /// for a non-empty result of the latest request.
    pub fn complete(&mut self, request_id: RequestId, route: RouteResult) -> Transition {
        let current = matches!(
            self.state,
            ViewState::Fetching { request_id: pending } if pending == request_id
        );
        if !current {
            tracing::info!(
                request_id = %request_id,
                latest = %self.latest,
                "discarding stale route result"
            );
            return Transition::Discarded {
                latest: self.latest,
            };
        }

        if route.is_empty() {
            tracing::info!(request_id = %request_id, "no route found");
            self.state = ViewState::RenderedNoRoute;
            self.notice = Some(Notice::no_route());
            return Transition::NoRoute;
        }

        let points = route.len();
        self.surface.clear_overlays();
        self.surface.add_polyline(route.points());
        self.state = ViewState::RenderedWithRoute { route };
        tracing::info!(request_id = %request_id, points, "route rendered");
        Transition::Rendered { points }
    }
}
