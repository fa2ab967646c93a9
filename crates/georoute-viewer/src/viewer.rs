//! Route action wiring: view state, fetcher and map surface.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use georoute_core::{LngLat, MapSurface, Notice, RouteView, Transition, ViewState};
use tokio::task::JoinHandle;

use crate::fetcher::RouteFetcher;

/// A screen with one route action. Cheap to clone; clones share state.
///
/// Activations may overlap. Each is tagged when it starts and only the most
/// recently started one may update the view when it completes.
pub struct RouteViewer<S> {
    fetcher: Arc<RouteFetcher>,
    view: Arc<Mutex<RouteView<S>>>,
}

impl<S> Clone for RouteViewer<S> {
    fn clone(&self) -> Self {
        Self {
            fetcher: Arc::clone(&self.fetcher),
            view: Arc::clone(&self.view),
        }
    }
}

impl<S: MapSurface + Send + 'static> RouteViewer<S> {
    pub fn new(fetcher: RouteFetcher, surface: S) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            view: Arc::new(Mutex::new(RouteView::new(surface))),
        }
    }

    /// Run the route action to completion.
    pub async fn activate(&self, origin: LngLat, destination: LngLat) -> Transition {
        let request_id = self.lock().begin_fetch();
        let route = self.fetcher.fetch(origin, destination).await;
        self.lock().complete(request_id, route)
    }

    /// Start the route action without waiting for it.
    pub fn spawn_activate(&self, origin: LngLat, destination: LngLat) -> JoinHandle<Transition> {
        let viewer = self.clone();
        tokio::spawn(async move { viewer.activate(origin, destination).await })
    }

    pub fn state(&self) -> ViewState {
        self.lock().state().clone()
    }

    pub fn notice(&self) -> Option<Notice> {
        self.lock().notice().cloned()
    }

    pub fn dismiss_notice(&self) {
        self.lock().dismiss_notice();
    }

    /// Inspect the map surface.
    pub fn with_surface<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(self.lock().surface())
    }

    fn lock(&self) -> MutexGuard<'_, RouteView<S>> {
        self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
