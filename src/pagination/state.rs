//! Per-stream iteration state

use pin_project_lite::pin_project;
use std::pin::Pin;

// `Idle` holds the token for the next fetch, `Fetching` holds the in-flight
// fetch together with the token it was issued for.
pin_project! {
    #[project = PageStateProj]
    #[project_replace = PageStateProjReplace]
    pub(crate) enum PageState<P, Fut> {
        Idle {
            page: P,
        },
        Fetching {
            #[pin]
            future: Fut,
            page: P,
        },
        Exhausted,
    }
}

impl<P, Fut> PageState<P, Fut> {
    pub(crate) fn new(initial_page: P) -> Self {
        Self::Idle { page: initial_page }
    }

    pub(crate) fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted)
    }

    /// Take the pending token out of an `Idle` state, leaving `Exhausted`
    /// until the caller installs the fetch.
    pub(crate) fn take_idle(self: Pin<&mut Self>) -> Option<P> {
        match &*self {
            Self::Idle { .. } => match self.project_replace(Self::Exhausted) {
                PageStateProjReplace::Idle { page } => Some(page),
                _ => None,
            },
            _ => None,
        }
    }

    pub(crate) fn project_future(self: Pin<&mut Self>) -> Option<Pin<&mut Fut>> {
        match self.project() {
            PageStateProj::Fetching { future, .. } => Some(future),
            _ => None,
        }
    }

    /// Drop the completed fetch and return the token it was issued for.
    /// The state is `Exhausted` afterwards.
    pub(crate) fn finish_fetch(self: Pin<&mut Self>) -> Option<P> {
        match self.project_replace(Self::Exhausted) {
            PageStateProjReplace::Fetching { page, .. } => Some(page),
            _ => None,
        }
    }
}
