//! Single-threaded dispatch. The geolocation answer and UI events arrive on
//! two independent channels and every handler runs to completion before the
//! next event is taken.

use futures::{
    channel::{mpsc, oneshot},
    select_biased, FutureExt, StreamExt,
};
use tracing::info;

use crate::{
    collaborators::{LocationResult, MapView, WorkoutView},
    error::LocationError,
    session::{Session, SessionEvent, UiEvent},
    store::KeyValueStore,
};

/// Drives `session` until the UI channel closes and hands it back.
///
/// A dropped location sender counts as a failed lookup, so the session always
/// hears about geolocation exactly once.
pub async fn run<M, V, S>(
    mut session: Session<M, V, S>,
    location: oneshot::Receiver<LocationResult>,
    mut events: mpsc::UnboundedReceiver<UiEvent>,
) -> Session<M, V, S>
where
    M: MapView,
    V: WorkoutView,
    S: KeyValueStore,
{
    let mut location = location.fuse();

    loop {
        select_biased! {
            result = location => {
                let result = result.unwrap_or(Err(LocationError::Unavailable));
                session.handle(SessionEvent::Location(result));
            }
            event = events.next() => match event {
                Some(event) => session.handle(SessionEvent::Ui(event)),
                None => break,
            },
        }
    }

    info!("Event channel closed, session finished");
    session
}
