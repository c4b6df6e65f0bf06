use tracing::{debug, error, info, warn};

use crate::{
    collaborators::{LocationResult, MapView, PanOptions, WorkoutView},
    config::SessionConfig,
    form::FormInput,
    render,
    store::{KeyValueStore, WorkoutStore},
    workout::{timestamp_id, Clock, Coords, SystemClock, Workout, ID_MODULUS},
};

pub const LOCATION_FAILED_MESSAGE: &str = "Could not get your position";
pub const INVALID_INPUT_MESSAGE: &str = "Please fill in all inputs with positive numbers";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    /// Waiting for the one geolocation answer. Failure leaves the session here.
    AwaitingLocation,
    FormHidden,
    FormVisible { pending: Coords },
}

impl Phase {
    pub fn is_map_ready(&self) -> bool {
        !matches!(self, Phase::AwaitingLocation)
    }
}

/// Everything the user can do once the page is up.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    MapClicked(Coords),
    SubmitForm(FormInput),
    CancelForm,
    SelectWorkout(String),
    ToggleWorkoutType,
    ResetAll,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Location(LocationResult),
    Ui(UiEvent),
}

/// Owns the workout collection and mediates between the map, the form and
/// storage.
pub struct Session<M, V, S> {
    config: SessionConfig,
    phase: Phase,
    workouts: Vec<Workout>,
    map: M,
    view: V,
    store: WorkoutStore<S>,
    clock: Box<dyn Clock>,
}

impl<M: MapView, V: WorkoutView, S: KeyValueStore> Session<M, V, S> {
    /// Rehydrates stored workouts into the list right away. Their markers wait
    /// until the map is loaded.
    pub fn start(config: SessionConfig, map: M, mut view: V, backend: S) -> Self {
        let store = WorkoutStore::new(backend, config.storage_key.clone());
        let workouts = store.load();

        for workout in &workouts {
            view.insert_entry(workout);
        }
        info!("Session started with {} stored workouts", workouts.len());

        Self {
            config,
            phase: Phase::AwaitingLocation,
            workouts,
            map,
            view,
            store,
            clock: Box::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn handle(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Location(result) => self.location_resolved(result),
            SessionEvent::Ui(UiEvent::MapClicked(coords)) => self.map_clicked(coords),
            SessionEvent::Ui(UiEvent::SubmitForm(input)) => self.submit_workout(&input),
            SessionEvent::Ui(UiEvent::CancelForm) => self.cancel_form(),
            SessionEvent::Ui(UiEvent::SelectWorkout(id)) => self.select_workout(&id),
            SessionEvent::Ui(UiEvent::ToggleWorkoutType) => self.toggle_workout_type(),
            SessionEvent::Ui(UiEvent::ResetAll) => self.reset_all(),
        }
    }

    pub fn location_resolved(&mut self, result: LocationResult) {
        if self.phase.is_map_ready() {
            debug!("Ignoring repeated location result");
            return;
        }

        match result {
            Ok(center) => {
                info!("Loading map at {}, {}", center.lat, center.lng);
                self.map.load(center, self.config.zoom_level, &self.config.tiles);
                for workout in &self.workouts {
                    self.map.add_marker(&render::marker(workout));
                }
                self.phase = Phase::FormHidden;
            }
            Err(e) => {
                warn!("Geolocation failed: {e}");
                self.view.alert(LOCATION_FAILED_MESSAGE);
            }
        }
    }

    /// The latest click replaces any pending location.
    pub fn map_clicked(&mut self, coords: Coords) {
        if !self.phase.is_map_ready() {
            debug!("Ignoring map click before the map is loaded");
            return;
        }

        self.phase = Phase::FormVisible { pending: coords };
        self.view.show_form();
    }

    pub fn submit_workout(&mut self, input: &FormInput) {
        let Phase::FormVisible { pending } = self.phase else {
            debug!("Ignoring submit without a pending location");
            return;
        };

        let draft = match input.parse() {
            Ok(draft) => draft,
            Err(e) => {
                debug!("Rejected workout form: {e}");
                self.view.alert(&format!("{INVALID_INPUT_MESSAGE} ({e})"));
                return;
            }
        };

        let date = self.clock.now();
        let workout = draft.build(self.next_id(&date), date, pending);
        info!("Created {} workout {}", workout.kind(), workout.id());

        self.workouts.push(workout);
        let workout = &self.workouts[self.workouts.len() - 1];
        self.map.add_marker(&render::marker(workout));
        self.view.insert_entry(workout);
        self.hide_form();
        self.persist();
    }

    pub fn cancel_form(&mut self) {
        if let Phase::FormVisible { .. } = self.phase {
            self.hide_form();
        }
    }

    /// Unknown ids are ignored.
    pub fn select_workout(&mut self, id: &str) {
        if !self.phase.is_map_ready() {
            debug!("Ignoring selection before the map is loaded");
            return;
        }

        let Some(workout) = self.workouts.iter().find(|w| w.id() == id) else {
            debug!("No workout with id {id}");
            return;
        };

        let pan = PanOptions {
            animate: true,
            duration: self.config.pan_duration,
        };
        self.map.set_view(workout.coords(), self.config.zoom_level, Some(pan));
    }

    pub fn toggle_workout_type(&mut self) {
        self.view.toggle_elevation_field();
    }

    /// Forgets every workout, in storage and in memory, and starts over.
    pub fn reset_all(&mut self) {
        if let Err(e) = self.store.clear() {
            error!("Failed to clear stored workouts: {e}");
        }
        info!("Resetting {} workouts", self.workouts.len());

        self.workouts.clear();
        self.phase = Phase::AwaitingLocation;
        self.view.reload();
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn store(&self) -> &S {
        self.store.backend()
    }

    fn hide_form(&mut self) {
        self.view.hide_form(self.config.form_restore_delay());
        self.phase = Phase::FormHidden;
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.workouts) {
            error!("Failed to store workouts: {e}");
        }
    }

    /// Timestamp id, bumped past any id already in the collection.
    fn next_id(&self, date: &chrono::DateTime<chrono::Utc>) -> String {
        let mut id = timestamp_id(date);
        while self.workouts.iter().any(|w| w.id() == id) {
            let next = id.parse::<i64>().map(|n| (n + 1) % ID_MODULUS).unwrap_or_default();
            id = format!("{next:010}");
        }
        id
    }
}
