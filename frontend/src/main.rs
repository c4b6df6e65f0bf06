use std::time::Duration;

use components::{map_component::LeafletMap, workout_entry::WorkoutEntry};
use futures::channel::mpsc::{self, UnboundedSender};
use gloo_console::{error, info};
use gloo_timers::callback::Timeout;
use gloo_utils::document;
use storage::BrowserStore;
use view::YewWorkoutView;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use workout_tracker_lib::{
    config::SessionConfig,
    event_loop,
    form::FormInput,
    session::{Session, UiEvent},
    workout::Workout,
};
use yew::prelude::*;

mod components;
mod geolocation;
mod storage;
mod view;

const MAP_CONTAINER_ID: &str = "map";
const CONFIG_ELEMENT_ID: &str = "session-config";

pub enum AppMsg {
    // From the session
    ShowForm,
    HideForm(Duration),
    ToggleElevationField,
    InsertEntry(Workout),
    // From the page
    RestoreFormDisplay,
    Submit,
    Cancel,
    TypeChanged,
    Select(String),
    Reset,
}

pub struct App {
    events: UnboundedSender<UiEvent>,
    // Newest first, each entry goes in right after the form
    entries: Vec<Workout>,
    form_visible: bool,
    form_display_suppressed: bool,
    elevation_visible: bool,
    focus_distance: bool,
    restore_timeout: Option<Timeout>,

    kind_input: NodeRef,
    distance_input: NodeRef,
    duration_input: NodeRef,
    cadence_input: NodeRef,
    elevation_input: NodeRef,
}

impl App {
    fn send(&self, event: UiEvent) {
        if self.events.unbounded_send(event).is_err() {
            error!("Session has ended, dropping event");
        }
    }

    fn read_form(&self) -> FormInput {
        FormInput {
            kind: self.kind_input.cast::<HtmlSelectElement>().map(|select| select.value()).unwrap_or_default(),
            distance: input_value(&self.distance_input),
            duration: input_value(&self.duration_input),
            cadence: input_value(&self.cadence_input),
            elevation: input_value(&self.elevation_input),
        }
    }

    fn clear_inputs(&self) {
        for node in [&self.distance_input, &self.duration_input, &self.cadence_input, &self.elevation_input] {
            if let Some(input) = node.cast::<HtmlInputElement>() {
                input.set_value("");
            }
        }
    }

    fn input_row(&self, label: &'static str, placeholder: &'static str, node: &NodeRef, hidden: bool) -> Html {
        html! {
            <div class={classes!("form__row", hidden.then_some("form__row--hidden"))}>
                <label class="form__label">{label}</label>
                <input class="form__input" placeholder={placeholder} ref={node.clone()} />
            </div>
        }
    }
}

impl Component for App {
    type Message = AppMsg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let (events, events_rx) = mpsc::unbounded();

        match load_config() {
            Ok(config) => {
                let map = LeafletMap::new(MAP_CONTAINER_ID, events.clone());
                let view = YewWorkoutView::new(ctx.link().clone());
                let location = geolocation::request_position();

                spawn_local(async move {
                    let session = Session::start(config, map, view, BrowserStore::local());
                    event_loop::run(session, location, events_rx).await;
                    info!("Workout session ended");
                });
            }
            Err(e) => error!(format!("Invalid session config, not starting: {}", e)),
        }

        Self {
            events,
            entries: Vec::new(),
            form_visible: false,
            form_display_suppressed: false,
            elevation_visible: false,
            focus_distance: false,
            restore_timeout: None,
            kind_input: NodeRef::default(),
            distance_input: NodeRef::default(),
            duration_input: NodeRef::default(),
            cadence_input: NodeRef::default(),
            elevation_input: NodeRef::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            AppMsg::ShowForm => {
                self.form_visible = true;
                self.focus_distance = true;
            }
            AppMsg::HideForm(restore_after) => {
                self.clear_inputs();
                self.form_visible = false;
                self.form_display_suppressed = true;

                let link = ctx.link().clone();
                let millis = u32::try_from(restore_after.as_millis()).unwrap_or(u32::MAX);
                self.restore_timeout = Some(Timeout::new(millis, move || link.send_message(AppMsg::RestoreFormDisplay)));
            }
            AppMsg::RestoreFormDisplay => {
                self.form_display_suppressed = false;
                self.restore_timeout = None;
            }
            AppMsg::ToggleElevationField => {
                self.elevation_visible = !self.elevation_visible;
            }
            AppMsg::InsertEntry(workout) => {
                self.entries.insert(0, workout);
            }
            AppMsg::Submit => {
                self.send(UiEvent::SubmitForm(self.read_form()));
                return false;
            }
            AppMsg::Cancel => {
                self.send(UiEvent::CancelForm);
                return false;
            }
            AppMsg::TypeChanged => {
                self.send(UiEvent::ToggleWorkoutType);
                return false;
            }
            AppMsg::Select(id) => {
                self.send(UiEvent::SelectWorkout(id));
                return false;
            }
            AppMsg::Reset => {
                info!("Resetting all workouts");
                self.send(UiEvent::ResetAll);
                return false;
            }
        }
        true
    }

    fn rendered(&mut self, _ctx: &Context<Self>, _first_render: bool) {
        if self.focus_distance {
            self.focus_distance = false;
            if let Some(input) = self.distance_input.cast::<HtmlInputElement>() {
                let _ = input.focus();
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();

        let onsubmit = link.callback(|e: SubmitEvent| {
            e.prevent_default();
            AppMsg::Submit
        });
        let onkeydown = link.batch_callback(|e: KeyboardEvent| (e.key() == "Escape").then_some(AppMsg::Cancel));
        let ontypechange = link.callback(|_: Event| AppMsg::TypeChanged);
        let on_select = link.callback(AppMsg::Select);
        let onreset = link.callback(|_: MouseEvent| AppMsg::Reset);

        html! { <>
            <div class="sidebar">
                <ul class="workouts">
                    <form
                        class={classes!("form", (!self.form_visible).then_some("hidden"))}
                        style={self.form_display_suppressed.then_some("display: none")}
                        {onsubmit}
                        {onkeydown}
                    >
                        <div class="form__row">
                            <label class="form__label">{"Type"}</label>
                            <select class="form__input form__input--type" ref={self.kind_input.clone()} onchange={ontypechange}>
                                <option value="running">{"Running"}</option>
                                <option value="cycling">{"Cycling"}</option>
                            </select>
                        </div>
                        {self.input_row("Distance", "mi", &self.distance_input, false)}
                        {self.input_row("Duration", "min", &self.duration_input, false)}
                        {self.input_row("Cadence", "step/min", &self.cadence_input, self.elevation_visible)}
                        {self.input_row("Elev Gain", "meters", &self.elevation_input, !self.elevation_visible)}
                        <button class="form__btn">{"OK"}</button>
                    </form>
                    { for self.entries.iter().map(|workout| html! {
                        <WorkoutEntry key={workout.id().to_owned()} workout={workout.clone()} on_select={on_select.clone()} />
                    }) }
                </ul>
                <button class="btn--reset" onclick={onreset}>{"Reset workouts"}</button>
            </div>
            <div id={MAP_CONTAINER_ID}></div>
        </> }
    }
}

fn input_value(node: &NodeRef) -> String {
    node.cast::<HtmlInputElement>().map(|input| input.value()).unwrap_or_default()
}

/// Reads the optional JSON config embedded in the page.
fn load_config() -> Result<SessionConfig, impl std::fmt::Display> {
    let json = document().get_element_by_id(CONFIG_ELEMENT_ID).and_then(|element| element.text_content());
    SessionConfig::from_page(json.as_deref())
}

fn main() {
    yew::Renderer::<App>::new().render();
}
