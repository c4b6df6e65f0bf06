use workout_tracker_lib::{render, workout::Workout};
use yew::prelude::*;

#[derive(PartialEq, Properties, Clone)]
pub struct WorkoutEntryProps {
    pub workout: Workout,
    pub on_select: Callback<String>,
}

#[function_component]
pub fn WorkoutEntry(props: &WorkoutEntryProps) -> Html {
    let workout = &props.workout;

    let onclick = {
        let id = workout.id().to_owned();
        let on_select = props.on_select.clone();
        Callback::from(move |_: MouseEvent| on_select.emit(id.clone()))
    };

    html! {
        <li class={render::entry_class(workout)} data-id={workout.id().to_owned()} {onclick}>
            <h2 class="workout__title">{workout.description()}</h2>
            { for render::details(workout).into_iter().map(|detail| html! {
                <div class="workout__details">
                    <span class="workout__icon">{detail.icon}</span>
                    <span class="workout__value">{detail.value}</span>
                    <span class="workout__unit">{detail.unit}</span>
                </div>
            }) }
        </li>
    }
}
