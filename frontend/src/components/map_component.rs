use futures::channel::mpsc::UnboundedSender;
use gloo_console::{error, info};
use leaflet::{LatLng, Map, MapOptions, Marker, Popup, PopupOptions, TileLayer, TileLayerOptions};
use wasm_bindgen::{JsCast, JsValue, closure::Closure, prelude::wasm_bindgen};
use web_sys::js_sys::{Object, Reflect};
use workout_tracker_lib::{
    collaborators::{MapView, PanOptions},
    config::TileLayerConfig,
    render::MarkerSpec,
    session::UiEvent,
    workout::Coords,
};

#[wasm_bindgen]
extern "C" {
    // Leaflet calls the bindings crate does not cover, reached through plain handles.
    type MapHandle;

    #[wasm_bindgen(method, js_name = setView)]
    fn set_view_with_options(this: &MapHandle, center: &LatLng, zoom: f64, options: &JsValue);

    #[wasm_bindgen(method, js_name = on)]
    fn on(this: &MapHandle, kind: &str, handler: &JsValue);

    type MarkerHandle;

    #[wasm_bindgen(method, js_name = openPopup)]
    fn open_popup(this: &MarkerHandle);

    type MapClick;

    #[wasm_bindgen(method, getter)]
    fn latlng(this: &MapClick) -> ClickPosition;

    type ClickPosition;

    #[wasm_bindgen(method, getter)]
    fn lat(this: &ClickPosition) -> f64;

    #[wasm_bindgen(method, getter)]
    fn lng(this: &ClickPosition) -> f64;
}

/// The Leaflet map living in the element with `container_id`. It is created
/// on `load`, once the user's position is known.
pub struct LeafletMap {
    container_id: String,
    map: Option<Map>,
    events: UnboundedSender<UiEvent>,
    on_click: Option<Closure<dyn FnMut(MapClick)>>,
}

impl LeafletMap {
    pub fn new(container_id: impl Into<String>, events: UnboundedSender<UiEvent>) -> Self {
        Self {
            container_id: container_id.into(),
            map: None,
            events,
            on_click: None,
        }
    }

    fn subscribe_clicks(&mut self, map: &Map) {
        let events = self.events.clone();
        let on_click = Closure::<dyn FnMut(MapClick)>::new(move |click: MapClick| {
            let position = click.latlng();
            if events.unbounded_send(UiEvent::MapClicked(Coords::new(position.lat(), position.lng()))).is_err() {
                error!("Session is gone, dropping map click");
            }
        });

        map.unchecked_ref::<MapHandle>().on("click", on_click.as_ref());
        self.on_click = Some(on_click);
    }
}

impl MapView for LeafletMap {
    fn load(&mut self, center: Coords, zoom: f64, tiles: &TileLayerConfig) {
        if gloo_utils::document().get_element_by_id(&self.container_id).is_none() {
            error!(format!("No #{} element, the map cannot load", self.container_id));
            return;
        }

        let map = Map::new(&self.container_id, &MapOptions::default());
        map.set_view(&lat_lng(center), zoom);
        add_tile_layer(&map, tiles);
        self.subscribe_clicks(&map);
        map.invalidate_size(false);

        info!(format!("Map loaded at {}, {}", center.lat, center.lng));
        self.map = Some(map);
    }

    fn add_marker(&mut self, marker: &MarkerSpec) {
        let Some(map) = &self.map else {
            error!("Marker added before the map was loaded");
            return;
        };

        let popup_opts = PopupOptions::default();
        set_option(&popup_opts, "maxWidth", marker.popup.max_width);
        set_option(&popup_opts, "minWidth", marker.popup.min_width);
        set_option(&popup_opts, "autoClose", marker.popup.auto_close);
        set_option(&popup_opts, "closeOnClick", marker.popup.close_on_click);
        set_option(&popup_opts, "className", marker.popup.class_name.as_str());

        let popup = Popup::new(&popup_opts, None);
        popup.set_content(&marker.content.as_str().into());

        let leaflet_marker = Marker::new(&lat_lng(marker.coords));
        leaflet_marker.add_to(map);
        leaflet_marker.bind_popup(&popup);
        leaflet_marker.unchecked_ref::<MarkerHandle>().open_popup();
    }

    fn set_view(&mut self, center: Coords, zoom: f64, pan: Option<PanOptions>) {
        let Some(map) = &self.map else {
            return;
        };

        match pan {
            Some(pan) => {
                let pan_opts = Object::new();
                set_option(&pan_opts, "duration", pan.duration);
                let opts = Object::new();
                set_option(&opts, "animate", pan.animate);
                set_option(&opts, "pan", pan_opts);
                map.unchecked_ref::<MapHandle>().set_view_with_options(&lat_lng(center), zoom, &opts);
            }
            None => {
                map.set_view(&lat_lng(center), zoom);
            }
        }
    }
}

fn lat_lng(coords: Coords) -> LatLng {
    LatLng::new(coords.lat, coords.lng)
}

fn set_option(target: &JsValue, key: &str, value: impl Into<JsValue>) {
    let _ = Reflect::set(target, &JsValue::from_str(key), &value.into());
}

fn add_tile_layer(map: &Map, tiles: &TileLayerConfig) {
    let opts = TileLayerOptions::new();
    opts.set_update_when_idle(true);
    set_option(&opts, "attribution", tiles.attribution.as_str());
    TileLayer::new_options(&tiles.url, &opts).add_to(map);
}
