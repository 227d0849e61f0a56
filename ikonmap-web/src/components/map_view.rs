use crate::map::{CONTAINER_ID, FeatureClick, MapHandle, Relay, embed_url};
use ikonmap_core::Viewport;
use std::rc::Rc;
use yew::prelude::*;

#[derive(Clone, Debug, PartialEq)]
enum EmbedStatus {
    Loading,
    Ready,
    Failed,
}

#[derive(Properties, Clone, PartialEq)]
pub struct Props {
    pub service: MapHandle,
    /// Hosted map id; `None` renders the setup placeholder.
    #[prop_or_default]
    pub map_id: Option<AttrValue>,
    #[prop_or_default]
    pub selected: Option<AttrValue>,
    /// Viewport to pan to when `selected` changes.
    #[prop_or_default]
    pub focus: Option<Viewport>,
    pub visible_ids: Rc<Vec<String>>,
    pub on_viewport: Callback<Viewport>,
    pub on_feature_click: Callback<FeatureClick>,
}

fn placeholder() -> Html {
    html! {
        <div class="map-placeholder">
            <h2>{ "Map Not Configured" }</h2>
            <p>{ "Create the hosted resort map, then set its id in static/data/map.json or the FELT_MAP_ID build variable." }</p>
            <pre><code>{ "FELT_MAP_ID=your-map-id trunk build --release" }</code></pre>
        </div>
    }
}

#[function_component(MapView)]
pub fn map_view(p: &Props) -> Html {
    let status = use_state(|| EmbedStatus::Loading);

    {
        let status = status.clone();
        let service = p.service.clone();
        let configured = p.map_id.is_some();
        use_effect_with(service, move |service| {
            if configured {
                service.embed(
                    CONTAINER_ID,
                    Callback::from(move |result: Result<(), String>| {
                        status.set(if result.is_ok() {
                            EmbedStatus::Ready
                        } else {
                            EmbedStatus::Failed
                        });
                    }),
                );
            }
            || {}
        });
    }

    let viewport_relay = use_memo((), |()| Relay::<Viewport>::new());
    let click_relay = use_memo((), |()| Relay::<FeatureClick>::new());
    viewport_relay.replace(p.on_viewport.clone());
    click_relay.replace(p.on_feature_click.clone());

    {
        let ready = *status == EmbedStatus::Ready;
        use_effect_with((p.service.clone(), ready), move |(service, ready)| {
            let subscriptions = ready.then(|| {
                (
                    service.subscribe_viewport(viewport_relay.callback()),
                    service.subscribe_click(click_relay.callback()),
                )
            });
            move || drop(subscriptions)
        });
    }

    {
        let ready = *status == EmbedStatus::Ready;
        use_effect_with(
            (p.service.clone(), ready, p.selected.clone(), p.focus),
            move |(service, ready, selected, focus)| {
                if *ready {
                    service.select_feature(selected.as_deref());
                    if let Some(viewport) = focus {
                        service.set_viewport(viewport);
                    }
                }
                || {}
            },
        );
    }

    {
        let ready = *status == EmbedStatus::Ready;
        use_effect_with(
            (p.service.clone(), ready, p.visible_ids.clone()),
            move |(service, ready, visible_ids)| {
                if *ready {
                    service.apply_filter(visible_ids);
                }
                || {}
            },
        );
    }

    let Some(map_id) = p.map_id.as_deref() else {
        return placeholder();
    };

    if *status == EmbedStatus::Failed {
        return html! {
            <div class="map-view">
                <iframe class="map-view__frame" src={embed_url(map_id)} title="Ikon Pass Resort Map"></iframe>
            </div>
        };
    }

    html! {
        <div class="map-view">
            if *status == EmbedStatus::Loading {
                <div class="map-view__loading" role="status">{ "Loading map..." }</div>
            }
            <div id={CONTAINER_ID} class="map-view__canvas"></div>
        </div>
    }
}
