use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use dioxus::html::FileEngine;
use dioxus::prelude::*;
use futures_channel::mpsc::UnboundedSender;
use futures_util::StreamExt;
use tracing::warn;

use crate::core::config::ClientConfig;
use crate::core::page::{DownloadKind, MapPage};
use crate::core::platform;
use crate::core::state::{download_button_class, StatusPanel};
use crate::core::upload::{submit_upload, ProcessedUpload, UploadArchive, UploadClient, UploadError};
use crate::map::leaflet::{DocumentEval, LeafletSurface, LEAFLET_CSS, LEAFLET_JS};
use crate::map::session::MapSession;
use crate::t;

const MAP_CONTAINER_ID: &str = "map";

type Page = MapPage<LeafletSurface<DocumentEval>>;

#[component]
pub fn MapClient() -> Element {
    let config = use_hook(ClientConfig::load);
    let fit_max_zoom = config.map.fit_max_zoom;

    // Labels follow the global language signal without remounting the map.
    let lang_code: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let lang_marker = lang_code.as_ref().map(|c| c()).unwrap_or_default();

    let page = use_signal(|| -> Page {
        MapPage::new(MapSession::new(LeafletSurface::new(DocumentEval), fit_max_zoom))
    });
    let selection = use_signal(|| Option::<Arc<dyn FileEngine>>::None);

    let sender_slot: Rc<RefCell<Option<UnboundedSender<MapEvent>>>> = Rc::new(RefCell::new(None));
    let sender_slot_for_loop = sender_slot.clone();

    let coroutine = {
        let config = config.clone();

        use_coroutine(move |mut rx: UnboundedReceiver<MapEvent>| {
            let config = config.clone();
            let sender_slot = sender_slot_for_loop.clone();
            let mut page = page;

            async move {
                while let Some(event) = rx.next().await {
                    match event {
                        MapEvent::Submit => {
                            if page.with_mut(|p| p.begin_submit()) {
                                queue_upload(sender_slot.clone(), config.clone(), selection());
                            }
                        }
                        MapEvent::UploadFinished(outcome) => {
                            page.with_mut(|p| {
                                p.finish_submit(outcome);
                            });
                        }
                        MapEvent::Download(kind) => {
                            let target = page.read().download_target(kind).map(str::to_string);
                            if let Some(href) = target {
                                open_link(&config, &href);
                            }
                        }
                        MapEvent::Reset => {
                            page.with_mut(|p| p.reset());
                            platform::reload_page();
                        }
                    }
                }
            }
        })
    };

    sender_slot.borrow_mut().replace(coroutine.tx());

    let send_event = {
        let coroutine = coroutine.clone();
        move |event: MapEvent| {
            coroutine.send(event);
        }
    };
    let send_submit = send_event.clone();
    let send_reset = send_event.clone();
    let send_shp = send_event.clone();
    let send_geojson = send_event.clone();

    let map_config = config.map.clone();
    let mut boot_page = page;
    let mut selection_signal = selection;

    let (busy, links, panel, reset_hint) = {
        let view = page.read();
        (
            view.submit_state().is_busy(),
            view.downloads().cloned(),
            view.status().clone(),
            view.reset_hint_visible(),
        )
    };
    let submit_label = if busy {
        t!("upload-processing")
    } else {
        t!("upload-submit")
    };
    let actions_class = if links.is_some() {
        "actions"
    } else {
        "actions hidden"
    };
    let button_class = download_button_class(links.as_ref());
    let downloads_disabled = links.is_none();
    let error_text = panel.error_text().unwrap_or_default();
    let summary_lines: Vec<String> = match &panel {
        StatusPanel::Summary(lines) => lines
            .labelled(&t!("summary-nodes"), &t!("summary-connectivity"))
            .to_vec(),
        _ => Vec::new(),
    };

    rsx! {
        document::Link { rel: "stylesheet", href: LEAFLET_CSS }
        document::Script { src: LEAFLET_JS }

        article { class: "map-client",
            div { style: "display:none", "{lang_marker}" }
            form {
                id: "upload-form",
                class: "upload-form",
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    send_submit(MapEvent::Submit);
                },
                label { class: "upload-form__label", r#for: "shpzip", {t!("upload-label")} }
                input {
                    id: "shpzip",
                    name: "file",
                    r#type: "file",
                    accept: ".zip",
                    onchange: move |evt: FormEvent| selection_signal.set(evt.files()),
                }
                div { class: "upload-form__buttons",
                    button {
                        r#type: "submit",
                        class: "button button--accent",
                        disabled: busy,
                        "{submit_label}"
                    }
                    button {
                        id: "reset-file",
                        r#type: "button",
                        class: "button button--ghost",
                        onclick: move |_| send_reset(MapEvent::Reset),
                        {t!("reset-button")}
                    }
                }
                if reset_hint {
                    p { id: "reset-message", class: "upload-form__hint", {t!("reset-hint")} }
                }
            }

            div { id: "actions", class: "{actions_class}",
                button {
                    id: "download-shp",
                    r#type: "button",
                    class: "{button_class}",
                    disabled: downloads_disabled,
                    onclick: move |_| send_shp(MapEvent::Download(DownloadKind::Shapefile)),
                    {t!("download-shp")}
                }
                button {
                    id: "download-geojson",
                    r#type: "button",
                    class: "{button_class}",
                    disabled: downloads_disabled,
                    onclick: move |_| send_geojson(MapEvent::Download(DownloadKind::Geojson)),
                    {t!("download-geojson")}
                }
            }

            div { id: "summary", class: "summary",
                match &panel {
                    StatusPanel::Empty => rsx! {},
                    StatusPanel::Summary(_) => rsx! {
                        for line in summary_lines.iter() {
                            div { class: "summary__line", "{line}" }
                        }
                    },
                    StatusPanel::Error(_) => rsx! {
                        div { class: "error-message", "{error_text}" }
                    },
                }
            }

            div {
                id: MAP_CONTAINER_ID,
                class: "map",
                onmounted: move |_| {
                    boot_page.with_mut(|p| {
                        p.session_mut()
                            .surface_mut()
                            .boot(MAP_CONTAINER_ID, &map_config)
                    });
                },
            }
        }
    }
}

/// Read the selection and upload it off the event loop; the outcome comes back
/// as [`MapEvent::UploadFinished`].
fn queue_upload(
    sender_slot: Rc<RefCell<Option<UnboundedSender<MapEvent>>>>,
    config: ClientConfig,
    files: Option<Arc<dyn FileEngine>>,
) {
    if let Some(sender) = sender_slot.borrow().as_ref().cloned() {
        spawn(async move {
            let outcome = read_and_upload(&config, files).await;
            let _ = sender.unbounded_send(MapEvent::UploadFinished(outcome));
        });
    }
}

async fn read_and_upload(
    config: &ClientConfig,
    files: Option<Arc<dyn FileEngine>>,
) -> Result<ProcessedUpload, UploadError> {
    let archive = UploadArchive::from_selection(files)
        .await
        .inspect_err(|err| warn!("reading selection failed: {err}"))?;
    let client = UploadClient::new(config)?;
    submit_upload(&client, archive).await
}

fn open_link(config: &ClientConfig, href: &str) {
    match config.resolve(href) {
        Ok(url) => platform::navigate_to(url.as_str()),
        Err(err) => warn!("cannot resolve download link {href:?}: {err}"),
    }
}

#[derive(Debug)]
enum MapEvent {
    Submit,
    UploadFinished(Result<ProcessedUpload, UploadError>),
    Download(DownloadKind),
    Reset,
}
