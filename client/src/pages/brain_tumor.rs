//! MRI brain-tumor segmentation: pick an image, send it, show and download
//! the three returned images.

#[cfg(test)]
#[path = "brain_tumor_test.rs"]
mod brain_tumor_test;

use leptos::prelude::*;

use crate::components::session_bar::SessionBar;
use crate::net::types::{FilePayload, SegmentationResult};
use crate::pages::doctor::DOCTOR_LINKS;
use crate::util::files::{artifact_filename, image_data_url};

/// One downloadable artifact of a segmentation.
#[derive(Clone, Debug, PartialEq)]
pub struct Artifact {
    pub label: &'static str,
    pub url: String,
    pub filename: String,
}

pub fn artifacts(result: &SegmentationResult, stamp: u64) -> Vec<Artifact> {
    [
        ("Image originale", "original", &result.original_image),
        ("Masque de segmentation", "segmentation_mask", &result.segmentation_mask),
        ("Comparaison", "comparison", &result.comparison_image),
    ]
    .into_iter()
    .map(|(label, kind, data)| Artifact {
        label,
        url: image_data_url(data),
        filename: artifact_filename(kind, stamp),
    })
    .collect()
}

#[derive(Clone, Debug, Default, PartialEq)]
enum Analysis {
    #[default]
    Idle,
    Running,
    Done(SegmentationResult),
    Failed(String),
}

#[component]
pub fn BrainTumorPage() -> impl IntoView {
    let ctx = expect_context::<crate::app::PortalContext>();
    let selected = RwSignal::new(None::<FilePayload>);
    let analysis = RwSignal::new(Analysis::Idle);

    let on_pick = move |ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen::JsCast;

            let Some(input) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) else {
                return;
            };
            let Some(file) = crate::util::files::first_selected(&input) else {
                return;
            };
            leptos::task::spawn_local(async move {
                match crate::util::files::read_file(&file).await {
                    Ok(payload) => {
                        match crate::util::validation::validate_segmentation_image(&payload.content_type, payload.size()) {
                            Ok(()) => {
                                selected.set(Some(payload));
                                analysis.set(Analysis::Idle);
                            }
                            Err(message) => {
                                selected.set(None);
                                analysis.set(Analysis::Failed(message.to_owned()));
                            }
                        }
                    }
                    Err(err) => analysis.set(Analysis::Failed(err)),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = ev;
        }
    };

    let on_analyze = move |_| {
        let Some(image) = selected.get_untracked() else {
            analysis.set(Analysis::Failed("Please select an image first".to_owned()));
            return;
        };
        analysis.set(Analysis::Running);
        let client = ctx.client.clone();
        leptos::task::spawn_local(async move {
            let outcome = match crate::net::api::segment_brain_tumor(&client, &image).await {
                Ok(response) => response.into_result(),
                Err(err) => Err(crate::net::error::error_message(&err)),
            };
            match outcome {
                Ok(result) => {
                    log::info!("segmentation finished in {:.2}s", result.processing_time);
                    analysis.set(Analysis::Done(result));
                }
                Err(message) => analysis.set(Analysis::Failed(message)),
            }
        });
    };

    let on_reset = move |_| {
        selected.set(None);
        analysis.set(Analysis::Idle);
    };

    view! {
        <SessionBar links=DOCTOR_LINKS.to_vec()/>
        <section class="page page--segmentation">
            <h1>"Analyse de tumeur cérébrale"</h1>
            <input type="file" accept="image/png,image/jpeg,image/bmp,image/gif" on:change=on_pick/>
            <p class="segmentation__file">
                {move || selected.with(|file| file.as_ref().map(crate::util::files::describe).unwrap_or_default())}
            </p>
            <button
                class="segmentation__run"
                on:click=on_analyze
                disabled=move || selected.with(Option::is_none) || analysis.with(|a| *a == Analysis::Running)
            >
                {move || if analysis.with(|a| *a == Analysis::Running) { "Analyse en cours..." } else { "Analyser" }}
            </button>
            <button class="segmentation__reset" on:click=on_reset>"Réinitialiser"</button>
            {move || match analysis.get() {
                Analysis::Idle | Analysis::Running => ().into_any(),
                Analysis::Failed(message) => view! { <p class="page__error">{message}</p> }.into_any(),
                Analysis::Done(result) => {
                    let stamp = u64::try_from(now_millis()).unwrap_or_default();
                    view! {
                        <p class="segmentation__timing">{format!("Temps de traitement : {:.2} s", result.processing_time)}</p>
                        <div class="segmentation__grid">
                            {artifacts(&result, stamp)
                                .into_iter()
                                .map(|artifact| {
                                    let Artifact { label, url, filename } = artifact;
                                    let download_url = url.clone();
                                    view! {
                                        <figure class="segmentation__artifact">
                                            <img src=url alt=label/>
                                            <figcaption>{label}</figcaption>
                                            <button on:click=move |_| crate::util::files::download_data_url(&download_url, &filename)>
                                                "Télécharger"
                                            </button>
                                        </figure>
                                    }
                                })
                                .collect_view()}
                        </div>
                    }
                    .into_any()
                }
            }}
        </section>
    }
}

/// Milliseconds since the epoch in the browser; zero elsewhere.
fn now_millis() -> i64 {
    #[cfg(feature = "hydrate")]
    {
        #[allow(clippy::cast_possible_truncation)]
        {
            js_sys::Date::now() as i64
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        0
    }
}
