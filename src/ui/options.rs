/// Options page: GitHub token, owner and repository

use patternfly_yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::browser::BrowserHost;
use crate::config::TrackerConfig;
use crate::host::ConfigStore;
use crate::ui::components::{SavedBadge, TextField};

#[derive(Clone, PartialEq)]
enum OptionsState {
    Loading,
    Idle,
    Saving,
    Saved,
    Invalid(Vec<String>),
    Error(String),
}

#[derive(Clone, Copy, PartialEq)]
enum SettingsField {
    Token,
    Owner,
    Repo,
}

fn set_field(config: &TrackerConfig, field: SettingsField, value: String) -> TrackerConfig {
    let mut next = config.clone();
    match field {
        SettingsField::Token => next.token = Some(value),
        SettingsField::Owner => next.owner = Some(value),
        SettingsField::Repo => next.repo = Some(value),
    }
    next
}

#[function_component(OptionsPage)]
pub fn options_page() -> Html {
    let state = use_state(|| OptionsState::Loading);
    let config = use_state(TrackerConfig::default);

    // Load stored settings on mount
    {
        let state = state.clone();
        let config = config.clone();

        use_effect_with((), move |_| {
            spawn_local(async move {
                match BrowserHost.load().await {
                    Ok(stored) => {
                        config.set(stored);
                        state.set(OptionsState::Idle);
                    }
                    Err(e) => {
                        log::warn!("Could not read GitHub settings: {}", e);
                        state.set(OptionsState::Error(format!("Failed to load: {}", e)));
                    }
                }
            });
            || ()
        });
    }

    let on_field = {
        let config = config.clone();
        let state = state.clone();
        move |field: SettingsField| {
            let config = config.clone();
            let state = state.clone();
            Callback::from(move |value: String| {
                config.set(set_field(&config, field, value));
                if *state == OptionsState::Saved {
                    state.set(OptionsState::Idle);
                }
            })
        }
    };

    // Save handler
    let on_save = {
        let config = config.clone();
        let state = state.clone();

        Callback::from(move |_: MouseEvent| {
            if let Err(problems) = config.validate() {
                state.set(OptionsState::Invalid(problems));
                return;
            }

            let normalized = config.normalized();
            config.set(normalized.clone());
            state.set(OptionsState::Saving);

            let state = state.clone();
            spawn_local(async move {
                match BrowserHost.store(&normalized).await {
                    Ok(()) => {
                        log::info!("GitHub settings saved");
                        state.set(OptionsState::Saved);
                    }
                    Err(e) => {
                        state.set(OptionsState::Error(format!("Failed to save: {}", e)));
                    }
                }
            });
        })
    };

    let is_busy = matches!(*state, OptionsState::Loading | OptionsState::Saving);

    html! {
        <div class="options">
            <h1 class="options-title">{"GitHub Settings"}</h1>
            <SavedBadge visible={*state == OptionsState::Saved} text="Settings saved" />

            {match &*state {
                OptionsState::Loading | OptionsState::Saving => html! {
                    <div class="loading-text-center">
                        <Spinner />
                    </div>
                },
                OptionsState::Invalid(problems) => html! {
                    <Alert r#type={AlertType::Warning} title={"Please fix the following"} inline={true}>
                        <ul class="problem-list">
                            {for problems.iter().map(|p| html! { <li>{p}</li> })}
                        </ul>
                    </Alert>
                },
                OptionsState::Error(err) => html! {
                    <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                        {err.clone()}
                    </Alert>
                },
                OptionsState::Idle | OptionsState::Saved => html! {},
            }}

            <div class="flex-column-gap">
                <TextField
                    id="token"
                    label="Personal access token"
                    value={config.token.clone().unwrap_or_default()}
                    placeholder="ghp_..."
                    password={true}
                    oninput={on_field(SettingsField::Token)}
                />
                <TextField
                    id="owner"
                    label="Owner"
                    value={config.owner.clone().unwrap_or_default()}
                    placeholder="GitHub user or organization"
                    oninput={on_field(SettingsField::Owner)}
                />
                <TextField
                    id="repo"
                    label="Repository"
                    value={config.repo.clone().unwrap_or_default()}
                    placeholder="bookmarks"
                    oninput={on_field(SettingsField::Repo)}
                />
                <Button onclick={on_save} disabled={is_busy} variant={ButtonVariant::Primary}>
                    {"Save settings"}
                </Button>
            </div>
        </div>
    }
}
