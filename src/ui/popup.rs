/// Popup UI: bookmark form with Save / Search / Settings

use std::rc::Rc;

use patternfly_yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::bookmark::DraftField;
use crate::browser::BrowserHost;
use crate::controller::{BookmarkController, BookmarkForm, FormAction, SaveState};
use crate::github::GitHubConnector;
use crate::ui::components::{SavedBadge, TextField};

impl Reducible for BookmarkForm {
    type Action = FormAction;

    fn reduce(self: Rc<Self>, action: FormAction) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        Rc::new(next)
    }
}

fn browser_controller() -> BookmarkController {
    let host = Rc::new(BrowserHost);
    BookmarkController::new(
        host.clone(),
        host.clone(),
        host.clone(),
        host,
        Rc::new(GitHubConnector),
    )
}

#[function_component(App)]
pub fn app() -> Html {
    let controller = use_memo((), |_| browser_controller());
    let form = use_reducer(BookmarkForm::default);

    // Load settings and the active tab on mount
    {
        let controller = controller.clone();
        let dispatcher = form.dispatcher();

        use_effect_with((), move |_| {
            let controller = (*controller).clone();
            spawn_local(async move {
                controller
                    .initialize(move |action| dispatcher.dispatch(action))
                    .await;
            });
            || ()
        });
    }

    let on_field = {
        let dispatcher = form.dispatcher();
        move |field: DraftField| {
            let dispatcher = dispatcher.clone();
            Callback::from(move |value: String| {
                dispatcher.dispatch(FormAction::UpdateField(field, value));
            })
        }
    };

    // Save handler
    let on_save = {
        let form = form.clone();
        let controller = controller.clone();

        Callback::from(move |_: MouseEvent| {
            let snapshot = (*form).clone();
            let dispatcher = form.dispatcher();
            let controller = (*controller).clone();
            spawn_local(async move {
                // Failures were already alerted by the controller
                let _ = controller
                    .submit(&snapshot, move |action| dispatcher.dispatch(action))
                    .await;
            });
        })
    };

    // Search handler
    let on_search = {
        let form = form.clone();
        let controller = controller.clone();

        Callback::from(move |_: MouseEvent| {
            // Failures were already alerted by the controller
            let _ = controller.search(&form.config);
        })
    };

    let on_settings = {
        let controller = controller.clone();

        Callback::from(move |_: MouseEvent| {
            if let Err(e) = controller.open_settings() {
                log::error!("Failed to open settings: {}", e);
            }
        })
    };

    let save_label = match form.save_state {
        SaveState::Idle => html! { {"💾 Save"} },
        SaveState::Saving => html! {
            <span class="button-busy"><Spinner />{" Saving..."}</span>
        },
        SaveState::Saved => html! { {"✓ Saved"} },
    };

    html! {
        <div class="popup">
            <SavedBadge visible={form.show_saved} />

            <div class="flex-column-gap">
                <TextField
                    id="link"
                    label="Link"
                    value={form.draft.link.clone()}
                    placeholder="Enter URL"
                    oninput={on_field(DraftField::Link)}
                />
                <TextField
                    id="title"
                    label="Title"
                    value={form.draft.title.clone()}
                    placeholder="Enter title"
                    oninput={on_field(DraftField::Title)}
                />
                <TextField
                    id="description"
                    label="Description"
                    value={form.draft.description.clone()}
                    placeholder="Something useful for your future self"
                    multiline={true}
                    oninput={on_field(DraftField::Description)}
                />

                <div class="action-row">
                    <Button onclick={on_save} disabled={!form.can_save()} variant={ButtonVariant::Primary}>
                        {save_label}
                    </Button>
                    <Button onclick={on_search} variant={ButtonVariant::Secondary}>
                        {"🔍 Search"}
                    </Button>
                    <Button onclick={on_settings} variant={ButtonVariant::Secondary}>
                        {"⚙"}
                    </Button>
                </div>
            </div>
        </div>
    }
}
