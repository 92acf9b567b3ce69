use leptos::prelude::*;

/// A labelled checkbox. The `id` is part of the page contract, the same ids
/// the signup markup has always used.
#[component]
pub fn ConsentCheckbox(
    #[prop(into)] id: String,
    #[prop(into)] checked: Signal<bool>,
    set_checked: WriteSignal<bool>,
    children: Children,
) -> impl IntoView {
    let input_id = id.clone();
    view! {
        <label class="consent-checkbox" for=id>
            <input
                type="checkbox"
                id=input_id
                prop:checked=move || checked.get()
                on:change=move |ev| set_checked.set(event_target_checked(&ev))
            />
            <span class="consent-label">{children()}</span>
        </label>
    }
}
