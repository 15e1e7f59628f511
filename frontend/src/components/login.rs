use crate::context::{spawn_action, use_client};
use crate::state::login::AuthMode;
use leptos::prelude::*;

#[component]
pub fn LoginPage() -> impl IntoView {
    let client = use_client();
    let state = *client.state();

    let mode = Memo::new(move |_| state.with(|s| s.login.mode));
    let submitting = Memo::new(move |_| state.with(|s| s.login.submitting));
    let can_submit = Memo::new(move |_| state.with(|s| s.login.can_submit()));

    let on_submit = {
        let client = client.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();
            spawn_action(&client, |c| async move { c.submit_credentials().await });
        }
    };

    let mode_tab = move |target: AuthMode, label: &'static str| {
        view! {
            <a
                role="tab"
                class=move || if mode.get() == target { "tab tab-active" } else { "tab" }
                on:click=move |_| state.update(|s| s.login.switch_mode(target))
            >
                {label}
            </a>
        }
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"MeetPoint"</h1>
                    <p class="text-base-content/70">"Meet people who share your interests"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <div role="tablist" class="tabs tabs-boxed mb-2">
                            {mode_tab(AuthMode::Login, "Log in")}
                            {mode_tab(AuthMode::Signup, "Sign up")}
                        </div>

                        <Show when=move || state.with(|s| s.login.session_expired)>
                            <div role="alert" class="alert alert-warning text-sm py-2">
                                <span>"Your session has expired. Please log in again."</span>
                            </div>
                        </Show>
                        <Show when=move || state.with(|s| s.login.wrong_credentials)>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>
                                    {move || match mode.get() {
                                        AuthMode::Login => "Wrong email or password.",
                                        AuthMode::Signup => "Could not create the account.",
                                    }}
                                </span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="you@example.com"
                                on:input=move |ev| state.update(|s| s.login.draft.email = event_target_value(&ev))
                                prop:value=move || state.with(|s| s.login.draft.email.clone())
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <Show when=move || mode.get() == AuthMode::Signup>
                            <div class="form-control">
                                <label class="label" for="name">
                                    <span class="label-text">"Name"</span>
                                </label>
                                <input
                                    id="name"
                                    type="text"
                                    on:input=move |ev| state.update(|s| s.login.draft.name = event_target_value(&ev))
                                    prop:value=move || state.with(|s| s.login.draft.name.clone())
                                    class="input input-bordered"
                                />
                            </div>
                        </Show>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| state.update(|s| s.login.draft.password = event_target_value(&ev))
                                prop:value=move || state.with(|s| s.login.draft.password.clone())
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || !can_submit.get()>
                                {move || if submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Please wait..." }.into_any()
                                } else if mode.get() == AuthMode::Signup {
                                    "Create account".into_any()
                                } else {
                                    "Log in".into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
