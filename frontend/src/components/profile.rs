use crate::components::layout::{LoadFailed, ScreenFrame, Spinner};
use crate::context::{spawn_action, use_client};
use crate::state::{LoadPolicy, RemoteStatus};
use leptos::prelude::*;

#[component]
pub fn ProfilePage() -> impl IntoView {
    let client = use_client();
    let state = *client.state();

    // 挂载时加载一次；正在加载或已加载时不会重复请求
    spawn_action(&client, |c| async move { c.load_profile(LoadPolicy::Once).await });

    let on_retry = {
        let client = client.clone();
        move || spawn_action(&client, |c| async move { c.load_profile(LoadPolicy::Retry).await })
    };
    let on_add = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        spawn_action(&client, |c| async move { c.add_interest().await });
    };

    let status = Memo::new(move |_| state.with(|s| s.profile.user.status()));

    view! {
        <ScreenFrame title="Profile">
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    {move || match status.get() {
                        RemoteStatus::Loaded => view! { <ProfileDetails /> }.into_any(),
                        RemoteStatus::Failed => view! { <LoadFailed message="Could not load your profile." on_retry=on_retry.clone() /> }.into_any(),
                        RemoteStatus::NotLoaded | RemoteStatus::Loading => view! { <Spinner /> }.into_any(),
                    }}
                </div>
            </div>

            <div class="card bg-base-100 shadow-xl">
                <form class="card-body" on:submit=on_add>
                    <h3 class="card-title">"Add an interest"</h3>
                    <Show when=move || state.with(|s| s.profile.interest_failed)>
                        <div role="alert" class="alert alert-error text-sm py-2">"Could not add the interest."</div>
                    </Show>
                    <div class="join w-full">
                        <input
                            type="text"
                            placeholder="e.g. chess"
                            on:input=move |ev| state.update(|s| s.profile.interest_draft = event_target_value(&ev))
                            prop:value=move || state.with(|s| s.profile.interest_draft.clone())
                            class="input input-bordered join-item w-full"
                        />
                        <button class="btn btn-primary join-item">"Add"</button>
                    </div>
                </form>
            </div>
        </ScreenFrame>
    }
}

#[component]
fn ProfileDetails() -> impl IntoView {
    let state = *use_client().state();
    let user = Memo::new(move |_| state.with(|s| s.profile.user.value().cloned()));

    move || {
        user.get().map(|user| {
            let interests = if user.interests.is_empty() {
                view! { <span class="text-base-content/50">"No interests yet."</span> }.into_any()
            } else {
                user.interests
                    .iter()
                    .map(|interest| view! { <span class="badge badge-outline">{interest.clone()}</span> })
                    .collect_view()
                    .into_any()
            };
            view! {
                <h3 class="card-title">{user.display_name().to_string()}</h3>
                <p class="text-base-content/70">{user.email.clone()}</p>
                <div class="stat px-0">
                    <div class="stat-title">"Points"</div>
                    <div class="stat-value text-primary">{user.points}</div>
                </div>
                <div class="flex flex-wrap gap-2">{interests}</div>
            }
        })
    }
}
