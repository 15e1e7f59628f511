use crate::components::layout::{LoadFailed, ScreenFrame, Spinner};
use crate::context::{spawn_action, use_client};
use crate::state::{LoadPolicy, RemoteEntity};
use leptos::prelude::*;

#[component]
pub fn RecommendationsPage() -> impl IntoView {
    let client = use_client();
    let state = *client.state();

    spawn_action(&client, |c| async move {
        c.load_recommendations(LoadPolicy::Once).await
    });

    let on_retry = move || {
        spawn_action(&client, |c| async move {
            c.load_recommendations(LoadPolicy::Retry).await
        })
    };

    view! {
        <ScreenFrame title="Recommendations">
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <h3 class="card-title">"People you may like"</h3>
                    {move || state.with(|s| match &s.recommendations.users {
                        RemoteEntity::NotLoaded | RemoteEntity::Loading => view! { <Spinner /> }.into_any(),
                        RemoteEntity::Failed => view! {
                            <LoadFailed message="Could not load recommendations." on_retry=on_retry.clone() />
                        }.into_any(),
                        RemoteEntity::Loaded(users) if users.is_empty() => view! {
                            <p class="text-base-content/50 py-4">"No recommendations yet. Add some interests to your profile."</p>
                        }.into_any(),
                        RemoteEntity::Loaded(users) => users
                            .iter()
                            .map(|user| {
                                let interests = user
                                    .interests
                                    .iter()
                                    .map(|i| view! { <span class="badge badge-outline">{i.clone()}</span> })
                                    .collect_view();
                                view! {
                                    <div class="flex flex-col gap-1 border-b border-base-200 py-3">
                                        <span class="font-semibold">
                                            {user.name.clone().unwrap_or_else(|| "Anonymous".to_string())}
                                        </span>
                                        <div class="flex flex-wrap gap-2">{interests}</div>
                                    </div>
                                }
                            })
                            .collect_view()
                            .into_any(),
                    })}
                </div>
            </div>
        </ScreenFrame>
    }
}
