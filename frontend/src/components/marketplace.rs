use crate::components::layout::{LoadFailed, ScreenFrame};
use crate::context::{spawn_action, use_client};
use crate::state::{LoadPolicy, RemoteStatus};
use leptos::prelude::*;
use meetpoint_shared::PIZZA_PRICE_POINTS;

#[component]
pub fn MarketplacePage() -> impl IntoView {
    let client = use_client();
    let state = *client.state();

    spawn_action(&client, |c| async move { c.load_balance(LoadPolicy::Once).await });

    let status = Memo::new(move |_| state.with(|s| s.marketplace.balance.status()));
    let on_retry = {
        let client = client.clone();
        move || spawn_action(&client, |c| async move { c.load_balance(LoadPolicy::Retry).await })
    };
    let on_buy = move |_| spawn_action(&client, |c| async move { c.buy_pizza().await });

    view! {
        <ScreenFrame title="Marketplace">
            <Show when=move || state.with(|s| s.marketplace.success)>
                <div role="alert" class="alert alert-success">"Enjoy your pizza!"</div>
            </Show>
            <Show when=move || state.with(|s| s.marketplace.error)>
                <div role="alert" class="alert alert-error">"Purchase failed. Do you have enough points?"</div>
            </Show>

            <div class="stats shadow w-full bg-base-100">
                <div class="stat">
                    <div class="stat-title">"Your points"</div>
                    <div class="stat-value text-primary">
                        {move || match status.get() {
                            RemoteStatus::Loaded => state
                                .with(|s| s.marketplace.points())
                                .map(|p| p.to_string())
                                .unwrap_or_default()
                                .into_any(),
                            RemoteStatus::Failed => "-".into_any(),
                            RemoteStatus::NotLoaded | RemoteStatus::Loading => view! {
                                <span class="loading loading-dots"></span>
                            }.into_any(),
                        }}
                    </div>
                </div>
            </div>
            <Show when=move || status.get() == RemoteStatus::Failed>
                <LoadFailed message="Could not load your points." on_retry=on_retry.clone() />
            </Show>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body flex-row items-center justify-between">
                    <div>
                        <h3 class="card-title">"Pizza"</h3>
                        <p class="text-base-content/70">{format!("{} points", PIZZA_PRICE_POINTS)}</p>
                    </div>
                    <button class="btn btn-primary" on:click=on_buy>"Buy"</button>
                </div>
            </div>
        </ScreenFrame>
    }
}
