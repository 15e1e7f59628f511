use crate::components::layout::ScreenFrame;
use crate::context::use_client;
use crate::state::route::Screen;
use leptos::prelude::*;

#[component]
pub fn MenuPage() -> impl IntoView {
    let client = use_client();

    let destinations = Screen::DESTINATIONS
        .into_iter()
        .map(|screen| {
            let client = client.clone();
            view! {
                <button
                    class="btn btn-primary btn-lg w-full"
                    on:click=move |_| {
                        client.go_to(screen);
                    }
                >
                    {screen.title()}
                </button>
            }
        })
        .collect_view();

    view! {
        <ScreenFrame title="Menu" is_menu=true>
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body grid gap-4 md:grid-cols-2">{destinations}</div>
            </div>
        </ScreenFrame>
    }
}
