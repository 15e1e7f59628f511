use crate::context::use_client;
use leptos::prelude::*;

/// 已登录屏幕的外框：标题、返回菜单、注销
#[component]
pub fn ScreenFrame(
    /// 屏幕标题
    title: &'static str,
    /// 菜单本身不显示返回按钮
    #[prop(optional)]
    is_menu: bool,
    children: Children,
) -> impl IntoView {
    let client = use_client();
    let on_back = {
        let client = client.clone();
        move |_| {
            client.back();
        }
    };
    let on_logout = move |_| client.logout();

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-3xl mx-auto space-y-6">
                <div class="navbar bg-base-100 rounded-box shadow-xl">
                    <div class="flex-1 gap-2">
                        {(!is_menu).then(|| view! {
                            <button on:click=on_back class="btn btn-ghost btn-sm">"← Menu"</button>
                        })}
                        <span class="text-xl font-semibold px-2">{title}</span>
                    </div>
                    <div class="flex-none">
                        <button on:click=on_logout class="btn btn-outline btn-error btn-sm">"Log out"</button>
                    </div>
                </div>
                {children()}
            </div>
        </div>
    }
}

/// 加载失败时的提示，附带重试按钮
#[component]
pub fn LoadFailed(
    message: &'static str,
    on_retry: impl Fn() + Send + Sync + 'static,
) -> impl IntoView {
    view! {
        <div role="alert" class="alert alert-error">
            <span>{message}</span>
            <button class="btn btn-sm" on:click=move |_| on_retry()>"Retry"</button>
        </div>
    }
}

#[component]
pub fn Spinner() -> impl IntoView {
    view! {
        <div class="flex justify-center py-8">
            <span class="loading loading-spinner loading-lg text-primary"></span>
        </div>
    }
}
