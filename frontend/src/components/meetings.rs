use crate::components::layout::{ScreenFrame, Spinner};
use crate::context::{spawn_action, use_client};
use crate::state::RemoteEntity;
use crate::state::route::MeetingsAction;
use leptos::prelude::*;
use meetpoint_shared::Meeting;
use meetpoint_shared::date::display_time;

#[component]
pub fn MeetingsPage(action: MeetingsAction) -> impl IntoView {
    let client = use_client();

    let tabs = MeetingsAction::ALL
        .into_iter()
        .map(|target| {
            let client = client.clone();
            view! {
                <a
                    role="tab"
                    class=if target == action { "tab tab-active" } else { "tab" }
                    on:click=move |_| {
                        client.go_to_meetings_action(target);
                    }
                >
                    {target.label()}
                </a>
            }
        })
        .collect_view();

    let body = match action {
        MeetingsAction::List => view! { <MeetingList /> }.into_any(),
        MeetingsAction::Create => view! { <CreateMeeting /> }.into_any(),
        MeetingsAction::Join => view! { <JoinMeeting /> }.into_any(),
    };

    view! {
        <ScreenFrame title="Meetings">
            <div role="tablist" class="tabs tabs-boxed bg-base-100 shadow">{tabs}</div>
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">{body}</div>
            </div>
        </ScreenFrame>
    }
}

#[component]
fn MeetingDetails(meeting: Meeting) -> impl IntoView {
    view! {
        <div class="stats stats-vertical md:stats-horizontal shadow w-full">
            <div class="stat">
                <div class="stat-title">"Subject"</div>
                <div class="stat-value text-2xl">{meeting.subject}</div>
                <div class="stat-desc">"Id: " {meeting.id}</div>
            </div>
            <div class="stat">
                <div class="stat-title">"Location"</div>
                <div class="stat-value text-2xl">{meeting.location}</div>
                <div class="stat-desc">
                    {display_time(meeting.datetime_start.as_deref())}
                    " - "
                    {display_time(meeting.datetime_end.as_deref())}
                </div>
            </div>
        </div>
    }
}

// =========================================================
// 列表
// =========================================================

/// 会议列表只在用户点击刷新时请求
#[component]
fn MeetingList() -> impl IntoView {
    let client = use_client();
    let state = *client.state();
    let loading = Memo::new(move |_| state.with(|s| s.meetings.list.meetings.is_loading()));

    let on_refresh = move |_| spawn_action(&client, |c| async move { c.refresh_meetings().await });

    view! {
        <div class="flex items-center justify-between">
            <h3 class="card-title">"All meetings"</h3>
            <button on:click=on_refresh disabled=move || loading.get() class="btn btn-ghost btn-sm">
                {move || if loading.get() { "Refreshing..." } else { "Refresh" }}
            </button>
        </div>

        {move || state.with(|s| match &s.meetings.list.meetings {
            RemoteEntity::NotLoaded => view! {
                <p class="text-base-content/50 py-4">"Press refresh to load meetings."</p>
            }.into_any(),
            RemoteEntity::Loading => view! { <Spinner /> }.into_any(),
            RemoteEntity::Failed => view! {
                <div role="alert" class="alert alert-error">"Could not load meetings."</div>
            }.into_any(),
            RemoteEntity::Loaded(meetings) if meetings.is_empty() => view! {
                <p class="text-base-content/50 py-4">"No meetings yet."</p>
            }.into_any(),
            RemoteEntity::Loaded(meetings) => {
                let rows = meetings
                    .iter()
                    .map(|m| view! {
                        <tr>
                            <td class="font-mono text-xs">{m.id.clone()}</td>
                            <td>{m.subject.clone()}</td>
                            <td>{m.location.clone()}</td>
                            <td>{display_time(m.datetime_start.as_deref())}</td>
                            <td>{display_time(m.datetime_end.as_deref())}</td>
                        </tr>
                    })
                    .collect_view();
                view! {
                    <div class="overflow-x-auto w-full">
                        <table class="table table-zebra w-full">
                            <thead>
                                <tr>
                                    <th>"Id"</th>
                                    <th>"Subject"</th>
                                    <th>"Location"</th>
                                    <th>"Start"</th>
                                    <th>"End"</th>
                                </tr>
                            </thead>
                            <tbody>{rows}</tbody>
                        </table>
                    </div>
                }.into_any()
            }
        })}
    }
}

// =========================================================
// 创建
// =========================================================

#[component]
fn CreateMeeting() -> impl IntoView {
    let client = use_client();
    let state = *client.state();
    let created = Memo::new(move |_| state.with(|s| s.meetings.create.created().cloned()));
    let submitting = Memo::new(move |_| state.with(|s| s.meetings.create.result.is_loading()));

    let on_submit = {
        let client = client.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();
            spawn_action(&client, |c| async move { c.create_meeting().await });
        }
    };
    let on_done = move |_| client.leave_created_meeting();

    view! {
        <Show
            when=move || created.with(Option::is_none)
            fallback=move || view! {
                <div role="alert" class="alert alert-success">"Meeting created."</div>
                {created.get().map(|meeting| view! { <MeetingDetails meeting=meeting /> })}
                <button class="btn btn-primary" on:click=on_done.clone()>"Create another"</button>
            }
        >
            <form class="space-y-2" on:submit=on_submit.clone()>
                <Show when=move || state.with(|s| s.meetings.create.result.is_failed())>
                    <div role="alert" class="alert alert-error text-sm py-2">"Could not create the meeting."</div>
                </Show>
                <div class="form-control">
                    <label class="label" for="hours">
                        <span class="label-text">"Starts in (hours)"</span>
                    </label>
                    <input
                        id="hours"
                        type="number"
                        min="0"
                        step="any"
                        on:input=move |ev| state.update(|s| s.meetings.create.draft.hours = event_target_value(&ev))
                        prop:value=move || state.with(|s| s.meetings.create.draft.hours.clone())
                        class=move || if state.with(|s| s.meetings.create.invalid_hours) {
                            "input input-bordered input-error"
                        } else {
                            "input input-bordered"
                        }
                    />
                    <Show when=move || state.with(|s| s.meetings.create.invalid_hours)>
                        <span class="label-text-alt text-error mt-1">"Enter a number of hours, 0 or more."</span>
                    </Show>
                </div>
                <div class="form-control">
                    <label class="label" for="location">
                        <span class="label-text">"Location"</span>
                    </label>
                    <input
                        id="location"
                        type="text"
                        on:input=move |ev| state.update(|s| s.meetings.create.draft.location = event_target_value(&ev))
                        prop:value=move || state.with(|s| s.meetings.create.draft.location.clone())
                        class="input input-bordered"
                    />
                </div>
                <div class="form-control">
                    <label class="label" for="subject">
                        <span class="label-text">"Subject"</span>
                    </label>
                    <input
                        id="subject"
                        type="text"
                        on:input=move |ev| state.update(|s| s.meetings.create.draft.subject = event_target_value(&ev))
                        prop:value=move || state.with(|s| s.meetings.create.draft.subject.clone())
                        class="input input-bordered"
                    />
                </div>
                <button class="btn btn-primary mt-4" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Creating..." } else { "Create meeting" }}
                </button>
            </form>
        </Show>
    }
}

// =========================================================
// 加入
// =========================================================

#[component]
fn JoinMeeting() -> impl IntoView {
    let client = use_client();
    let state = *client.state();
    let joined = Memo::new(move |_| state.with(|s| s.meetings.join.joined().cloned()));
    let submitting = Memo::new(move |_| state.with(|s| s.meetings.join.result.is_loading()));

    let on_submit = {
        let client = client.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();
            spawn_action(&client, |c| async move { c.join_meeting().await });
        }
    };
    let on_done = move |_| client.leave_joined_meeting();

    view! {
        <Show
            when=move || joined.with(Option::is_none)
            fallback=move || view! {
                <div role="alert" class="alert alert-success">"You joined the meeting."</div>
                {joined.get().map(|meeting| view! { <MeetingDetails meeting=meeting /> })}
                <button class="btn btn-primary" on:click=on_done.clone()>"Join another"</button>
            }
        >
            <form class="space-y-2" on:submit=on_submit.clone()>
                {move || state.with(|s| s.meetings.join.failure).map(|failure| view! {
                    <div role="alert" class="alert alert-error text-sm py-2">{failure.message()}</div>
                })}
                <div class="form-control">
                    <label class="label" for="meeting-id">
                        <span class="label-text">"Meeting id"</span>
                    </label>
                    <input
                        id="meeting-id"
                        type="text"
                        on:input=move |ev| state.update(|s| s.meetings.join.meeting_id = event_target_value(&ev))
                        prop:value=move || state.with(|s| s.meetings.join.meeting_id.clone())
                        class="input input-bordered"
                        required
                    />
                </div>
                <button class="btn btn-primary mt-4" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Joining..." } else { "Join meeting" }}
                </button>
            </form>
        </Show>
    }
}
