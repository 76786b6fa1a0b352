use leptos::prelude::*;
use leptos_router::components::*;

use crate::{
    site::SITE_NAME,
    theme::{self, ThemeMode},
};

use super::theme_env;

#[component]
pub fn Logo(mode: ReadSignal<ThemeMode>, set_mode: WriteSignal<ThemeMode>) -> impl IntoView {
    let on_toggle = move |_| {
        let next = theme::toggle_preference(&theme_env(), mode.get_untracked());
        set_mode.set(next);
    };

    view! {
        <div class="flex flex-row items-center">
            <A href="/" attr:class="text-2xl font-bold text-slate-800 dark:text-slate-100">
                {SITE_NAME}
            </A>
            <button
                type="button"
                class="ml-3 px-2 rounded-md text-xl hover:bg-slate-500/20"
                title="Toggle theme"
                aria-label=move || format!("Switch to {} mode", mode.get().opposite())
                on:click=on_toggle
            >
                {move || match mode.get() {
                    ThemeMode::Dark => "☾",
                    ThemeMode::Light => "☀",
                }}
            </button>
        </div>
    }
}
