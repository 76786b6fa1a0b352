use leptos::prelude::*;
use leptos_router::{components::*, hooks::use_location};

use crate::site::{is_active, NAV_LINKS};

#[component]
pub fn NavBar() -> impl IntoView {
    let pathname = use_location().pathname;

    view! {
        <nav class="my-4 flex flex-row">
            {NAV_LINKS
                .iter()
                .map(|link| {
                    let href = link.href;
                    let class = move || {
                        if is_active(&pathname.get(), href) {
                            "mr-5 font-bold underline underline-offset-4"
                        } else {
                            "mr-5 hover:underline underline-offset-4"
                        }
                    };
                    view! {
                        <A href=href attr:class=class>
                            {link.label}
                        </A>
                    }
                })
                .collect_view()}
        </nav>
    }
}
