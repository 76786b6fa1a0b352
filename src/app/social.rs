use leptos::prelude::*;

use crate::site::SOCIAL_LINKS;

#[component]
pub fn SocialLinks() -> impl IntoView {
    SOCIAL_LINKS
        .iter()
        .map(|link| {
            view! {
                <a
                    class="my-auto"
                    href=link.href
                    target="_blank"
                    rel="noopener noreferrer"
                    aria-label=link.label
                >
                    <div class="flex flex-row">
                        <svg class="my-auto mr-5" viewBox="0 0 24 24" height="24" width="24" fill=link.fill>
                            <path d=link.path></path>
                        </svg>
                    </div>
                </a>
            }
        })
        .collect_view()
}
