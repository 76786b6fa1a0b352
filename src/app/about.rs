use leptos::prelude::*;
use leptos_meta::Title;

use crate::site::SOCIAL_LINKS;

#[component]
pub fn AboutPage() -> impl IntoView {
    view! {
        <Title text="About" />
        <article class="prose dark:prose-invert max-w-none">
            <h1>"About"</h1>
            <p>"The quickest ways to reach me:"</p>
            <ul>
                {SOCIAL_LINKS
                    .iter()
                    .map(|link| {
                        view! {
                            <li>
                                <a href=link.href target="_blank" rel="noopener noreferrer">
                                    {link.label}
                                </a>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </article>
    }
}
