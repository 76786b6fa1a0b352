use leptos::prelude::*;
use leptos_meta::Title;

use crate::site::OWNER;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <Title text="Home" />
        <article class="prose dark:prose-invert max-w-none">
            <h1>{format!("Hi, I'm {OWNER}")}</h1>
            <p>
                "Welcome to my corner of the web. The links up top lead to everything else; "
                "the moon and sun next to my name switch between dark and light mode, and "
                "your choice is remembered the next time you visit."
            </p>
        </article>
    }
}
