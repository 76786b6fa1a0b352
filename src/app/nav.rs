use leptos::prelude::*;

use crate::theme::{self, ThemeMode};

use super::{logo::Logo, navbar::NavBar, social::SocialLinks, theme_env};

/// Site header (logo, theme toggle, social links, navigation) around a page.
///
/// Owns the tracked theme mode. The first render always uses
/// [`theme::render_mode`] so hydration matches the server's markup; the
/// resolved mode is applied and tracked once mounted (the `<head>` script has
/// already painted it), and re-applied every time [`Logo`] changes it.
#[component]
pub fn NavWrappedPage(children: Children) -> impl IntoView {
    let env = theme_env();
    let (mode, set_mode) = signal(theme::render_mode());

    // effects only run in the browser, after hydration
    Effect::new(move |_| set_mode.set(theme::initialize(&env, &env)));

    Effect::watch(
        move || mode.get(),
        move |mode: &ThemeMode, prev: Option<&ThemeMode>, _| {
            if prev == Some(mode) {
                return;
            }
            if let Err(e) = theme::apply(&env, *mode) {
                log::warn!("couldn't apply {mode} theme: {e}");
            }
        },
        false,
    );

    view! {
        <div class="mt-4">
            <link rel="stylesheet" href=move || mode.get().highlight_stylesheet() />
            <div class="flex flex-row">
                <div class="ml-0 mr-auto">
                    <Logo mode set_mode />
                </div>
                <div class="ml-auto mr-0 flex flex-row">
                    <SocialLinks />
                </div>
            </div>
            <NavBar />
            {children()}
        </div>
    }
}
