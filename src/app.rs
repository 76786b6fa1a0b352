mod about;
#[cfg(feature = "hydrate")]
mod browser;
mod homepage;
mod logo;
mod nav;
mod navbar;
mod social;

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::{components::*, path};

use crate::{site, theme};
use about::AboutPage;
use homepage::HomePage;
use nav::NavWrappedPage;

/// The theme environment for the current build: the real browser when
/// hydrating, nothing at all when rendering on the server.
#[cfg(feature = "hydrate")]
fn theme_env() -> browser::BrowserEnv {
    browser::BrowserEnv
}

#[cfg(not(feature = "hydrate"))]
fn theme_env() -> theme::Headless {
    theme::Headless
}

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                // resolve the theme before anything paints
                <script inner_html=theme::bootstrap_script()></script>
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <meta name="color-scheme" content="dark light" />
                <link rel="stylesheet" id="leptos" href="/pkg/kojin-site.css" />
                <MetaTags />
            </head>
            <body class="font-sans">
                <App />
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    view! {
        <Title formatter=|title| format!("{} - {title}", site::OWNER) />

        <Router>
            <div class="mx-auto w-full max-w-4xl px-4">
                <NavWrappedPage>
                    <main class="flex flex-col flex-grow">
                        <Routes fallback=|| "Page not found.".into_view()>
                            <Route path=path!("/") view=HomePage />
                            <Route path=path!("/about") view=AboutPage />
                        </Routes>
                    </main>
                </NavWrappedPage>
                <Footer />
            </div>
        </Router>
    }
}

#[component]
fn Footer() -> impl IntoView {
    view! {
        <footer class="my-8 text-sm text-center opacity-60">
            {format!("© {}", site::OWNER)}
            " · built "
            {env!("BUILD_TIME")}
        </footer>
    }
}
