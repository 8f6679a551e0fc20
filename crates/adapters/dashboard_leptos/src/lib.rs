//! Browser dashboard for the battery log pages.
//!
//! Each route mounts its own [`batlog_app::log_view::LogView`]; the
//! language is shared through [`locale::LocaleContext`].

use leptos::prelude::*;
use leptos_router::{
    components::{Route, Router, Routes},
    path,
};

pub mod clock;
mod components;
pub mod download;
pub mod locale;
mod pages;
pub mod transport;

use components::{Nav, ToastContainer};
use pages::{ArmLogs, BatteryLogs, EventLogs, NotFound};

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    locale::LocaleContext::provide();
    provide_context(transport::GlooTransport::default());

    view! {
        <ToastContainer>
            <Router>
                <Nav/>
                <main>
                    <Routes fallback=|| view! { <NotFound/> }>
                        <Route path=path!("/") view=EventLogs/>
                        <Route path=path!("logs") view=EventLogs/>
                        <Route path=path!("arm-logs") view=ArmLogs/>
                        <Route path=path!("battery-logs") view=BatteryLogs/>
                    </Routes>
                </main>
            </Router>
        </ToastContainer>
    }
}
