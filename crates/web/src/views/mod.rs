//! Page components, one per route

mod profile;

pub use profile::ProfileView;

use crate::auth::{LoginForm, RegisterForm};
use crate::route::Route;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
struct SectionProps {
    title: &'static str,
    #[prop_or_default]
    children: Children,
}

#[function_component(Section)]
fn section(props: &SectionProps) -> Html {
    html! {
        <section class="max-w-5xl mx-auto px-4 py-8">
            <h1 class="text-3xl font-bold mb-4">{props.title}</h1>
            {props.children.clone()}
        </section>
    }
}

/// Render the page for an already-guarded route
pub fn view(route: Route) -> Html {
    let title = route.name().entry().meta.title;
    match route {
        Route::Home => html! {
            <Section {title}>
                <p>{"时间序列分析、预测与智能助理的一站式平台。"}</p>
                <Link<Route> to={Route::App}>{"开始探索数据"}</Link<Route>>
            </Section>
        },
        Route::Agent | Route::App | Route::Algorithms | Route::About | Route::Community => {
            html! { <Section {title} /> }
        }
        Route::Login => html! { <LoginForm /> },
        Route::Register => html! { <RegisterForm /> },
        Route::Profile => html! { <ProfileView /> },
        Route::Admin => html! {
            <Section {title}>
                <p>{"兑换码管理需要管理员密码。"}</p>
            </Section>
        },
        Route::NotFound => html! {
            <Section {title}>
                <Link<Route> to={Route::Home}>{"返回首页"}</Link<Route>>
            </Section>
        },
    }
}
