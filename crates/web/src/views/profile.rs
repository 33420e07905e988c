use crate::auth::{AuthAction, use_auth};
use crate::route::Route;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(ProfileView)]
pub fn profile_view() -> Html {
    let auth = use_auth();
    let navigator = use_navigator();

    let on_refresh = {
        let auth = auth.clone();
        Callback::from(move |_| {
            let auth = auth.clone();
            wasm_bindgen_futures::spawn_local(async move {
                auth.service().fetch_me().await;
                auth.dispatch(AuthAction::Sync);
            });
        })
    };

    let on_logout = {
        let auth = auth.clone();
        Callback::from(move |_| {
            auth.dispatch(AuthAction::Logout);
            if let Some(navigator) = &navigator {
                navigator.push(&Route::Login);
            }
        })
    };

    let Some(user) = auth.user.clone() else {
        return html! {
            <section class="max-w-md mx-auto p-6 text-center">
                <p class="text-gray-600">{"正在加载用户信息…"}</p>
                <button class="mt-4 px-4 py-2 border rounded-md" onclick={on_logout}>{"退出登录"}</button>
            </section>
        };
    };

    html! {
        <section class="max-w-md mx-auto p-6 space-y-2">
            <h1 class="text-2xl font-bold">{user.display_name().to_string()}</h1>
            if let Some(username) = user.username() {
                <p class="text-gray-600">{format!("@{username}")}</p>
            }
            if let Some(email) = user.email() {
                <p>{email.to_string()}</p>
            }
            if let Some(bio) = user.bio().filter(|b| !b.is_empty()) {
                <p>{bio.to_string()}</p>
            }
            <p>{format!("积分：{}", user.credits().unwrap_or(0.0))}</p>
            <div class="flex gap-3 pt-4">
                <button class="px-4 py-2 border rounded-md" onclick={on_refresh}>{"刷新"}</button>
                <button class="px-4 py-2 bg-gray-200 rounded-md" onclick={on_logout}>{"退出登录"}</button>
            </div>
        </section>
    }
}
