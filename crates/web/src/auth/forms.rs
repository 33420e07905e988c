//! Login and registration forms

use crate::auth::{AuthAction, AuthContext, use_auth};
use crate::route::Route;
use insight_http::ClientError;
use insight_http::auth::{AuthResponse, LoginRequest, RegisterRequest};
use yew::prelude::*;
use yew_router::prelude::*;

fn input_setter(state: &UseStateHandle<String>) -> Callback<InputEvent> {
    let state = state.clone();
    Callback::from(move |e: InputEvent| {
        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
        state.set(input.value());
    })
}

/// Store a fresh session and leave the form
fn complete(
    auth: &AuthContext,
    navigator: Option<&Navigator>,
    response: AuthResponse,
) {
    auth.dispatch(AuthAction::Login {
        token: response.token,
        user: response.user,
    });
    if let Some(navigator) = navigator {
        navigator.push(&Route::Profile);
    }
}

fn error_text(error: &ClientError) -> String {
    match error {
        ClientError::Validation(message)
        | ClientError::BadRequest(message)
        | ClientError::AuthenticationFailed(message) => message.clone(),
        ClientError::Timeout => "请求超时，请稍后重试".to_string(),
        other => other.to_string(),
    }
}

#[function_component(LoginForm)]
pub fn login_form() -> Html {
    let auth = use_auth();
    let navigator = use_navigator();
    let username = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| None::<String>);
    let busy = use_state(|| false);

    let on_submit = {
        let auth = auth.clone();
        let username = username.clone();
        let password = password.clone();
        let error = error.clone();
        let busy = busy.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let request = LoginRequest::new(&username, (*password).clone());
            if let Err(e) = request.validate() {
                error.set(Some(error_text(&e)));
                return;
            }

            let auth = auth.clone();
            let navigator = navigator.clone();
            let error = error.clone();
            let busy = busy.clone();
            busy.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                let result = auth.service().client().login(&request).await;
                busy.set(false);
                match result {
                    Ok(response) => {
                        error.set(None);
                        complete(&auth, navigator.as_ref(), response);
                    }
                    Err(e) => {
                        // A rejected login also ends any stale session
                        auth.dispatch(AuthAction::Sync);
                        error.set(Some(error_text(&e)));
                    }
                }
            });
        })
    };

    html! {
        <form class="max-w-md mx-auto p-6 space-y-4" onsubmit={on_submit}>
            <h2 class="text-2xl font-bold text-center">{"登录"}</h2>
            if let Some(message) = &*error {
                <p class="text-sm text-red-600">{message}</p>
            }
            <input
                type="text"
                class="w-full px-3 py-2 border rounded-md"
                placeholder="用户名"
                value={(*username).clone()}
                oninput={input_setter(&username)}
            />
            <input
                type="password"
                class="w-full px-3 py-2 border rounded-md"
                placeholder="密码"
                value={(*password).clone()}
                oninput={input_setter(&password)}
            />
            <button type="submit" class="w-full px-4 py-2 bg-blue-500 text-white rounded-md" disabled={*busy}>
                {"登录"}
            </button>
            <p class="text-sm text-center">
                <Link<Route> to={Route::Register}>{"还没有账号？注册"}</Link<Route>>
            </p>
        </form>
    }
}

#[function_component(RegisterForm)]
pub fn register_form() -> Html {
    let auth = use_auth();
    let navigator = use_navigator();
    let username = use_state(String::new);
    let email = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| None::<String>);
    let busy = use_state(|| false);

    let on_submit = {
        let auth = auth.clone();
        let username = username.clone();
        let email = email.clone();
        let password = password.clone();
        let error = error.clone();
        let busy = busy.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let request = RegisterRequest::new(&username, &email, (*password).clone());
            if let Err(e) = request.validate() {
                error.set(Some(error_text(&e)));
                return;
            }

            let auth = auth.clone();
            let navigator = navigator.clone();
            let error = error.clone();
            let busy = busy.clone();
            busy.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                let result = auth.service().client().register(&request).await;
                busy.set(false);
                match result {
                    Ok(response) => {
                        error.set(None);
                        complete(&auth, navigator.as_ref(), response);
                    }
                    Err(e) => error.set(Some(error_text(&e))),
                }
            });
        })
    };

    html! {
        <form class="max-w-md mx-auto p-6 space-y-4" onsubmit={on_submit}>
            <h2 class="text-2xl font-bold text-center">{"注册"}</h2>
            if let Some(message) = &*error {
                <p class="text-sm text-red-600">{message}</p>
            }
            <input
                type="text"
                class="w-full px-3 py-2 border rounded-md"
                placeholder="用户名"
                value={(*username).clone()}
                oninput={input_setter(&username)}
            />
            <input
                type="email"
                class="w-full px-3 py-2 border rounded-md"
                placeholder="邮箱"
                value={(*email).clone()}
                oninput={input_setter(&email)}
            />
            <input
                type="password"
                class="w-full px-3 py-2 border rounded-md"
                placeholder="密码（至少6位）"
                value={(*password).clone()}
                oninput={input_setter(&password)}
            />
            <button type="submit" class="w-full px-4 py-2 bg-blue-500 text-white rounded-md" disabled={*busy}>
                {"注册"}
            </button>
            <p class="text-sm text-center">
                <Link<Route> to={Route::Login}>{"已有账号？登录"}</Link<Route>>
            </p>
        </form>
    }
}
