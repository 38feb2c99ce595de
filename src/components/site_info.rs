use leptos::prelude::*;

use crate::db::settings_repository::{Banner, ContactInfo, SiteSettings};
use crate::rendering::media::resolve_media_url;

#[server]
pub async fn get_site_settings() -> Result<SiteSettings, ServerFnError> {
    let state = crate::state::expect_state()?;
    state
        .settings_repo
        .get_settings()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

/// Home page: banners followed by contact details.
#[component]
pub fn SiteHome() -> impl IntoView {
    let settings = Resource::new(|| (), |_| async move { get_site_settings().await });

    view! {
        <Suspense fallback=|| view! { <p>"Loading..."</p> }>
            {move || settings.get().map(|res| match res {
                Ok(settings) => view! {
                    <Banners banners=settings.banners/>
                    <Contact contact=settings.contact/>
                }
                .into_any(),
                Err(e) => view! { <p class="error">"Error: " {e.to_string()}</p> }.into_any(),
            })}
        </Suspense>
    }
}

#[component]
fn Banners(banners: Vec<Banner>) -> impl IntoView {
    view! {
        <section class="banners">
            {banners
                .into_iter()
                .map(|banner| {
                    let image = view! { <img src=resolve_media_url(&banner.image_url) alt=banner.title.clone()/> };
                    let title = view! { <h2>{banner.title}</h2> };
                    match banner.link {
                        Some(link) => view! { <a class="banner" href=link>{image}{title}</a> }.into_any(),
                        None => view! { <div class="banner">{image}{title}</div> }.into_any(),
                    }
                })
                .collect_view()}
        </section>
    }
}

#[component]
fn Contact(contact: ContactInfo) -> impl IntoView {
    let email = Some(contact.email).filter(|e| !e.is_empty()).map(|email| {
        let mailto = format!("mailto:{email}");
        view! { <p><a href=mailto>{email}</a></p> }
    });

    view! {
        <section class="contact">
            <h2>"Contact"</h2>
            {email}
            <p>{contact.phone}</p>
            <p>{contact.address}</p>
        </section>
    }
}
