use leptos::prelude::*;

use crate::components::modal::ModalState;
use crate::models::content::{
    CandidateRecord, Category, Pdf, Photo, SocialLinks, Story, TeamMember, Video,
};
use crate::rendering::markdown::excerpt;
use crate::rendering::media::{external_link, resolve_media_url, MediaSelection, VideoSource};

const EXCERPT_CHARS: usize = 180;

/// Link to the detail page of a record.
pub fn detail_href(record: &CandidateRecord) -> String {
    format!("/content/{}/{}", record.category().as_str(), record.id())
}

/// Link to the tag browsing page.
pub fn tag_href(tag: &str) -> String {
    format!("/tags/{}", urlencoding::encode(tag))
}

/// Labelled social links worth rendering; blank and non-web URLs are dropped.
pub fn social_links(socials: SocialLinks) -> Vec<(&'static str, String)> {
    [
        ("LinkedIn", socials.linkedin),
        ("Twitter", socials.twitter),
        ("Instagram", socials.instagram),
    ]
    .into_iter()
    .filter_map(|(label, url)| url.as_deref().and_then(external_link).map(|url| (label, url)))
    .collect()
}

/// One search or listing result, rendered according to its category.
#[component]
pub fn ResultCard(
    record: CandidateRecord,
    modal: RwSignal<ModalState<CandidateRecord>>,
) -> impl IntoView {
    let href = detail_href(&record);
    match record {
        CandidateRecord::Blog(story) => {
            view! { <StoryCard story=story category=Category::Blogs href=href/> }.into_any()
        }
        CandidateRecord::FeatureStory(story) => {
            view! { <StoryCard story=story category=Category::FeatureStories href=href/> }.into_any()
        }
        CandidateRecord::Photo(photo) => view! { <PhotoCard photo=photo modal=modal/> }.into_any(),
        CandidateRecord::Video(video) => view! { <VideoCard video=video/> }.into_any(),
        CandidateRecord::Pdf(pdf) => view! { <PdfCard pdf=pdf/> }.into_any(),
        CandidateRecord::TeamMember(member) => {
            view! { <TeamMemberCard member=member modal=modal/> }.into_any()
        }
    }
}

#[component]
fn StoryCard(story: Story, category: Category, href: String) -> impl IntoView {
    let media = MediaSelection::for_story(&story);
    let summary = excerpt(&story.content, EXCERPT_CHARS);
    let author = Some(story.author).filter(|a| !a.is_empty());

    view! {
        <article class="card story-card">
            <span class="card-category">{category.label()}</span>
            <MediaView selection=media/>
            <h3><a href=href>{story.title}</a></h3>
            {author.map(|a| view! { <p class="author">"By " {a}</p> })}
            <p class="excerpt">{summary}</p>
            <TagList tags=story.tags/>
        </article>
    }
}

#[component]
fn PhotoCard(photo: Photo, modal: RwSignal<ModalState<CandidateRecord>>) -> impl IntoView {
    let src = resolve_media_url(&photo.image_url);
    let title = photo.title.clone();
    let record = CandidateRecord::Photo(photo);

    view! {
        <article class="card photo-card" on:click=move |_| modal.update(|m| m.open(record.clone()))>
            <span class="card-category">{Category::Photos.label()}</span>
            <img src=src alt=title.clone()/>
            <h3>{title}</h3>
        </article>
    }
}

#[component]
fn VideoCard(video: Video) -> impl IntoView {
    let source = VideoSource::new(&video.video_url, video.embedded);

    view! {
        <article class="card video-card">
            <span class="card-category">{Category::Videos.label()}</span>
            <MediaView selection=MediaSelection::select(None, Some(source))/>
            <h3>{video.title}</h3>
            {video.description.map(|d| view! { <p class="excerpt">{d}</p> })}
            <TagList tags=video.tags/>
        </article>
    }
}

#[component]
fn PdfCard(pdf: Pdf) -> impl IntoView {
    let href = resolve_media_url(&pdf.file_url);

    view! {
        <article class="card pdf-card">
            <span class="card-category">{Category::Pdfs.label()}</span>
            <h3><a href=href target="_blank" rel="noopener">{pdf.title}</a></h3>
            {pdf.description.map(|d| view! { <p class="excerpt">{d}</p> })}
        </article>
    }
}

#[component]
fn TeamMemberCard(
    member: TeamMember,
    modal: RwSignal<ModalState<CandidateRecord>>,
) -> impl IntoView {
    let image = member.image_url.as_deref().map(resolve_media_url);
    let name = member.name.clone();
    let role = member.role.clone();
    let record = CandidateRecord::TeamMember(member);

    view! {
        <article class="card team-card" on:click=move |_| modal.update(|m| m.open(record.clone()))>
            <span class="card-category">{Category::TeamMembers.label()}</span>
            {image.map(|src| view! { <img class="avatar" src=src alt=""/> })}
            <h3>{name}</h3>
            <p class="role">{role}</p>
        </article>
    }
}

/// Full details of a record, shown inside the modal.
#[component]
pub fn RecordDetails(record: CandidateRecord) -> impl IntoView {
    match record {
        CandidateRecord::Photo(photo) => view! {
            <div class="details photo-details">
                <img src=resolve_media_url(&photo.image_url) alt=photo.title.clone()/>
                <h2>{photo.title}</h2>
                {photo.caption.map(|c| view! { <p>{c}</p> })}
                <TagList tags=photo.tags/>
            </div>
        }
        .into_any(),
        CandidateRecord::TeamMember(member) => {
            let socials = social_links(member.socials);
            view! {
                <div class="details team-details">
                    {member.image_url.as_deref().map(resolve_media_url).map(|src| view! { <img class="avatar" src=src alt=""/> })}
                    <h2>{member.name}</h2>
                    <p class="role">{member.role}</p>
                    <p class="bio">{member.bio}</p>
                    <ul class="socials">
                        {socials
                            .into_iter()
                            .map(|(label, url)| view! { <li><a href=url target="_blank" rel="noopener">{label}</a></li> })
                            .collect_view()}
                    </ul>
                </div>
            }
            .into_any()
        }
        other => {
            let href = detail_href(&other);
            view! {
                <div class="details">
                    <h2><a href=href>{other.display_value().to_string()}</a></h2>
                </div>
            }
            .into_any()
        }
    }
}

/// Image and/or video of a card.
#[component]
pub fn MediaView(selection: MediaSelection) -> impl IntoView {
    match selection {
        MediaSelection::Both { image, video } => view! {
            <div class="media media-both">
                <img src=image alt=""/>
                <VideoPlayer source=video/>
            </div>
        }
        .into_any(),
        MediaSelection::Image(image) => view! {
            <div class="media"><img src=image alt=""/></div>
        }
        .into_any(),
        MediaSelection::Video(video) => view! {
            <div class="media"><VideoPlayer source=video/></div>
        }
        .into_any(),
        MediaSelection::Nothing => ().into_any(),
    }
}

#[component]
fn VideoPlayer(source: VideoSource) -> impl IntoView {
    match source {
        VideoSource::Embedded(url) => view! {
            <iframe class="video" src=url allowfullscreen=true></iframe>
        }
        .into_any(),
        VideoSource::Hosted(url) => view! {
            <video class="video" src=url controls=true></video>
        }
        .into_any(),
    }
}

#[component]
fn TagList(tags: Vec<String>) -> impl IntoView {
    view! {
        <ul class="tags">
            {tags
                .into_iter()
                .map(|tag| {
                    let href = tag_href(&tag);
                    view! { <li><a href=href>"#" {tag}</a></li> }
                })
                .collect_view()}
        </ul>
    }
}
