use crate::api::content::process_upsert;
use crate::db::settings_repository::{Banner, ContactInfo};
use crate::models::content::{
    CandidateRecord, Pdf, Photo, SocialLinks, Story, TeamMember, Video,
};
use crate::state::AppState;

fn story(title: &str, author: &str, content: &str, tags: &[&str]) -> Story {
    Story {
        id: String::new(),
        title: title.to_string(),
        author: author.to_string(),
        content: content.to_string(),
        image_url: None,
        video_url: None,
        video_embedded: false,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        created_at: None,
    }
}

fn member(name: &str, role: &str, bio: &str) -> TeamMember {
    TeamMember {
        id: String::new(),
        name: name.to_string(),
        name_lower: String::new(),
        role: role.to_string(),
        bio: bio.to_string(),
        image_url: None,
        socials: SocialLinks::default(),
    }
}

/// Sample content for every category.
pub fn demo_records() -> Vec<CandidateRecord> {
    vec![
        CandidateRecord::Blog(story(
            "Getting Started with Community Radio",
            "Imaan Ali",
            "# Getting started\n\nEverything you need to know before your **first broadcast**.",
            &["radio", "guide"],
        )),
        CandidateRecord::Blog(story(
            "Notes from the Spring Workshop",
            "Daniel Ortiz",
            "Three days of *hands-on* sessions on editing and interviewing.",
            &["workshop", "events"],
        )),
        CandidateRecord::FeatureStory(Story {
            video_url: Some("https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string()),
            video_embedded: true,
            ..story(
                "Voices of the Harbour",
                "Imaan Ali",
                "A long read about the people who keep the old harbour alive.\n\n> Every boat has a story.",
                &["harbour", "people"],
            )
        }),
        CandidateRecord::Photo(Photo {
            id: String::new(),
            title: "Harbour at Dawn".to_string(),
            image_url: "https://images.example.com/harbour-dawn.jpg".to_string(),
            caption: Some("First light over the east pier.".to_string()),
            tags: vec!["harbour".to_string(), "photography".to_string()],
        }),
        CandidateRecord::Video(Video {
            id: String::new(),
            title: "Workshop Highlights".to_string(),
            video_url: "https://youtu.be/dQw4w9WgXcQ".to_string(),
            embedded: true,
            description: Some("Five minutes from the spring workshop.".to_string()),
            tags: vec!["workshop".to_string()],
        }),
        CandidateRecord::Pdf(Pdf {
            id: String::new(),
            title: "Annual Report 2024".to_string(),
            file_url: "https://files.example.com/annual-report-2024.pdf".to_string(),
            description: Some("Finances, programming and volunteer numbers.".to_string()),
        }),
        CandidateRecord::TeamMember(member(
            "Imaan Ali",
            "Editor in Chief",
            "Imaan has run the newsroom since 2019.",
        )),
        CandidateRecord::TeamMember(member(
            "Daniel Ortiz",
            "Producer",
            "Daniel produces the morning show and the workshop series.",
        )),
    ]
}

pub async fn seed_demo_data(state: &AppState) {
    tracing::info!("Starting demo data seeding...");

    for record in demo_records() {
        let title = record.display_value().to_string();
        match process_upsert(state.content_repo.as_ref(), record).await {
            Ok(saved) => tracing::debug!(category = %saved.category, id = %saved.id, "seeded '{}'", title),
            Err(e) => tracing::error!("Failed to seed '{}': {}", title, e),
        }
    }

    let contact = ContactInfo {
        email: "hello@mediahub.example".to_string(),
        phone: "+1 555 0100".to_string(),
        address: "1 Harbour Road".to_string(),
    };
    let banners = vec![Banner {
        title: "Voices of the Harbour".to_string(),
        image_url: "https://images.example.com/harbour-dawn.jpg".to_string(),
        link: Some("/tags/harbour".to_string()),
    }];
    if let Err(e) = state.settings_repo.save_settings(contact, banners).await {
        tracing::error!("Failed to seed site settings: {}", e);
    }

    tracing::info!("Demo data seeding completed.");
}
