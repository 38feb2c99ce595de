//! MongoDB-backed repositories, run against a throwaway container.

mod common;

use chrono::{Duration, Utc};
use testcontainers::runners::AsyncRunner;
use testcontainers::ContainerAsync;
use testcontainers_modules::mongo::Mongo;

use common::{blog, member, photo, sample_records};
use mediahub::auth::models::{hash_session_token, Session, User};
use mediahub::db::auth_repository::{AuthRepository, MongoAuthRepository};
use mediahub::db::repository::{ContentRepository, MongoContentRepository};
use mediahub::db::settings_repository::{
    Banner, ContactInfo, MongoSettingsRepository, SettingsRepository,
};
use mediahub::models::content::Category;
use mediahub::search::{run_search, SearchConfig, SearchQuery};

async fn start_mongo() -> (ContainerAsync<Mongo>, mongodb::Database) {
    let container = Mongo::default()
        .start()
        .await
        .expect("Failed to start MongoDB container");
    let port = container
        .get_host_port_ipv4(27017)
        .await
        .expect("Failed to get MongoDB port");
    let client = mongodb::Client::with_uri_str(&format!("mongodb://127.0.0.1:{port}"))
        .await
        .expect("Failed to connect to MongoDB");
    (container, client.database("mediahub_test"))
}

#[tokio::test]
async fn list_is_sorted_and_bounded() {
    let (_mongo, db) = start_mongo().await;
    let repo = MongoContentRepository::new(&db);

    for (id, title) in [("b1", "Zebra"), ("b2", "Apple"), ("b3", "Mango")] {
        repo.upsert(blog(id, title)).await.unwrap();
    }

    let listed = repo.list_by_category(Category::Blogs, 2).await.unwrap();
    let titles: Vec<&str> = listed.iter().map(|r| r.display_value()).collect();
    assert_eq!(titles, vec!["Apple", "Mango"]);
}

#[tokio::test]
async fn upsert_replaces_and_find_by_id() {
    let (_mongo, db) = start_mongo().await;
    let repo = MongoContentRepository::new(&db);

    repo.upsert(photo("p1", "Draft", &[])).await.unwrap();
    repo.upsert(photo("p1", "Final", &["people"])).await.unwrap();

    let found = repo.find_by_id(Category::Photos, "p1").await.unwrap().unwrap();
    assert_eq!(found.display_value(), "Final");
    assert_eq!(found.category(), Category::Photos);
    assert!(repo.find_by_id(Category::Blogs, "p1").await.unwrap().is_none());
    assert_eq!(repo.list_by_category(Category::Photos, 50).await.unwrap().len(), 1);
}

#[tokio::test]
async fn team_prefix_range_scan() {
    let (_mongo, db) = start_mongo().await;
    let repo = MongoContentRepository::new(&db);

    for record in [
        member("m1", "Imaan Khan"),
        member("m2", "Imran Shah"),
        member("m3", "Sara Malik"),
        member("m4", "Im\u{ff41}ra"),
        member("m5", "Im\u{1f600}"),
        member("m6", "In"),
    ] {
        repo.upsert(record).await.unwrap();
    }

    let found = repo.find_team_members_by_name_prefix("im", 50).await.unwrap();
    let ids: Vec<&str> = found.iter().map(|r| r.id()).collect();
    assert_eq!(ids, vec!["m1", "m2", "m4", "m5"]);

    let everyone = repo.find_team_members_by_name_prefix("", 50).await.unwrap();
    assert_eq!(everyone.len(), 6);
}

#[tokio::test]
async fn tag_lookup_matches_array_members() {
    let (_mongo, db) = start_mongo().await;
    let repo = MongoContentRepository::new(&db);

    repo.upsert(photo("p1", "Crowd", &["people", "events"])).await.unwrap();
    repo.upsert(photo("p2", "Sunset", &["landscape"])).await.unwrap();

    let tagged = repo.list_by_tag(Category::Photos, "people", 50).await.unwrap();
    assert_eq!(tagged.len(), 1);
    assert_eq!(tagged[0].id(), "p1");
}

#[tokio::test]
async fn search_over_mongo_matches_in_memory_ordering() {
    let (_mongo, db) = start_mongo().await;
    let repo = MongoContentRepository::new(&db);
    for record in sample_records() {
        repo.upsert(record).await.unwrap();
    }

    let query = SearchQuery::parse("imaan", None).unwrap();
    let outcome = run_search(&repo, &query, &SearchConfig::default()).await.unwrap();
    let ids: Vec<&str> = outcome.results.iter().map(|r| r.record.id()).collect();
    assert_eq!(ids, vec!["b1", "p1", "m1", "b2", "f1"]);
}

#[tokio::test]
async fn users_and_sessions() {
    let (_mongo, db) = start_mongo().await;
    let repo = MongoAuthRepository::new(&db);

    repo.create_user_if_absent(User::new("editor@example.com", "pw"))
        .await
        .unwrap();
    repo.create_user_if_absent(User::new("editor@example.com", "other"))
        .await
        .unwrap();
    let user = repo
        .find_user_by_email("editor@example.com")
        .await
        .unwrap()
        .unwrap();
    assert!(user.verify_password("pw"));

    let token_hash = hash_session_token("token");
    repo.insert_session(Session {
        token_hash: token_hash.clone(),
        user_id: user.id.clone(),
        email: user.email.clone(),
        expires_at: Utc::now() + Duration::hours(1),
    })
    .await
    .unwrap();
    assert!(repo.find_session(&token_hash).await.unwrap().is_some());

    repo.delete_session(&token_hash).await.unwrap();
    assert!(repo.find_session(&token_hash).await.unwrap().is_none());
}

#[tokio::test]
async fn settings_round_trip() {
    let (_mongo, db) = start_mongo().await;
    let repo = MongoSettingsRepository::new(&db);

    assert!(repo.get_settings().await.unwrap().banners.is_empty());

    let contact = ContactInfo {
        email: "hello@example.com".to_string(),
        ..ContactInfo::default()
    };
    let banners = vec![Banner {
        title: "Welcome".to_string(),
        image_url: "media/welcome.jpg".to_string(),
        link: None,
    }];
    repo.save_settings(contact.clone(), banners.clone()).await.unwrap();
    repo.save_settings(contact.clone(), banners.clone()).await.unwrap();

    let settings = repo.get_settings().await.unwrap();
    assert_eq!(settings.contact, contact);
    assert_eq!(settings.banners, banners);
}
