use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// The six kinds of content the site manages.
///
/// The declaration order is the fan-out order of an unscoped search, and the
/// serialized names double as MongoDB collection names and `type` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "blogs")]
    Blogs,
    #[serde(rename = "featureStories")]
    FeatureStories,
    #[serde(rename = "photos")]
    Photos,
    #[serde(rename = "videos")]
    Videos,
    #[serde(rename = "pdfs")]
    Pdfs,
    #[serde(rename = "team_members")]
    TeamMembers,
}

impl Category {
    /// Every category, in fan-out order.
    pub const ALL: [Category; 6] = [
        Category::Blogs,
        Category::FeatureStories,
        Category::Photos,
        Category::Videos,
        Category::Pdfs,
        Category::TeamMembers,
    ];

    /// Wire name, also used as the collection name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Blogs => "blogs",
            Category::FeatureStories => "featureStories",
            Category::Photos => "photos",
            Category::Videos => "videos",
            Category::Pdfs => "pdfs",
            Category::TeamMembers => "team_members",
        }
    }

    /// Human-readable label for filters and headings.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Blogs => "Blogs",
            Category::FeatureStories => "Feature Stories",
            Category::Photos => "Photos",
            Category::Videos => "Videos",
            Category::Pdfs => "PDFs",
            Category::TeamMembers => "Team Members",
        }
    }

    /// Name of the field records of this category are matched and sorted on.
    pub fn display_field(&self) -> &'static str {
        match self {
            Category::TeamMembers => "name",
            _ => "title",
        }
    }

    /// Whether records of this category carry a `tags` array.
    pub fn supports_tags(&self) -> bool {
        matches!(
            self,
            Category::Blogs | Category::FeatureStories | Category::Photos | Category::Videos
        )
    }

    /// Parse a wire name (exact match).
    pub fn parse(s: &str) -> Option<Self> {
        Category::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which categories a search or browse request covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Parse the optional `type` query parameter.
    ///
    /// Absent, empty and `all` mean every category; anything else must be a
    /// category wire name.
    pub fn parse(raw: Option<&str>) -> Result<Self, AppError> {
        match raw.map(str::trim) {
            None | Some("") | Some("all") => Ok(CategoryFilter::All),
            Some(name) => Category::parse(name).map(CategoryFilter::Only).ok_or_else(|| {
                AppError::BadRequest(format!(
                    "Invalid content type '{}'. Expected: all, {}",
                    name,
                    Category::ALL.map(|c| c.as_str()).join(", ")
                ))
            }),
        }
    }

    /// The categories covered, in fan-out order.
    pub fn categories(&self) -> Vec<Category> {
        match self {
            CategoryFilter::All => Category::ALL.to_vec(),
            CategoryFilter::Only(category) => vec![*category],
        }
    }

    pub fn includes(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(only) => *only == category,
        }
    }

    /// Value for the `type` query parameter.
    pub fn as_param(&self) -> &'static str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(category) => category.as_str(),
        }
    }
}

/// A blog post or feature story. Both categories share one shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub author: String,
    /// Markdown body.
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    /// `true` when `video_url` points at an externally hosted player.
    #[serde(default)]
    pub video_embedded: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub image_url: String,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub video_url: String,
    #[serde(default)]
    pub embedded: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pdf {
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub file_url: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub instagram: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    #[serde(default)]
    pub id: String,
    pub name: String,
    /// Normalized copy of `name` backing the directory prefix lookup.
    #[serde(default)]
    pub name_lower: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub socials: SocialLinks,
}

/// One record of any category, tagged with the category it came from.
///
/// An unknown `category` tag fails to deserialize, so every value that exists
/// has a rendering variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category")]
pub enum CandidateRecord {
    #[serde(rename = "blogs")]
    Blog(Story),
    #[serde(rename = "featureStories")]
    FeatureStory(Story),
    #[serde(rename = "photos")]
    Photo(Photo),
    #[serde(rename = "videos")]
    Video(Video),
    #[serde(rename = "pdfs")]
    Pdf(Pdf),
    #[serde(rename = "team_members")]
    TeamMember(TeamMember),
}

impl CandidateRecord {
    pub fn category(&self) -> Category {
        match self {
            CandidateRecord::Blog(_) => Category::Blogs,
            CandidateRecord::FeatureStory(_) => Category::FeatureStories,
            CandidateRecord::Photo(_) => Category::Photos,
            CandidateRecord::Video(_) => Category::Videos,
            CandidateRecord::Pdf(_) => Category::Pdfs,
            CandidateRecord::TeamMember(_) => Category::TeamMembers,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            CandidateRecord::Blog(s) | CandidateRecord::FeatureStory(s) => &s.id,
            CandidateRecord::Photo(p) => &p.id,
            CandidateRecord::Video(v) => &v.id,
            CandidateRecord::Pdf(p) => &p.id,
            CandidateRecord::TeamMember(m) => &m.id,
        }
    }

    /// The value of the category's display field (`title`, or `name` for team members).
    pub fn display_value(&self) -> &str {
        match self {
            CandidateRecord::Blog(s) | CandidateRecord::FeatureStory(s) => &s.title,
            CandidateRecord::Photo(p) => &p.title,
            CandidateRecord::Video(v) => &v.title,
            CandidateRecord::Pdf(p) => &p.title,
            CandidateRecord::TeamMember(m) => &m.name,
        }
    }

    pub fn tags(&self) -> &[String] {
        match self {
            CandidateRecord::Blog(s) | CandidateRecord::FeatureStory(s) => &s.tags,
            CandidateRecord::Photo(p) => &p.tags,
            CandidateRecord::Video(v) => &v.tags,
            CandidateRecord::Pdf(_) | CandidateRecord::TeamMember(_) => &[],
        }
    }

    pub(crate) fn id_mut(&mut self) -> &mut String {
        match self {
            CandidateRecord::Blog(s) | CandidateRecord::FeatureStory(s) => &mut s.id,
            CandidateRecord::Photo(p) => &mut p.id,
            CandidateRecord::Video(v) => &mut v.id,
            CandidateRecord::Pdf(p) => &mut p.id,
            CandidateRecord::TeamMember(m) => &mut m.id,
        }
    }
}
