//! Seed the catalog from a YAML file.
//!
//! The whole file is parsed and validated before the database is touched, so
//! a bad chapter never leaves a half-seeded catalog behind. This is the only
//! path that creates chapters.
//!
//! ```yaml
//! webtoons:
//!   - title: Tower of Dawn
//!     description: A climb that never ends.
//!     cover_image: https://img.example.com/tower/cover.png
//!     chapters:
//!       - title: Episode 1
//!         images:
//!           - https://img.example.com/tower/1/001.png
//!           - https://img.example.com/tower/1/002.png
//! ```

use std::path::Path;

use serde::Deserialize;
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{error, info};

use webtoon_core::ImageSequence;
use webtoon_server::config::ServerConfig;
use webtoon_server::db::{self, ChapterRepository, RepositoryError, WebtoonRepository};
use webtoon_server::models::{NewChapter, NewWebtoon};

/// Errors from loading a catalog file.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read catalog: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("{} validation errors found", .0.len())]
    Invalid(Vec<String>),

    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Catalog file layout.
#[derive(Debug, Deserialize)]
pub struct Catalog {
    pub webtoons: Vec<WebtoonEntry>,
}

#[derive(Debug, Deserialize)]
pub struct WebtoonEntry {
    pub title: String,
    pub description: String,
    pub cover_image: String,
    #[serde(default)]
    pub chapters: Vec<ChapterEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ChapterEntry {
    pub title: String,
    pub images: Vec<String>,
}

/// A webtoon whose chapters have passed validation.
#[derive(Debug)]
pub struct SeedWebtoon {
    pub webtoon: NewWebtoon,
    pub chapters: Vec<(String, ImageSequence)>,
}

/// Counts of inserted rows.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub webtoons: usize,
    pub chapters: usize,
}

/// Check every entry, collecting all problems rather than stopping at the first.
///
/// # Errors
///
/// Returns `SeedError::Invalid` listing each bad entry.
pub fn validate(catalog: Catalog) -> Result<Vec<SeedWebtoon>, SeedError> {
    let mut problems = Vec::new();
    let mut validated = Vec::with_capacity(catalog.webtoons.len());

    for (w, entry) in catalog.webtoons.into_iter().enumerate() {
        if entry.title.trim().is_empty() {
            problems.push(format!("webtoons[{w}]: title is empty"));
        }

        let mut chapters = Vec::with_capacity(entry.chapters.len());
        for (c, chapter) in entry.chapters.into_iter().enumerate() {
            match ImageSequence::new(chapter.images) {
                Ok(images) => chapters.push((chapter.title, images)),
                Err(e) => problems.push(format!("webtoons[{w}].chapters[{c}]: {e}")),
            }
        }

        validated.push(SeedWebtoon {
            webtoon: NewWebtoon {
                title: entry.title.trim().to_string(),
                description: entry.description,
                cover_image: entry.cover_image,
            },
            chapters,
        });
    }

    if problems.is_empty() {
        Ok(validated)
    } else {
        Err(SeedError::Invalid(problems))
    }
}

/// Insert validated webtoons and their chapters in file order.
///
/// # Errors
///
/// Returns `RepositoryError` if an insert fails.
pub async fn insert(
    pool: &SqlitePool,
    webtoons: Vec<SeedWebtoon>,
) -> Result<SeedSummary, RepositoryError> {
    let webtoon_repo = WebtoonRepository::new(pool);
    let chapter_repo = ChapterRepository::new(pool);
    let mut summary = SeedSummary::default();

    for seed in webtoons {
        let webtoon = webtoon_repo.create(&seed.webtoon).await?;
        summary.webtoons += 1;

        for (title, images) in seed.chapters {
            chapter_repo
                .create(&NewChapter {
                    webtoon_id: webtoon.id,
                    title,
                    images,
                })
                .await?;
            summary.chapters += 1;
        }

        info!(webtoon_id = %webtoon.id, title = %webtoon.title, "Seeded webtoon");
    }

    Ok(summary)
}

/// Seed the catalog from `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, fails validation,
/// or the database writes fail.
pub async fn run(path: &Path, dry_run: bool) -> Result<(), Box<dyn std::error::Error>> {
    info!(path = %path.display(), "Loading catalog from file");

    let content = tokio::fs::read_to_string(path).await.map_err(SeedError::from)?;
    let catalog: Catalog = serde_yaml::from_str(&content).map_err(SeedError::from)?;
    info!(webtoons = catalog.webtoons.len(), "Parsed catalog");

    let webtoons = match validate(catalog) {
        Ok(webtoons) => webtoons,
        Err(SeedError::Invalid(problems)) => {
            error!("Catalog validation failed:");
            for problem in &problems {
                error!("  - {problem}");
            }
            return Err(SeedError::Invalid(problems).into());
        }
        Err(e) => return Err(e.into()),
    };
    info!("Catalog validated successfully");

    if dry_run {
        info!("Dry run, nothing written");
        return Ok(());
    }

    let config = ServerConfig::from_env()?;
    let pool = db::create_pool(&config.database_url).await?;
    db::migrate(&pool).await?;
    info!("Connected to database");

    let summary = insert(&pool, webtoons).await.map_err(SeedError::from)?;

    info!("Seeding complete!");
    info!("  Webtoons inserted: {}", summary.webtoons);
    info!("  Chapters inserted: {}", summary.chapters);

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const CATALOG: &str = r"
webtoons:
  - title: Tower of Dawn
    description: A climb that never ends.
    cover_image: https://img.example.com/tower/cover.png
    chapters:
      - title: Episode 1
        images: [p1.png, p2.png, p3.png]
      - title: Episode 2
        images: [q1.png]
  - title: Quiet Harbor
    description: Fishing, mostly.
    cover_image: /uploads/harbor.png
";

    fn parse(yaml: &str) -> Catalog {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_validate_accepts_sample_shape() {
        let webtoons = validate(parse(CATALOG)).unwrap();
        assert_eq!(webtoons.len(), 2);
        assert_eq!(webtoons[0].chapters.len(), 2);
        assert_eq!(
            webtoons[0].chapters[0].1.as_slice(),
            ["p1.png", "p2.png", "p3.png"]
        );
        assert!(webtoons[1].chapters.is_empty());
    }

    #[test]
    fn test_validate_collects_every_problem() {
        let catalog = parse(
            r"
webtoons:
  - title: ''
    description: d
    cover_image: c.png
    chapters:
      - title: Empty
        images: []
      - title: Delimiter
        images: ['a.png,b.png']
",
        );

        let Err(SeedError::Invalid(problems)) = validate(catalog) else {
            panic!("expected validation errors");
        };
        assert_eq!(problems.len(), 3);
        assert!(problems[0].contains("title is empty"));
        assert!(problems[1].starts_with("webtoons[0].chapters[0]"));
        assert!(problems[2].starts_with("webtoons[0].chapters[1]"));
    }

    #[test]
    fn test_bundled_sample_is_valid() {
        let sample = include_str!("../../seed/sample.yaml");
        assert!(validate(parse(sample)).is_ok());
    }

    #[tokio::test]
    async fn test_insert_writes_chapters_in_order() {
        let pool = db::create_memory_pool().await.unwrap();
        db::migrate(&pool).await.unwrap();

        let summary = insert(&pool, validate(parse(CATALOG)).unwrap())
            .await
            .unwrap();
        assert_eq!(
            summary,
            SeedSummary {
                webtoons: 2,
                chapters: 2
            }
        );

        let webtoons = WebtoonRepository::new(&pool).list_newest_first().await.unwrap();
        let tower = webtoons.iter().find(|w| w.title == "Tower of Dawn").unwrap();
        let chapters = ChapterRepository::new(&pool)
            .list_for_webtoon(tower.id)
            .await
            .unwrap();
        let titles: Vec<_> = chapters.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, ["Episode 1", "Episode 2"]);
        assert_eq!(chapters[0].images.len(), 3);
    }
}
