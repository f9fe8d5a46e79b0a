//! CSV-directory store.
//!
//! Expects one file per record kind inside a directory:
//!
//! | file | columns |
//! |------|---------|
//! | `nodes.csv` | `id,name[,revenue_goal]` |
//! | `participants.csv` | `id,node_id,name` |
//! | `projects.csv` | `id,title,description,node_id` |
//! | `participations.csv` | `project_id,participant_id` |
//! | `revenue.csv` | `node_id,category,amount` |
//! | `counts.csv` (optional) | `node_id,governance_members,publications,wiki_articles` |

use crate::dataset::{
    RawCounts, RawNode, RawParticipant, RawParticipation, RawProject, RawRevenue,
};
use crate::traits::RelationshipStore;
use async_trait::async_trait;
use nodescope_core::{
    Error, Node, NodeCounts, NodeId, Participant, ParticipantId, Project, ProjectId,
    ProjectParticipation, Result, RevenueRecord,
};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// File names read by [`CsvDirectoryStore`].
pub mod files {
    /// Node rows.
    pub const NODES: &str = "nodes.csv";
    /// Participant rows.
    pub const PARTICIPANTS: &str = "participants.csv";
    /// Project rows.
    pub const PROJECTS: &str = "projects.csv";
    /// Participation rows.
    pub const PARTICIPATIONS: &str = "participations.csv";
    /// Revenue rows.
    pub const REVENUE: &str = "revenue.csv";
    /// Supplementary counts (optional).
    pub const COUNTS: &str = "counts.csv";
}

/// What to do with a row that does not deserialize.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BadRows {
    /// Fail the query with `Error::Parse`.
    Fail,
    /// Log the row and leave it out.
    Skip,
}

// Text-only rows, so ids such as `007` stay verbatim.

#[derive(Debug, Deserialize)]
struct CsvParticipant {
    #[serde(default)]
    id: String,
    #[serde(default)]
    node_id: String,
    #[serde(default)]
    name: String,
}

impl From<CsvParticipant> for RawParticipant {
    fn from(row: CsvParticipant) -> Self {
        Self {
            id: row.id,
            node_id: row.node_id,
            name: row.name,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CsvProject {
    #[serde(default)]
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    node_id: String,
}

impl From<CsvProject> for RawProject {
    fn from(row: CsvProject) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            node_id: row.node_id,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CsvParticipation {
    #[serde(default)]
    project_id: String,
    #[serde(default)]
    participant_id: String,
}

impl From<CsvParticipation> for RawParticipation {
    fn from(row: CsvParticipation) -> Self {
        Self {
            project_id: row.project_id,
            participant_id: row.participant_id,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CsvNode {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    revenue_goal: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CsvRevenue {
    #[serde(default)]
    node_id: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    amount: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CsvCounts {
    #[serde(default)]
    node_id: String,
    #[serde(default)]
    governance_members: Option<String>,
    #[serde(default)]
    publications: Option<String>,
    #[serde(default)]
    wiki_articles: Option<String>,
}

fn text_value(text: Option<String>) -> serde_json::Value {
    text.map(serde_json::Value::String)
        .unwrap_or(serde_json::Value::Null)
}

/// A store reading a directory of CSV files, one query at a time.
///
/// Each query reads only the file it needs, fresh from disk.
#[derive(Clone, Debug)]
pub struct CsvDirectoryStore {
    dir: PathBuf,
}

impl CsvDirectoryStore {
    /// Creates a store for the CSV files in `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory being read.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn read_rows<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>> {
        self.read_optional_rows(file, BadRows::Fail).await?.ok_or_else(|| {
            Error::transport(format!(
                "missing {file} in dataset directory {}",
                self.dir.display()
            ))
        })
    }

    async fn read_optional_rows<T: DeserializeOwned>(
        &self,
        file: &str,
        bad_rows: BadRows,
    ) -> Result<Option<Vec<T>>> {
        let path = self.dir.join(file);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(Error::transport_with_source(
                    format!("cannot read {}", path.display()),
                    e,
                ));
            }
        };

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(bytes.as_slice());

        let mut rows = Vec::new();
        for (index, row) in reader.deserialize::<T>().enumerate() {
            // header is line 1
            let line = index + 2;
            match (row, bad_rows) {
                (Ok(row), _) => rows.push(row),
                (Err(e), BadRows::Fail) => {
                    return Err(Error::parse(format!("{} line {line}: {e}", path.display())));
                }
                (Err(e), BadRows::Skip) => {
                    log::warn!("Skipping {} line {line}: {e}", path.display());
                }
            }
        }
        log::debug!("Read {} rows from {}", rows.len(), path.display());
        Ok(Some(rows))
    }
}

#[async_trait]
impl RelationshipStore for CsvDirectoryStore {
    async fn projects_for_node(&self, node_id: &NodeId) -> Result<Vec<Project>> {
        let rows: Vec<CsvProject> = self.read_rows(files::PROJECTS).await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| RawProject::from(row).into_record())
            .filter(|p| &p.node_id == node_id)
            .collect())
    }

    async fn participations_for_projects(
        &self,
        project_ids: &[ProjectId],
    ) -> Result<Vec<ProjectParticipation>> {
        let wanted: HashSet<&ProjectId> = project_ids.iter().collect();
        let rows: Vec<CsvParticipation> = self.read_rows(files::PARTICIPATIONS).await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| RawParticipation::from(row).into_record())
            .filter(|pp| wanted.contains(&pp.project_id))
            .collect())
    }

    async fn participants_by_ids(&self, ids: &[ParticipantId]) -> Result<Vec<Participant>> {
        let wanted: HashSet<&ParticipantId> = ids.iter().collect();
        let rows: Vec<CsvParticipant> = self.read_rows(files::PARTICIPANTS).await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| RawParticipant::from(row).into_record())
            .filter(|p| wanted.contains(&p.id))
            .collect())
    }

    async fn nodes_by_ids(&self, ids: &[NodeId]) -> Result<Vec<Node>> {
        let wanted: HashSet<&NodeId> = ids.iter().collect();
        let rows: Vec<CsvNode> = self.read_rows(files::NODES).await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| {
                RawNode {
                    id: row.id,
                    name: row.name,
                    revenue_goal: text_value(row.revenue_goal),
                }
                .into_record()
            })
            .filter(|n| wanted.contains(&n.id))
            .collect())
    }

    async fn revenue_for_node(&self, node_id: &NodeId) -> Result<Vec<RevenueRecord>> {
        let rows: Vec<CsvRevenue> = self.read_rows(files::REVENUE).await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| {
                RawRevenue {
                    node_id: row.node_id,
                    category: row.category,
                    amount: text_value(row.amount),
                }
                .into_record()
            })
            .filter(|r| &r.node_id == node_id)
            .collect())
    }

    async fn node_counts(&self, node_id: &NodeId) -> Result<Option<NodeCounts>> {
        let Some(rows) = self
            .read_optional_rows::<CsvCounts>(files::COUNTS, BadRows::Skip)
            .await?
        else {
            return Ok(None);
        };
        Ok(rows
            .into_iter()
            .filter_map(|row| {
                RawCounts {
                    node_id: row.node_id,
                    governance_members: text_value(row.governance_members),
                    publications: text_value(row.publications),
                    wiki_articles: text_value(row.wiki_articles),
                }
                .into_entry()
            })
            .find(|(id, _)| id == node_id)
            .map(|(_, counts)| counts))
    }
}
