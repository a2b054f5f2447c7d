//! Postgres + pgvector store.
//!
//! Reads and writes the collection/embedding tables used by LangChain's
//! `PGVector`, so collections ingested by other tooling are searchable
//! here and the other way round.

use crate::embeddings::EmbeddingProvider;
use crate::vector_store::VectorStore;
use async_trait::async_trait;
use pdfchat_core::{AppError, AppResult, Chunk, DistanceStrategy, ScoredChunk};
use serde_json::{Map, Value};
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;
use std::sync::Arc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

const MAX_CONNECTIONS: u32 = 5;

/// SQLSTATE raised by Postgres for a missing table (`undefined_table`).
const UNDEFINED_TABLE: &str = "42P01";

const SCHEMA_STATEMENTS: [&str; 3] = [
    "CREATE EXTENSION IF NOT EXISTS vector",
    "CREATE TABLE IF NOT EXISTS langchain_pg_collection (
        uuid UUID PRIMARY KEY,
        name VARCHAR NOT NULL UNIQUE,
        cmetadata JSON
    )",
    "CREATE TABLE IF NOT EXISTS langchain_pg_embedding (
        id VARCHAR PRIMARY KEY,
        collection_id UUID REFERENCES langchain_pg_collection (uuid) ON DELETE CASCADE,
        embedding VECTOR,
        document VARCHAR,
        cmetadata JSONB
    )",
];

const INSERT_COLLECTION: &str = "INSERT INTO langchain_pg_collection (uuid, name, cmetadata)
    VALUES ($1, $2, '{}'::json)
    ON CONFLICT (name) DO NOTHING";

const SELECT_COLLECTION: &str = "SELECT uuid FROM langchain_pg_collection WHERE name = $1";

const UPSERT_EMBEDDING: &str =
    "INSERT INTO langchain_pg_embedding (id, collection_id, embedding, document, cmetadata)
    VALUES ($1, $2, $3::text::vector, $4, $5)
    ON CONFLICT (id) DO UPDATE SET
        collection_id = EXCLUDED.collection_id,
        embedding = EXCLUDED.embedding,
        document = EXCLUDED.document,
        cmetadata = EXCLUDED.cmetadata";

/// Vector store backed by a pgvector collection.
#[derive(Clone)]
pub struct PgVectorStore {
    pool: PgPool,
    embeddings: Arc<dyn EmbeddingProvider>,
    collection: String,
    distance: DistanceStrategy,
}

impl std::fmt::Debug for PgVectorStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgVectorStore")
            .field("collection", &self.collection)
            .field("distance", &self.distance)
            .field("embeddings", &self.embeddings)
            .finish_non_exhaustive()
    }
}

impl PgVectorStore {
    /// Bind a store to `collection` without opening a connection.
    ///
    /// The pool connects on first use, so an unreachable database surfaces
    /// as a retrieval error on the first query rather than here.
    pub fn connect_lazy(
        database_url: &str,
        collection: impl Into<String>,
        embeddings: Arc<dyn EmbeddingProvider>,
        distance: DistanceStrategy,
    ) -> AppResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_lazy(database_url)
            .map_err(|e| AppError::Config(format!("Invalid DATABASE_URL: {}", e)))?;

        Ok(Self {
            pool,
            embeddings,
            collection: collection.into(),
            distance,
        })
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn distance(&self) -> DistanceStrategy {
        self.distance
    }

    /// Create the extension and tables if they are missing.
    async fn ensure_schema(&self) -> AppResult<()> {
        for statement in SCHEMA_STATEMENTS {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| db_error("create schema", e))?;
        }
        Ok(())
    }

    /// Look up the collection id, creating the collection row if needed.
    async fn ensure_collection(&self) -> AppResult<Uuid> {
        sqlx::query(INSERT_COLLECTION)
            .bind(Uuid::new_v4())
            .bind(&self.collection)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("create collection", e))?;

        let row = sqlx::query(SELECT_COLLECTION)
            .bind(&self.collection)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("load collection", e))?;

        row.try_get("uuid").map_err(|e| db_error("read collection id", e))
    }
}

#[async_trait]
impl VectorStore for PgVectorStore {
    #[instrument(skip(self, query), fields(collection = %self.collection))]
    async fn similarity_search(&self, query: &str, k: usize) -> AppResult<Vec<ScoredChunk>> {
        let embedding = self.embeddings.embed(query).await?;

        let rows = match sqlx::query(&search_sql(self.distance))
            .bind(to_vector_literal(&embedding))
            .bind(&self.collection)
            .bind(i64::try_from(k).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await
        {
            Ok(rows) => rows,
            // Nothing has been ingested into this database yet
            Err(e) if is_undefined_table(sqlstate(&e).as_deref()) => {
                debug!("Vector tables not created yet, no results");
                Vec::new()
            }
            Err(e) => return Err(db_error("similarity search", e)),
        };

        let results = rows
            .iter()
            .map(row_to_scored_chunk)
            .collect::<AppResult<Vec<_>>>()?;

        debug!("Retrieved {} chunks", results.len());
        Ok(results)
    }

    #[instrument(skip(self, chunks, ids), fields(collection = %self.collection, count = chunks.len()))]
    async fn add_chunks(&self, chunks: &[Chunk], ids: &[String]) -> AppResult<()> {
        if chunks.len() != ids.len() {
            return Err(AppError::Retrieval(format!(
                "Got {} chunks but {} ids",
                chunks.len(),
                ids.len()
            )));
        }
        if chunks.is_empty() {
            return Ok(());
        }

        let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
        let embeddings = self.embeddings.embed_batch(&texts).await?;
        if embeddings.len() != chunks.len() {
            return Err(AppError::Embedding(format!(
                "Expected {} embeddings, got {}",
                chunks.len(),
                embeddings.len()
            )));
        }

        self.ensure_schema().await?;
        let collection_id = self.ensure_collection().await?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("begin transaction", e))?;

        for ((chunk, id), embedding) in chunks.iter().zip(ids).zip(&embeddings) {
            sqlx::query(UPSERT_EMBEDDING)
                .bind(id)
                .bind(collection_id)
                .bind(to_vector_literal(embedding))
                .bind(&chunk.content)
                .bind(Value::Object(chunk.metadata.clone()))
                .execute(&mut *tx)
                .await
                .map_err(|e| db_error("insert embedding", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| db_error("commit transaction", e))?;

        info!("Stored {} chunks in '{}'", chunks.len(), self.collection);
        Ok(())
    }
}

/// Nearest-neighbour query for the given distance strategy.
///
/// Binds: `$1` query vector literal, `$2` collection name, `$3` limit.
/// The returned `distance` column is the raw operator value, lower is closer.
fn search_sql(distance: DistanceStrategy) -> String {
    let operator = match distance {
        DistanceStrategy::Cosine => "<=>",
        DistanceStrategy::Euclidean => "<->",
        DistanceStrategy::InnerProduct => "<#>",
    };

    format!(
        "SELECT e.document, e.cmetadata, (e.embedding {op} $1::text::vector)::float8 AS distance
        FROM langchain_pg_embedding e
        JOIN langchain_pg_collection c ON e.collection_id = c.uuid
        WHERE c.name = $2
        ORDER BY distance ASC
        LIMIT $3",
        op = operator
    )
}

/// Format an embedding in pgvector's text input form, e.g. `[0.1,0.2]`.
fn to_vector_literal(embedding: &[f32]) -> String {
    let values: Vec<String> = embedding.iter().map(|v| v.to_string()).collect();
    format!("[{}]", values.join(","))
}

fn row_to_scored_chunk(row: &PgRow) -> AppResult<ScoredChunk> {
    let content: Option<String> = row
        .try_get("document")
        .map_err(|e| db_error("read document", e))?;
    let metadata: Option<Value> = row
        .try_get("cmetadata")
        .map_err(|e| db_error("read metadata", e))?;
    let score: f64 = row
        .try_get("distance")
        .map_err(|e| db_error("read distance", e))?;

    Ok(ScoredChunk::new(
        Chunk {
            content: content.unwrap_or_default(),
            metadata: metadata_map(metadata),
        },
        score,
    ))
}

fn metadata_map(metadata: Option<Value>) -> Map<String, Value> {
    match metadata {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

fn sqlstate(err: &sqlx::Error) -> Option<String> {
    err.as_database_error()
        .and_then(|db| db.code())
        .map(|code| code.into_owned())
}

fn is_undefined_table(code: Option<&str>) -> bool {
    code == Some(UNDEFINED_TABLE)
}

fn db_error(action: &str, err: sqlx::Error) -> AppError {
    AppError::Retrieval(format!("Failed to {}: {}", action, err))
}
