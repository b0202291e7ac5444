//! Schema synchronization for the `posts` table.

use sea_orm::sea_query::{
    Expr, Index, IndexCreateStatement, Table, TableAlterStatement, TableCreateStatement,
};
use sea_orm::{
    ConnectionTrait, DatabaseBackend, DatabaseConnection, DbErr, EntityName, IdenStatic, Iterable,
    Schema,
};
use sea_orm_migration::SchemaManager;

use super::BootstrapError;
use super::entity::post;

const CREATED_AT_INDEX: &str = "idx_posts_created_at";

/// `CREATE TABLE IF NOT EXISTS` derived from the post entity.
pub fn create_table_statement(backend: DatabaseBackend) -> TableCreateStatement {
    Schema::new(backend)
        .create_table_from_entity(post::Entity)
        .if_not_exists()
        .to_owned()
}

/// Index backing the newest-first listing.
pub fn created_at_index_statement() -> IndexCreateStatement {
    Index::create()
        .if_not_exists()
        .name(CREATED_AT_INDEX)
        .table(post::Entity)
        .col(post::Column::CreatedAt)
        .to_owned()
}

/// `ADD COLUMN` for a column missing from an existing table.
///
/// Every column is `NOT NULL`, so a default is required for tables that
/// already hold rows.
pub fn add_column_statement(backend: DatabaseBackend, column: post::Column) -> TableAlterStatement {
    let mut def = Schema::new(backend).get_column_def::<post::Entity>(column);
    match column {
        post::Column::CreatedAt | post::Column::UpdatedAt => def.default(Expr::current_timestamp()),
        _ => def.default(""),
    };

    Table::alter()
        .table(post::Entity)
        .add_column(&mut def)
        .to_owned()
}

/// Ensure the `posts` table exists with every declared column.
///
/// Missing tables are created outright. For an existing table, any column
/// that is absent is added. Columns are never dropped or retyped.
pub async fn sync_schema(db: &DatabaseConnection) -> Result<(), BootstrapError> {
    sync(db).await.map_err(BootstrapError::Schema)
}

async fn sync(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let manager = SchemaManager::new(db);
    let entity = post::Entity;
    let table = entity.table_name();

    if !manager.has_table(table).await? {
        tracing::info!(table, "Creating table");
        manager.create_table(create_table_statement(backend)).await?;
    } else {
        for column in post::Column::iter().filter(|c| !matches!(c, post::Column::Id)) {
            if manager.has_column(table, column.as_str()).await? {
                continue;
            }

            tracing::info!(table, column = column.as_str(), "Adding missing column");
            manager
                .alter_table(add_column_statement(backend, column))
                .await?;
        }
    }

    manager.create_index(created_at_index_statement()).await?;

    tracing::debug!(table, "Schema synchronized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_table_statement_matches_post_shape() {
        let backend = DatabaseBackend::Postgres;
        let sql = backend.build(&create_table_statement(backend)).to_string();

        assert!(sql.starts_with(r#"CREATE TABLE IF NOT EXISTS "posts""#));
        assert!(sql.contains(r#""title" varchar"#));
        assert!(sql.contains(r#""content" text"#));
        assert!(sql.contains(r#""image_url" varchar(500)"#));
        assert!(sql.contains(r#""created_at""#));
        assert!(sql.contains(r#""updated_at""#));
        assert!(sql.contains("PRIMARY KEY"));
    }

    #[test]
    fn test_added_columns_have_defaults() {
        let backend = DatabaseBackend::Postgres;
        let sql = |column| backend.build(&add_column_statement(backend, column)).to_string();

        let title = sql(post::Column::Title);
        assert!(title.starts_with(r#"ALTER TABLE "posts" ADD COLUMN "title""#));
        assert!(title.contains("NOT NULL"));
        assert!(title.contains("DEFAULT ''"));

        assert!(sql(post::Column::Content).contains("DEFAULT ''"));
        assert!(sql(post::Column::ImageUrl).contains("DEFAULT ''"));
        assert!(sql(post::Column::CreatedAt).contains("DEFAULT CURRENT_TIMESTAMP"));
        assert!(sql(post::Column::UpdatedAt).contains("DEFAULT CURRENT_TIMESTAMP"));
    }

    #[test]
    fn test_created_at_index_statement() {
        let sql = DatabaseBackend::Postgres.build(&created_at_index_statement()).to_string();

        assert!(sql.starts_with(r#"CREATE INDEX IF NOT EXISTS "idx_posts_created_at""#));
        assert!(sql.contains(r#"ON "posts" ("created_at")"#));
    }
}
