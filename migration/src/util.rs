use sea_orm_migration::prelude::*;

pub(crate) fn default_table_statement() -> TableCreateStatement {
    TableCreateStatement::new()
        .if_not_exists()
        .col(ColumnDef::new(DefaultColumn::Id)
            .uuid()
            .primary_key()
            .default(Expr::cust("GEN_RANDOM_UUID()"))
            .take())
        .col(ColumnDef::new(DefaultColumn::CreatedAt)
            .timestamp_with_time_zone()
            .not_null()
            .default(Expr::current_timestamp())
            .take())
        .col(ColumnDef::new(DefaultColumn::UpdatedAt)
            .timestamp_with_time_zone()
            .not_null()
            .default(Expr::current_timestamp())
            .take())
        .take()
}

/// Table owned by a tenant, every row carries the `organization_id` queries are scoped by
///
/// # Example
///
/// ```rs
/// manager
///     .create_table(default_organization_table_statement()
///         .table(Job::Table)
///         .col(ColumnDef::new(Job::Name)
///             .text()
///             .not_null())
///         .take()
///     ).await?;
/// ```
pub(crate) fn default_organization_table_statement() -> TableCreateStatement {
    default_table_statement()
        .col(ColumnDef::new(OrganizationColumn::OrganizationId)
            .uuid()
            .not_null())
        .take()
}

/// Not-null numeric column for peso amounts
pub(crate) fn amount(column: impl IntoIden) -> ColumnDef {
    ColumnDef::new(column)
        .decimal_len(16, 2)
        .not_null()
        .take()
}

#[derive(DeriveIden)]
pub(crate) enum DefaultColumn {
    Id,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum OrganizationColumn {
    OrganizationId,
}
