use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Items::Table)
                    .if_not_exists()
                    .col(big_integer(Items::Id).auto_increment().primary_key())
                    // Byte-order collation so ORDER BY agrees with the in-memory store
                    .col(string_len(Items::Name, 255).extra("COLLATE \"C\""))
                    .col(text_null(Items::Description).extra("COLLATE \"C\""))
                    .col(double(Items::Price))
                    .col(boolean(Items::InStock).default(true))
                    .col(boolean(Items::IsDeleted).default(false))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_items_name")
                    .table(Items::Table)
                    .col(Items::Name)
                    .to_owned(),
            )
            .await?;

        // Every listing filters on the partition flag
        manager
            .create_index(
                Index::create()
                    .name("idx_items_is_deleted")
                    .table(Items::Table)
                    .col(Items::IsDeleted)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Items::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Items {
    Table,
    Id,
    Name,
    Description,
    Price,
    InStock,
    IsDeleted,
}
