use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Column checks mirror the request validation rules
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_uuid(Users::Id))
                    .col(
                        string_len(Users::Name, 100)
                            .check(Expr::cust("length(trim(name)) > 0 AND length(name) BETWEEN 2 AND 100")),
                    )
                    .col(integer(Users::Age).check(Expr::cust("age BETWEEN 0 AND 120")))
                    .col(string(Users::City).check(Expr::cust("length(trim(city)) > 0")))
                    .col(string(Users::State).check(Expr::cust("length(trim(state)) > 0")))
                    .col(
                        string_len(Users::Pincode, 10).check(Expr::cust(
                            "length(trim(pincode)) > 0 AND length(pincode) BETWEEN 4 AND 10",
                        )),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_users_name")
                    .table(Users::Table)
                    .col(Users::Name)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Name,
    Age,
    City,
    State,
    Pincode,
}
