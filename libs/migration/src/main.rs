use migration::Migrator;
use sea_orm_migration::cli;

/// Reads `DATABASE_URL`; run `migration --help` for the subcommands.
#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
