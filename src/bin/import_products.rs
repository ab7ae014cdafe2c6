// ==========================================
// 医药产品目录服务 - 命令行批量导入
// ==========================================
// 用法: import_products <FILE> [--db-path PATH] [--config FILE]
// 说明: 数据库路径优先级 --db-path / PHARMA__DATABASE__PATH > 配置文件 > 默认数据目录
// ==========================================

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use clap::Parser;
use pharma_catalog::api::ImportApi;
use pharma_catalog::config::ImportToolConfig;
use pharma_catalog::db::open_and_migrate;
use pharma_catalog::logging;
use pharma_catalog::repository::SqliteCatalogRepository;

#[derive(Parser, Debug)]
#[command(name = "import_products")]
#[command(about = "Import a product spreadsheet (.xlsx/.xls/.ods/.csv) into the catalog database")]
#[command(version)]
struct Args {
    /// Spreadsheet to import
    file: PathBuf,

    /// SQLite database path
    #[arg(long, env = "PHARMA__DATABASE__PATH")]
    db_path: Option<PathBuf>,

    /// Config file (default: config/pharma-catalog.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(false);

    let config = ImportToolConfig::load_from(args.config.as_deref())
        .context("failed to load configuration")?;
    let db_path = args
        .db_path
        .unwrap_or_else(|| PathBuf::from(&config.database.path));

    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("cannot create {}", parent.display()))?;
        }
    }

    let db_path_str = db_path.to_string_lossy();
    let conn = open_and_migrate(&db_path_str)
        .with_context(|| format!("cannot open database {}", db_path_str))?;
    let repo = Arc::new(SqliteCatalogRepository::from_connection(Arc::new(
        Mutex::new(conn),
    )));

    let api = ImportApi::new(repo, config.import_options());
    let summary = api.import_file(&args.file).await?;
    let response = summary.to_response();

    println!("{}", response.message);
    println!(
        "rows={} success={} failed={} skipped={} elapsed={:.2?}",
        summary.total_rows, summary.success, summary.failed, summary.skipped, summary.elapsed
    );
    for error in &response.errors {
        println!("  {}", error);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use clap::CommandFactory;

    #[test]
    fn test_command_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_help_does_not_become_file_argument() {
        let err = Args::try_parse_from(["import_products", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_file_is_required() {
        let err = Args::try_parse_from(["import_products"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_explicit_db_path() {
        let args = Args::try_parse_from([
            "import_products",
            "products.xlsx",
            "--db-path",
            "/tmp/catalog.db",
        ])
        .unwrap();
        assert_eq!(args.file, PathBuf::from("products.xlsx"));
        assert_eq!(args.db_path, Some(PathBuf::from("/tmp/catalog.db")));
        assert!(args.config.is_none());
    }
}
