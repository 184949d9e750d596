// ==========================================
// 目录批量导入 - 命令行入口
// ==========================================
// 用法: catalog-import <products|equipment> <file.csv|file.xlsx> --owner <id>
//                      [--db <path>] [--validate-only]
// 输出: stdout 为 JSON 结果；日志写 stderr
// 退出码: 0 全部成功 / 1 存在失败行或校验错误 / 2 参数或装配错误
// ==========================================

use anyhow::{bail, Context};
use catalog_import::app::{get_default_db_path, AppState};
use catalog_import::identity::{IdentityProvider, StaticIdentity};
use catalog_import::{logging, EntityKind, UploadResult};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

const USAGE: &str = "usage: catalog-import <products|equipment> <file.csv|file.xlsx> --owner <id> [--db <path>] [--validate-only]";

#[derive(Debug)]
struct CliArgs {
    kind: EntityKind,
    file: PathBuf,
    owner_id: String,
    db_path: String,
    validate_only: bool,
}

fn parse_args<I: Iterator<Item = String>>(mut args: I) -> anyhow::Result<CliArgs> {
    let mut positional = Vec::new();
    let mut owner_id = None;
    let mut db_path = None;
    let mut validate_only = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--owner" => owner_id = Some(args.next().context("--owner requires a value")?),
            "--db" => db_path = Some(args.next().context("--db requires a value")?),
            "--validate-only" => validate_only = true,
            "-h" | "--help" => bail!(USAGE),
            flag if flag.starts_with("--") => bail!("unknown option: {}\n{}", flag, USAGE),
            _ => positional.push(arg),
        }
    }

    if positional.len() != 2 {
        bail!(USAGE);
    }

    let kind: EntityKind = positional[0]
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    Ok(CliArgs {
        kind,
        file: PathBuf::from(&positional[1]),
        owner_id: owner_id.context("--owner is required")?,
        db_path: db_path.unwrap_or_else(get_default_db_path),
        validate_only,
    })
}

async fn run(args: CliArgs) -> anyhow::Result<bool> {
    tracing::info!("==================================================");
    tracing::info!("{} v{}", catalog_import::APP_NAME, catalog_import::VERSION);
    tracing::info!("使用数据库: {}", args.db_path);
    tracing::info!("==================================================");

    let state = AppState::new(args.db_path.clone()).context("failed to initialise application")?;
    let api = state.catalog_import_api.clone();
    let identity: Arc<dyn IdentityProvider> = Arc::new(StaticIdentity::authenticated(&args.owner_id));

    if args.validate_only {
        let rows = api.parse_file(&args.file)?;
        let errors = api.validate(identity, args.kind, &rows);
        println!("{}", serde_json::to_string_pretty(&errors)?);
        return Ok(errors.is_empty());
    }

    let result: UploadResult = api.import_file(identity, args.kind, &args.file).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);

    let total = api.count(args.kind, &args.owner_id).await?;
    tracing::info!(kind = %args.kind, total, "归属范围内记录总数");

    Ok(result.failed_count == 0)
}

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(2);
        }
    };

    match run(args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            tracing::error!("导入失败: {:#}", e);
            eprintln!("error: {:#}", e);
            ExitCode::from(2)
        }
    }
}
