//! # healthmate-app
//!
//! HEALTHMATE 클라이언트 CLI 진입점.
//! 설정 로드, 토큰 저장소/화면 이동기 어댑터 생성, 네트워크 스택 와이어링 후
//! 하위 명령을 실행한다.

mod commands;
mod navigator;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use healthmate_core::config_manager::ConfigManager;
use healthmate_core::models::request::HttpMethod;
use healthmate_network::auth::FileTokenStore;
use healthmate_network::stack::ApiStack;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use crate::navigator::ConsoleNavigator;

/// HEALTHMATE 클라이언트
///
/// 복약 관리 백엔드 REST/SSE API 호출 도구
#[derive(Parser, Debug)]
#[command(name = "healthmate")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 서버 URL 지정 (설정 파일, 환경 변수보다 우선)
    #[arg(long, short = 's', global = true)]
    server: Option<String>,

    /// 설정 파일 경로 (기본: 플랫폼 설정 디렉토리의 config.json)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// API 호출 (GET/DELETE 본문은 쿼리 문자열로 전송)
    Call {
        /// HTTP 메서드 (GET, POST, PUT, DELETE)
        method: HttpMethod,
        /// 기본 URL 뒤에 붙는 경로 (예: /med/today)
        path: String,
        /// JSON 본문
        #[arg(long)]
        body: Option<String>,
    },
    /// AI 대화 (SSE 스트림)
    Chat {
        message: String,
        /// 이어갈 대화 ID
        #[arg(long)]
        conversation_id: Option<String>,
    },
    /// 저장된 토큰 관리
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },
}

#[derive(Subcommand, Debug)]
enum TokenAction {
    /// 토큰 저장 ("Bearer " 접두사 허용)
    Set { token: String },
    /// 토큰 삭제
    Clear,
    /// 토큰 표시 (마스킹)
    Show,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let log_filter = format!(
        "healthmate={0},healthmate_core={0},healthmate_network={0}",
        args.log_level
    );
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)),
        )
        .init();

    match run(args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{e:#}");
            eprintln!("오류: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<bool> {
    let manager = match &args.config {
        Some(path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    }
    .context("설정 로드 실패")?;

    let token_path = manager.token_path();
    let mut config = manager.into_config();
    if let Some(server) = args.server {
        config.server.base_url = server;
    }
    debug!(base_url = %config.server.base_url, token_path = %token_path.display(), "설정 확정");

    let token_store =
        Arc::new(FileTokenStore::open(&token_path).context("토큰 저장소 열기 실패")?);
    let mut out = io::stdout();

    let action = match args.command {
        Command::Token { action } => action,
        command => {
            let navigator = Arc::new(ConsoleNavigator::new());
            let stack = ApiStack::from_config(&config, token_store, navigator)?;
            return run_api(&stack, command, &mut out).await;
        }
    };

    match action {
        TokenAction::Set { token } => commands::token_set(&*token_store, &token, &mut out),
        TokenAction::Clear => commands::token_clear(&*token_store, &mut out),
        TokenAction::Show => commands::token_show(&*token_store, &mut out),
    }
}

async fn run_api(stack: &ApiStack, command: Command, out: &mut io::Stdout) -> Result<bool> {
    match command {
        Command::Call { method, path, body } => {
            commands::call(stack, method, &path, body.as_deref(), out).await
        }
        Command::Chat {
            message,
            conversation_id,
        } => commands::chat(stack, &message, conversation_id.as_deref(), out).await,
        Command::Token { .. } => Ok(true),
    }
}
